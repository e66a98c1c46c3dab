use chrono::Duration;
use jwtoken::{Parser, ResolverError, TokenBuilder};
use serde_json::json;

use std::collections::HashMap;

fn main() {
  let mut keys: HashMap<&str, &[u8]> = HashMap::new();
  keys.insert("gandalf0", b"YELLOW SUBMARINE, BLACK WIZARDRY");
  keys.insert("saruman1", b"BLUE SUBMARINE, WHITE WIZARDRY");

  let token = TokenBuilder::for_algorithm("HS512")
    .expect("HS512 is not registered.")
    .set_key_id("gandalf0")
    .set_issued_at(None)
    .set_expires_in(Duration::hours(1))
    .set_issuer("middle-earth")
    .set_subject("gandalf")
    .set_claim("go-to", json!("mordor"))
    .sign(keys["gandalf0"])
    .expect("Failed to construct token w/ builder!");
  println!("{}", token);

  let parser = Parser::default().expect_algorithms(&["HS256", "HS512"]);
  let verified = parser
    .parse(&token, |unverified| -> Result<&[u8], ResolverError> {
      let kid = unverified.header.get_str("kid")?;
      keys.get(kid).copied().ok_or_else(|| format!("no key with id {}", kid).into())
    })
    .expect("Failed to validate token!");
  println!("{:?}", verified.claims);
}
