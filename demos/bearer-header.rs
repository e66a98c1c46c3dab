use jwtoken::{parse_from_carrier, TokenBuilder};

use std::collections::HashMap;

fn main() {
  let key = "YELLOW SUBMARINE, BLACK WIZARDRY".as_bytes();
  let token = TokenBuilder::for_algorithm("HS256")
    .expect("HS256 is not registered.")
    .set_subject("frodo")
    .sign(key)
    .expect("Failed to sign token.");

  let mut headers = HashMap::new();
  headers.insert("authorization".to_owned(), format!("Bearer {}", token));

  let parsed = parse_from_carrier(&headers, |_| Ok(key)).expect("Failed to validate bearer token.");
  println!("{:?}", parsed.claims.get_str("sub"));

  headers.clear();
  match parse_from_carrier(&headers, |_| Ok(key)) {
    Ok(_) => println!("empty headers produced a token?!"),
    Err(err) => println!("{}", err),
  }
}
