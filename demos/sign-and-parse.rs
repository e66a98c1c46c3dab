use jwtoken::{parse, Token};

fn main() {
  let key = "YELLOW SUBMARINE, BLACK WIZARDRY".as_bytes();

  let mut token = Token::with_algorithm("HS256").expect("HS256 is not registered.");
  token.claims.insert("sub", "1234567890");
  token.claims.insert("name", "J Doe");

  let signed = token.signed_string(key).expect("Failed to sign token.");
  println!("{}", signed);

  let parsed = parse(&signed, |_| Ok(key)).expect("Failed to validate token.");
  println!("valid: {} claims: {:?}", parsed.is_valid(), parsed.claims);

  match parse(&signed, |_| Ok(b"wrong")) {
    Ok(_) => println!("wrong key was accepted?!"),
    Err(err) => {
      let sub = err.token().and_then(|unverified| unverified.claims.get_str("sub").ok());
      println!("wrong key rejected: {} (unverified sub: {:?})", err, sub);
    }
  }
}
