use chrono::Duration;
use criterion::{black_box, Bencher, Criterion};
use jwtoken::{parse, TokenBuilder};
use serde_json::json;

use crate::utils::bench_sized_string_group;

const SECRET: &[u8] = b"YELLOW SUBMARINE, BLACK WIZARDRY";
const RSA_PRIVATE_KEY: &[u8] = include_bytes!("../../../src/methods/rsa_example_private_key.der");
const RSA_PUBLIC_KEY: &[u8] = include_bytes!("../../../src/methods/rsa_example_public_key.der");

fn build(alg: &str, claim: &str, key: &[u8]) -> String {
  TokenBuilder::for_algorithm(alg)
    .expect("Unknown algorithm")
    .set_issued_at(None)
    .set_expires_in(Duration::days(1))
    .set_issuer("issuer")
    .set_subject("test")
    .set_claim("claim", json!(claim))
    .sign(key)
    .expect("Can't build token")
}

fn bench_sign_hs256(b: &mut Bencher, s: &str) {
  b.iter(|| build("HS256", black_box(s), SECRET));
}

fn bench_sign_rs256(b: &mut Bencher, s: &str) {
  b.iter(|| build("RS256", black_box(s), RSA_PRIVATE_KEY));
}

fn bench_parse_hs256(b: &mut Bencher, s: &str) {
  let token = build("HS256", s, SECRET);
  b.iter(|| parse(black_box(&token), |_| Ok(SECRET)).expect("Failed to validate token!"));
}

fn bench_parse_rs256(b: &mut Bencher, s: &str) {
  let token = build("RS256", s, RSA_PRIVATE_KEY);
  b.iter(|| parse(black_box(&token), |_| Ok(RSA_PUBLIC_KEY)).expect("Failed to validate token!"));
}

pub fn benches(c: &mut Criterion) {
  bench_sized_string_group(c, "token::sign::hs256", &bench_sign_hs256);
  bench_sized_string_group(c, "token::sign::rs256", &bench_sign_rs256);
  bench_sized_string_group(c, "token::parse::hs256", &bench_parse_hs256);
  bench_sized_string_group(c, "token::parse::rs256", &bench_parse_rs256);
}
