//! The token entity along with its serialization and parse/validate pipeline.
//!
//! Parsing runs a fixed sequence and stops at the first terminal failure:
//!   * split into exactly three non-empty segments
//!   * decode the header, then the claims
//!   * resolve `alg` through the registry
//!   * note whether `exp` has passed (this does not stop the pipeline)
//!   * ask the caller's resolver for a key
//!   * verify the signature
//!
//! Failures after decoding hand the decoded token back inside the [`ValidationError`]. When a token
//! is both expired and badly signed, the signature failure is the error kind and the expiry is
//! still reported through [`ValidationError::expired_at`].

use crate::errors::{ResolverError, SegmentKind, TokenError, ValidationError};
use crate::methods::{default_registry, SigningMethod, SigningMethodRegistry};
use crate::segment::{decode_segment, encode_segment};

#[cfg(feature = "time_backend")]
use time::OffsetDateTime;
use chrono::Utc;
use serde_json::{from_slice as ParseJson, to_vec as ToJson, Map, Value};

use std::sync::Arc;

pub mod builder;
pub mod fields;
pub mod request;

pub use self::builder::*;
pub use self::fields::*;
pub use self::request::*;

/// Specifies which time crate supplies "now" for the `exp` check. The available backends are
/// [`Chrono`] and [`Time`]; the latter needs the `time_backend` feature. The default is [`Chrono`].
/// `Fixed` pins "now" to a Unix timestamp, which is useful for replaying tokens against a known time.
///
/// [`Chrono`]: https://docs.rs/chrono/*/chrono/index.html
/// [`Time`]: https://docs.rs/time/*/time/index.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBackend {
  Chrono,
  #[cfg(feature = "time_backend")]
  Time,
  Fixed(i64),
}

impl Default for TimeBackend {
  fn default() -> Self {
    TimeBackend::Chrono
  }
}

impl TimeBackend {
  /// Current Unix time in whole seconds.
  pub fn now_unix(&self) -> i64 {
    match self {
      TimeBackend::Chrono => Utc::now().timestamp(),
      #[cfg(feature = "time_backend")]
      TimeBackend::Time => OffsetDateTime::now_utc().unix_timestamp(),
      TimeBackend::Fixed(now) => *now,
    }
  }
}

/// A JSON Web Token.
#[derive(Debug, Clone)]
pub struct Token {
  /// Always holds `typ` and `alg`.
  pub header: Fields,
  pub claims: Fields,
  method: Arc<dyn SigningMethod>,
  /// Only populated on parse.
  signature: String,
  valid: bool,
}

impl Token {
  /// Creates an unsigned token for `method` with an empty claim set.
  pub fn new(method: Arc<dyn SigningMethod>) -> Token {
    let mut header = Fields::new();
    header.insert("typ", "JWT");
    header.insert("alg", method.alg());

    Token {
      header,
      claims: Fields::new(),
      method,
      signature: String::new(),
      valid: false,
    }
  }

  /// Creates an unsigned token for an algorithm registered in the process-wide registry.
  pub fn with_algorithm(alg: &str) -> Result<Token, TokenError> {
    Ok(Token::new(default_registry().lookup(alg)?))
  }

  pub fn method(&self) -> &Arc<dyn SigningMethod> {
    &self.method
  }

  /// The raw signature segment as seen on the wire. Empty for tokens that were not parsed.
  pub fn signature(&self) -> &str {
    &self.signature
  }

  /// True only once a parse has verified the signature of an unexpired token.
  pub fn is_valid(&self) -> bool {
    self.valid
  }

  /// The part of the token covered by the signature: `header.claims`, each base64url encoded.
  pub fn signing_string(&self) -> Result<String, TokenError> {
    let header = ToJson(self.header.as_map())?;
    let claims = ToJson(self.claims.as_map())?;
    Ok(format!("{}.{}", encode_segment(&header), encode_segment(&claims)))
  }

  /// Signs the token with `key` and returns the full three segment token.
  pub fn signed_string(&self, key: &[u8]) -> Result<String, TokenError> {
    let sstr = self.signing_string()?;
    let sig = self.method.sign(&sstr, key)?;
    Ok(format!("{}.{}", sstr, sig))
  }
}

/// Parses and validates tokens against a registry.
pub struct Parser<'r> {
  registry: &'r SigningMethodRegistry,
  backend: TimeBackend,
  expected_algorithms: Option<Vec<String>>,
}

impl Default for Parser<'static> {
  fn default() -> Self {
    Parser::with_registry(default_registry())
  }
}

impl<'r> Parser<'r> {
  /// A parser that resolves `alg` through `registry` instead of the process-wide one.
  pub fn with_registry(registry: &'r SigningMethodRegistry) -> Parser<'r> {
    Parser {
      registry,
      backend: TimeBackend::default(),
      expected_algorithms: None,
    }
  }

  pub fn time_backend(mut self, backend: TimeBackend) -> Self {
    self.backend = backend;
    self
  }

  /// Narrows the registry further: any `alg` outside `algorithms` is treated as unrecognized.
  pub fn expect_algorithms(mut self, algorithms: &[&str]) -> Self {
    self.expected_algorithms = Some(algorithms.iter().map(|alg| (*alg).to_owned()).collect());
    self
  }

  /// Parses `token` and verifies it with the key `key_fn` returns.
  ///
  /// `key_fn` sees the decoded header and claims along with the resolved method, which lets it pick
  /// a key by `kid`, issuer or anything else in the token. Its errors are returned untouched.
  ///
  /// Key resolution, signature and expiry failures carry the decoded token in the returned
  /// [`ValidationError`].
  pub fn parse<F, K>(&self, token: &str, key_fn: F) -> Result<Token, ValidationError>
  where
    F: FnOnce(&Token) -> Result<K, ResolverError>,
    K: AsRef<[u8]>,
  {
    let parts = token.split('.').collect::<Vec<_>>();
    if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
      tracing::debug!(segments = parts.len(), "rejected token with bad segment framing");
      return Err(TokenError::MalformedToken.into());
    }

    let header = decode_fields(parts[0], SegmentKind::Header)?;
    let claims = decode_fields(parts[1], SegmentKind::Claims)?;

    let alg = header.get_str("alg").map_err(|_| TokenError::UnspecifiedAlgorithm)?;
    let method = self.resolve_method(alg)?;
    tracing::trace!(alg, "resolved signing method");

    let expired = self.expired_at(&claims);

    let mut parsed = Token {
      header,
      claims,
      method,
      signature: parts[2].to_owned(),
      valid: false,
    };

    let key = match key_fn(&parsed) {
      Ok(key) => key,
      Err(err) => return Err(ValidationError::rejected(TokenError::KeyResolution(err), parsed, expired)),
    };

    let signing_string = &token[..parts[0].len() + 1 + parts[1].len()];
    if let Err(err) = parsed.method.verify(signing_string, parts[2], key.as_ref()) {
      tracing::debug!(alg = parsed.method.alg(), expired = expired.is_some(), "signature verification failed");
      return Err(ValidationError::rejected(err, parsed, expired));
    }

    if let Some(expired_at) = expired {
      return Err(ValidationError::rejected(
        TokenError::ExpiredToken { expired_at },
        parsed,
        expired,
      ));
    }

    parsed.valid = true;
    Ok(parsed)
  }

  /// The truncated `exp` when it has passed. Only a numeric `exp` counts, and `exp == now` has not
  /// passed yet.
  fn expired_at(&self, claims: &Fields) -> Option<i64> {
    let exp = claims.get("exp").and_then(Value::as_f64)?;
    #[allow(clippy::cast_possible_truncation)]
    let exp = exp as i64;
    if self.backend.now_unix() > exp {
      tracing::debug!(exp, "token is expired, continuing to verify its signature");
      Some(exp)
    } else {
      None
    }
  }

  fn resolve_method(&self, alg: &str) -> Result<Arc<dyn SigningMethod>, TokenError> {
    if let Some(expected) = &self.expected_algorithms {
      if !expected.iter().any(|name| name == alg) {
        tracing::debug!(alg, "algorithm is not among those this parser expects");
        return Err(TokenError::UnrecognizedAlgorithm(alg.to_owned()));
      }
    }
    self.registry.lookup(alg).map_err(|err| {
      tracing::debug!(alg, "rejected token naming an unregistered algorithm");
      err
    })
  }
}

fn decode_fields(segment: &str, kind: SegmentKind) -> Result<Fields, TokenError> {
  let bytes = decode_segment(segment).map_err(|err| TokenError::decoding(kind, err))?;
  let map: Map<String, Value> = ParseJson(&bytes).map_err(|err| TokenError::decoding(kind, err))?;
  Ok(Fields::from(map))
}

/// Parses and validates `token` against the process-wide registry.
pub fn parse<F, K>(token: &str, key_fn: F) -> Result<Token, ValidationError>
where
  F: FnOnce(&Token) -> Result<K, ResolverError>,
  K: AsRef<[u8]>,
{
  Parser::default().parse(token, key_fn)
}

#[cfg(all(test, feature = "hmac"))]
mod unit_tests {
  use super::*;
  use serde_json::json;

  fn hs256() -> Token {
    Token::with_algorithm("HS256").expect("Failed to find HS256!")
  }

  #[test]
  fn new_token_has_default_header() {
    let token = hs256();
    assert_eq!(token.header.get_str("typ").expect("Missing typ!"), "JWT");
    assert_eq!(token.header.get_str("alg").expect("Missing alg!"), "HS256");
    assert!(token.claims.is_empty());
    assert!(token.signature().is_empty());
    assert!(!token.is_valid());
  }

  #[test]
  fn signing_string_has_two_segments() {
    let mut token = hs256();
    token.claims.insert("sub", "1234567890");
    let sstr = token.signing_string().expect("Failed to build signing string!");
    let parts = sstr.split('.').collect::<Vec<_>>();
    assert_eq!(parts.len(), 2);

    let header: Value = ParseJson(&decode_segment(parts[0]).expect("Bad header segment!")).expect("Bad header json!");
    assert_eq!(header, json!({ "alg": "HS256", "typ": "JWT" }));
    let claims: Value = ParseJson(&decode_segment(parts[1]).expect("Bad claims segment!")).expect("Bad claims json!");
    assert_eq!(claims, json!({ "sub": "1234567890" }));
  }

  #[test]
  fn signed_string_roundtrips() {
    let mut token = hs256();
    token.claims.insert("sub", "1234567890");
    token.claims.insert("name", "J Doe");
    let signed = token.signed_string(b"secret").expect("Failed to sign token!");
    assert_eq!(signed.split('.').count(), 3);

    let parsed = parse(&signed, |_| Ok(b"secret")).expect("Failed to parse token!");
    assert!(parsed.is_valid());
    assert_eq!(parsed.claims, token.claims);
    assert_eq!(parsed.header, token.header);
    assert_eq!(parsed.signature(), signed.rsplit('.').next().expect("No signature!"));
  }

  #[test]
  fn resolver_sees_decoded_token() {
    let mut token = hs256();
    token.header.insert("kid", "key-1");
    let signed = token.signed_string(b"secret").expect("Failed to sign token!");

    parse(&signed, |seen| {
      assert_eq!(seen.method().alg(), "HS256");
      assert!(!seen.is_valid());
      assert_eq!(seen.header.get_str("kid")?, "key-1");
      Ok(b"secret".to_vec())
    })
    .expect("Failed to parse token!");
  }

  #[test]
  fn pinned_algorithms_reject_others() {
    let signed = hs256().signed_string(b"secret").expect("Failed to sign token!");
    let parser = Parser::default().expect_algorithms(&["HS512"]);
    let err = parser.parse(&signed, |_| Ok(b"secret")).expect_err("HS256 must be rejected!");
    assert!(matches!(err.kind(), TokenError::UnrecognizedAlgorithm(alg) if alg == "HS256"));
    assert!(err.token().is_none());
    let parser = Parser::default().expect_algorithms(&["HS256"]);
    assert!(parser.parse(&signed, |_| Ok(b"secret")).is_ok());
  }

  #[test]
  fn exp_that_is_not_numeric_is_ignored() {
    let mut token = hs256();
    token.claims.insert("exp", "yesterday");
    let signed = token.signed_string(b"secret").expect("Failed to sign token!");
    assert!(parse(&signed, |_| Ok(b"secret")).is_ok());
  }

  fn signed_with_exp(exp: Value) -> String {
    let mut token = hs256();
    token.claims.insert("sub", "clock");
    token.claims.insert("exp", exp);
    token.signed_string(b"secret").expect("Failed to sign token!")
  }

  fn parse_at(now: i64, signed: &str) -> Result<Token, ValidationError> {
    Parser::default().time_backend(TimeBackend::Fixed(now)).parse(signed, |_| Ok(b"secret"))
  }

  #[test]
  fn exp_equal_to_now_is_not_expired() {
    let now = 1_700_000_000;
    let parsed = parse_at(now, &signed_with_exp(json!(now))).expect("exp == now must still be valid!");
    assert!(parsed.is_valid());

    let err = parse_at(now + 1, &signed_with_exp(json!(now))).expect_err("exp < now must be expired!");
    assert!(matches!(err.kind(), TokenError::ExpiredToken { expired_at } if *expired_at == now));
  }

  #[test]
  fn fractional_exp_is_truncated() {
    let now = 1_700_000_000;
    // 1_700_000_000.9 truncates to now, so it has not passed.
    assert!(parse_at(now, &signed_with_exp(json!(1_700_000_000.9))).is_ok());

    let err = parse_at(now, &signed_with_exp(json!(1_699_999_999.9))).expect_err("exp must be expired!");
    assert_eq!(err.expired_at(), Some(now - 1));
    assert!(matches!(err.kind(), TokenError::ExpiredToken { expired_at } if *expired_at == now - 1));
  }

  #[test]
  fn expired_token_keeps_its_claims() {
    let now = 1_700_000_000;
    let err = parse_at(now, &signed_with_exp(json!(now - 60))).expect_err("Token must be expired!");
    assert!(err.is_expired());
    let token = err.into_token().expect("Expired token must be handed back!");
    assert!(!token.is_valid());
    assert_eq!(token.claims.get_str("sub").expect("Missing sub!"), "clock");
  }

  #[test]
  fn bad_signature_reports_expiry_too() {
    let now = 1_700_000_000;
    let signed = signed_with_exp(json!(now - 60));
    let err = Parser::default()
      .time_backend(TimeBackend::Fixed(now))
      .parse(&signed, |_| Ok(b"wrong"))
      .expect_err("Wrong key must be rejected!");
    assert!(matches!(err.kind(), TokenError::SignatureInvalid));
    assert_eq!(err.expired_at(), Some(now - 60));
    let token = err.token().expect("Rejected token must be handed back!");
    assert!(!token.is_valid());
    assert_eq!(token.claims.get_str("sub").expect("Missing sub!"), "clock");
  }

  #[test]
  #[cfg(feature = "time_backend")]
  fn time_backends_agree() {
    let drift = (TimeBackend::Chrono.now_unix() - TimeBackend::Time.now_unix()).abs();
    assert!(drift <= 1);
  }
}
