use crate::errors::TokenError;
use crate::methods::{default_registry, SigningMethod};
use crate::tokens::Token;

use chrono::prelude::*;
use chrono::Duration;
use serde_json::Value;

use std::sync::Arc;

/// A token builder.
///
/// Time claims are written as numeric Unix seconds. Of those, only `exp` is enforced when parsing.
pub struct TokenBuilder {
  token: Token,
}

impl TokenBuilder {
  /// Creates a new builder for `method`.
  pub fn new(method: Arc<dyn SigningMethod>) -> TokenBuilder {
    TokenBuilder {
      token: Token::new(method),
    }
  }

  /// Creates a new builder for an algorithm in the process-wide registry.
  pub fn for_algorithm(alg: &str) -> Result<TokenBuilder, TokenError> {
    Ok(TokenBuilder::new(default_registry().lookup(alg)?))
  }

  /// Sets an arbitrary claim.
  pub fn set_claim(mut self, key: &str, value: Value) -> Self {
    self.token.claims.insert(key, value);
    self
  }

  /// Sets an extra header field. `alg` and `typ` are owned by the token and are left alone.
  pub fn set_header(mut self, key: &str, value: Value) -> Self {
    if key != "alg" && key != "typ" {
      self.token.header.insert(key, value);
    }
    self
  }

  /// Sets the `kid` header so a key resolver can pick the right key.
  pub fn set_key_id(self, kid: &str) -> Self {
    self.set_header("kid", Value::from(kid))
  }

  pub fn set_audience(self, audience: &str) -> Self {
    self.set_claim("aud", Value::from(audience))
  }

  pub fn set_expiration(self, expiration: &DateTime<Utc>) -> Self {
    self.set_claim("exp", Value::from(expiration.timestamp()))
  }

  /// Sets the expiration relative to now.
  pub fn set_expires_in(self, lifetime: Duration) -> Self {
    let expiration = Utc::now() + lifetime;
    self.set_expiration(&expiration)
  }

  /// Sets the time this token was issued at.
  ///
  /// issued_at defaults to: Utc::now();
  pub fn set_issued_at(self, issued_at: Option<DateTime<Utc>>) -> Self {
    let issued_at = issued_at.unwrap_or_else(Utc::now);
    self.set_claim("iat", Value::from(issued_at.timestamp()))
  }

  pub fn set_issuer(self, issuer: &str) -> Self {
    self.set_claim("iss", Value::from(issuer))
  }

  pub fn set_jti(self, id: &str) -> Self {
    self.set_claim("jti", Value::from(id))
  }

  pub fn set_not_before(self, not_before: &DateTime<Utc>) -> Self {
    self.set_claim("nbf", Value::from(not_before.timestamp()))
  }

  pub fn set_subject(self, subject: &str) -> Self {
    self.set_claim("sub", Value::from(subject))
  }

  /// Returns the unsigned token.
  pub fn build(self) -> Token {
    self.token
  }

  /// Signs the token with `key`.
  pub fn sign(self, key: &[u8]) -> Result<String, TokenError> {
    self.token.signed_string(key)
  }
}
