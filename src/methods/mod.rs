//! Signing methods and the registry that maps an `alg` name onto one.
//!
//! A token names its own algorithm, which makes that name untrusted input. Parsing only ever
//! resolves it through a [`SigningMethodRegistry`], so a token can only select a method that was
//! registered on purpose.

use crate::errors::TokenError;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;
#[cfg(feature = "hmac")]
pub mod hmac;
pub mod registry;
#[cfg(feature = "rsa")]
pub mod rsa;

pub use self::registry::*;

/// The capability every algorithm family provides.
///
/// Implementations must compare signatures in constant time where that matters, and must report any
/// mismatch as an error. Callers treat every `Err` from [`SigningMethod::verify`] as a rejection.
pub trait SigningMethod: Send + Sync {
  /// The canonical name written into the `alg` header.
  fn alg(&self) -> &str;

  /// Signs `signing_string` with `key`, returning the encoded signature segment.
  fn sign(&self, signing_string: &str, key: &[u8]) -> Result<String, TokenError>;

  /// Checks `signature` against `signing_string` using `key`.
  ///
  /// A key the method cannot use (empty, or not parseable as a public key) means the signature
  /// cannot be verified, so the built-in methods report it as [`TokenError::SignatureInvalid`] rather
  /// than as a signing error.
  fn verify(&self, signing_string: &str, signature: &str, key: &[u8]) -> Result<(), TokenError>;
}

impl std::fmt::Debug for dyn SigningMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("SigningMethod").field(&self.alg()).finish()
  }
}
