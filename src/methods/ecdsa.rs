//! ECDSA signing methods (ES256, ES384) with fixed-size `r || s` signatures.
//!
//! Signing takes a PKCS#8 DER key pair. Verification takes the uncompressed SEC1 public point.

use crate::errors::{SigningErrors, TokenError};
use crate::methods::SigningMethod;
use crate::segment::{decode_segment, encode_segment};

use ring::rand::SystemRandom;
use ring::signature::{
  EcdsaKeyPair, EcdsaSigningAlgorithm, EcdsaVerificationAlgorithm, UnparsedPublicKey, ECDSA_P256_SHA256_FIXED,
  ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED, ECDSA_P384_SHA384_FIXED_SIGNING,
};

pub struct SigningMethodEcdsa {
  name: &'static str,
  signing: &'static EcdsaSigningAlgorithm,
  verification: &'static EcdsaVerificationAlgorithm,
}

impl SigningMethodEcdsa {
  pub fn es256() -> SigningMethodEcdsa {
    SigningMethodEcdsa {
      name: "ES256",
      signing: &ECDSA_P256_SHA256_FIXED_SIGNING,
      verification: &ECDSA_P256_SHA256_FIXED,
    }
  }

  pub fn es384() -> SigningMethodEcdsa {
    SigningMethodEcdsa {
      name: "ES384",
      signing: &ECDSA_P384_SHA384_FIXED_SIGNING,
      verification: &ECDSA_P384_SHA384_FIXED,
    }
  }
}

impl SigningMethod for SigningMethodEcdsa {
  fn alg(&self) -> &str {
    self.name
  }

  fn sign(&self, signing_string: &str, key: &[u8]) -> Result<String, TokenError> {
    let key_pair = EcdsaKeyPair::from_pkcs8(self.signing, key).map_err(|_| SigningErrors::InvalidKey)?;
    let random = SystemRandom::new();
    let sig = key_pair
      .sign(&random, signing_string.as_bytes())
      .map_err(|_| SigningErrors::SignError)?;
    Ok(encode_segment(sig.as_ref()))
  }

  fn verify(&self, signing_string: &str, signature: &str, key: &[u8]) -> Result<(), TokenError> {
    let sig = decode_segment(signature).map_err(|_| TokenError::SignatureInvalid)?;
    UnparsedPublicKey::new(self.verification, key)
      .verify(signing_string.as_bytes(), &sig)
      .map_err(|_| TokenError::SignatureInvalid)
  }
}
