//! RSA signing methods: PKCS#1 v1.5 (RS256, RS384, RS512) and PSS (PS256, PS384, PS512).
//!
//! Signing takes a PKCS#1 DER encoded private key. Verification takes a PKCS#1 DER encoded
//! `RSAPublicKey`.

use crate::errors::{SigningErrors, TokenError};
use crate::methods::SigningMethod;
use crate::segment::{decode_segment, encode_segment};

use ring::rand::SystemRandom;
use ring::signature::{
  RsaEncoding, RsaKeyPair, UnparsedPublicKey, VerificationAlgorithm, RSA_PKCS1_2048_8192_SHA256,
  RSA_PKCS1_2048_8192_SHA384, RSA_PKCS1_2048_8192_SHA512, RSA_PKCS1_SHA256, RSA_PKCS1_SHA384, RSA_PKCS1_SHA512,
  RSA_PSS_2048_8192_SHA256, RSA_PSS_2048_8192_SHA384, RSA_PSS_2048_8192_SHA512, RSA_PSS_SHA256, RSA_PSS_SHA384,
  RSA_PSS_SHA512,
};

pub struct SigningMethodRsa {
  name: &'static str,
  padding: &'static dyn RsaEncoding,
  verification: &'static dyn VerificationAlgorithm,
}

impl SigningMethodRsa {
  pub fn rs256() -> SigningMethodRsa {
    SigningMethodRsa {
      name: "RS256",
      padding: &RSA_PKCS1_SHA256,
      verification: &RSA_PKCS1_2048_8192_SHA256,
    }
  }

  pub fn rs384() -> SigningMethodRsa {
    SigningMethodRsa {
      name: "RS384",
      padding: &RSA_PKCS1_SHA384,
      verification: &RSA_PKCS1_2048_8192_SHA384,
    }
  }

  pub fn rs512() -> SigningMethodRsa {
    SigningMethodRsa {
      name: "RS512",
      padding: &RSA_PKCS1_SHA512,
      verification: &RSA_PKCS1_2048_8192_SHA512,
    }
  }

  pub fn ps256() -> SigningMethodRsa {
    SigningMethodRsa {
      name: "PS256",
      padding: &RSA_PSS_SHA256,
      verification: &RSA_PSS_2048_8192_SHA256,
    }
  }

  pub fn ps384() -> SigningMethodRsa {
    SigningMethodRsa {
      name: "PS384",
      padding: &RSA_PSS_SHA384,
      verification: &RSA_PSS_2048_8192_SHA384,
    }
  }

  pub fn ps512() -> SigningMethodRsa {
    SigningMethodRsa {
      name: "PS512",
      padding: &RSA_PSS_SHA512,
      verification: &RSA_PSS_2048_8192_SHA512,
    }
  }
}

impl SigningMethod for SigningMethodRsa {
  fn alg(&self) -> &str {
    self.name
  }

  fn sign(&self, signing_string: &str, key: &[u8]) -> Result<String, TokenError> {
    let key_pair = RsaKeyPair::from_der(key).map_err(|_| SigningErrors::InvalidKey)?;
    let random = SystemRandom::new();

    let mut signed_msg = vec![0; key_pair.public_modulus_len()];
    key_pair
      .sign(self.padding, &random, signing_string.as_bytes(), &mut signed_msg)
      .map_err(|_| SigningErrors::SignError)?;

    Ok(encode_segment(&signed_msg))
  }

  fn verify(&self, signing_string: &str, signature: &str, key: &[u8]) -> Result<(), TokenError> {
    let sig = decode_segment(signature).map_err(|_| TokenError::SignatureInvalid)?;
    UnparsedPublicKey::new(self.verification, key)
      .verify(signing_string.as_bytes(), &sig)
      .map_err(|_| TokenError::SignatureInvalid)
  }
}
