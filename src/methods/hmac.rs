//! HMAC-SHA2 signing methods (HS256, HS384, HS512). The key is the raw shared secret.

use crate::errors::{SigningErrors, TokenError};
use crate::methods::SigningMethod;
use crate::segment::{decode_segment, encode_segment};

use ring::hmac::{self, Algorithm, Key, HMAC_SHA256, HMAC_SHA384, HMAC_SHA512};

pub struct SigningMethodHmac {
  name: &'static str,
  algorithm: Algorithm,
}

impl SigningMethodHmac {
  pub fn hs256() -> SigningMethodHmac {
    SigningMethodHmac {
      name: "HS256",
      algorithm: HMAC_SHA256,
    }
  }

  pub fn hs384() -> SigningMethodHmac {
    SigningMethodHmac {
      name: "HS384",
      algorithm: HMAC_SHA384,
    }
  }

  pub fn hs512() -> SigningMethodHmac {
    SigningMethodHmac {
      name: "HS512",
      algorithm: HMAC_SHA512,
    }
  }

  fn key(&self, key: &[u8]) -> Result<Key, TokenError> {
    if key.is_empty() {
      return Err(SigningErrors::InvalidKey.into());
    }
    Ok(Key::new(self.algorithm, key))
  }
}

impl SigningMethod for SigningMethodHmac {
  fn alg(&self) -> &str {
    self.name
  }

  fn sign(&self, signing_string: &str, key: &[u8]) -> Result<String, TokenError> {
    let tag = hmac::sign(&self.key(key)?, signing_string.as_bytes());
    Ok(encode_segment(tag.as_ref()))
  }

  fn verify(&self, signing_string: &str, signature: &str, key: &[u8]) -> Result<(), TokenError> {
    // An empty secret cannot have produced any signature.
    let mac_key = self.key(key).map_err(|_| TokenError::SignatureInvalid)?;
    let provided = decode_segment(signature).map_err(|_| TokenError::SignatureInvalid)?;
    // ring compares the tags in constant time.
    hmac::verify(&mac_key, signing_string.as_bytes(), &provided).map_err(|_| TokenError::SignatureInvalid)
  }
}
