//! The base64url segment codec. Every byte that enters or leaves a token passes through here, so
//! this is the single place that keeps `+`, `/` and `=` off the wire.

use base64::{decode_config, encode_config, DecodeError, URL_SAFE, URL_SAFE_NO_PAD};

/// Encodes a byte sequence as an unpadded URL-safe base64 segment.
#[must_use]
pub fn encode_segment(seg: &[u8]) -> String {
  encode_config(seg, URL_SAFE_NO_PAD)
}

/// Decodes an unpadded URL-safe base64 segment.
///
/// Padding is restored before decoding. Input that already carries `=` is rejected since padding is
/// never part of a segment.
pub fn decode_segment(seg: &str) -> Result<Vec<u8>, DecodeError> {
  if let Some(offset) = seg.find('=') {
    return Err(DecodeError::InvalidByte(offset, b'='));
  }

  let mut padded = String::with_capacity(seg.len() + 3);
  padded.push_str(seg);
  match seg.len() % 4 {
    2 => padded.push_str("=="),
    3 => padded.push('='),
    _ => {}
  }

  decode_config(padded.as_bytes(), URL_SAFE)
}
