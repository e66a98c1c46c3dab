//! Compact signed JSON Web Tokens.
//!
//! Tokens are built with [`Token::new`] or [`TokenBuilder`], signed with
//! [`Token::signed_string`], and checked with [`parse`]. The `alg` a token carries is only ever
//! resolved through a [`SigningMethodRegistry`].

pub mod errors;
pub mod methods;
pub mod segment;
pub mod tokens;

pub use self::errors::{ResolverError, SegmentKind, SigningErrors, TokenError, ValidationError};
pub use self::methods::{
  default_registry, lookup_signing_method, register_signing_method, SigningMethod, SigningMethodRegistry,
};
pub use self::segment::{decode_segment, encode_segment};
pub use self::tokens::*;
