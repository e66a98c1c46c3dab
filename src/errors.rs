use crate::tokens::Token;

use thiserror::Error;

/// The error a key resolver hands back. Whatever the resolver returns is surfaced verbatim.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which of the two JSON segments failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
  Header,
  Claims,
}

impl std::fmt::Display for SegmentKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SegmentKind::Header => write!(f, "header"),
      SegmentKind::Claims => write!(f, "claims"),
    }
  }
}

#[derive(Error, Debug)]
pub enum DecodeCause {
  #[error("Base64 decoding failed: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("JSON parsing failed: {0}")]
  Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningErrors {
  #[error("The key provided is not usable with this signing method")]
  InvalidKey,
  #[error("Failed to generate a signature")]
  SignError,
}

#[derive(Error, Debug)]
pub enum TokenError {
  #[error("Token contains an invalid number of segments")]
  MalformedToken,
  #[error("Malformed {segment}: {cause}")]
  DecodingError {
    segment: SegmentKind,
    #[source]
    cause: DecodeCause,
  },
  #[error("Signing method (alg) is unspecified.")]
  UnspecifiedAlgorithm,
  #[error("Unrecognized signing method: {0}")]
  UnrecognizedAlgorithm(String),
  #[error("{0}")]
  KeyResolution(#[source] ResolverError),
  #[error("Token is expired")]
  ExpiredToken { expired_at: i64 },
  #[error("Signature is invalid")]
  SignatureInvalid,
  #[error("JSON serialization error: {0}")]
  SerializationError(#[from] serde_json::Error),
  #[error("Signing error: {0}")]
  SigningError(#[from] SigningErrors),
  #[error("Field {0} is not present")]
  MissingField(String),
  #[error("Field {name} is not a {expected}")]
  InvalidFieldType { name: String, expected: &'static str },
  #[error("No token present in request.")]
  NoTokenPresent,
}

impl TokenError {
  pub(crate) fn decoding(segment: SegmentKind, cause: impl Into<DecodeCause>) -> Self {
    TokenError::DecodingError {
      segment,
      cause: cause.into(),
    }
  }
}

/// Why a token was rejected by a parse, together with whatever the parse managed to decode.
///
/// Once both segments decode and `alg` resolves, the decoded token rides along with the error so
/// its header and claims stay readable, for instance to start a refresh for an expired token. A
/// token handed back this way never reports itself valid. Expiry is tracked separately from the
/// error kind, so a token that is both expired and badly signed reports both.
#[derive(Debug)]
pub struct ValidationError {
  kind: TokenError,
  token: Option<Box<Token>>,
  expired_at: Option<i64>,
}

impl ValidationError {
  pub(crate) fn rejected(kind: TokenError, token: Token, expired_at: Option<i64>) -> Self {
    ValidationError {
      kind,
      token: Some(Box::new(token)),
      expired_at,
    }
  }

  /// The reason the token was rejected.
  pub fn kind(&self) -> &TokenError {
    &self.kind
  }

  pub fn into_kind(self) -> TokenError {
    self.kind
  }

  /// The decoded token, when the failure came after decoding.
  pub fn token(&self) -> Option<&Token> {
    self.token.as_deref()
  }

  pub fn into_token(self) -> Option<Token> {
    self.token.map(|token| *token)
  }

  /// The numeric `exp` the token carried, if it had already passed at parse time.
  pub fn expired_at(&self) -> Option<i64> {
    self.expired_at
  }

  pub fn is_expired(&self) -> bool {
    self.expired_at.is_some()
  }
}

impl From<TokenError> for ValidationError {
  fn from(kind: TokenError) -> Self {
    ValidationError {
      kind,
      token: None,
      expired_at: None,
    }
  }
}

impl From<ValidationError> for TokenError {
  fn from(err: ValidationError) -> Self {
    err.kind
  }
}

impl std::fmt::Display for ValidationError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    std::fmt::Display::fmt(&self.kind, f)
  }
}

impl std::error::Error for ValidationError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    self.kind.source()
  }
}
