//! Pulls a bearer token out of a set of request headers.

use crate::errors::{ResolverError, TokenError, ValidationError};
use crate::tokens::{Parser, Token};

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

const BEARER_PREFIX: &str = "Bearer ";

/// Anything that can look up a header by name, ignoring case.
///
/// The built-in carriers treat a header that appears more than once (in any mix of casings) as
/// absent, since there is no telling which of the values the sender meant.
pub trait HeaderCarrier {
  fn header(&self, name: &str) -> Option<&str>;
}

fn single_header<'a, I>(entries: I, name: &str) -> Option<&'a str>
where
  I: Iterator<Item = (&'a str, &'a str)>,
{
  let mut matches = entries.filter(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value);
  let value = matches.next()?;
  if matches.next().is_some() {
    tracing::debug!(header = name, "header is present more than once, ignoring it");
    return None;
  }
  Some(value)
}

impl<S: BuildHasher> HeaderCarrier for HashMap<String, String, S> {
  fn header(&self, name: &str) -> Option<&str> {
    single_header(self.iter().map(|(key, value)| (key.as_str(), value.as_str())), name)
  }
}

impl HeaderCarrier for BTreeMap<String, String> {
  fn header(&self, name: &str) -> Option<&str> {
    single_header(self.iter().map(|(key, value)| (key.as_str(), value.as_str())), name)
  }
}

impl<'a> HeaderCarrier for [(&'a str, &'a str)] {
  fn header(&self, name: &str) -> Option<&str> {
    single_header(self.iter().copied(), name)
  }
}

/// Returns the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token<C: HeaderCarrier + ?Sized>(carrier: &C) -> Result<&str, TokenError> {
  let value = carrier.header("Authorization").ok_or(TokenError::NoTokenPresent)?;
  match value.get(..BEARER_PREFIX.len()) {
    Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => Ok(&value[BEARER_PREFIX.len()..]),
    _ => Err(TokenError::NoTokenPresent),
  }
}

impl<'r> Parser<'r> {
  /// Extracts the bearer token from `carrier` and parses it.
  pub fn parse_from_carrier<C, F, K>(&self, carrier: &C, key_fn: F) -> Result<Token, ValidationError>
  where
    C: HeaderCarrier + ?Sized,
    F: FnOnce(&Token) -> Result<K, ResolverError>,
    K: AsRef<[u8]>,
  {
    let token = bearer_token(carrier)?;
    self.parse(token, key_fn)
  }
}

/// Extracts the bearer token from `carrier` and parses it against the process-wide registry.
pub fn parse_from_carrier<C, F, K>(carrier: &C, key_fn: F) -> Result<Token, ValidationError>
where
  C: HeaderCarrier + ?Sized,
  F: FnOnce(&Token) -> Result<K, ResolverError>,
  K: AsRef<[u8]>,
{
  Parser::default().parse_from_carrier(carrier, key_fn)
}
