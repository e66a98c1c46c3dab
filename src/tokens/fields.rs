use crate::errors::TokenError;

use serde_json::{Map, Value};

/// A JSON object used for both the header and the claims of a token.
///
/// The typed getters never coerce: a claim holding `"42"` is not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
  pub fn new() -> Fields {
    Fields(Map::new())
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.0.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  /// Sets `name`, returning the previous value if there was one.
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.0.insert(name.into(), value.into())
  }

  pub fn remove(&mut self, name: &str) -> Option<Value> {
    self.0.remove(name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.0.iter()
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn get_str(&self, name: &str) -> Result<&str, TokenError> {
    self.typed(name, "string", Value::as_str)
  }

  pub fn get_number(&self, name: &str) -> Result<f64, TokenError> {
    self.typed(name, "number", Value::as_f64)
  }

  /// Like [`Fields::get_number`] but only for values stored as integers.
  pub fn get_i64(&self, name: &str) -> Result<i64, TokenError> {
    self.typed(name, "integer", Value::as_i64)
  }

  pub fn get_bool(&self, name: &str) -> Result<bool, TokenError> {
    self.typed(name, "boolean", Value::as_bool)
  }

  fn typed<'a, T>(
    &'a self,
    name: &str,
    expected: &'static str,
    convert: impl FnOnce(&'a Value) -> Option<T>,
  ) -> Result<T, TokenError> {
    let value = self.0.get(name).ok_or_else(|| TokenError::MissingField(name.to_owned()))?;
    convert(value).ok_or_else(|| TokenError::InvalidFieldType {
      name: name.to_owned(),
      expected,
    })
  }
}

impl From<Map<String, Value>> for Fields {
  fn from(map: Map<String, Value>) -> Self {
    Fields(map)
  }
}

impl From<Fields> for Map<String, Value> {
  fn from(fields: Fields) -> Self {
    fields.0
  }
}
