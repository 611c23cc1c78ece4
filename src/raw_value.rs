use crate::common::*;

/// A single bencoded value held in its encoded form.
///
/// Used for payloads this crate carries without interpreting, such as the
/// BEP 44 `v` field. The bytes are validated once on construction and then
/// re-emitted verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawValue(Vec<u8>);

impl RawValue {
  /// Wrap encoded bytes, checking that they hold exactly one canonical
  /// value.
  pub fn new(bytes: Vec<u8>) -> Result<Self> {
    Value::decode(&bytes)?;
    Ok(Self(bytes))
  }

  /// Bytes already validated by a decoder.
  pub(crate) fn from_validated(bytes: &[u8]) -> Self {
    Self(bytes.to_vec())
  }

  pub fn from_value(value: &Value) -> Self {
    Self(value.encode())
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.0
  }

  /// Decode the payload. Unordered keys are accepted, since the bytes may
  /// have come from a lenient decode.
  pub fn to_value(&self) -> Result<Value> {
    Value::decode_with(&self.0, &DecodeOptions::lenient())
  }
}

impl From<&Value> for RawValue {
  fn from(value: &Value) -> Self {
    Self::from_value(value)
  }
}
