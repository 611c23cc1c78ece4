use crate::common::*;

/// Dictionary keyed by byte strings. `BTreeMap` keeps keys unique and
/// iterates them in ascending byte order, which is the order bencode
/// requires on the wire.
pub type Dict = BTreeMap<Vec<u8>, Value>;

/// A bencoded document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
  Integer(i64),
  Bytes(Vec<u8>),
  List(Vec<Value>),
  Dict(Dict),
  /// An already-encoded value, copied to the output verbatim. The decoder
  /// never produces this variant.
  Raw(RawValue),
}

impl Value {
  pub fn decode(input: &[u8]) -> Result<Self> {
    Self::decode_with(input, &DecodeOptions::default())
  }

  pub fn decode_with(input: &[u8], options: &DecodeOptions) -> Result<Self> {
    let mut decoder = Decoder::new(input, options);
    let value = decoder.value()?;
    decoder.finish()?;
    Ok(value)
  }

  pub fn encode(&self) -> Vec<u8> {
    let mut buffer = Vec::new();
    self.encode_to(&mut buffer);
    buffer
  }

  pub fn encode_to(&self, buffer: &mut Vec<u8>) {
    match self {
      Self::Integer(n) => {
        buffer.push(b'i');
        buffer.extend_from_slice(n.to_string().as_bytes());
        buffer.push(b'e');
      }
      Self::Bytes(bytes) => encode_bytes(bytes, buffer),
      Self::List(items) => {
        buffer.push(b'l');
        for item in items {
          item.encode_to(buffer);
        }
        buffer.push(b'e');
      }
      Self::Dict(dict) => {
        buffer.push(b'd');
        for (key, value) in dict {
          encode_bytes(key, buffer);
          value.encode_to(buffer);
        }
        buffer.push(b'e');
      }
      Self::Raw(raw) => buffer.extend_from_slice(raw.as_bytes()),
    }
  }

  pub fn as_integer(&self) -> Option<i64> {
    match self {
      Self::Integer(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_bytes(&self) -> Option<&[u8]> {
    match self {
      Self::Bytes(bytes) => Some(bytes),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Self::List(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_dict(&self) -> Option<&Dict> {
    match self {
      Self::Dict(dict) => Some(dict),
      _ => None,
    }
  }
}

fn encode_bytes(bytes: &[u8], buffer: &mut Vec<u8>) {
  buffer.extend_from_slice(bytes.len().to_string().as_bytes());
  buffer.push(b':');
  buffer.extend_from_slice(bytes);
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Self::Integer(n)
  }
}

impl From<Vec<u8>> for Value {
  fn from(bytes: Vec<u8>) -> Self {
    Self::Bytes(bytes)
  }
}

impl From<&[u8]> for Value {
  fn from(bytes: &[u8]) -> Self {
    Self::Bytes(bytes.to_vec())
  }
}

impl From<&str> for Value {
  fn from(text: &str) -> Self {
    Self::Bytes(text.as_bytes().to_vec())
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Self::List(items)
  }
}

impl From<Dict> for Value {
  fn from(dict: Dict) -> Self {
    Self::Dict(dict)
  }
}

impl From<RawValue> for Value {
  fn from(raw: RawValue) -> Self {
    Self::Raw(raw)
  }
}
