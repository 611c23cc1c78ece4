use crate::common::*;

/// A decoded dictionary whose values are kept as validated raw spans of the
/// input, so each field can be parsed into the type its key calls for and
/// opaque fields can be carried byte for byte.
#[derive(Debug)]
pub(crate) struct Fields<'a, 'o> {
  entries: BTreeMap<&'a [u8], &'a [u8]>,
  options: &'o DecodeOptions,
}

impl<'a, 'o> Fields<'a, 'o> {
  /// Parse `input`, which must hold exactly one dictionary. `name` is used
  /// in the error if it holds something else.
  pub(crate) fn parse(
    input: &'a [u8],
    options: &'o DecodeOptions,
    name: &'static str,
  ) -> Result<Self> {
    let mut decoder = Decoder::new(input, options);
    ensure!(
      decoder.peek()? == b'd',
      error::FieldType {
        field: name,
        expected: "a dictionary",
      }
    );
    let entries = decoder.dict(Decoder::skip)?;
    decoder.finish()?;
    Ok(Self { entries, options })
  }

  pub(crate) fn contains(&self, key: &str) -> bool {
    self.entries.contains_key(key.as_bytes())
  }

  pub(crate) fn value(&self, key: &'static str) -> Result<Option<Value>> {
    self
      .entries
      .get(key.as_bytes())
      .map(|&raw| Value::decode_with(raw, self.options))
      .transpose()
  }

  pub(crate) fn raw(&self, key: &'static str) -> Option<RawValue> {
    self
      .entries
      .get(key.as_bytes())
      .map(|&raw| RawValue::from_validated(raw))
  }

  pub(crate) fn bytes(&self, key: &'static str) -> Result<Option<Vec<u8>>> {
    match self.value(key)? {
      None => Ok(None),
      Some(Value::Bytes(bytes)) => Ok(Some(bytes)),
      Some(_) => Err(Error::FieldType {
        field: key,
        expected: "a byte string",
      }),
    }
  }

  pub(crate) fn integer(&self, key: &'static str) -> Result<Option<i64>> {
    match self.value(key)? {
      None => Ok(None),
      Some(Value::Integer(n)) => Ok(Some(n)),
      Some(_) => Err(Error::FieldType {
        field: key,
        expected: "an integer",
      }),
    }
  }

  /// Integer flag; absent and zero are both false.
  pub(crate) fn flag(&self, key: &'static str) -> Result<bool> {
    Ok(self.integer(key)?.map_or(false, |n| n != 0))
  }

  pub(crate) fn list(&self, key: &'static str) -> Result<Option<Vec<Value>>> {
    match self.value(key)? {
      None => Ok(None),
      Some(Value::List(items)) => Ok(Some(items)),
      Some(_) => Err(Error::FieldType {
        field: key,
        expected: "a list",
      }),
    }
  }

  pub(crate) fn node_id(&self, key: &'static str) -> Result<Option<NodeId>> {
    self
      .bytes(key)?
      .map(|bytes| NodeId::from_bytes(&bytes))
      .transpose()
  }

  pub(crate) fn dict(&self, key: &'static str) -> Result<Option<Fields<'a, 'o>>> {
    self
      .entries
      .get(key.as_bytes())
      .map(|&raw| Fields::parse(raw, self.options, key))
      .transpose()
  }
}
