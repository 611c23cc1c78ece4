use crate::common::*;

/// Recursive descent bencode parser over a borrowed input.
///
/// Only canonical encodings are accepted: integers without leading zeros or
/// `-0`, length prefixes without leading zeros, and (in strict mode)
/// dictionary keys in ascending order. Re-encoding a decoded value therefore
/// reproduces the input byte for byte.
pub(crate) struct Decoder<'a, 'o> {
  input: &'a [u8],
  position: usize,
  depth: usize,
  options: &'o DecodeOptions,
}

impl<'a, 'o> Decoder<'a, 'o> {
  pub(crate) fn new(input: &'a [u8], options: &'o DecodeOptions) -> Self {
    Self {
      input,
      position: 0,
      depth: 0,
      options,
    }
  }

  pub(crate) fn finish(&self) -> Result<()> {
    ensure!(
      self.position == self.input.len(),
      error::TrailingData {
        position: self.position
      }
    );
    Ok(())
  }

  pub(crate) fn peek(&self) -> Result<u8> {
    self
      .input
      .get(self.position)
      .copied()
      .context(error::Truncated {
        position: self.position,
      })
  }

  pub(crate) fn value(&mut self) -> Result<Value> {
    match self.peek()? {
      b'i' => self.integer().map(Value::Integer),
      b'0'..=b'9' => self.bytes().map(|bytes| Value::Bytes(bytes.to_vec())),
      b'l' => self.nested(Self::list).map(Value::List),
      b'd' => {
        let entries = self.nested(|decoder| decoder.entries(Self::value))?;
        Ok(Value::Dict(
          entries
            .into_iter()
            .map(|(key, value)| (key.to_vec(), value))
            .collect(),
        ))
      }
      b'-' => Err(Error::InvalidLength {
        position: self.position,
      }),
      byte => Err(Error::UnexpectedByte {
        byte,
        position: self.position,
      }),
    }
  }

  /// Validate the next value and return the exact bytes it occupies.
  pub(crate) fn skip(&mut self) -> Result<&'a [u8]> {
    let input = self.input;
    let start = self.position;
    self.value()?;
    Ok(&input[start..self.position])
  }

  /// Parse a dictionary, handing each value to `read`.
  pub(crate) fn dict<T>(
    &mut self,
    read: impl FnMut(&mut Self) -> Result<T>,
  ) -> Result<BTreeMap<&'a [u8], T>> {
    self.nested(|decoder| decoder.entries(read))
  }

  fn integer(&mut self) -> Result<i64> {
    let start = self.position;
    self.position += 1;
    let digits = self.take_until(b'e')?;
    parse_integer(digits).context(error::InvalidInteger { position: start })
  }

  fn bytes(&mut self) -> Result<&'a [u8]> {
    let start = self.position;
    let prefix = self.take_until(b':')?;

    if prefix.len() > 1 && prefix[0] == b'0' {
      return Err(Error::InvalidLength { position: start });
    }

    let len = str::from_utf8(prefix)
      .ok()
      .filter(|text| text.bytes().all(|byte| byte.is_ascii_digit()))
      .and_then(|text| text.parse::<usize>().ok())
      .context(error::InvalidLength { position: start })?;

    ensure!(
      len <= self.input.len() - self.position,
      error::InvalidLength { position: start }
    );

    let input = self.input;
    let bytes = &input[self.position..self.position + len];
    self.position += len;
    Ok(bytes)
  }

  fn list(&mut self) -> Result<Vec<Value>> {
    self.position += 1;
    let mut items = Vec::new();
    while self.peek()? != b'e' {
      items.push(self.value()?);
    }
    self.position += 1;
    Ok(items)
  }

  fn entries<T>(
    &mut self,
    mut read: impl FnMut(&mut Self) -> Result<T>,
  ) -> Result<BTreeMap<&'a [u8], T>> {
    self.position += 1;
    let mut entries = BTreeMap::new();
    let mut previous: Option<&'a [u8]> = None;
    let mut unordered = false;

    while self.peek()? != b'e' {
      let key = match self.peek()? {
        b'0'..=b'9' => self.bytes()?,
        b'-' => {
          return Err(Error::InvalidLength {
            position: self.position,
          })
        }
        byte => {
          return Err(Error::UnexpectedByte {
            byte,
            position: self.position,
          })
        }
      };

      ensure!(
        !entries.contains_key(key),
        error::DuplicateKey { key: key.to_vec() }
      );

      if previous.map_or(false, |previous| key < previous) {
        ensure!(
          self.options.key_order == KeyOrder::Lenient,
          error::UnorderedKeys { key: key.to_vec() }
        );
        unordered = true;
      }

      let value = read(self)?;
      entries.insert(key, value);
      previous = Some(key);
    }

    if unordered {
      warn!(
        "Accepted dictionary with unordered keys ending at byte {}",
        self.position
      );
    }

    self.position += 1;
    Ok(entries)
  }

  fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
    ensure!(
      self.depth < self.options.max_depth,
      error::NestingTooDeep {
        limit: self.options.max_depth
      }
    );
    self.depth += 1;
    let result = parse(self);
    self.depth -= 1;
    result
  }

  fn take_until(&mut self, terminator: u8) -> Result<&'a [u8]> {
    let input = self.input;
    let rest = &input[self.position..];
    let end = rest
      .iter()
      .position(|&byte| byte == terminator)
      .context(error::Truncated {
        position: self.input.len(),
      })?;
    self.position += end + 1;
    Ok(&rest[..end])
  }
}

fn parse_integer(digits: &[u8]) -> Option<i64> {
  let magnitude = match digits.split_first() {
    Some((b'-', rest)) => {
      if rest == b"0" {
        return None;
      }
      rest
    }
    _ => digits,
  };

  if magnitude.is_empty() || !magnitude.iter().all(u8::is_ascii_digit) {
    return None;
  }

  if magnitude.len() > 1 && magnitude[0] == b'0' {
    return None;
  }

  str::from_utf8(digits).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn decode(input: &[u8]) -> Result<Value> {
    Value::decode(input)
  }

  fn lenient(input: &[u8]) -> Result<Value> {
    Value::decode_with(input, &DecodeOptions::lenient())
  }

  #[test]
  fn integers() {
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(decode(b"i-3e").unwrap(), Value::Integer(-3));
    assert_eq!(
      decode(b"i9223372036854775807e").unwrap(),
      Value::Integer(i64::MAX)
    );
    assert_eq!(
      decode(b"i-9223372036854775808e").unwrap(),
      Value::Integer(i64::MIN)
    );
  }

  #[test]
  fn non_canonical_integers() {
    for input in &[
      &b"ie"[..],
      b"i-e",
      b"i-0e",
      b"i03e",
      b"i1.5e",
      b"i+1e",
      b"i9223372036854775808e",
    ] {
      assert_matches!(decode(input), Err(Error::InvalidInteger { position: 0 }));
    }
  }

  #[test]
  fn byte_strings() {
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(Vec::new()));
    assert_eq!(decode(b"3:a:e").unwrap(), Value::Bytes(b"a:e".to_vec()));
  }

  #[test]
  fn truncated() {
    assert_matches!(decode(b""), Err(Error::Truncated { position: 0 }));
    assert_matches!(decode(b"i12"), Err(Error::Truncated { .. }));
    assert_matches!(decode(b"12"), Err(Error::Truncated { .. }));
    assert_matches!(decode(b"l"), Err(Error::Truncated { position: 1 }));
    assert_matches!(decode(b"li1e"), Err(Error::Truncated { position: 4 }));
    assert_matches!(decode(b"d1:a"), Err(Error::Truncated { position: 4 }));
    assert_matches!(decode(b"d1:ai1e"), Err(Error::Truncated { .. }));
  }

  #[test]
  fn invalid_length() {
    assert_matches!(decode(b"-1:a"), Err(Error::InvalidLength { position: 0 }));
    assert_matches!(decode(b"5:abc"), Err(Error::InvalidLength { position: 0 }));
    assert_matches!(decode(b"03:abc"), Err(Error::InvalidLength { position: 0 }));
    assert_matches!(decode(b"1x:abc"), Err(Error::InvalidLength { position: 0 }));
    assert_matches!(decode(b"l4:spam9:xe"), Err(Error::InvalidLength { position: 7 }));
    assert_matches!(decode(b"d-1:ae"), Err(Error::InvalidLength { position: 1 }));
  }

  #[test]
  fn unexpected_bytes() {
    assert_matches!(
      decode(b"x"),
      Err(Error::UnexpectedByte {
        byte: b'x',
        position: 0
      })
    );
    assert_matches!(
      decode(b"di1ei2ee"),
      Err(Error::UnexpectedByte {
        byte: b'i',
        position: 1
      })
    );
  }

  #[test]
  fn trailing_data() {
    assert_matches!(decode(b"i1ei2e"), Err(Error::TrailingData { position: 3 }));
    assert_matches!(decode(b"dee"), Err(Error::TrailingData { position: 2 }));
  }

  #[test]
  fn duplicate_keys() {
    assert_matches!(
      decode(b"d1:ai1e1:ai2ee"),
      Err(Error::DuplicateKey { key }) if key == b"a"
    );
    assert_matches!(
      lenient(b"d1:ai1e1:bi1e1:ai2ee"),
      Err(Error::DuplicateKey { key }) if key == b"a"
    );
  }

  #[test]
  fn unordered_keys_strict() {
    assert_matches!(
      decode(b"d1:bi1e1:ai2ee"),
      Err(Error::UnorderedKeys { key }) if key == b"a"
    );
    assert_matches!(
      decode(b"ld2:idi1e1:ai2eee"),
      Err(Error::UnorderedKeys { key }) if key == b"a"
    );
  }

  #[test]
  fn unordered_keys_lenient() {
    let value = lenient(b"d1:bi1e1:ai2ee").unwrap();
    let mut expected = Dict::new();
    expected.insert(b"a".to_vec(), Value::Integer(2));
    expected.insert(b"b".to_vec(), Value::Integer(1));
    assert_eq!(value, Value::Dict(expected));
    assert_eq!(value.encode(), b"d1:ai2e1:bi1ee");
  }

  #[test]
  fn keys_compare_as_bytes() {
    assert_matches!(decode(b"d1:Zi1e1:ai2ee"), Ok(Value::Dict(_)));
    assert_matches!(decode(b"d1:ai1e2:aai2ee"), Ok(Value::Dict(_)));
    assert_matches!(
      decode(b"d2:aai1e1:ai2ee"),
      Err(Error::UnorderedKeys { .. })
    );
  }

  #[test]
  fn nesting_limit() {
    let options = DecodeOptions {
      max_depth: 3,
      ..DecodeOptions::default()
    };
    assert_matches!(Value::decode_with(b"llleee", &options), Ok(_));
    assert_matches!(
      Value::decode_with(b"lllleeee", &options),
      Err(Error::NestingTooDeep { limit: 3 })
    );

    let mut hostile = vec![b'l'; 100_000];
    hostile.extend(vec![b'e'; 100_000]);
    assert_matches!(decode(&hostile), Err(Error::NestingTooDeep { .. }));
  }

  #[test]
  fn skip_returns_exact_span() {
    let options = DecodeOptions::default();
    let mut decoder = Decoder::new(b"d1:vd1:xi1eee", &options);
    let entries = decoder.dict(Decoder::skip).unwrap();
    decoder.finish().unwrap();
    assert_eq!(entries[&b"v"[..]], b"d1:xi1ee");
  }
}
