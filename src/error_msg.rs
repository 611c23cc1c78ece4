use crate::common::*;

/// Payload of an error message: `e` = `[code, message]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMsg {
  pub code: i64,
  pub message: String,
}

impl ErrorMsg {
  pub const GENERIC: i64 = 201;
  pub const SERVER: i64 = 202;
  pub const PROTOCOL: i64 = 203;
  pub const METHOD_UNKNOWN: i64 = 204;

  pub fn new(code: i64, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
    }
  }

  pub(crate) fn to_value(&self) -> Value {
    Value::List(vec![
      Value::Integer(self.code),
      Value::from(self.message.as_str()),
    ])
  }

  /// Peers are known to append extra elements, which are ignored. A message
  /// that isn't UTF-8 is decoded lossily.
  pub(crate) fn from_list(items: &[Value]) -> Result<Self> {
    match items {
      [Value::Integer(code), Value::Bytes(message), ..] => Ok(Self {
        code: *code,
        message: String::from_utf8_lossy(message).into_owned(),
      }),
      _ => Err(Error::FieldType {
        field: "e",
        expected: "a list of an integer and a byte string",
      }),
    }
  }
}

impl Display for ErrorMsg {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} {}", self.code, self.message)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn encoding() {
    let error = ErrorMsg::new(ErrorMsg::GENERIC, "A Generic Error Ocurred");
    assert_eq!(
      error.to_value().encode(),
      &b"li201e23:A Generic Error Ocurrede"[..]
    );
  }

  #[test]
  fn from_list() {
    let items = [Value::Integer(204), Value::from("Method Unknown")];
    assert_eq!(
      ErrorMsg::from_list(&items).unwrap(),
      ErrorMsg::new(ErrorMsg::METHOD_UNKNOWN, "Method Unknown")
    );

    let extra = [Value::Integer(202), Value::from("x"), Value::Integer(1)];
    assert_eq!(ErrorMsg::from_list(&extra).unwrap().code, 202);
  }

  #[test]
  fn malformed() {
    for items in &[
      vec![],
      vec![Value::Integer(201)],
      vec![Value::from("x"), Value::Integer(201)],
    ] {
      assert_matches!(
        ErrorMsg::from_list(items),
        Err(Error::FieldType { field: "e", .. })
      );
    }
  }

  #[test]
  fn display() {
    assert_eq!(ErrorMsg::new(203, "Protocol Error").to_string(), "203 Protocol Error");
  }
}
