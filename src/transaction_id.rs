use crate::common::*;

/// Opaque token chosen by a querier and echoed back by the responder.
///
/// Only ever compared for equality; callers own allocation and lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(Vec<u8>);

impl TransactionId {
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.0
  }
}

impl From<Vec<u8>> for TransactionId {
  fn from(bytes: Vec<u8>) -> Self {
    Self(bytes)
  }
}

impl From<&[u8]> for TransactionId {
  fn from(bytes: &[u8]) -> Self {
    Self(bytes.to_vec())
  }
}

impl From<&str> for TransactionId {
  fn from(text: &str) -> Self {
    Self(text.as_bytes().to_vec())
  }
}

impl From<u16> for TransactionId {
  fn from(n: u16) -> Self {
    Self(n.to_be_bytes().to_vec())
  }
}

impl AsRef<[u8]> for TransactionId {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Display for TransactionId {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for byte in &self.0 {
      write!(f, "{:02x}", byte)?;
    }
    Ok(())
  }
}
