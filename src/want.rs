use crate::common::*;

/// Address families a querier wants nodes for (BEP 32).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum Want {
  #[strum(serialize = "n4")]
  Nodes4,
  #[strum(serialize = "n6")]
  Nodes6,
}

impl Want {
  pub fn token(self) -> &'static str {
    self.into()
  }

  /// `None` for tokens this crate doesn't know, which peers may send.
  pub fn from_token(token: &[u8]) -> Option<Self> {
    str::from_utf8(token).ok()?.parse().ok()
  }
}
