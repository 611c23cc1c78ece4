use crate::common::*;

/// Message type, the `y` key of every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum Kind {
  #[strum(serialize = "q")]
  Query,
  #[strum(serialize = "r")]
  Response,
  #[strum(serialize = "e")]
  Error,
}

impl Kind {
  pub fn tag(self) -> &'static str {
    self.into()
  }

  pub fn from_tag(tag: &[u8]) -> Result<Self> {
    str::from_utf8(tag)
      .ok()
      .and_then(|tag| tag.parse().ok())
      .context(error::UnknownVariantTag { tag })
  }
}

impl Display for Kind {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Query => write!(f, "query"),
      Self::Response => write!(f, "response"),
      Self::Error => write!(f, "error"),
    }
  }
}
