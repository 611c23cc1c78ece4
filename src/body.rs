use crate::common::*;

/// The payload of an envelope. Exactly one kind per message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
  Query(Query),
  Response(Response),
  Error(ErrorMsg),
}

impl Body {
  pub fn kind(&self) -> Kind {
    match self {
      Self::Query(_) => Kind::Query,
      Self::Response(_) => Kind::Response,
      Self::Error(_) => Kind::Error,
    }
  }
}
