use crate::common::*;

/// A node's contact information: its ID and where to reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeInfo {
  pub id: NodeId,
  pub addr: NodeAddr,
}

impl NodeInfo {
  pub fn new(id: NodeId, addr: impl Into<NodeAddr>) -> Self {
    Self {
      id,
      addr: addr.into(),
    }
  }
}

impl Display for NodeInfo {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}@{}", self.id, self.addr)
  }
}
