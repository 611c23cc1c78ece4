use crate::common::*;

const ID_LEN: usize = 20;

/// A 160-bit DHT node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId([u8; ID_LEN]);

/// Infohashes live in the same keyspace as node IDs.
pub type Infohash = NodeId;

impl NodeId {
  pub const LEN: usize = ID_LEN;

  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    let array = <[u8; ID_LEN]>::try_from(bytes)
      .ok()
      .context(error::NodeIdLength { len: bytes.len() })?;
    Ok(Self(array))
  }

  pub fn random() -> Self {
    Self(rand::thread_rng().gen())
  }

  pub fn as_bytes(&self) -> &[u8; ID_LEN] {
    &self.0
  }
}

impl From<[u8; ID_LEN]> for NodeId {
  fn from(bytes: [u8; ID_LEN]) -> Self {
    Self(bytes)
  }
}

impl From<NodeId> for [u8; ID_LEN] {
  fn from(id: NodeId) -> Self {
    id.0
  }
}

impl TryFrom<&[u8]> for NodeId {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> {
    Self::from_bytes(bytes)
  }
}

impl AsRef<[u8]> for NodeId {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Display for NodeId {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for byte in &self.0 {
      write!(f, "{:02x}", byte)?;
    }
    Ok(())
  }
}

impl Serialize for NodeId {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_bytes(&self.0)
  }
}

impl<'de> Deserialize<'de> for NodeId {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let bytes = serde_bytes::ByteBuf::deserialize(deserializer)?;
    Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
  }
}
