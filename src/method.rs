use crate::common::*;

/// Query method, the `q` key of a query.
///
/// Methods this crate doesn't know are kept as `Extension` and round-trip
/// unchanged. Deciding whether to answer them is up to the application.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
  Ping,
  FindNode,
  GetPeers,
  AnnouncePeer,
  /// BEP 51
  SampleInfohashes,
  /// BEP 44
  Get,
  /// BEP 44
  Put,
  Extension(Vec<u8>),
}

impl Method {
  pub fn from_name(name: &[u8]) -> Self {
    match name {
      b"ping" => Self::Ping,
      b"find_node" => Self::FindNode,
      b"get_peers" => Self::GetPeers,
      b"announce_peer" => Self::AnnouncePeer,
      b"sample_infohashes" => Self::SampleInfohashes,
      b"get" => Self::Get,
      b"put" => Self::Put,
      other => Self::Extension(other.to_vec()),
    }
  }

  pub fn name(&self) -> &[u8] {
    match self {
      Self::Ping => b"ping",
      Self::FindNode => b"find_node",
      Self::GetPeers => b"get_peers",
      Self::AnnouncePeer => b"announce_peer",
      Self::SampleInfohashes => b"sample_infohashes",
      Self::Get => b"get",
      Self::Put => b"put",
      Self::Extension(name) => name,
    }
  }

  pub fn is_extension(&self) -> bool {
    matches!(self, Self::Extension(_))
  }

  /// Whether argument `key` means anything to this method. `id` always does,
  /// and extension methods accept everything.
  pub(crate) fn accepts(&self, key: &str) -> bool {
    let keys: &[&str] = match self {
      Self::Ping => &[],
      Self::FindNode => &["target", "want"],
      Self::GetPeers => &["info_hash", "want", "noseed", "scrape"],
      Self::AnnouncePeer => &["info_hash", "port", "implied_port", "token"],
      Self::SampleInfohashes => &["target", "want"],
      Self::Get => &["target", "want"],
      Self::Put => &["token", "v"],
      Self::Extension(_) => return true,
    };
    key == "id" || keys.contains(&key)
  }
}

impl From<&str> for Method {
  fn from(name: &str) -> Self {
    Self::from_name(name.as_bytes())
  }
}

impl Display for Method {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", String::from_utf8_lossy(self.name()))
  }
}
