use crate::common::*;

/// IP address family of a compact list. Fixes the width of every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddrFamily {
  V4,
  V6,
}

const PORT_LEN: usize = 2;

const_assert_eq!(AddrFamily::V4.addr_stride(), 6);
const_assert_eq!(AddrFamily::V6.addr_stride(), 18);
const_assert_eq!(AddrFamily::V4.node_stride(), 26);
const_assert_eq!(AddrFamily::V6.node_stride(), 38);

impl AddrFamily {
  pub const fn ip_len(self) -> usize {
    match self {
      Self::V4 => 4,
      Self::V6 => 16,
    }
  }

  /// Bytes per compact address: IP then big-endian port.
  pub const fn addr_stride(self) -> usize {
    self.ip_len() + PORT_LEN
  }

  /// Bytes per compact node: ID, IP, port.
  pub const fn node_stride(self) -> usize {
    NodeId::LEN + self.addr_stride()
  }

  pub fn of(ip: &IpAddr) -> Self {
    match ip {
      IpAddr::V4(_) => Self::V4,
      IpAddr::V6(_) => Self::V6,
    }
  }
}

impl Display for AddrFamily {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::V4 => write!(f, "IPv4"),
      Self::V6 => write!(f, "IPv6"),
    }
  }
}
