use crate::common::*;

/// An IP address and port, as carried in compact peer and node records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeAddr {
  pub ip: IpAddr,
  pub port: u16,
}

impl NodeAddr {
  pub fn new(ip: impl Into<IpAddr>, port: u16) -> Self {
    Self {
      ip: ip.into(),
      port,
    }
  }

  /// Build an address from a port held in a wider integer, such as the
  /// `port` argument of `announce_peer`.
  pub fn with_port(ip: impl Into<IpAddr>, port: i64) -> Result<Self> {
    let port = u16::try_from(port)
      .ok()
      .context(error::PortOutOfRange { port })?;
    Ok(Self::new(ip, port))
  }

  pub fn family(&self) -> AddrFamily {
    AddrFamily::of(&self.ip)
  }

  pub fn to_socket_addr(self) -> SocketAddr {
    SocketAddr::new(self.ip, self.port)
  }
}

impl From<SocketAddr> for NodeAddr {
  fn from(addr: SocketAddr) -> Self {
    Self::new(addr.ip(), addr.port())
  }
}

impl From<NodeAddr> for SocketAddr {
  fn from(addr: NodeAddr) -> Self {
    addr.to_socket_addr()
  }
}

impl Display for NodeAddr {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.to_socket_addr())
  }
}
