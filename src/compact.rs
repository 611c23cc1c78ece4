//! Fixed-stride binary records packed into bencoded byte strings.
//!
//! Every record is a run of big-endian fields with no separators, so a
//! list is valid only if its length is an exact multiple of the record
//! stride:
//!
//! ```text
//! address  = ip (4 | 16) . port (2)
//! node     = id (20) . address
//! infohash = id (20)
//! ```
use crate::common::*;

/// Pack nodes as `id . ip . port` records, in input order.
pub fn encode_node_list(nodes: &[NodeInfo], family: AddrFamily) -> Result<Vec<u8>> {
  let mut buffer = Vec::with_capacity(nodes.len() * family.node_stride());
  for node in nodes {
    buffer.extend_from_slice(node.id.as_bytes());
    write_addr(&node.addr, family, &mut buffer)?;
  }
  Ok(buffer)
}

pub fn decode_node_list(bytes: &[u8], family: AddrFamily) -> Result<Vec<NodeInfo>> {
  records(bytes, family.node_stride())?
    .map(|record| -> Result<NodeInfo> {
      let (id, addr) = record.split_at(NodeId::LEN);
      Ok(NodeInfo {
        id: NodeId::from_bytes(id)?,
        addr: read_addr(addr),
      })
    })
    .collect()
}

/// Pack addresses as `ip . port` records. All addresses must belong to
/// `family`.
pub fn encode_addresses(addrs: &[NodeAddr], family: AddrFamily) -> Result<Vec<u8>> {
  let mut buffer = Vec::with_capacity(addrs.len() * family.addr_stride());
  for addr in addrs {
    write_addr(addr, family, &mut buffer)?;
  }
  Ok(buffer)
}

pub fn decode_addresses(bytes: &[u8], family: AddrFamily) -> Result<Vec<NodeAddr>> {
  Ok(records(bytes, family.addr_stride())?.map(read_addr).collect())
}

/// A single compact address, 6 bytes for IPv4 or 18 for IPv6.
pub fn encode_addr(addr: &NodeAddr) -> Vec<u8> {
  let mut buffer = Vec::with_capacity(addr.family().addr_stride());
  write_addr(addr, addr.family(), &mut buffer)
    .invariant_unwrap("address always matches its own family");
  buffer
}

/// Parse a single compact address, choosing the family from its length.
pub fn decode_addr(bytes: &[u8]) -> Result<NodeAddr> {
  let stride = AddrFamily::V6.addr_stride();
  match bytes.len() {
    len if len == AddrFamily::V4.addr_stride() || len == stride => Ok(read_addr(bytes)),
    len => Err(Error::BadStride { len, stride }),
  }
}

pub fn encode_infohash_samples(samples: &[Infohash]) -> Vec<u8> {
  let mut buffer = Vec::with_capacity(samples.len() * NodeId::LEN);
  for sample in samples {
    buffer.extend_from_slice(sample.as_bytes());
  }
  buffer
}

pub fn decode_infohash_samples(bytes: &[u8]) -> Result<Vec<Infohash>> {
  records(bytes, NodeId::LEN)?
    .map(NodeId::from_bytes)
    .collect()
}

fn records(bytes: &[u8], stride: usize) -> Result<std::slice::ChunksExact<u8>> {
  ensure!(
    bytes.len() % stride == 0,
    error::BadStride {
      len: bytes.len(),
      stride,
    }
  );
  Ok(bytes.chunks_exact(stride))
}

fn write_addr(addr: &NodeAddr, family: AddrFamily, buffer: &mut Vec<u8>) -> Result<()> {
  match (addr.ip, family) {
    (IpAddr::V4(ip), AddrFamily::V4) => buffer.extend_from_slice(&ip.octets()),
    (IpAddr::V6(ip), AddrFamily::V6) => buffer.extend_from_slice(&ip.octets()),
    (ip, expected) => return Err(Error::AddressFamily { ip, expected }),
  }
  buffer.extend_from_slice(&addr.port.to_be_bytes());
  Ok(())
}

// Callers guarantee `bytes` is exactly one 6 or 18 byte record.
fn read_addr(bytes: &[u8]) -> NodeAddr {
  let (ip, port) = bytes.split_at(bytes.len() - 2);
  let ip = match ip.len() {
    4 => IpAddr::from(
      <[u8; 4]>::try_from(ip).invariant_unwrap("iterator guarantees bounds are OK"),
    ),
    _ => IpAddr::from(
      <[u8; 16]>::try_from(ip).invariant_unwrap("iterator guarantees bounds are OK"),
    ),
  };
  let port = u16::from_be_bytes(
    port
      .try_into()
      .invariant_unwrap("iterator guarantees bounds are OK"),
  );
  NodeAddr::new(ip, port)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn node(n: u8, addr: &str) -> NodeInfo {
    NodeInfo::new(NodeId::from([n; 20]), addr.parse::<SocketAddr>().unwrap())
  }

  #[test]
  fn node_list_v4_layout() {
    let nodes = [node(1, "1.2.3.4:6881")];
    let bytes = encode_node_list(&nodes, AddrFamily::V4).unwrap();
    let mut expected = vec![1; 20];
    expected.extend_from_slice(&[1, 2, 3, 4, 0x1a, 0xe1]);
    assert_eq!(bytes, expected);
  }

  #[test]
  fn node_list_v4_two_entries() {
    let nodes = [node(1, "1.2.3.4:6881"), node(2, "10.0.0.1:1")];
    let bytes = encode_node_list(&nodes, AddrFamily::V4).unwrap();
    assert_eq!(bytes.len(), 52);
    assert_eq!(decode_node_list(&bytes, AddrFamily::V4).unwrap(), nodes);
  }

  #[test]
  fn node_list_v6() {
    let nodes = [node(7, "[2001:db8::1]:65535"), node(8, "[::1]:0")];
    let bytes = encode_node_list(&nodes, AddrFamily::V6).unwrap();
    assert_eq!(bytes.len(), 76);
    assert_eq!(decode_node_list(&bytes, AddrFamily::V6).unwrap(), nodes);
  }

  #[test]
  fn node_list_bad_stride() {
    assert_matches!(
      decode_node_list(&[0; 27], AddrFamily::V4),
      Err(Error::BadStride { len: 27, stride: 26 })
    );
    assert_matches!(
      decode_node_list(&[0; 52], AddrFamily::V6),
      Err(Error::BadStride { len: 52, stride: 38 })
    );
    for len in 1..26 {
      assert_matches!(
        decode_node_list(&vec![0; len], AddrFamily::V4),
        Err(Error::BadStride { .. })
      );
    }
    assert_eq!(decode_node_list(&[], AddrFamily::V6).unwrap(), Vec::new());
    assert_eq!(decode_node_list(&[0; 78], AddrFamily::V4).unwrap().len(), 3);
  }

  #[test]
  fn node_list_wrong_family() {
    let nodes = [node(1, "1.2.3.4:1")];
    assert_matches!(
      encode_node_list(&nodes, AddrFamily::V6),
      Err(Error::AddressFamily {
        expected: AddrFamily::V6,
        ..
      })
    );
  }

  #[test]
  fn addresses() {
    let addrs = [
      NodeAddr::new(Ipv4Addr::new(127, 0, 0, 1), 80),
      NodeAddr::new(Ipv4Addr::new(192, 168, 1, 2), 51413),
    ];
    let bytes = encode_addresses(&addrs, AddrFamily::V4).unwrap();
    assert_eq!(bytes, [127, 0, 0, 1, 0, 80, 192, 168, 1, 2, 0xc8, 0xd5]);
    assert_eq!(decode_addresses(&bytes, AddrFamily::V4).unwrap(), addrs);
    assert_matches!(
      decode_addresses(&bytes[..7], AddrFamily::V4),
      Err(Error::BadStride { len: 7, stride: 6 })
    );
    assert_matches!(
      encode_addresses(&addrs, AddrFamily::V6),
      Err(Error::AddressFamily { .. })
    );
  }

  #[test]
  fn single_addr() {
    let v4 = NodeAddr::new(Ipv4Addr::new(1, 2, 3, 4), 258);
    assert_eq!(encode_addr(&v4), [1, 2, 3, 4, 1, 2]);
    assert_eq!(decode_addr(&encode_addr(&v4)).unwrap(), v4);

    let v6 = NodeAddr::new(Ipv6Addr::LOCALHOST, 6881);
    assert_eq!(encode_addr(&v6).len(), 18);
    assert_eq!(decode_addr(&encode_addr(&v6)).unwrap(), v6);

    assert_matches!(
      decode_addr(&[0; 7]),
      Err(Error::BadStride { len: 7, stride: 18 })
    );
  }

  #[test]
  fn infohash_samples() {
    let samples = [NodeId::from([3; 20]), NodeId::from([4; 20])];
    let bytes = encode_infohash_samples(&samples);
    assert_eq!(bytes.len(), 40);
    assert_eq!(decode_infohash_samples(&bytes).unwrap(), samples);
    assert_eq!(decode_infohash_samples(&[]).unwrap(), Vec::new());
    assert_matches!(
      decode_infohash_samples(&[0; 21]),
      Err(Error::BadStride { len: 21, stride: 20 })
    );
  }
}
