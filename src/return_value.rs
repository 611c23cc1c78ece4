use crate::common::*;

/// Result of a query, the `r` dictionary of a response.
///
/// Keys, in wire order: `BFpe`, `BFsd`, `id`, `interval`, `nodes`,
/// `nodes6`, `num`, `samples`, `token`, `v`, `values`. Empty `nodes`,
/// `nodes6` and `values` are omitted; every other field is omitted only when
/// it is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnValue {
  /// `id`: the responding node. Required.
  pub id: Option<NodeId>,
  /// `nodes`: compact IPv4 nodes closest to the target.
  pub nodes: Vec<NodeInfo>,
  /// `nodes6` (BEP 32): compact IPv6 nodes closest to the target.
  pub nodes6: Vec<NodeInfo>,
  /// `token`: required by a later `announce_peer` or `put`.
  pub token: Option<Vec<u8>>,
  /// `values`: peers for the requested infohash, one compact address each.
  pub values: Vec<NodeAddr>,
  /// `BFsd` (BEP 33): seeds bloom filter.
  pub seeds_filter: Option<Vec<u8>>,
  /// `BFpe` (BEP 33): peers bloom filter.
  pub peers_filter: Option<Vec<u8>>,
  /// `interval` (BEP 51): seconds before the responder should be sampled
  /// again.
  pub interval: Option<i64>,
  /// `num` (BEP 51): infohashes the responder holds.
  pub num: Option<i64>,
  /// `samples` (BEP 51). `Some` and empty means the responder supports
  /// sampling and has nothing to offer; `None` means it doesn't support it.
  pub samples: Option<Vec<Infohash>>,
  /// `v` (BEP 44): a stored item, carried without interpretation.
  pub v: Option<RawValue>,
}

impl ReturnValue {
  pub fn new(id: NodeId) -> Self {
    Self {
      id: Some(id),
      ..Self::default()
    }
  }

  /// Visit IPv4 nodes in order, then IPv6 nodes in order.
  pub fn for_each_node(&self, visit: impl FnMut(&NodeInfo)) {
    self.nodes_iter().for_each(visit);
  }

  pub fn nodes_iter(&self) -> impl Iterator<Item = &NodeInfo> {
    self.nodes.iter().chain(&self.nodes6)
  }

  pub(crate) fn check_families(&self) -> Result<()> {
    for (nodes, expected) in &[
      (&self.nodes, AddrFamily::V4),
      (&self.nodes6, AddrFamily::V6),
    ] {
      if let Some(node) = nodes.iter().find(|node| node.addr.family() != *expected) {
        return Err(Error::AddressFamily {
          ip: node.addr.ip,
          expected: *expected,
        });
      }
    }
    Ok(())
  }

  pub(crate) fn to_value(&self) -> Value {
    let mut dict = Dict::new();
    if let Some(filter) = &self.peers_filter {
      dict.insert(b"BFpe".to_vec(), filter.clone().into());
    }
    if let Some(filter) = &self.seeds_filter {
      dict.insert(b"BFsd".to_vec(), filter.clone().into());
    }
    if let Some(id) = self.id {
      dict.insert(b"id".to_vec(), Value::Bytes(id.as_bytes().to_vec()));
    }
    if let Some(interval) = self.interval {
      dict.insert(b"interval".to_vec(), interval.into());
    }
    if !self.nodes.is_empty() {
      let nodes = compact::encode_node_list(&self.nodes, AddrFamily::V4)
        .invariant_unwrap("node families are checked on construction");
      dict.insert(b"nodes".to_vec(), nodes.into());
    }
    if !self.nodes6.is_empty() {
      let nodes6 = compact::encode_node_list(&self.nodes6, AddrFamily::V6)
        .invariant_unwrap("node families are checked on construction");
      dict.insert(b"nodes6".to_vec(), nodes6.into());
    }
    if let Some(num) = self.num {
      dict.insert(b"num".to_vec(), num.into());
    }
    if let Some(samples) = &self.samples {
      dict.insert(
        b"samples".to_vec(),
        compact::encode_infohash_samples(samples).into(),
      );
    }
    if let Some(token) = &self.token {
      dict.insert(b"token".to_vec(), token.clone().into());
    }
    if let Some(v) = &self.v {
      dict.insert(b"v".to_vec(), v.clone().into());
    }
    if !self.values.is_empty() {
      let values = self
        .values
        .iter()
        .map(|addr| Value::Bytes(compact::encode_addr(addr)))
        .collect::<Vec<Value>>();
      dict.insert(b"values".to_vec(), values.into());
    }
    Value::Dict(dict)
  }

  pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
    let nodes = match fields.bytes("nodes")? {
      Some(bytes) => compact::decode_node_list(&bytes, AddrFamily::V4)?,
      None => Vec::new(),
    };

    let nodes6 = match fields.bytes("nodes6")? {
      Some(bytes) => compact::decode_node_list(&bytes, AddrFamily::V6)?,
      None => Vec::new(),
    };

    let samples = fields
      .bytes("samples")?
      .map(|bytes| compact::decode_infohash_samples(&bytes))
      .transpose()?;

    let values = fields
      .list("values")?
      .unwrap_or_default()
      .iter()
      .map(|item| {
        item
          .as_bytes()
          .context(error::FieldType {
            field: "values",
            expected: "a list of byte strings",
          })
          .and_then(compact::decode_addr)
      })
      .collect::<Result<Vec<NodeAddr>>>()?;

    Ok(Self {
      id: fields.node_id("id")?,
      nodes,
      nodes6,
      token: fields.bytes("token")?,
      values,
      seeds_filter: fields.bytes("BFsd")?,
      peers_filter: fields.bytes("BFpe")?,
      interval: fields.integer("interval")?,
      num: fields.integer("num")?,
      samples,
      v: fields.raw("v"),
    })
  }
}
