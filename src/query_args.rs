use crate::common::*;

/// Named arguments of a query, the `a` dictionary.
///
/// Which fields a query should set depends on its method; see
/// [`Envelope::query`](crate::Envelope::query).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryArgs {
  /// `id`: the querying node. Required.
  pub id: Option<NodeId>,
  /// `info_hash`: `get_peers`, `announce_peer`.
  pub info_hash: Option<Infohash>,
  /// `target`: `find_node`, `sample_infohashes`, `get`.
  pub target: Option<NodeId>,
  /// `token`: from an earlier `get_peers` or `get` response.
  pub token: Option<Vec<u8>>,
  /// `port`: the announcing peer's port. Kept as received; see
  /// [`QueryArgs::peer_addr`].
  pub port: Option<i64>,
  /// `implied_port`: use the datagram's source port instead of `port`.
  pub implied_port: bool,
  /// `want` (BEP 32): an ordered set, duplicates are dropped.
  pub want: Vec<Want>,
  /// `noseed` (BEP 33)
  pub noseed: Option<i64>,
  /// `scrape` (BEP 33)
  pub scrape: Option<i64>,
  /// `v` (BEP 44): the stored item, carried without interpretation.
  pub v: Option<RawValue>,
}

impl QueryArgs {
  pub fn new(id: NodeId) -> Self {
    Self {
      id: Some(id),
      ..Self::default()
    }
  }

  /// Where an `announce_peer` sender accepts peer connections: the
  /// datagram's source address with either its source port
  /// (`implied_port`) or the `port` argument.
  pub fn peer_addr(&self, source: SocketAddr) -> Result<NodeAddr> {
    if self.implied_port {
      return Ok(source.into());
    }
    let port = self.port.context(error::MissingField { field: "port" })?;
    NodeAddr::with_port(source.ip(), port)
  }

  /// Keys this value will emit, in wire order.
  pub(crate) fn present_keys(&self) -> Vec<&'static str> {
    let mut keys = Vec::new();
    let mut check = |key, present| {
      if present {
        keys.push(key);
      }
    };
    check("id", self.id.is_some());
    check("implied_port", self.implied_port);
    check("info_hash", self.info_hash.is_some());
    check("noseed", self.noseed.is_some());
    check("port", self.port.is_some());
    check("scrape", self.scrape.is_some());
    check("target", self.target.is_some());
    check("token", self.token.is_some());
    check("v", self.v.is_some());
    check("want", !self.want.is_empty());
    keys
  }

  pub(crate) fn dedup_want(&mut self) {
    let mut seen = Vec::with_capacity(self.want.len());
    self.want.retain(|want| {
      if seen.contains(want) {
        false
      } else {
        seen.push(*want);
        true
      }
    });
  }

  pub(crate) fn to_value(&self) -> Value {
    let mut dict = Dict::new();
    if let Some(id) = self.id {
      dict.insert(b"id".to_vec(), Value::Bytes(id.as_bytes().to_vec()));
    }
    if self.implied_port {
      dict.insert(b"implied_port".to_vec(), Value::Integer(1));
    }
    if let Some(info_hash) = self.info_hash {
      dict.insert(b"info_hash".to_vec(), Value::Bytes(info_hash.as_bytes().to_vec()));
    }
    if let Some(noseed) = self.noseed {
      dict.insert(b"noseed".to_vec(), noseed.into());
    }
    if let Some(port) = self.port {
      dict.insert(b"port".to_vec(), port.into());
    }
    if let Some(scrape) = self.scrape {
      dict.insert(b"scrape".to_vec(), scrape.into());
    }
    if let Some(target) = self.target {
      dict.insert(b"target".to_vec(), Value::Bytes(target.as_bytes().to_vec()));
    }
    if let Some(token) = &self.token {
      dict.insert(b"token".to_vec(), token.clone().into());
    }
    if let Some(v) = &self.v {
      dict.insert(b"v".to_vec(), v.clone().into());
    }
    if !self.want.is_empty() {
      let want = self
        .want
        .iter()
        .map(|want| Value::from(want.token()))
        .collect::<Vec<Value>>();
      dict.insert(b"want".to_vec(), want.into());
    }
    Value::Dict(dict)
  }

  pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
    let mut args = Self {
      id: fields.node_id("id")?,
      info_hash: fields.node_id("info_hash")?,
      target: fields.node_id("target")?,
      token: fields.bytes("token")?,
      port: fields.integer("port")?,
      implied_port: fields.flag("implied_port")?,
      want: Vec::new(),
      noseed: fields.integer("noseed")?,
      scrape: fields.integer("scrape")?,
      v: fields.raw("v"),
    };

    for item in fields.list("want")?.unwrap_or_default() {
      let token = item.as_bytes().context(error::FieldType {
        field: "want",
        expected: "a list of byte strings",
      })?;
      match Want::from_token(token) {
        Some(want) => args.want.push(want),
        None => debug!(
          "Ignoring unknown want token `{}`",
          String::from_utf8_lossy(token)
        ),
      }
    }
    args.dedup_want();

    Ok(args)
  }
}
