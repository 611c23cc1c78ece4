use crate::common::*;

// =====
// BEP0005
//
// /\ Every message is a bencoded dict with the keys
//
//      msg['t'] ∈ transaction_id
//      msg['y'] ∈ { 'q', 'r', 'e' }
//
//    and optionally
//
//      msg['ro'] = 1           read-only sender, BEP43
//      msg['v']  = version     client string, BEP20
//
// /\ Queries add
//
//      msg['q'] ∈ method
//      msg['a'] ∈ method.args
//
// /\ Responses add
//
//      msg['r']  = return value
//      msg['ip'] = compact address of the querier, as seen by the responder
//
// /\ Errors add
//
//      msg['e'] = [code, message]
//
// Keys belonging to another message type are rejected, so a decoded
// envelope always has exactly one payload.

assert_impl_all!(Envelope: Send, Sync);

/// Keys only legal in one kind of message.
const KIND_KEYS: &[(&str, Kind)] = &[
  ("a", Kind::Query),
  ("e", Kind::Error),
  ("ip", Kind::Response),
  ("q", Kind::Query),
  ("r", Kind::Response),
];

/// A KRPC message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
  transaction_id: TransactionId,
  read_only: bool,
  version: Option<Vec<u8>>,
  body: Body,
}

impl Envelope {
  /// Build a query.
  ///
  /// `args.id` must be set. For methods this crate knows, every other
  /// argument must be one the method uses; extension methods take anything.
  /// An `Extension` carrying a known method name is treated as that method.
  /// `args.port` must fit in 16 bits.
  pub fn query(
    transaction_id: impl Into<TransactionId>,
    method: Method,
    args: QueryArgs,
    read_only: bool,
  ) -> Result<Self> {
    let method = Method::from_name(method.name());
    if let Some(port) = args.port {
      ensure!(
        u16::try_from(port).is_ok(),
        error::PortOutOfRange { port }
      );
    }
    for field in args.present_keys() {
      ensure!(
        method.accepts(field),
        error::IrrelevantArgument {
          method: method.clone(),
          field,
        }
      );
    }
    let envelope = Self::new(transaction_id.into(), Body::Query(Query { method, args }))?;
    Ok(envelope.with_read_only(read_only))
  }

  /// Build a response. `ret.id` must be set, and `nodes` and `nodes6` must
  /// hold IPv4 and IPv6 nodes respectively.
  pub fn response(transaction_id: impl Into<TransactionId>, ret: ReturnValue) -> Result<Self> {
    Self::new(
      transaction_id.into(),
      Body::Response(Response { ret, ip: None }),
    )
  }

  pub fn error(
    transaction_id: impl Into<TransactionId>,
    code: i64,
    message: impl Into<String>,
  ) -> Self {
    Self {
      transaction_id: transaction_id.into(),
      read_only: false,
      version: None,
      body: Body::Error(ErrorMsg::new(code, message)),
    }
  }

  fn new(transaction_id: TransactionId, mut body: Body) -> Result<Self> {
    match &mut body {
      Body::Query(query) => {
        ensure!(query.args.id.is_some(), error::MissingField { field: "id" });
        query.args.dedup_want();
      }
      Body::Response(response) => {
        ensure!(
          response.ret.id.is_some(),
          error::MissingField { field: "id" }
        );
        response.ret.check_families()?;
      }
      Body::Error(_) => {}
    }

    Ok(Self {
      transaction_id,
      read_only: false,
      version: None,
      body,
    })
  }

  /// Attach the querier's address as seen by the responder. Responses only.
  pub fn with_observed_ip(mut self, addr: NodeAddr) -> Result<Self> {
    match &mut self.body {
      Body::Response(response) => {
        response.ip = Some(addr);
        Ok(self)
      }
      body => Err(Error::VariantMismatch {
        kind: body.kind(),
        field: "ip",
      }),
    }
  }

  pub fn with_read_only(mut self, read_only: bool) -> Self {
    self.read_only = read_only;
    self
  }

  pub fn with_version(mut self, version: impl Into<Vec<u8>>) -> Self {
    self.version = Some(version.into());
    self
  }

  pub fn transaction_id(&self) -> &TransactionId {
    &self.transaction_id
  }

  pub fn kind(&self) -> Kind {
    self.body.kind()
  }

  pub fn is_read_only(&self) -> bool {
    self.read_only
  }

  pub fn version(&self) -> Option<&[u8]> {
    self.version.as_deref()
  }

  pub fn body(&self) -> &Body {
    &self.body
  }

  pub fn into_body(self) -> Body {
    self.body
  }

  /// The ID of the node that sent this message: `a.id` of a query or `r.id`
  /// of a response. Errors carry no ID.
  pub fn sender_id(&self) -> Option<NodeId> {
    match &self.body {
      Body::Query(query) => query.args.id,
      Body::Response(response) => response.ret.id,
      Body::Error(_) => None,
    }
  }

  pub fn as_query(&self) -> Option<&Query> {
    match &self.body {
      Body::Query(query) => Some(query),
      _ => None,
    }
  }

  pub fn as_response(&self) -> Option<&Response> {
    match &self.body {
      Body::Response(response) => Some(response),
      _ => None,
    }
  }

  pub fn as_error(&self) -> Option<&ErrorMsg> {
    match &self.body {
      Body::Error(error) => Some(error),
      _ => None,
    }
  }

  pub fn to_value(&self) -> Value {
    let mut dict = Dict::new();
    dict.insert(b"t".to_vec(), self.transaction_id.as_bytes().into());
    dict.insert(b"y".to_vec(), self.kind().tag().into());
    if self.read_only {
      dict.insert(b"ro".to_vec(), Value::Integer(1));
    }
    if let Some(version) = &self.version {
      dict.insert(b"v".to_vec(), version.clone().into());
    }

    match &self.body {
      Body::Query(query) => {
        dict.insert(b"q".to_vec(), query.method.name().into());
        dict.insert(b"a".to_vec(), query.args.to_value());
      }
      Body::Response(response) => {
        dict.insert(b"r".to_vec(), response.ret.to_value());
        if let Some(ip) = &response.ip {
          dict.insert(b"ip".to_vec(), compact::encode_addr(ip).into());
        }
      }
      Body::Error(error) => {
        dict.insert(b"e".to_vec(), error.to_value());
      }
    }

    Value::Dict(dict)
  }

  pub fn encode(&self) -> Vec<u8> {
    self.to_value().encode()
  }

  pub fn decode(input: &[u8]) -> Result<Self> {
    Self::decode_with(input, &DecodeOptions::default())
  }

  pub fn decode_with(input: &[u8], options: &DecodeOptions) -> Result<Self> {
    let result = Self::parse(input, options);
    if let Err(error) = &result {
      debug!("Rejected {} byte message: {}", input.len(), error);
    }
    result
  }

  fn parse(input: &[u8], options: &DecodeOptions) -> Result<Self> {
    let fields = Fields::parse(input, options, "message")?;

    let transaction_id = fields
      .bytes("t")?
      .context(error::MissingField { field: "t" })?;
    let tag = fields
      .bytes("y")?
      .context(error::MissingField { field: "y" })?;
    let kind = Kind::from_tag(&tag)?;

    for (field, owner) in KIND_KEYS {
      ensure!(
        *owner == kind || !fields.contains(field),
        error::VariantMismatch {
          kind,
          field: *field,
        }
      );
    }

    let body = match kind {
      Kind::Query => {
        let method = fields
          .bytes("q")?
          .context(error::MissingField { field: "q" })?;
        let args = fields
          .dict("a")?
          .context(error::MissingField { field: "a" })?;
        Body::Query(Query {
          method: Method::from_name(&method),
          args: QueryArgs::from_fields(&args)?,
        })
      }
      Kind::Response => {
        let ret = fields
          .dict("r")?
          .context(error::MissingField { field: "r" })?;
        let ip = fields
          .bytes("ip")?
          .map(|bytes| compact::decode_addr(&bytes))
          .transpose()?;
        Body::Response(Response {
          ret: ReturnValue::from_fields(&ret)?,
          ip,
        })
      }
      Kind::Error => {
        let items = fields
          .list("e")?
          .context(error::MissingField { field: "e" })?;
        Body::Error(ErrorMsg::from_list(&items)?)
      }
    };

    Ok(Self {
      read_only: fields.flag("ro")?,
      version: fields.bytes("v")?,
      ..Self::new(transaction_id.into(), body)?
    })
  }
}

impl TryFrom<&[u8]> for Envelope {
  type Error = Error;

  fn try_from(input: &[u8]) -> Result<Self> {
    Self::decode(input)
  }
}
