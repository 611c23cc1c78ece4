// stdlib types
pub(crate) use std::{
  collections::BTreeMap,
  convert::{TryFrom, TryInto},
  fmt::{self, Display, Formatter},
  net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
  str,
};

// dependencies
pub(crate) use log::{debug, warn};
pub(crate) use rand::Rng;
pub(crate) use serde::{Deserialize, Deserializer, Serialize, Serializer};
pub(crate) use snafu::{ensure, OptionExt, Snafu};
pub(crate) use static_assertions::{assert_impl_all, const_assert_eq};
pub(crate) use strum_macros::{EnumString, IntoStaticStr};

// modules
pub(crate) use crate::{compact, error};

// traits
pub(crate) use crate::invariant::InvariantExt;

// structs and enums
pub(crate) use crate::{
  addr_family::AddrFamily,
  body::Body,
  decode_options::{DecodeOptions, KeyOrder},
  decoder::Decoder,
  error::{Error, Result},
  error_msg::ErrorMsg,
  fields::Fields,
  kind::Kind,
  method::Method,
  node_addr::NodeAddr,
  node_id::{Infohash, NodeId},
  node_info::NodeInfo,
  query::Query,
  query_args::QueryArgs,
  raw_value::RawValue,
  response::Response,
  return_value::ReturnValue,
  transaction_id::TransactionId,
  value::{Dict, Value},
  want::Want,
};
