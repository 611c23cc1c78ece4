//! Message model and wire codec for the BitTorrent mainline DHT (KRPC).
//!
//! An [`Envelope`] is one of three kinds of message: a query, a response, or
//! an error. Envelopes are built through validating constructors and cross
//! the wire as bencoded dictionaries via [`Envelope::encode`] and
//! [`Envelope::decode`]. The generic bencode layer is exposed as [`Value`],
//! and the fixed-stride compact formats live in [`compact`].
//!
//! Transport, transaction bookkeeping and routing are left to the caller.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
  clippy::module_name_repetitions,
  clippy::must_use_candidate,
  clippy::missing_errors_doc
)]

#[cfg(test)]
#[macro_use]
mod assert_matches;

mod addr_family;
mod body;
mod common;
mod decode_options;
mod decoder;
mod envelope;
mod error;
mod error_msg;
mod fields;
mod invariant;
mod kind;
mod method;
mod node_addr;
mod node_id;
mod node_info;
mod query;
mod query_args;
mod raw_value;
mod response;
mod return_value;
mod transaction_id;
mod value;
mod want;

pub mod compact;

pub use crate::{
  addr_family::AddrFamily,
  body::Body,
  decode_options::{DecodeOptions, KeyOrder},
  envelope::Envelope,
  error::{Error, Result},
  error_msg::ErrorMsg,
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
