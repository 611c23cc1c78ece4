use crate::common::*;

/// Payload of a response message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
  pub ret: ReturnValue,
  /// Top-level `ip`: the querier's address as the responder saw it.
  pub ip: Option<NodeAddr>,
}
