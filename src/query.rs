use crate::common::*;

/// Payload of a query message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
  pub method: Method,
  pub args: QueryArgs,
}
