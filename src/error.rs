use crate::common::*;

/// Everything that can go wrong building, encoding or decoding a message.
///
/// Every variant is a hard failure: nothing in this crate substitutes a
/// default for malformed input.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
  #[snafu(display("Input ended in the middle of a value at byte {}", position))]
  Truncated { position: usize },

  #[snafu(display("Invalid byte string length prefix at byte {}", position))]
  InvalidLength { position: usize },

  #[snafu(display("Invalid integer at byte {}", position))]
  InvalidInteger { position: usize },

  #[snafu(display("Unexpected byte `0x{:02x}` at byte {}", byte, position))]
  UnexpectedByte { byte: u8, position: usize },

  #[snafu(display("Dictionary key `{}` appears more than once", String::from_utf8_lossy(key)))]
  DuplicateKey { key: Vec<u8> },

  #[snafu(display(
    "Dictionary key `{}` is out of ascending order",
    String::from_utf8_lossy(key)
  ))]
  UnorderedKeys { key: Vec<u8> },

  #[snafu(display("Unexpected data after end of value at byte {}", position))]
  TrailingData { position: usize },

  #[snafu(display("Values nested deeper than {} levels", limit))]
  NestingTooDeep { limit: usize },

  #[snafu(display(
    "Compact field of {} bytes is not a multiple of the {} byte stride",
    len,
    stride
  ))]
  BadStride { len: usize, stride: usize },

  #[snafu(display("Port {} is out of range", port))]
  PortOutOfRange { port: i64 },

  #[snafu(display("Address {} does not belong in an {} list", ip, expected))]
  AddressFamily { ip: IpAddr, expected: AddrFamily },

  #[snafu(display("Node ID must be 20 bytes, got {}", len))]
  NodeIdLength { len: usize },

  #[snafu(display("Required field `{}` is missing", field))]
  MissingField { field: &'static str },

  #[snafu(display("Field `{}` is not allowed in {} messages", field, kind))]
  VariantMismatch { kind: Kind, field: &'static str },

  #[snafu(display("Unknown message type `{}`", String::from_utf8_lossy(tag)))]
  UnknownVariantTag { tag: Vec<u8> },

  #[snafu(display("Field `{}` must be {}", field, expected))]
  FieldType {
    field: &'static str,
    expected: &'static str,
  },

  #[snafu(display("Argument `{}` does not apply to `{}` queries", field, method))]
  IrrelevantArgument { method: Method, field: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
