/// How the decoder treats dictionaries whose keys are not in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOrder {
  /// Reject with `UnorderedKeys`.
  Strict,
  /// Accept, and log a warning for each offending dictionary.
  Lenient,
}

/// Decoder configuration.
///
/// The default is strict key ordering and a nesting limit of 64, which is
/// deeper than any message the protocol defines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
  pub key_order: KeyOrder,
  pub max_depth: usize,
}

impl DecodeOptions {
  pub const DEFAULT_MAX_DEPTH: usize = 64;

  /// Options that accept dictionaries with unordered keys, for peers that
  /// don't sort.
  pub fn lenient() -> Self {
    Self {
      key_order: KeyOrder::Lenient,
      ..Self::default()
    }
  }
}

impl Default for DecodeOptions {
  fn default() -> Self {
    Self {
      key_order: KeyOrder::Strict,
      max_depth: Self::DEFAULT_MAX_DEPTH,
    }
  }
}
