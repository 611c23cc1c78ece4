use crate::common::*;

pub(crate) trait InvariantExt<T> {
  fn invariant_unwrap(self, invariant: &'static str) -> T;
}

impl<T, E: Display> InvariantExt<T> for std::result::Result<T, E> {
  fn invariant_unwrap(self, invariant: &'static str) -> T {
    match self {
      Ok(value) => value,
      Err(error) => panic!("Invariant violated: {}: {}", invariant, error),
    }
  }
}

impl<T> InvariantExt<T> for Option<T> {
  fn invariant_unwrap(self, invariant: &'static str) -> T {
    match self {
      Some(value) => value,
      None => panic!("Invariant violated: {}", invariant),
    }
  }
}
