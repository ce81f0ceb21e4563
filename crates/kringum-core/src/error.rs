//! Error types for `kringum-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid gps {input:?}: {reason}")]
  InvalidGps { input: String, reason: String },

  #[error("coordinate is not a finite number: {0}")]
  NonFiniteCoordinate(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
