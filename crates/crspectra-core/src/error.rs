//! Error types for `crspectra-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An uncertainty component was negative or NaN.
  #[error("{field} must be a non-negative magnitude, got {value}")]
  NegativeUncertainty { field: &'static str, value: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
