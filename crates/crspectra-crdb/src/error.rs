//! Error types for the CRDB client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request did not complete, timed out, or got a non-success status.
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The response body is not the expected text table.
  #[error("malformed response: {0}")]
  MalformedResponse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
