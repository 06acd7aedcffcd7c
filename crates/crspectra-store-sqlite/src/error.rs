//! Error type for `crspectra-store-sqlite`.

use std::path::PathBuf;

use crspectra_core::ExperimentName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The dataset file is missing, unreadable, or not an SQLite database.
  #[error("dataset unavailable at {}: {source}", .path.display())]
  SourceUnavailable {
    path:   PathBuf,
    source: tokio_rusqlite::Error,
  },

  #[error("experiment not found: {0}")]
  ExperimentNotFound(ExperimentName),

  /// A table exists but its rows do not match the measurement schema.
  #[error("table {experiment:?} violates the measurement schema: {reason}")]
  Schema {
    experiment: ExperimentName,
    reason:     String,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl Error {
  /// `true` if the requested experiment has no table in the dataset.
  pub fn is_not_found(&self) -> bool { matches!(self, Error::ExperimentNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
