//! Layered configuration: TOML file, then `CRSPECTRA_*` environment
//! variables, then command-line flags.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use crspectra_crdb::{CrdbConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crspectra_store_sqlite::default_database_path;
use serde::Deserialize;

/// Shape of the optional config file and environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite dataset path.
  pub database:     PathBuf,
  /// CRDB REST endpoint.
  pub endpoint:     String,
  pub timeout_secs: u64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      database:     default_database_path(),
      endpoint:     DEFAULT_ENDPOINT.to_owned(),
      timeout_secs: DEFAULT_TIMEOUT.as_secs(),
    }
  }
}

impl Settings {
  /// Read `file` (if it exists) and the environment.
  pub fn load(file: PathBuf) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("CRSPECTRA"))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise configuration")
  }

  pub fn crdb(&self) -> CrdbConfig {
    CrdbConfig {
      endpoint: self.endpoint.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let settings = Settings::load(PathBuf::from("does/not/exist.toml")).unwrap();
    assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(settings.timeout_secs, 30);
  }

  #[test]
  fn file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "endpoint = \"http://localhost:8080/rest.php\"").unwrap();
    writeln!(file, "timeout_secs = 5").unwrap();

    let settings = Settings::load(file.path().to_path_buf()).unwrap();
    assert_eq!(settings.endpoint, "http://localhost:8080/rest.php");

    let crdb = settings.crdb();
    assert_eq!(crdb.timeout, Duration::from_secs(5));
  }
}
