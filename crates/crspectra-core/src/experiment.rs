//! Experiment names — the lookup key of a spectrum.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Opaque name of a published measurement campaign, e.g. `"AMS-02"`.
///
/// Unique within the local dataset (it is the table name there). The remote
/// service accepts any string, so no validation is applied.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExperimentName(String);

impl ExperimentName {
  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ExperimentName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ExperimentName {
  fn as_ref(&self) -> &str { &self.0 }
}

impl Borrow<str> for ExperimentName {
  fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for ExperimentName {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for ExperimentName {
  fn from(s: String) -> Self { Self(s) }
}

impl PartialEq<str> for ExperimentName {
  fn eq(&self, other: &str) -> bool { self.0 == other }
}

impl PartialEq<&str> for ExperimentName {
  fn eq(&self, other: &&str) -> bool { self.0 == *other }
}
