//! The `SpectrumCatalog` trait.
//!
//! A catalog is a read-only, sized collection of spectra keyed by experiment
//! name. It is implemented by storage backends (e.g.
//! `crspectra-store-sqlite`); callers such as the CLI depend on this
//! abstraction rather than on a concrete backend.

use std::future::Future;

use crate::{ExperimentName, Spectrum};

/// Read-only access to a fixed set of named spectra.
///
/// The set of experiments never changes during the lifetime of a catalog, so
/// `size()` always equals `keys().len()` and `contains(name)` agrees with
/// `keys()`.
pub trait SpectrumCatalog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Decode the full spectrum of `experiment`.
  ///
  /// A missing experiment must be reported distinctly from a malformed one.
  fn get<'a>(
    &'a self,
    experiment: &'a str,
  ) -> impl Future<Output = Result<Spectrum, Self::Error>> + Send + 'a;

  /// Names of all available experiments in the backend's native order.
  fn keys(
    &self,
  ) -> impl Future<Output = Result<Vec<ExperimentName>, Self::Error>> + Send + '_;

  /// Number of available experiments.
  fn size(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Whether `experiment` is available.
  fn contains<'a>(
    &'a self,
    experiment: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
