//! Core types and trait definitions for crspectra.
//!
//! Both spectrum sources (the bundled SQLite dataset and the remote CRDB
//! service) decode into the types defined here, so callers can use them
//! interchangeably. This crate has no database or HTTP dependencies.

pub mod axis;
pub mod catalog;
pub mod error;
pub mod experiment;
pub mod record;

pub use axis::EnergyAxis;
pub use catalog::SpectrumCatalog;
pub use error::{Error, Result};
pub use experiment::ExperimentName;
pub use record::{MeasurementRecord, Spectrum, Uncertainty};
