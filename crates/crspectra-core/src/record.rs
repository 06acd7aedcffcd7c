//! Measurement records — one point of a cosmic-ray energy spectrum.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Uncertainty ─────────────────────────────────────────────────────────────

/// Asymmetric uncertainty on a flux value, stored as two magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Uncertainty {
  pub low: f64,
  pub up:  f64,
}

impl Uncertainty {
  pub const fn new(low: f64, up: f64) -> Self { Self { low, up } }
}

impl From<(f64, f64)> for Uncertainty {
  fn from((low, up): (f64, f64)) -> Self { Self { low, up } }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A single spectrum point.
///
/// `energy` is in GeV, GeV per nucleon or GV per nucleon depending on the
/// source convention (see [`EnergyAxis`](crate::EnergyAxis)). `flux` is a
/// differential flux in GeV⁻¹ m⁻² s⁻¹ sr⁻¹.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
  pub energy: f64,
  pub flux:   f64,
  /// Statistical uncertainty on `flux`.
  pub stat:   Uncertainty,
  /// Systematic uncertainty on `flux`.
  pub sys:    Uncertainty,
  /// `flux` is an upper limit rather than a measured value.
  pub uplim:  bool,
}

impl MeasurementRecord {
  /// Check that every uncertainty component is a non-negative magnitude.
  ///
  /// NaN components are rejected as well.
  pub fn validate(self) -> Result<Self> {
    let components = [
      ("stat.low", self.stat.low),
      ("stat.up", self.stat.up),
      ("sys.low", self.sys.low),
      ("sys.up", self.sys.up),
    ];
    for (field, value) in components {
      if value.is_nan() || value < 0.0 {
        return Err(Error::NegativeUncertainty { field, value });
      }
    }
    Ok(self)
  }
}

/// An ordered run of records for one experiment, in the source's row order.
pub type Spectrum = Vec<MeasurementRecord>;
