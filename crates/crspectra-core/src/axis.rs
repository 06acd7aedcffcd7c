//! The energy axis selector understood by the CRDB service.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Which energy-like quantity the `energy` field of a record holds.
///
/// The wire token (`EKN`, `EK`, `R`, `ETOT`) is what the remote service
/// expects in its `energy_type` parameter. No unit conversion is ever
/// performed; the axis only tells the caller how to read `energy`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum EnergyAxis {
  /// Kinetic energy per nucleon.
  #[default]
  Ekn,
  /// Total kinetic energy.
  Ek,
  /// Rigidity.
  R,
  /// Total energy.
  Etot,
}

impl EnergyAxis {
  /// Every axis, in declaration order.
  pub const ALL: [EnergyAxis; 4] =
    [EnergyAxis::Ekn, EnergyAxis::Ek, EnergyAxis::R, EnergyAxis::Etot];

  /// Unit of the `energy` field implied by this axis.
  pub fn unit(self) -> &'static str {
    match self {
      EnergyAxis::Ekn => "GeV/n",
      EnergyAxis::R => "GV/n",
      EnergyAxis::Ek | EnergyAxis::Etot => "GeV",
    }
  }
}
