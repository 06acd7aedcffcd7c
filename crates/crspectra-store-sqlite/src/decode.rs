//! Decoding of raw SQLite rows into [`MeasurementRecord`]s.
//!
//! Rows are read as untyped [`Value`]s inside the connection thread and
//! decoded here, so schema violations surface as [`Error::Schema`] rather
//! than as opaque database errors.

use crspectra_core::{ExperimentName, MeasurementRecord, Spectrum, Uncertainty};
use rusqlite::types::Value;

use crate::{Error, Result};

/// Column order of every experiment table.
pub const COLUMNS: [&str; 7] = [
  "energy", "flux", "stat_low", "stat_up", "sys_low", "sys_up", "is_uplim",
];

/// Rows read directly from an experiment table.
pub struct RawTable {
  pub columns: usize,
  pub rows:    Vec<Vec<Value>>,
}

impl RawTable {
  /// Decode every row; the first bad row fails the whole table.
  pub fn into_spectrum(self, experiment: &str) -> Result<Spectrum> {
    let schema = |reason: String| Error::Schema {
      experiment: ExperimentName::from(experiment),
      reason,
    };

    if self.columns != COLUMNS.len() {
      return Err(schema(format!(
        "expected {} columns, found {}",
        COLUMNS.len(),
        self.columns
      )));
    }

    self
      .rows
      .iter()
      .enumerate()
      .map(|(i, row)| decode_row(row).map_err(|e| schema(format!("row {}: {e}", i + 1))))
      .collect()
  }
}

/// Decode one fixed-arity row into a validated record.
pub fn decode_row(row: &[Value]) -> Result<MeasurementRecord, String> {
  let [energy, flux, stat_low, stat_up, sys_low, sys_up, is_uplim] = row else {
    return Err(format!("expected {} values, found {}", COLUMNS.len(), row.len()));
  };

  let record = MeasurementRecord {
    energy: real(COLUMNS[0], energy)?,
    flux:   real(COLUMNS[1], flux)?,
    stat:   Uncertainty::new(real(COLUMNS[2], stat_low)?, real(COLUMNS[3], stat_up)?),
    sys:    Uncertainty::new(real(COLUMNS[4], sys_low)?, real(COLUMNS[5], sys_up)?),
    uplim:  flag(COLUMNS[6], is_uplim)?,
  };

  record.validate().map_err(|e| e.to_string())
}

fn real(column: &str, value: &Value) -> Result<f64, String> {
  match value {
    Value::Real(f) => Ok(*f),
    Value::Integer(i) => Ok(*i as f64),
    other => Err(format!("{column}: expected a number, found {}", describe(other))),
  }
}

fn flag(column: &str, value: &Value) -> Result<bool, String> {
  match value {
    Value::Integer(i) => Ok(*i != 0),
    Value::Real(f) => Ok(*f != 0.0),
    other => Err(format!("{column}: expected 0 or 1, found {}", describe(other))),
  }
}

fn describe(value: &Value) -> String {
  match value {
    Value::Null => "NULL".to_owned(),
    Value::Integer(i) => i.to_string(),
    Value::Real(f) => f.to_string(),
    Value::Text(s) => format!("{s:?}"),
    Value::Blob(b) => format!("a {}-byte blob", b.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(values: [f64; 6], uplim: i64) -> Vec<Value> {
    let mut row: Vec<Value> = values.into_iter().map(Value::Real).collect();
    row.push(Value::Integer(uplim));
    row
  }

  #[test]
  fn decodes_fixed_order() {
    let r = decode_row(&row([1e3, 1e-3, 0.5e-4, 0.6e-4, 0.25e-4, 0.3e-4], 1)).unwrap();
    assert_eq!(r.energy, 1e3);
    assert_eq!(r.flux, 1e-3);
    assert_eq!(r.stat, Uncertainty::new(0.5e-4, 0.6e-4));
    assert_eq!(r.sys, Uncertainty::new(0.25e-4, 0.3e-4));
    assert!(r.uplim);
  }

  #[test]
  fn integer_cells_are_numbers() {
    let mut values = row([0.0; 6], 0);
    values[0] = Value::Integer(1000);
    let r = decode_row(&values).unwrap();
    assert_eq!(r.energy, 1000.0);
    assert!(!r.uplim);
  }

  #[test]
  fn rejects_text_cell() {
    let mut values = row([0.0; 6], 0);
    values[1] = Value::Text("n/a".into());
    let err = decode_row(&values).unwrap_err();
    assert!(err.starts_with("flux:"), "{err}");
  }

  #[test]
  fn rejects_null_flag() {
    let mut values = row([0.0; 6], 0);
    values[6] = Value::Null;
    let err = decode_row(&values).unwrap_err();
    assert!(err.contains("is_uplim"), "{err}");
  }

  #[test]
  fn rejects_short_row() {
    let err = decode_row(&[Value::Real(1.0), Value::Real(2.0)]).unwrap_err();
    assert_eq!(err, "expected 7 values, found 2");
  }

  #[test]
  fn rejects_negative_uncertainty() {
    let err = decode_row(&row([1e3, 1e-3, -0.5e-4, 0.5e-4, 0.0, 0.0], 0)).unwrap_err();
    assert!(err.contains("stat.low"), "{err}");
  }
}
