//! Parser for CRDB text responses.
//!
//! Pipeline:
//!   raw body
//!     └─ strip_wrapper()      → data lines (markup and comments removed)
//!          └─ tokenize()      → whitespace-separated cells
//!               └─ select_columns() → RawColumns
//!                    └─ normalize()  → MeasurementRecord
//!
//! The service wraps its table in exactly one leading and one trailing markup
//! line. That format is not versioned, so each stage checks its assumptions
//! and reports [`Error::MalformedResponse`] instead of guessing.

use crspectra_core::{MeasurementRecord, Spectrum, Uncertainty};

use crate::{Error, Result};

// ─── Column layout ───────────────────────────────────────────────────────────

/// Minimum number of cells in a data line.
pub const MIN_COLUMNS: usize = 16;

const ENERGY: usize = 3;
const FLUX: usize = 6;
const STAT_LOW: usize = 7;
const STAT_UP: usize = 8;
const SYS_LOW: usize = 9;
const SYS_UP: usize = 10;
const UPLIM: usize = 15;

// ─── Stages ──────────────────────────────────────────────────────────────────

/// A line of the response body that should hold one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLine<'a> {
  /// 1-based line number within the body.
  pub number: usize,
  pub text:   &'a str,
}

/// Drop the leading and trailing markup lines, `#` comments, and any lines
/// left blank.
///
/// Trailing line terminators are ignored so a body ending in `\n` still has
/// its markup as the last line. Fails if either discarded line looks like a
/// table row, since that means the wrapper format has changed.
pub fn strip_wrapper(body: &str) -> Result<Vec<DataLine<'_>>> {
  let lines: Vec<&str> = body
    .trim_end_matches(['\r', '\n'])
    .split('\n')
    .map(|l| l.strip_suffix('\r').unwrap_or(l))
    .collect();

  let [first, inner @ .., last] = lines.as_slice() else {
    return Err(Error::MalformedResponse(
      "expected markup lines around the table".to_owned(),
    ));
  };

  if inner.is_empty() {
    return Err(Error::MalformedResponse(
      "expected markup lines around the table".to_owned(),
    ));
  }

  for (number, line) in [(1, first), (lines.len(), last)] {
    if looks_like_row(line) {
      return Err(Error::MalformedResponse(format!(
        "line {number} should be markup but holds a table row"
      )));
    }
  }

  Ok(
    inner
      .iter()
      .enumerate()
      .map(|(i, text)| DataLine { number: i + 2, text: strip_comment(*text) })
      .filter(|line| !line.text.trim().is_empty())
      .collect(),
  )
}

/// Cut `line` at its first `#`.
pub fn strip_comment(line: &str) -> &str {
  line.split_once('#').map_or(line, |(data, _)| data)
}

/// Split a line into whitespace-separated cells.
pub fn tokenize(line: &str) -> Vec<&str> { line.split_whitespace().collect() }

/// The seven numeric cells of a row, as written by the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawColumns {
  pub energy:   f64,
  pub flux:     f64,
  pub stat_low: f64,
  pub stat_up:  f64,
  pub sys_low:  f64,
  pub sys_up:   f64,
  pub uplim:    f64,
}

/// Pick energy, flux, uncertainties and the upper-limit flag out of a row.
pub fn select_columns(line: usize, cells: &[&str]) -> Result<RawColumns> {
  if cells.len() < MIN_COLUMNS {
    return Err(Error::MalformedResponse(format!(
      "line {line}: expected at least {MIN_COLUMNS} columns, found {}",
      cells.len()
    )));
  }

  let cell = |index: usize| -> Result<f64> {
    cells[index].parse().map_err(|_| {
      Error::MalformedResponse(format!(
        "line {line}, column {index}: {:?} is not a number",
        cells[index]
      ))
    })
  };

  Ok(RawColumns {
    energy:   cell(ENERGY)?,
    flux:     cell(FLUX)?,
    stat_low: cell(STAT_LOW)?,
    stat_up:  cell(STAT_UP)?,
    sys_low:  cell(SYS_LOW)?,
    sys_up:   cell(SYS_UP)?,
    uplim:    cell(UPLIM)?,
  })
}

/// Turn raw cells into a record.
///
/// CRDB writes lower uncertainty bounds with a leading minus sign; they are
/// stored as magnitudes. Any non-zero upper-limit flag counts as set.
pub fn normalize(line: usize, raw: RawColumns) -> Result<MeasurementRecord> {
  MeasurementRecord {
    energy: raw.energy,
    flux:   raw.flux,
    stat:   Uncertainty::new(raw.stat_low.abs(), raw.stat_up),
    sys:    Uncertainty::new(raw.sys_low.abs(), raw.sys_up),
    uplim:  raw.uplim != 0.0,
  }
  .validate()
  .map_err(|e| Error::MalformedResponse(format!("line {line}: {e}")))
}

/// Run the whole pipeline over a response body.
///
/// Any bad line fails the whole body; an empty table is malformed too.
pub fn parse_response(body: &str) -> Result<Spectrum> {
  let spectrum = strip_wrapper(body)?
    .into_iter()
    .map(|line| {
      let raw = select_columns(line.number, &tokenize(line.text))?;
      normalize(line.number, raw)
    })
    .collect::<Result<Spectrum>>()?;

  if spectrum.is_empty() {
    return Err(Error::MalformedResponse("response holds no table rows".to_owned()));
  }
  Ok(spectrum)
}

fn looks_like_row(line: &str) -> bool {
  let cells = tokenize(line);
  cells.len() >= MIN_COLUMNS && cells.iter().all(|c| c.parse::<f64>().is_ok())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(energy: &str, flux: &str, stat: (&str, &str), sys: (&str, &str), uplim: &str) -> String {
    let mut cells = vec!["0.0"; MIN_COLUMNS];
    cells[ENERGY] = energy;
    cells[FLUX] = flux;
    cells[STAT_LOW] = stat.0;
    cells[STAT_UP] = stat.1;
    cells[SYS_LOW] = sys.0;
    cells[SYS_UP] = sys.1;
    cells[UPLIM] = uplim;
    cells.join(" ")
  }

  fn body(rows: &[String]) -> String {
    format!("<html><body><p>\n{}\n</p></body></html>", rows.join("\n"))
  }

  fn three_rows() -> Vec<String> {
    vec![
      row("1e3", "1e-3", ("-5e-5", "5e-5"), ("-2.5e-5", "2.5e-5"), "0"),
      row("1e4", "1e-4", ("-5e-6", "5e-6"), ("-2.5e-6", "2.5e-6"), "0"),
      row("1e5", "1e-5", ("-5e-7", "5e-7"), ("-2.5e-7", "2.5e-7"), "1"),
    ]
  }

  // ── strip_wrapper ─────────────────────────────────────────────────────────

  #[test]
  fn strips_one_line_each_side() {
    let body = body(&three_rows());
    let lines = strip_wrapper(&body).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].number, 2);
    assert_eq!(lines[2].number, 4);
    assert!(lines.iter().all(|l| !l.text.contains('<')));
  }

  #[test]
  fn tolerates_trailing_newline_and_crlf() {
    let body = format!("<pre>\r\n{}\r\n</pre>\r\n", three_rows().join("\r\n"));
    let lines = strip_wrapper(&body).unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| !l.text.ends_with('\r')));
  }

  #[test]
  fn skips_blank_lines() {
    let rows = three_rows();
    let body = format!("<p>\n{}\n\n   \n{}\n</p>", rows[0], rows[1]);
    let lines = strip_wrapper(&body).unwrap();
    assert_eq!(lines.iter().map(|l| l.number).collect::<Vec<_>>(), [2, 5]);
  }

  #[test]
  fn skips_comments() {
    let rows = three_rows();
    let body = format!(
      "<pre>\n# Exp  Qty  E  ...  header\n{}\n{} # trailing note\n   # indented\n</pre>",
      rows[0], rows[1]
    );
    let lines = strip_wrapper(&body).unwrap();
    assert_eq!(lines.iter().map(|l| l.number).collect::<Vec<_>>(), [3, 4]);
    assert!(lines.iter().all(|l| !l.text.contains('#')));

    let spectrum = parse_response(&body).unwrap();
    assert_eq!(spectrum.len(), 2);
    assert_eq!(spectrum[1].energy, 1e4);
  }

  #[test]
  fn strip_comment_keeps_data() {
    assert_eq!(strip_comment("1 2 3 # note"), "1 2 3 ");
    assert_eq!(strip_comment("# header"), "");
    assert_eq!(strip_comment("1 2 3"), "1 2 3");
  }

  #[test]
  fn unwrapped_table_is_rejected() {
    let body = three_rows().join("\n");
    let err = strip_wrapper(&body).unwrap_err();
    assert!(err.to_string().contains("line 1 should be markup"), "{err}");
  }

  #[test]
  fn missing_trailer_is_rejected() {
    let body = format!("<p>\n{}", three_rows().join("\n"));
    let err = strip_wrapper(&body).unwrap_err();
    assert!(err.to_string().contains("line 4 should be markup"), "{err}");
  }

  #[test]
  fn too_few_lines() {
    assert!(matches!(strip_wrapper(""), Err(Error::MalformedResponse(_))));
    assert!(matches!(strip_wrapper("<p>\n</p>"), Err(Error::MalformedResponse(_))));
  }

  // ── select_columns ────────────────────────────────────────────────────────

  #[test]
  fn selects_fixed_indices() {
    let line = row("1e3", "1e-3", ("-5e-5", "6e-5"), ("-2.5e-5", "3e-5"), "1");
    let raw = select_columns(2, &tokenize(&line)).unwrap();
    assert_eq!(raw, RawColumns {
      energy:   1e3,
      flux:     1e-3,
      stat_low: -5e-5,
      stat_up:  6e-5,
      sys_low:  -2.5e-5,
      sys_up:   3e-5,
      uplim:    1.0,
    });
  }

  #[test]
  fn extra_columns_are_ignored() {
    let line = format!("{} extra trailing cells", three_rows()[0]);
    assert!(select_columns(2, &tokenize(&line)).is_ok());
  }

  #[test]
  fn short_row_is_rejected() {
    let err = select_columns(7, &tokenize("1 2 3 4 5")).unwrap_err();
    assert_eq!(
      err.to_string(),
      "malformed response: line 7: expected at least 16 columns, found 5"
    );
  }

  #[test]
  fn non_numeric_cell_is_rejected() {
    let line = row("1e3", "lots", ("-5e-5", "5e-5"), ("0", "0"), "0");
    let err = select_columns(3, &tokenize(&line)).unwrap_err();
    assert!(err.to_string().contains("line 3, column 6"), "{err}");
  }

  // ── normalize ─────────────────────────────────────────────────────────────

  #[test]
  fn lower_bounds_become_magnitudes() {
    let raw = RawColumns {
      energy:   1e3,
      flux:     1e-3,
      stat_low: -5e-5,
      stat_up:  5e-5,
      sys_low:  -2.5e-5,
      sys_up:   2.5e-5,
      uplim:    0.0,
    };
    let record = normalize(2, raw).unwrap();
    assert_eq!(record.stat, Uncertainty::new(5e-5, 5e-5));
    assert_eq!(record.sys, Uncertainty::new(2.5e-5, 2.5e-5));
    assert!(!record.uplim);
  }

  #[test]
  fn unsigned_lower_bound_is_kept() {
    let raw = RawColumns {
      energy:   1.0,
      flux:     1.0,
      stat_low: 0.1,
      stat_up:  0.2,
      sys_low:  0.0,
      sys_up:   0.0,
      uplim:    2.0,
    };
    let record = normalize(2, raw).unwrap();
    assert_eq!(record.stat.low, 0.1);
    assert!(record.uplim);
  }

  #[test]
  fn negative_upper_bound_is_rejected() {
    let raw = RawColumns {
      energy:   1.0,
      flux:     1.0,
      stat_low: -0.1,
      stat_up:  -0.2,
      sys_low:  0.0,
      sys_up:   0.0,
      uplim:    0.0,
    };
    assert!(matches!(normalize(2, raw), Err(Error::MalformedResponse(_))));
  }

  // ── parse_response ────────────────────────────────────────────────────────

  #[test]
  fn three_rows_three_records() {
    let spectrum = parse_response(&body(&three_rows())).unwrap();
    assert_eq!(spectrum.len(), 3);
    assert_eq!(spectrum[0], MeasurementRecord {
      energy: 1000.0,
      flux:   0.001,
      stat:   Uncertainty::new(5e-5, 5e-5),
      sys:    Uncertainty::new(2.5e-5, 2.5e-5),
      uplim:  false,
    });
    assert_eq!(
      spectrum.iter().map(|r| r.energy).collect::<Vec<_>>(),
      [1e3, 1e4, 1e5]
    );
    assert!(spectrum[2].uplim);
  }

  #[test]
  fn one_bad_row_fails_everything() {
    let mut rows = three_rows();
    rows[1] = "1 2 3".to_owned();
    let err = parse_response(&body(&rows)).unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");
  }

  #[test]
  fn wrapper_only_is_empty() {
    let err = parse_response("<html>\n\n</html>").unwrap_err();
    assert_eq!(err.to_string(), "malformed response: response holds no table rows");
  }
}
