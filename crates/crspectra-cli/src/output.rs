//! Rendering of spectra for the terminal.

use std::io::{self, Write};

use crspectra_core::Spectrum;

const HEADER: [&str; 7] = [
  "energy", "flux", "stat_low", "stat_up", "sys_low", "sys_up", "uplim",
];

/// Write `spectrum` as a right-aligned text table.
pub fn write_table(mut out: impl Write, spectrum: &Spectrum) -> io::Result<()> {
  for name in HEADER {
    write!(out, "{name:>13}")?;
  }
  writeln!(out)?;

  for r in spectrum {
    writeln!(
      out,
      "{:>13.5e}{:>13.5e}{:>13.5e}{:>13.5e}{:>13.5e}{:>13.5e}{:>13}",
      r.energy,
      r.flux,
      r.stat.low,
      r.stat.up,
      r.sys.low,
      r.sys.up,
      u8::from(r.uplim),
    )?;
  }
  Ok(())
}

/// Write `spectrum` as pretty-printed JSON.
pub fn write_json(mut out: impl Write, spectrum: &Spectrum) -> io::Result<()> {
  serde_json::to_writer_pretty(&mut out, spectrum)?;
  writeln!(out)
}
