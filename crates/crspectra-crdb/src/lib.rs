//! Client for the CRDB cosmic-ray database (<http://lpsc.in2p3.fr/crdb>).
//!
//! CRDB covers electrons, positrons, anti-protons and nuclides up to Z = 30
//! below the knee. Its REST endpoint answers with a whitespace-delimited
//! text table wrapped in markup; [`parse`] turns that into a
//! [`Spectrum`](crspectra_core::Spectrum) with the same schema as the local
//! dataset.
//!
//! # Quick start
//!
//! ```no_run
//! use crspectra_core::EnergyAxis;
//!
//! # async fn run() -> crspectra_crdb::Result<()> {
//! let spectrum = crspectra_crdb::fetch("AMS-02", "C", EnergyAxis::Ekn).await?;
//! println!("{} points", spectrum.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;
pub mod parse;

pub use client::{CrdbClient, CrdbConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, Query, fetch};
pub use error::{Error, Result};
