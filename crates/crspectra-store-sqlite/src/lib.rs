//! SQLite backend for the bundled cosmic-ray spectra dataset.
//!
//! The dataset holds one table per experiment. [`SqliteSpectrumStore`] exposes
//! it read-only through [`crspectra_core::SpectrumCatalog`]. All database
//! access runs on the dedicated [`tokio_rusqlite`] connection thread.

mod catalog;
mod decode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{
  DATABASE_ENV, SqliteSpectrumStore, bundled_database_path, default_database_path,
};
