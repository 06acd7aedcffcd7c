//! [`SqliteSpectrumStore`] — the SQLite implementation of [`SpectrumCatalog`].

use std::{
  ffi::OsString,
  path::{Path, PathBuf},
};

use crspectra_core::{ExperimentName, Spectrum, SpectrumCatalog};
use rusqlite::{OpenFlags, OptionalExtension as _, ffi, types::Value};

use crate::{
  Error, Result,
  catalog::{COUNT_TABLES, LIST_TABLES, PAGE_COUNT, TABLE_EXISTS, select_all},
  decode::RawTable,
};

/// Environment variable overriding the bundled dataset location.
pub const DATABASE_ENV: &str = "CRSPECTRA_DATABASE";

/// Location of the bundled dataset.
///
/// `$CRSPECTRA_DATABASE` if set, otherwise [`bundled_database_path`].
pub fn default_database_path() -> PathBuf {
  resolve_database_path(std::env::var_os(DATABASE_ENV))
}

/// `data/crspectra.db` inside this crate's directory.
pub fn bundled_database_path() -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("crspectra.db")
}

/// An empty override counts as unset.
pub(crate) fn resolve_database_path(override_path: Option<OsString>) -> PathBuf {
  match override_path {
    Some(path) if !path.is_empty() => PathBuf::from(path),
    _ => bundled_database_path(),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only view of a spectra dataset stored in a single SQLite file.
///
/// Cloning is cheap; clones share the same connection. Queries issued
/// through any clone are serialized on the connection's thread.
#[derive(Clone)]
pub struct SqliteSpectrumStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSpectrumStore {
  /// Open the dataset at `path` read-only.
  ///
  /// Never creates a file. Fails with [`Error::SourceUnavailable`] if the file
  /// is missing, is not an SQLite database, or is empty. SQLite would treat a
  /// 0-byte file as a valid database with no tables; here it is rejected.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    tracing::debug!(path = %path.display(), "opening spectra dataset");

    let unavailable = |source: tokio_rusqlite::Error| Error::SourceUnavailable {
      path: path.clone(),
      source,
    };

    let conn = tokio_rusqlite::Connection::open_with_flags(
      &path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await
    .map_err(unavailable)?;

    // SQLite reads the file header lazily; touch the catalog so a corrupt or
    // foreign file fails here instead of on the first query.
    conn
      .call(|conn| {
        conn.query_row(COUNT_TABLES, [], |r| r.get::<_, i64>(0))?;
        let pages: i64 = conn.query_row(PAGE_COUNT, [], |r| r.get(0))?;
        if pages == 0 {
          return Err(
            rusqlite::Error::SqliteFailure(
              ffi::Error::new(ffi::SQLITE_NOTADB),
              Some("dataset file is empty".to_owned()),
            )
            .into(),
          );
        }
        Ok(())
      })
      .await
      .map_err(unavailable)?;

    Ok(Self { conn })
  }

  /// Open the bundled dataset at [`default_database_path`].
  pub async fn open_default() -> Result<Self> {
    Self::open(default_database_path()).await
  }

  /// Release the connection.
  ///
  /// Clones of this store become unusable afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

// ─── SpectrumCatalog impl ────────────────────────────────────────────────────

impl SpectrumCatalog for SqliteSpectrumStore {
  type Error = Error;

  async fn get(&self, experiment: &str) -> Result<Spectrum> {
    let name = experiment.to_owned();

    let table: Option<RawTable> = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(TABLE_EXISTS, rusqlite::params![name], |_| Ok(()))
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }

        let mut stmt = conn.prepare(&select_all(&name))?;
        let columns = stmt.column_count();
        let rows = stmt
          .query_map([], |row| {
            (0..columns)
              .map(|i| row.get::<_, Value>(i))
              .collect::<rusqlite::Result<Vec<_>>>()
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(RawTable { columns, rows }))
      })
      .await?;

    let Some(table) = table else {
      return Err(Error::ExperimentNotFound(ExperimentName::from(experiment)));
    };

    let spectrum = table.into_spectrum(experiment)?;
    tracing::debug!(experiment, records = spectrum.len(), "decoded spectrum");
    Ok(spectrum)
  }

  async fn keys(&self) -> Result<Vec<ExperimentName>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(LIST_TABLES)?;
        let names = stmt
          .query_map([], |r| r.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
      })
      .await?;

    Ok(names.into_iter().map(ExperimentName::from).collect())
  }

  async fn size(&self) -> Result<usize> {
    let count = self
      .conn
      .call(|conn| Ok(conn.query_row(COUNT_TABLES, [], |r| r.get::<_, i64>(0))?))
      .await?;

    Ok(usize::try_from(count).unwrap_or_default())
  }

  async fn contains(&self, experiment: &str) -> Result<bool> {
    let name = experiment.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(TABLE_EXISTS, rusqlite::params![name], |_| Ok(()))
            .optional()?
            .is_some(),
        )
      })
      .await?;

    Ok(found)
  }
}
