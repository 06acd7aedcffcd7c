//! Spectrum lookup across the local dataset and CRDB.

use anyhow::Context as _;
use crspectra_core::{Spectrum, SpectrumCatalog};
use crspectra_crdb::{CrdbClient, Query};
use crspectra_store_sqlite::SqliteSpectrumStore;

/// Fetch `query` from CRDB.
pub async fn remote(client: &CrdbClient, query: &Query) -> anyhow::Result<Spectrum> {
  let spectrum = client
    .fetch(query)
    .await
    .with_context(|| format!("fetching {:?} from {}", query.experiment, client.endpoint()))?;
  tracing::info!(
    experiment = %query.experiment,
    records = spectrum.len(),
    unit = query.energy_axis.unit(),
    "fetched from CRDB"
  );
  Ok(spectrum)
}

/// Read `query.experiment` from `store`.
///
/// With `fallback`, a missing experiment is fetched from CRDB instead. Every
/// other local error is returned as is.
pub async fn local_or_remote(
  store: &SqliteSpectrumStore,
  fallback: Option<&CrdbClient>,
  query: &Query,
) -> anyhow::Result<Spectrum> {
  match (store.get(&query.experiment).await, fallback) {
    (Ok(spectrum), _) => Ok(spectrum),
    (Err(e), Some(client)) if e.is_not_found() => {
      tracing::info!(experiment = %query.experiment, "not in local dataset, asking CRDB");
      remote(client, query).await
    }
    (Err(e), _) => Err(e).context("reading local spectrum"),
  }
}
