//! HTTP client for the CRDB REST endpoint.

use std::time::Duration;

use crspectra_core::{EnergyAxis, Spectrum};
use reqwest::Client;

use crate::{Result, parse::parse_response};

/// Public CRDB REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://lpsc.in2p3.fr/crdb/rest.php";

/// Upper bound on a whole request/response cycle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ─── Query ───────────────────────────────────────────────────────────────────

/// What to ask CRDB for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  /// Passed through verbatim; CRDB decides which names are valid.
  pub experiment:  String,
  /// Element or isotope, e.g. `"C"` or `"1H"`.
  pub element:     String,
  pub energy_axis: EnergyAxis,
}

impl Query {
  /// Carbon on the kinetic-energy-per-nucleon axis.
  pub fn new(experiment: impl Into<String>) -> Self {
    Self {
      experiment:  experiment.into(),
      element:     "C".to_owned(),
      energy_axis: EnergyAxis::default(),
    }
  }

  /// Query string pairs in the service's vocabulary.
  pub fn params(&self) -> [(&'static str, &str); 3] {
    [
      ("num", self.element.as_str()),
      ("energy_type", self.energy_axis.as_ref()),
      ("experiment", self.experiment.as_str()),
    ]
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Connection settings for CRDB.
#[derive(Debug, Clone)]
pub struct CrdbConfig {
  pub endpoint: String,
  pub timeout:  Duration,
}

impl Default for CrdbConfig {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_ENDPOINT.to_owned(),
      timeout:  DEFAULT_TIMEOUT,
    }
  }
}

/// Async client for the CRDB REST endpoint.
///
/// Holds no state between calls apart from the connection pool; cheap to
/// clone and safe to share. Every [`fetch`](Self::fetch) issues exactly one
/// request and nothing is cached or retried.
#[derive(Clone)]
pub struct CrdbClient {
  client:   Client,
  endpoint: String,
}

impl CrdbClient {
  pub fn new(config: CrdbConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self {
      client,
      endpoint: config.endpoint,
    })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }

  /// `GET <endpoint>?num=<element>&energy_type=<axis>&experiment=<name>`
  pub async fn fetch(&self, query: &Query) -> Result<Spectrum> {
    let resp = self
      .client
      .get(&self.endpoint)
      .query(&query.params())
      .send()
      .await?;

    tracing::debug!(url = %resp.url(), status = %resp.status(), "CRDB request");

    let body = resp.error_for_status()?.text().await?;
    tracing::trace!(%body, "CRDB response");

    parse_response(&body)
  }
}

/// Fetch one spectrum from the public CRDB endpoint with default settings.
pub async fn fetch(
  experiment: &str,
  element: &str,
  energy_axis: EnergyAxis,
) -> Result<Spectrum> {
  let query = Query {
    experiment: experiment.to_owned(),
    element: element.to_owned(),
    energy_axis,
  };
  CrdbClient::new(CrdbConfig::default())?.fetch(&query).await
}
