//! `crspectra` — command-line access to published cosmic-ray spectra.
//!
//! # Usage
//!
//! ```text
//! crspectra list
//! crspectra show "AMS-02" --remote-fallback --json
//! crspectra fetch "AMS-02" --element C --energy-axis EKN
//! ```

mod lookup;
mod output;
mod settings;

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use crspectra_core::{EnergyAxis, Spectrum, SpectrumCatalog};
use crspectra_crdb::{CrdbClient, Query};
use crspectra_store_sqlite::SqliteSpectrumStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Published cosmic-ray energy spectra")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "crspectra.toml")]
  config: PathBuf,

  /// SQLite dataset (overrides the configured one).
  #[arg(long, global = true)]
  database: Option<PathBuf>,

  /// CRDB REST endpoint (overrides the configured one).
  #[arg(long, global = true)]
  endpoint: Option<String>,

  /// Request timeout in seconds (overrides the configured one).
  #[arg(long, global = true)]
  timeout: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List experiments in the local dataset.
  List,

  /// Print a spectrum from the local dataset.
  Show {
    experiment: String,

    /// Ask CRDB if the experiment is not in the local dataset.
    #[arg(long)]
    remote_fallback: bool,

    #[command(flatten)]
    remote: RemoteArgs,

    #[command(flatten)]
    format: FormatArgs,
  },

  /// Fetch a spectrum from CRDB.
  Fetch {
    experiment: String,

    #[command(flatten)]
    remote: RemoteArgs,

    #[command(flatten)]
    format: FormatArgs,
  },
}

#[derive(Args)]
struct RemoteArgs {
  /// Element or isotope.
  #[arg(long, default_value = "C")]
  element: String,

  /// Energy axis: EKN, EK, R or ETOT.
  #[arg(long, default_value_t = EnergyAxis::Ekn)]
  energy_axis: EnergyAxis,
}

impl RemoteArgs {
  fn query(self, experiment: String) -> Query {
    Query {
      experiment,
      element: self.element,
      energy_axis: self.energy_axis,
    }
  }
}

#[derive(Args)]
struct FormatArgs {
  /// Print JSON instead of a table.
  #[arg(long)]
  json: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // CLI flags override the environment, which overrides the config file.
  let mut settings = Settings::load(cli.config)?;
  if let Some(database) = cli.database {
    settings.database = database;
  }
  if let Some(endpoint) = cli.endpoint {
    settings.endpoint = endpoint;
  }
  if let Some(timeout) = cli.timeout {
    settings.timeout_secs = timeout;
  }
  tracing::debug!(?settings, "configuration loaded");

  match cli.command {
    Command::List => {
      let store = open_store(&settings).await?;
      for name in store.keys().await.context("listing experiments")? {
        println!("{name}");
      }
      store.close().await?;
    }

    Command::Show {
      experiment,
      remote_fallback,
      remote,
      format,
    } => {
      let store = open_store(&settings).await?;
      let fallback = remote_fallback
        .then(|| crdb_client(&settings))
        .transpose()?;
      let result =
        lookup::local_or_remote(&store, fallback.as_ref(), &remote.query(experiment)).await;
      store.close().await?;

      print(&result?, &format)?;
    }

    Command::Fetch {
      experiment,
      remote,
      format,
    } => {
      let client = crdb_client(&settings)?;
      let spectrum = lookup::remote(&client, &remote.query(experiment)).await?;
      print(&spectrum, &format)?;
    }
  }

  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

async fn open_store(settings: &Settings) -> anyhow::Result<SqliteSpectrumStore> {
  SqliteSpectrumStore::open(&settings.database)
    .await
    .with_context(|| format!("failed to open dataset at {}", settings.database.display()))
}

fn crdb_client(settings: &Settings) -> anyhow::Result<CrdbClient> {
  CrdbClient::new(settings.crdb()).context("building HTTP client")
}

fn print(spectrum: &Spectrum, format: &FormatArgs) -> anyhow::Result<()> {
  let stdout = io::stdout().lock();
  if format.json {
    output::write_json(stdout, spectrum)?;
  } else {
    output::write_table(stdout, spectrum)?;
  }
  Ok(())
}
