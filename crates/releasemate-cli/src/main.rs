//! `releasemate`: on-set model release manager.
//!
//! Reads `releasemate.toml` (or the path given with `--config`), opens the
//! local SQLite store, and runs one command.
//!
//! # Usage
//!
//! ```
//! releasemate project new --name "Autumn Lookbook" --client "Maple & Co"
//! releasemate release sign --project <id> --name "Jane Doe" \
//!     --email jane@example.com --dob 1990-05-14 --signature jane.json
//! releasemate summary <project-id>
//! ```

mod project;
mod release;
mod settings;
mod summary;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use releasemate_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "releasemate", author, version, about = "On-set model release manager")]
struct Cli {
  /// Path to the TOML configuration file.
  /// Defaults to `releasemate.toml` in the working directory, if present.
  #[arg(short, long, env = "RELEASEMATE_CONFIG")]
  config: Option<PathBuf>,

  /// Treat the device as offline regardless of configuration.
  #[arg(long, global = true)]
  offline: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create, inspect, edit, and delete shoot projects.
  #[command(subcommand)]
  Project(project::ProjectCommand),

  /// Sign and inspect model releases.
  #[command(subcommand)]
  Release(release::ReleaseCommand),

  /// Plain-language summary of a project's legal text.
  Summary {
    /// Project id.
    project: Uuid,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(cli.config.as_deref())?;
  if cli.offline {
    settings.offline = true;
  }

  let store_path = settings.store_path();
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(path = %store_path.display(), "store opened");

  match cli.command {
    Command::Project(cmd) => project::run(&store, cmd).await,
    Command::Release(cmd) => release::run(&store, &settings, cmd).await,
    Command::Summary { project } => summary::run(&store, &settings, project).await,
  }
}
