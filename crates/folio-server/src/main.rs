//! folio-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `FOLIO_*`
//! environment variables and serves the contact API over HTTP.
//!
//! # Inspecting stored submissions
//!
//! ```
//! cargo run -p folio-server -- --list-submissions
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use folio_core::store::SubmissionStore;
use folio_server::{ServerConfig, app_state, router};
use folio_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio contact API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print every stored submission as JSON and exit.
  #[arg(long)]
  list_submissions: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(cli.config)?;

  // Helper mode: dump the store and exit.
  if cli.list_submissions {
    let store = SqliteStore::from_config(server_cfg.database_path.clone());
    let submissions = store.list().await.context("failed to read submissions")?;
    println!("{}", serde_json::to_string_pretty(&submissions)?);
    return Ok(());
  }

  if server_cfg.database_path.is_none() {
    tracing::warn!("database_path is not set; submissions will fail until it is configured");
  }
  if server_cfg.mail.sender.is_none() || server_cfg.mail.server_token.is_none() {
    tracing::warn!("mail.sender or mail.server_token is not set; notifications will fail");
  }

  let app = router(app_state(&server_cfg)?);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
