//! ais-listener binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and ingests decoded AIS reports from the relay until interrupted.

use std::path::PathBuf;

use ais_inserter::MessageInserter;
use ais_listener::{ListenerConfig, ingest::Ingestor, relay::RelaySession};
use ais_store_sqlite::SqliteConnection;
use anyhow::Context as _;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "AIS relay listener")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  let cfg = ListenerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let db_path = cfg.expanded_database_path();
  let conn = SqliteConnection::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  let inserter = MessageInserter::new(cfg.inserter_options());
  let mut session =
    RelaySession::new(cfg.relay_address(), Ingestor::new(inserter, conn));

  let cancel = CancellationToken::new();
  let on_signal = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::info!("interrupt received; shutting down");
    }
    on_signal.cancel();
  });

  tracing::info!(
    relay = %cfg.relay_address(),
    store = ?db_path,
    "starting listener"
  );
  cfg.reconnect_policy().run(&mut session, &cancel).await;

  let stats = session.ingestor().stats();
  tracing::info!(
    received = stats.received,
    written = stats.written,
    dropped = stats.dropped,
    malformed = stats.malformed,
    "listener stopped"
  );
  Ok(())
}
