//! kringum server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered with
//! `KRINGUM_*` environment variables, opens the SQLite catalog, and serves
//! the JSON API under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use kringum_fill::PortFiller;
use kringum_server::ServerConfig;
use kringum_store_sqlite::SqliteStore;
use kringum_upstream::{AnthropicGenerator, NominatimGeocoder};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Kringum cruise-port catalog server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Address to bind, overriding the configuration.
  #[arg(long)]
  host: Option<String>,

  /// Port to bind, overriding the configuration.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration: file, then environment, then flags.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KRINGUM"))
    .set_override_option("host", cli.host)
    .context("invalid --host")?
    .set_override_option("port", cli.port.map(i64::from))
    .context("invalid --port")?
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let anthropic =
    server_cfg.anthropic_config(std::env::var("ANTHROPIC_API_KEY").ok());
  if anthropic.api_key.is_none() {
    tracing::warn!("no Anthropic API key configured; port fill will fail");
  }
  let generator = AnthropicGenerator::new(anthropic)
    .context("failed to build generation client")?;
  let geocoder = NominatimGeocoder::new(server_cfg.nominatim_config())
    .context("failed to build geocoding client")?;

  let filler = PortFiller::new(
    store.clone(),
    Arc::new(generator),
    Arc::new(geocoder),
    server_cfg.fill_options(),
  );

  let app = kringum_server::router(store, Arc::new(filler));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
