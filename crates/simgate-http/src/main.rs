//! simgate server binary.
//!
//! Reads `simgate.toml` (or the path given with `--config`) and the
//! environment, then serves the lookup API over HTTP.
//!
//! ```sh
//! TARGET_BASE=https://upstream.example PORT=5000 cargo run -p simgate-http
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use simgate_http::{AppState, ServerConfig};
use simgate_upstream::{HttpUpstream, IntervalLimiter};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "SIM / CNIC lookup gateway")]
struct Cli {
  /// Path to an optional TOML configuration file.
  #[arg(short, long, default_value = "simgate.toml")]
  config: PathBuf,

  /// Override the listening port.
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

  let mut server_cfg = ServerConfig::load(&cli.config)?;
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }

  let limiter = Arc::new(IntervalLimiter::new(server_cfg.min_interval()?));
  let upstream = HttpUpstream::new(&server_cfg.upstream()?, limiter)
    .context("failed to build upstream client")?;

  if server_cfg.allow_upstream {
    tracing::info!(
      url = upstream.url(),
      min_interval = server_cfg.min_interval,
      "forwarding lookups upstream"
    );
  } else {
    tracing::warn!("upstream fetching disabled; every lookup will fail");
  }

  let app = simgate_http::router(AppState::new(upstream, &server_cfg.developer));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
