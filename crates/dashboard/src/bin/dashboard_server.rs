//! Dashboard REST Server
//!
//! Serves lead and meeting analytics computed from Google Sheets and Google
//! Calendar (or a fixture file) over a read-only JSON API.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use dashboard::config::{ServerArgs, Settings};
use dashboard::server::startup::start_server;

#[tokio::main]
async fn main() -> Result<()> {
  let args = ServerArgs::parse();

  // RUST_LOG wins over the built-in defaults
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if args.verbose {
      EnvFilter::new("info")
    } else {
      EnvFilter::new("dashboard=info,dashboard_server=info,tower_http=warn,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let settings = match Settings::from_args(args) {
    Ok(settings) => settings,
    Err(e) => {
      tracing::error!("Invalid configuration: {e}");
      std::process::exit(1);
    }
  };

  tracing::info!("Starting Dashboard REST Server v{}", env!("CARGO_PKG_VERSION"));
  tracing::info!("Binding to address: {}", settings.bind);

  start_server(settings).await
}
