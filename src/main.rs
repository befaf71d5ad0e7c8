mod aggregate;
mod charts;
mod config;
mod dashboard;
mod error;
mod filter;
mod loader;
mod server;
mod types;
mod util;

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use dashboard::Dashboard;

/// Supermarket sales dashboard served over HTTP.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Development mode: debug logging and request traces
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.debug)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Nothing is served until the whole file has been read.
    let records = loader::load(&config.data_path).inspect_err(|e| {
        error!(path = %config.data_path.display(), "failed to load sales data: {e}");
    })?;
    if records.is_empty() {
        warn!("sales file has no rows, every view will be empty");
    }
    let dashboard = Arc::new(Dashboard::new(records));

    server::serve(dashboard, &config.address()).await?;
    Ok(())
}
