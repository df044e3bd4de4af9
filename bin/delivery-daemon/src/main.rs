//! Main entry point for the delivery cost service.
//!
//! # Configuration
//!
//! Settings are layered (lowest precedence first): built-in defaults, the
//! TOML file given with `--config`, `DELIVERY_*` environment variables, the
//! `PORT` environment variable and the `--port` flag. A `.env` file in the
//! working directory is loaded into the environment before any of that.
//!
//! ```bash
//! PORT=9000 delivery-daemon --config facilities.toml
//! ```

use clap::Parser;
use delivery_core::CostSearchEngine;
use delivery_daemon::config::utf8_vars;
use delivery_daemon::{server, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the delivery cost service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    match dotenv::dotenv() {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(_) => tracing::warn!("No .env file found, using defaults"),
    }

    let env = utf8_vars(std::env::vars_os());
    let config = ServiceConfig::load(args.config.as_deref(), &env, args.port)?;
    let catalog = Arc::new(config.catalog()?);
    if config.facilities.is_empty() {
        tracing::info!("No facilities configured, using reference catalog");
    }
    tracing::info!("Loaded catalog with {} facilities", catalog.len());

    let engine = Arc::new(CostSearchEngine::new(catalog, config.solver_config()));

    server::start_server(&config, engine).await
}
