//! Shelter records HTTP server entry point.
//!
//! # Responsibility
//! - Parse configuration from flags or environment.
//! - Initialize logging, wire the SQLite store and serve the API.

use clap::Parser;
use log::{info, warn};
use shelter_api::{serve, AppState};
use shelter_core::{core_version, default_log_level, init_logging, ping, SqliteDogStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shelter records API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database file
    #[arg(long, env = "SHELTER_DB_PATH", default_value = "shelter.sqlite3")]
    db_path: PathBuf,

    /// Address to listen on
    #[arg(long, env = "SHELTER_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "SHELTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset
    #[arg(long, env = "SHELTER_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, args.log_dir.as_deref())?;

    let store = SqliteDogStore::new(args.db_path);
    info!(
        "event=server_start module=cli status=start ping={} version={} db_path={} bind={}",
        ping(),
        core_version(),
        store.path().display(),
        args.bind
    );

    // Requests report 503 until the store becomes reachable.
    if let Err(err) = store.connect() {
        warn!("event=db_probe module=cli status=error error={err}");
    }

    let listener = TcpListener::bind(args.bind).await?;
    serve(listener, AppState::new(Arc::new(store)), shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=signal_listen module=cli status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=server_stop module=cli status=ok reason=ctrl_c");
}
