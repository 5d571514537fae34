//! jobgridd — the Jobgrid daemon.
//!
//! Single binary that assembles the control plane:
//! - Embedded store (redb)
//! - Scheduler controller (lifecycle + status exchange)
//! - REST API
//!
//! # Usage
//!
//! ```text
//! jobgridd standalone --port 8210 --data-dir /var/lib/jobgrid
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;

use jobgrid_controller::JobSchedulerController;
use jobgrid_store::RedbStore;

#[derive(Parser)]
#[command(name = "jobgridd", about = "Jobgrid daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the control plane as a single standalone process.
    Standalone {
        /// Port to listen on.
        #[arg(long, default_value = "8210")]
        port: u16,

        /// Data directory for persistent state.
        #[arg(long, default_value = "/var/lib/jobgrid")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobgridd=debug,jobgrid=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Standalone { port, data_dir } => run_standalone(port, data_dir).await,
    }
}

async fn run_standalone(port: u16, data_dir: PathBuf) -> anyhow::Result<()> {
    info!("Jobgrid daemon starting in standalone mode");

    // Ensure data directory exists.
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("jobgrid.redb");

    // ── Initialize subsystems ──────────────────────────────────

    let store = Arc::new(RedbStore::open(&db_path)?);
    info!(path = ?db_path, "store opened");

    let controller =
        JobSchedulerController::new(store.clone(), store.clone(), store);
    if !controller.initialize() {
        bail!("store initialization failed");
    }
    info!("controller initialized");

    // ── Start API server ───────────────────────────────────────

    let router = jobgrid_api::build_router(controller);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
    });

    server.await?;

    info!("Jobgrid daemon stopped");
    Ok(())
}
