//! Command-line interface for the wired mod platform.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use wired_api::{create_router, ServerState};
use wired_core::Modification;
use wired_device::assets::restore_backpack_assets;
use wired_device::{DeviceLifecycle, SubmitStatus, Systemctl};
use wired_mods::builtin_registry;

/// Wired - third-party mod manager for the robot.
#[derive(Parser, Debug)]
#[command(name = "wired")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Filesystem root to operate on ("/" for the live system, "/mnt/" for
    /// a mounted update image).
    #[arg(long, default_value = "/", global = true)]
    root: PathBuf,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the mod API server.
    Serve {
        /// Host to bind to.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind to.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// List registered mods.
    List,
    /// Restart the platform services with no mutation.
    Restart,
    /// Restore the factory backpack light assets.
    RestoreBackpack,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let lifecycle = DeviceLifecycle::new(Arc::new(Systemctl::new()));

    match args.command {
        Command::Serve { host, port } => {
            let registry = builtin_registry(&args.root)?;
            registry.init_mods().await;

            let state = ServerState::new(Arc::new(registry), Arc::new(lifecycle), &args.root);
            let router = create_router(state);
            let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
            info!(%host, port, root = %args.root.display(), "serving mod API");
            axum::serve(listener, router).await?;
        }
        Command::List => {
            let registry = builtin_registry(&args.root)?;
            for handle in registry.all() {
                let m = handle.read().await;
                println!(
                    "{}\t{}\trestart={}",
                    m.name(),
                    m.description(),
                    m.restart_required()
                );
            }
        }
        Command::Restart => {
            match lifecycle.restart().await {
                SubmitStatus::Confirmed => info!("restart commands confirmed"),
                SubmitStatus::Unconfirmed => info!("restart submitted, not confirmed"),
            }
        }
        Command::RestoreBackpack => {
            restore_backpack_assets(&lifecycle, &args.root).await?;
            info!("backpack assets restored");
        }
    }

    Ok(())
}
