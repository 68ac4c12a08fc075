//! pokedex-api - Read-only Pokédex query service
//!
//! Serves entity lookups, filtered lists and enumerations over two static
//! JSON tables loaded once per process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{build_router, AppState};
use pokedex_common::config::{ConfigOverrides, ServiceConfig, TomlConfig};
use pokedex_common::StoreHandle;

/// Command-line arguments for pokedex-api
#[derive(Parser, Debug)]
#[command(name = "pokedex-api")]
#[command(about = "Read-only Pokédex query service")]
#[command(version)]
struct Args {
    /// TOML configuration file (default: <config_dir>/pokedex/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder containing t_pokemon.json and t_pokemon_detail.json
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long)]
    bind: Option<String>,

    /// Defer loading the tables until the first request
    #[arg(long)]
    no_preload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load(args.config.as_deref())?;
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            data_folder: args.data_folder,
            port: args.port,
            bind_address: args.bind,
            no_preload: args.no_preload,
        },
        &toml_config,
    )?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Pokédex API (pokedex-api) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Data folder: {}", config.data_folder.display());

    let store = Arc::new(StoreHandle::new(config.data_folder.clone()));

    if config.preload {
        let handle = Arc::clone(&store);
        let loaded = tokio::task::spawn_blocking(move || {
            handle
                .get()
                .map(|s| (s.entities().len(), s.details().len()))
        })
        .await
        .context("Table loading task panicked")?;

        match loaded {
            Ok((entities, details)) => {
                info!("✓ Tables loaded ({} entities, {} details)", entities, details);
            }
            Err(e) => {
                error!("Failed to load tables: {}", e);
                return Err(e.into());
            }
        }
    } else {
        warn!("Preload disabled: tables load on first request");
    }

    let app = build_router(AppState::new(store));

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("pokedex-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("pokedex-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
