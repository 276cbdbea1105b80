//! AgroChain API Server
//!
//! REST backend for the AgroChain marketplace: users, listings, barter,
//! microjobs, DAO proposals and liquidity pools.
//!
//! Storage is SQLite (embedded) by default, or in-memory for demos.

mod config;
mod error;
mod extractors;
mod handlers;
mod routes;
mod services;
mod storage;

use agro_core::Storage;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::{Config, StorageBackend};
use services::Accounts;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub accounts: Arc<Accounts>,
    pub backend: StorageBackend,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, backend: StorageBackend) -> Self {
        let accounts = Arc::new(Accounts::new(storage.clone()));
        Self {
            storage,
            accounts,
            backend,
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Configuration comes first so it can pick the log level
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting AgroChain server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        "Config loaded: bind={}, storage={}",
        config.bind_address, config.storage
    );

    let storage = storage::open(&config).await?;
    let state = AppState::new(storage, config.storage);

    info!("Building HTTP router...");
    let app = routes::app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server ready to accept connections");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
