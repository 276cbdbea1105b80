//! Server configuration
//!
//! Layered: built-in defaults, then an optional config file (`agrochain.toml`
//! or the path in `AGRO_CONFIG`), then `AGRO_*` environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_CONFIG_FILE: &str = "agrochain";

/// Which storage backend serves the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub storage: StorageBackend,
    pub database_path: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let file = std::env::var("AGRO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&file)
    }

    pub fn load_from(file: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("storage", "sqlite")?
            .set_default("database_path", "data/agrochain.db")?
            .set_default("log_level", "info")?
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("AGRO"))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
