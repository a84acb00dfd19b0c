use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::editor::store::DEFAULT_STORAGE_KEY;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory holding the persisted document.
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_key = var("STORAGE_KEY", DEFAULT_STORAGE_KEY);
        anyhow::ensure!(
            is_valid_storage_key(&storage_key),
            "STORAGE_KEY must be non-empty and may only contain letters, digits, '_' and '-'"
        );

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            data_dir: PathBuf::from(var("DATA_DIR", "./data")),
            storage_key,
            rust_log: var("RUST_LOG", "info"),
        })
    }
}

fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
