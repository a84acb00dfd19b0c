//! Document persistence — one JSON document under one fixed storage key.
//!
//! `load` hands back raw JSON on purpose: the session normalizes whatever it finds,
//! so documents written by older or newer schemas still load.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::Document;

pub const DEFAULT_STORAGE_KEY: &str = "resume_builder_pro_v2_premium";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The persisted value, or `None` when nothing usable is stored.
    async fn load(&self) -> Result<Option<Value>>;

    /// Overwrites the stored document. Last write wins.
    async fn save(&self, document: &Document) -> Result<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// FileStore
// ────────────────────────────────────────────────────────────────────────────

/// Stores the document as `{dir}/{key}.json`.
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// Staging file renamed over `path()` once fully written.
    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.key))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self) -> Result<Option<Value>> {
        let path = self.path();
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored document at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(
                    "Stored document at {} is not valid JSON: {e}",
                    path.display()
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, document: &Document) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let json = serde_json::to_string(document).context("Failed to serialize document")?;
        let path = self.path();
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Saved document to {}", path.display());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryStore
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the document in process. Used by `--ephemeral` runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Value>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn with_value(value: Value) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Option<Value>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, document: &Document) -> Result<()> {
        let value = serde_json::to_value(document).context("Failed to serialize document")?;
        *self.slot.lock().await = Some(value);
        Ok(())
    }
}
