//! Append-only feedback log persisted as a single JSON array on disk.
//!
//! Every append is a read-modify-write of the whole file. The in-process mutex
//! serialises writers inside this server only; a second process pointing at
//! the same file can still race and drop entries.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::feedback::FeedbackEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed feedback file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where feedback goes. Carried in `AppState` as `Arc<dyn FeedbackSink>`.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Appends one entry and returns the number of entries now stored.
    async fn append(&self, entry: FeedbackEntry) -> Result<usize, StoreError>;

    /// All entries in insertion order.
    async fn list(&self) -> Result<Vec<FeedbackEntry>, StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing (or blank) file is an empty log.
    async fn load(&self) -> Result<Vec<FeedbackEntry>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "feedback file absent; starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, entries: &[FeedbackEntry]) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries
            .serialize(&mut ser)
            .map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        tokio::fs::write(&self.path, buf)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl FeedbackSink for JsonFileStore {
    async fn append(&self, entry: FeedbackEntry) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;

        let mut entries = self.load().await?;
        entries.push(entry);
        self.save(&entries).await?;

        info!(
            path = %self.path.display(),
            total = entries.len(),
            "feedback entry appended"
        );
        Ok(entries.len())
    }

    async fn list(&self) -> Result<Vec<FeedbackEntry>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }
}
