//! Paper store.
//!
//! Whole-file read-modify-write over a JSON array of `PaperRecord`.
//! Appends are serialised inside this process; nothing guards against a
//! second process writing the same file, and a crash mid-write leaves a
//! file that later loads as empty.

use crate::analytics::{self, PaperFilter};
use crate::error::Result;
use researchiq_common::PaperRecord;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Outcome of reading the store file.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreSnapshot {
    /// No file yet.
    Missing,
    Loaded(Vec<PaperRecord>),
    /// File exists but could not be read as an array of records.
    Corrupt { reason: String },
}

impl StoreSnapshot {
    /// Collapse to the record list callers see; corrupt reads as empty.
    pub fn into_records(self) -> Vec<PaperRecord> {
        match self {
            StoreSnapshot::Loaded(records) => records,
            StoreSnapshot::Missing | StoreSnapshot::Corrupt { .. } => Vec::new(),
        }
    }
}

/// Repository for persisted papers.
pub struct PaperStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PaperStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and report what was found without masking anything.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return StoreSnapshot::Missing,
            Err(e) => return StoreSnapshot::Corrupt { reason: e.to_string() },
        };

        match serde_json::from_slice::<Vec<PaperRecord>>(&bytes) {
            Ok(records) => StoreSnapshot::Loaded(records),
            Err(e) => StoreSnapshot::Corrupt { reason: e.to_string() },
        }
    }

    /// All stored records in append order. Missing or unreadable files
    /// load as empty.
    pub async fn load(&self) -> Vec<PaperRecord> {
        let snapshot = self.snapshot().await;
        if let StoreSnapshot::Corrupt { reason } = &snapshot {
            warn!(
                path = %self.path.display(),
                %reason,
                "Store file unreadable, treating as empty"
            );
        }
        snapshot.into_records()
    }

    /// Append records after everything already stored and rewrite the file.
    /// Returns the total number of records now stored.
    pub async fn append_and_save(&self, new_records: &[PaperRecord]) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await;
        records.extend_from_slice(new_records);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&self.path, json).await?;

        debug!(
            path = %self.path.display(),
            appended = new_records.len(),
            total = records.len(),
            "Store rewritten"
        );
        Ok(records.len())
    }

    /// Count stored records per `published_year`.
    pub async fn yearly_count(&self) -> BTreeMap<String, usize> {
        analytics::yearly_count(&self.load().await)
    }

    /// Stored records passing `filter`, in append order.
    pub async fn filter(&self, filter: &PaperFilter) -> Vec<PaperRecord> {
        analytics::filter_papers(self.load().await, filter)
    }
}
