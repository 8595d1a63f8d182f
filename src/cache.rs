//! Last-seen status cache for duplicate-notification suppression.
//!
//! Best-effort only: an unreadable or corrupt file behaves like an empty
//! cache, so the worst outcome is a repeated notification.

use crate::error::CacheError;
use crate::status::CheckResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Storage format: line id mapped to the last reported status text.
#[derive(Debug, Serialize, Deserialize, Default)]
struct CacheData {
    #[serde(default)]
    lines: BTreeMap<String, String>,
}

/// File-backed map of line id to last reported status text.
#[derive(Debug, Clone)]
pub struct StatusCache {
    storage_path: PathBuf,
}

impl StatusCache {
    pub fn new(storage_path: PathBuf) -> Self {
        Self { storage_path }
    }

    /// Read data from the storage file.
    fn read_data(&self) -> CacheData {
        match fs::read_to_string(&self.storage_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => CacheData::default(),
        }
    }

    /// Write data to the storage file.
    fn write_data(&self, data: &CacheData) -> Result<(), CacheError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.storage_path, content)?;
        Ok(())
    }

    /// Whether a line's status differs from what was last recorded.
    /// A line never seen before counts as changed.
    pub fn changed(&self, line_id: &str, status_text: &str) -> bool {
        let data = self.read_data();
        data.lines.get(line_id).map(String::as_str) != Some(status_text)
    }

    /// Record the statuses of a check cycle, merging over earlier entries.
    pub fn record(&self, result: &CheckResult) -> Result<(), CacheError> {
        let mut data = self.read_data();
        for status in &result.statuses {
            data.lines
                .insert(status.line.id.to_string(), status.summary());
        }
        self.write_data(&data)
    }
}
