use std::path::PathBuf;

use serde::Deserialize;
use inapp_core::error::{InAppError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub version: u32,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub sync: SyncSection,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(InAppError::UnsupportedVersion);
        }
        self.storage.validate()?;
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.dir).join(&self.storage.snapshot_file)
    }

    pub fn html_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.dir).join(&self.storage.html_dir)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default = "default_dir")]
    pub dir: String,

    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    #[serde(default = "default_html_dir")]
    pub html_dir: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            snapshot_file: default_snapshot_file(),
            html_dir: default_html_dir(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(InAppError::Malformed("storage.dir must not be empty".into()));
        }
        if !is_bare_name(&self.snapshot_file) {
            return Err(InAppError::Malformed(
                "storage.snapshot_file must be a plain file name".into(),
            ));
        }
        if !is_bare_name(&self.html_dir) {
            return Err(InAppError::Malformed(
                "storage.html_dir must be a plain directory name".into(),
            ));
        }
        if self.snapshot_file == self.html_dir {
            return Err(InAppError::Malformed(
                "storage.snapshot_file and storage.html_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncSection {
    /// Skip messages whose `expiresAt` has already passed.
    #[serde(default = "default_true")]
    pub drop_expired: bool,

    /// Mark newly ingested messages as processed.
    #[serde(default = "default_true")]
    pub mark_processed: bool,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            drop_expired: true,
            mark_processed: true,
        }
    }
}

/// One path component, no separators, not `.` / `..`.
pub(crate) fn is_bare_name(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

fn default_dir() -> String {
    "inapp-data".into()
}
fn default_snapshot_file() -> String {
    "itbl_inapp.json".into()
}
fn default_html_dir() -> String {
    "html".into()
}
fn default_true() -> bool {
    true
}
