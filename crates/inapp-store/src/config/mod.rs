//! Store config loader (strict parsing).

pub mod schema;

use std::fs;

use inapp_core::error::{InAppError, Result};

pub use schema::{StorageSection, StoreConfig, SyncSection};

pub fn load_from_file(path: &str) -> Result<StoreConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| InAppError::Io(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<StoreConfig> {
    let cfg: StoreConfig = serde_yaml::from_str(s)
        .map_err(|e| InAppError::Malformed(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
