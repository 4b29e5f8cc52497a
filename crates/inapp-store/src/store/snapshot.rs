//! Snapshot and sync envelopes.
//!
//! Both the sync response and the on-disk snapshot carry the messages under
//! `inAppMessages`. Entries stay as `RawValue` until each one is decoded on
//! its own, so one bad entry does not reject the batch.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Incoming envelope (sync response or snapshot file).
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope {
    /// Present on snapshots only.
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(rename = "inAppMessages", default)]
    pub in_app_messages: Vec<Box<RawValue>>,
}

/// Outgoing snapshot.
#[derive(Debug, Serialize)]
pub struct SnapshotFile {
    pub version: u32,
    #[serde(rename = "inAppMessages")]
    pub in_app_messages: Vec<Value>,
}
