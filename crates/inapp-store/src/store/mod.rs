//! Reference message store.
//!
//! Holds parsed messages keyed by id, keeps a serialized snapshot of each one
//! current through the change listener, and persists snapshots plus html
//! bodies to disk.
//!
//! Locking: messages and snapshots live in separate `DashMap`s, so the
//! listener (which runs while a message shard is locked) only ever touches
//! the snapshot map.

pub mod html;
pub mod snapshot;

use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;

use inapp_core::error::{InAppError, Result};
use inapp_core::{ContentResolver, InAppMessage, MessageChangeListener};

use crate::config::StoreConfig;

pub use html::HtmlBodies;
use snapshot::{MessageEnvelope, SnapshotFile, SNAPSHOT_VERSION};

/// Outcome of one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// New messages ingested.
    pub added: usize,
    /// Messages already held; local state kept.
    pub kept: usize,
    /// Held messages missing from the batch.
    pub removed: usize,
    /// Entries dropped because their `expiresAt` has passed.
    pub expired: usize,
    /// Entries that could not be decoded or parsed.
    pub skipped: usize,
}

/// Writes a fresh snapshot whenever a message's lifecycle flags change.
struct SnapshotListener {
    snapshots: Arc<DashMap<String, Value>>,
}

impl MessageChangeListener for SnapshotListener {
    fn on_message_changed(&self, message: &InAppMessage) {
        self.snapshots
            .insert(message.message_id().to_string(), message.to_json());
    }
}

pub struct MessageStore {
    cfg: StoreConfig,
    bodies: Arc<HtmlBodies>,
    messages: DashMap<String, InAppMessage>,
    snapshots: Arc<DashMap<String, Value>>,
    listener: Arc<dyn MessageChangeListener>,
    order: Mutex<Vec<String>>,
}

impl MessageStore {
    pub fn new(cfg: StoreConfig) -> Self {
        let snapshots = Arc::new(DashMap::new());
        let listener: Arc<dyn MessageChangeListener> = Arc::new(SnapshotListener {
            snapshots: snapshots.clone(),
        });
        Self {
            bodies: Arc::new(HtmlBodies::new(cfg.html_path())),
            cfg,
            messages: DashMap::new(),
            snapshots,
            listener,
            order: Mutex::new(Vec::new()),
        }
    }

    pub fn bodies(&self) -> &Arc<HtmlBodies> {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.messages.contains_key(message_id)
    }

    /// Message ids in sync order.
    pub fn ids(&self) -> Result<Vec<String>> {
        Ok(self.order()?.clone())
    }

    /// Last serialized form of a message.
    pub fn snapshot(&self, message_id: &str) -> Option<Value> {
        self.snapshots.get(message_id).map(|v| v.value().clone())
    }

    /// Ingest a sync response (`{"inAppMessages": [...]}`).
    ///
    /// Held messages keep their local lifecycle state; held messages absent
    /// from the batch are removed.
    pub fn sync_from_str(&self, body: &str) -> Result<SyncReport> {
        let env: MessageEnvelope = serde_json::from_str(body)
            .map_err(|e| InAppError::Malformed(format!("invalid sync payload: {e}")))?;

        let now = Utc::now();
        let mut report = SyncReport::default();
        let mut incoming: Vec<String> = Vec::with_capacity(env.in_app_messages.len());

        for raw in &env.in_app_messages {
            let Some(msg) = self.decode(raw.get()) else {
                report.skipped += 1;
                continue;
            };
            if self.cfg.sync.drop_expired && msg.is_expired_at(now) {
                tracing::debug!(message_id = %msg.message_id(), "dropping expired message");
                report.expired += 1;
                continue;
            }
            let id = msg.message_id().to_string();
            if incoming.contains(&id) {
                tracing::warn!(message_id = %id, "duplicate message id in sync payload");
                report.skipped += 1;
                continue;
            }
            incoming.push(id.clone());

            if self.messages.contains_key(&id) {
                report.kept += 1;
            } else {
                self.adopt(msg, self.cfg.sync.mark_processed);
                report.added += 1;
            }
        }

        let keep: HashSet<&str> = incoming.iter().map(String::as_str).collect();
        let stale: Vec<String> = self
            .messages
            .iter()
            .map(|e| e.key().clone())
            .filter(|id| !keep.contains(id.as_str()))
            .collect();
        *self.order()? = incoming;
        for id in &stale {
            self.remove(id)?;
            report.removed += 1;
        }

        tracing::info!(
            added = report.added,
            kept = report.kept,
            removed = report.removed,
            expired = report.expired,
            skipped = report.skipped,
            "in-app sync applied"
        );
        Ok(report)
    }

    /// Drop a message, its snapshot, and its html body.
    ///
    /// Body removal on disk is best-effort; a leftover directory is logged.
    pub fn remove(&self, message_id: &str) -> Result<bool> {
        self.order()?.retain(|id| id != message_id);
        let existed = self.messages.remove(message_id).is_some();
        self.snapshots.remove(message_id);
        if let Err(e) = self.bodies.remove(message_id) {
            tracing::warn!(message_id = %message_id, error = %e, "failed to remove html body");
        }
        Ok(existed)
    }

    pub fn set_processed(&self, message_id: &str, processed: bool) -> Result<()> {
        self.with_message(message_id, |m| m.set_processed(processed))
    }

    pub fn set_consumed(&self, message_id: &str, consumed: bool) -> Result<()> {
        self.with_message(message_id, |m| m.set_consumed(consumed))
    }

    pub fn set_read(&self, message_id: &str, read: bool) -> Result<()> {
        self.with_message(message_id, |m| m.set_read(read))
    }

    pub fn is_read(&self, message_id: &str) -> Result<bool> {
        self.with_message(message_id, |m| m.is_read())
    }

    /// Html body of a message, resolved through the store if not inlined.
    pub fn html(&self, message_id: &str) -> Result<Option<String>> {
        self.with_message(message_id, |m| m.content().map(|c| c.html.clone()))?
    }

    /// Inbox message ids in sync order.
    pub fn inbox_ids(&self) -> Result<Vec<String>> {
        let order = self.order()?;
        Ok(order
            .iter()
            .filter(|id| {
                self.messages
                    .get(id.as_str())
                    .is_some_and(|m| m.is_inbox_message())
            })
            .cloned()
            .collect())
    }

    pub fn unread_inbox_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|e| e.value().is_inbox_message() && !e.value().is_read())
            .count()
    }

    /// Write the snapshot file and html bodies.
    pub fn save(&self) -> Result<()> {
        let dir = &self.cfg.storage.dir;
        fs::create_dir_all(dir).map_err(|e| InAppError::Io(format!("create {dir} failed: {e}")))?;

        let in_app_messages: Vec<Value> = self
            .order()?
            .iter()
            .filter_map(|id| self.snapshots.get(id).map(|v| v.value().clone()))
            .collect();
        let count = in_app_messages.len();
        let doc = SnapshotFile {
            version: SNAPSHOT_VERSION,
            in_app_messages,
        };
        let body = serde_json::to_string_pretty(&doc)?;

        let path = self.cfg.snapshot_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .map_err(|e| InAppError::Io(format!("write {} failed: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| InAppError::Io(format!("rename to {} failed: {e}", path.display())))?;

        self.bodies.persist()?;
        tracing::debug!(messages = count, path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Read a previously saved snapshot. Missing file => nothing loaded.
    pub fn load(&self) -> Result<usize> {
        let path = self.cfg.snapshot_path();
        let body = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(InAppError::Io(format!(
                    "read {} failed: {e}",
                    path.display()
                )))
            }
        };
        let env: MessageEnvelope = serde_json::from_str(&body)
            .map_err(|e| InAppError::Malformed(format!("invalid snapshot: {e}")))?;
        if env.version.is_some_and(|v| v != SNAPSHOT_VERSION) {
            return Err(InAppError::UnsupportedVersion);
        }

        let mut loaded = 0;
        let mut order = self.order()?;
        for raw in &env.in_app_messages {
            let Some(msg) = self.decode(raw.get()) else {
                continue;
            };
            let id = msg.message_id().to_string();
            if self.messages.contains_key(&id) {
                continue;
            }
            self.adopt(msg, false);
            order.push(id);
            loaded += 1;
        }
        tracing::info!(messages = loaded, path = %path.display(), "snapshot loaded");
        Ok(loaded)
    }

    fn resolver(&self) -> Weak<dyn ContentResolver> {
        let resolver: Arc<dyn ContentResolver> = self.bodies.clone();
        Arc::downgrade(&resolver)
    }

    /// Decode one raw entry; `None` if it is not a storable message.
    fn decode(&self, raw: &str) -> Option<InAppMessage> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "undecodable in-app message entry");
                return None;
            }
        };
        let Some(msg) = InAppMessage::from_json(Some(&value), Some(self.resolver())) else {
            tracing::debug!("skipping in-app message without content");
            return None;
        };
        if msg.message_id().is_empty() {
            tracing::debug!("skipping in-app message without id");
            return None;
        }
        Some(msg)
    }

    fn adopt(&self, mut msg: InAppMessage, mark_processed: bool) {
        let id = msg.message_id().to_string();
        if msg.has_loaded_html_from_json() {
            if let Some(html) = msg.content_unresolved().html.clone() {
                self.bodies.insert(&id, html);
            }
        }
        msg.set_on_change_listener(Some(self.listener.clone()));
        self.snapshots.insert(id.clone(), msg.to_json());
        if mark_processed {
            msg.set_processed(true);
        }
        self.messages.insert(id, msg);
    }

    fn with_message<T>(
        &self,
        message_id: &str,
        f: impl FnOnce(&mut InAppMessage) -> T,
    ) -> Result<T> {
        let mut entry = self
            .messages
            .get_mut(message_id)
            .ok_or_else(|| InAppError::Malformed(format!("unknown message id: {message_id}")))?;
        Ok(f(entry.value_mut()))
    }

    /// Poisoned lock means a panic elsewhere; surface it instead of panicking.
    fn order(&self) -> Result<MutexGuard<'_, Vec<String>>> {
        self.order
            .lock()
            .map_err(|_| InAppError::Internal("message order lock poisoned".into()))
    }
}
