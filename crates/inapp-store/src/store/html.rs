//! Html bodies, kept out of the message snapshot.
//!
//! Layout on disk: `<html_dir>/<messageId>/index.html`.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use dashmap::DashMap;

use inapp_core::error::{InAppError, Result};
use inapp_core::ContentResolver;

use crate::config::schema::is_bare_name;

const INDEX_FILE: &str = "index.html";

/// In-memory html cache backed by a directory.
pub struct HtmlBodies {
    root: PathBuf,
    bodies: DashMap<String, String>,
}

impl HtmlBodies {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            bodies: DashMap::new(),
        }
    }

    pub fn insert(&self, message_id: &str, html: String) {
        self.bodies.insert(message_id.to_string(), html);
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.bodies.contains_key(message_id) || self.file_for(message_id).is_some_and(|p| p.exists())
    }

    /// Forget a body in memory and on disk.
    pub fn remove(&self, message_id: &str) -> Result<()> {
        self.bodies.remove(message_id);
        let Some(dir) = self.dir_for(message_id) else {
            return Ok(());
        };
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InAppError::Io(format!(
                "remove html dir {} failed: {e}",
                dir.display()
            ))),
        }
    }

    /// Write every cached body to disk.
    pub fn persist(&self) -> Result<()> {
        for entry in self.bodies.iter() {
            let (id, html) = entry.pair();
            let Some(dir) = self.dir_for(id) else {
                tracing::warn!(message_id = %id, "message id is not a valid path component; html not persisted");
                continue;
            };
            fs::create_dir_all(&dir)
                .map_err(|e| InAppError::Io(format!("create {} failed: {e}", dir.display())))?;
            let path = dir.join(INDEX_FILE);
            fs::write(&path, html)
                .map_err(|e| InAppError::Io(format!("write {} failed: {e}", path.display())))?;
        }
        Ok(())
    }

    fn dir_for(&self, message_id: &str) -> Option<PathBuf> {
        is_bare_name(message_id).then(|| self.root.join(message_id))
    }

    fn file_for(&self, message_id: &str) -> Option<PathBuf> {
        self.dir_for(message_id).map(|d| d.join(INDEX_FILE))
    }
}

impl ContentResolver for HtmlBodies {
    fn get_html(&self, message_id: &str) -> Option<String> {
        if let Some(html) = self.bodies.get(message_id) {
            return Some(html.value().clone());
        }
        let path = self.file_for(message_id)?;
        match fs::read_to_string(&path) {
            Ok(html) => {
                self.bodies.insert(message_id.to_string(), html.clone());
                Some(html)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(message_id = %message_id, error = %e, "failed to read html body");
                None
            }
        }
    }
}
