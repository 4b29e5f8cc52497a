//! Inbox presentation metadata.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::protocol::keys;
use crate::protocol::lenient::opt_string;

/// Optional strings shown for a message in an inbox list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct InboxMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl InboxMetadata {
    pub fn new(title: Option<String>, subtitle: Option<String>, icon: Option<String>) -> Self {
        Self {
            title,
            subtitle,
            icon,
        }
    }

    pub fn from_json(obj: &Map<String, Value>) -> Self {
        Self {
            title: opt_string(obj, keys::INBOX_TITLE),
            subtitle: opt_string(obj, keys::INBOX_SUBTITLE),
            icon: opt_string(obj, keys::INBOX_ICON),
        }
    }

    /// Absent fields are omitted.
    pub fn to_json(&self) -> crate::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
