//! The in-app message entity and its wire protocol.
//!
//! Parse rules (wire -> entity):
//! - payload absent, not an object, or without a `content` object => `None`
//! - `createdAt` / `expiresAt` of `0` mean "not set"
//! - display settings missing => zero padding on every edge
//! - custom payload: `customPayload`, else legacy `content.payload`, else `{}`
//! - `saveToInbox` is tri-state: key presence decides `Some` / `None`
//!
//! Serialize rules (entity -> wire): html is never written back (bodies are
//! persisted separately), and serialization never fails the caller: a failing
//! step is logged and the partial object is returned.

use std::fmt;
use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use crate::campaign::{CampaignIdValidator, DefaultCampaignIds};
use crate::error::{InAppError, Result};
use crate::listener::MessageChangeListener;
use crate::protocol::keys;
use crate::protocol::lenient::{
    background_alpha, custom_payload, opt_bool, opt_object, opt_string, opt_timestamp_millis,
};
use crate::protocol::padding::Padding;
use crate::resolver::ContentResolver;

use super::{Content, InboxMetadata, Trigger, TriggerType};

/// One in-app message and its delivery state.
///
/// Built only through [`InAppMessage::from_json`]. Not internally
/// synchronized: mutate from one thread at a time.
pub struct InAppMessage {
    message_id: String,
    campaign_id: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    trigger: Trigger,
    content: Content,
    custom_payload: Map<String, Value>,
    save_to_inbox: Option<bool>,
    inbox_metadata: Option<InboxMetadata>,

    processed: bool,
    consumed: bool,
    read: bool,
    loaded_html_from_json: bool,

    resolver: Option<Weak<dyn ContentResolver>>,
    listener: Option<Arc<dyn MessageChangeListener>>,
}

impl InAppMessage {
    /// Parse with the default campaign id rules.
    pub fn from_json(
        payload: Option<&Value>,
        resolver: Option<Weak<dyn ContentResolver>>,
    ) -> Option<Self> {
        Self::from_json_with(payload, resolver, &DefaultCampaignIds)
    }

    pub fn from_json_with(
        payload: Option<&Value>,
        resolver: Option<Weak<dyn ContentResolver>>,
        campaign_ids: &dyn CampaignIdValidator,
    ) -> Option<Self> {
        let msg = payload?.as_object()?;
        let content_json = opt_object(msg, keys::CONTENT)?;

        let message_id = opt_string(msg, keys::MESSAGE_ID).unwrap_or_default();
        let campaign_id = campaign_ids.retrieve_valid_or_absent(msg, keys::CAMPAIGN_ID);
        let created_at = opt_timestamp_millis(msg, keys::CREATED_AT)
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        let expires_at = opt_timestamp_millis(msg, keys::EXPIRES_AT)
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        let html = opt_string(content_json, keys::HTML);
        let should_animate = opt_bool(content_json, keys::SHOULD_ANIMATE).unwrap_or(true);
        let no_settings = Map::new();
        let settings = opt_object(content_json, keys::DISPLAY_SETTINGS).unwrap_or(&no_settings);
        let padding = Padding::decode(settings);
        let alpha = background_alpha(content_json);

        let trigger = Trigger::from_json(opt_object(msg, keys::TRIGGER));
        let custom_payload = custom_payload(msg, content_json);

        let save_to_inbox = msg
            .contains_key(keys::SAVE_TO_INBOX)
            .then(|| opt_bool(msg, keys::SAVE_TO_INBOX).unwrap_or(false));
        let inbox_metadata = opt_object(msg, keys::INBOX_METADATA).map(InboxMetadata::from_json);

        let loaded_html_from_json = html.as_deref().is_some_and(|h| !h.is_empty());

        Some(Self {
            message_id,
            campaign_id,
            created_at,
            expires_at,
            trigger,
            content: Content::new(html, padding, alpha, should_animate),
            custom_payload,
            save_to_inbox,
            inbox_metadata,
            processed: opt_bool(msg, keys::PROCESSED).unwrap_or(false),
            consumed: opt_bool(msg, keys::CONSUMED).unwrap_or(false),
            read: opt_bool(msg, keys::READ).unwrap_or(false),
            loaded_html_from_json,
            resolver,
            listener: None,
        })
    }

    /// Serialize with the default campaign id rules.
    pub fn to_json(&self) -> Value {
        self.to_json_with(&DefaultCampaignIds)
    }

    /// Best-effort serialization: on failure the error is logged and whatever
    /// was written so far is returned.
    pub fn to_json_with(&self, campaign_ids: &dyn CampaignIdValidator) -> Value {
        let mut out = Map::new();
        if let Err(e) = self.write_json(campaign_ids, &mut out) {
            tracing::error!(
                target: "inapp_core::message",
                message_id = %self.message_id,
                error = %e,
                "error while serializing an in-app message"
            );
        }
        Value::Object(out)
    }

    fn write_json(
        &self,
        campaign_ids: &dyn CampaignIdValidator,
        out: &mut Map<String, Value>,
    ) -> Result<()> {
        out.insert(keys::MESSAGE_ID.into(), Value::from(self.message_id.as_str()));
        if let Some(id) = self.campaign_id.filter(|id| campaign_ids.is_valid(*id)) {
            out.insert(keys::CAMPAIGN_ID.into(), Value::from(id));
        }
        if let Some(at) = self.created_at {
            out.insert(keys::CREATED_AT.into(), Value::from(at.timestamp_millis()));
        }
        if let Some(at) = self.expires_at {
            out.insert(keys::EXPIRES_AT.into(), Value::from(at.timestamp_millis()));
        }
        if let Some(raw) = self.trigger.to_json() {
            out.insert(keys::TRIGGER.into(), raw.clone());
        }

        let mut content = Map::new();
        content.insert(keys::DISPLAY_SETTINGS.into(), self.content.padding.encode());
        if self.content.background_alpha != 0.0 {
            let alpha = Number::from_f64(self.content.background_alpha).ok_or_else(|| {
                InAppError::Encode(format!(
                    "background alpha {} is not a finite number",
                    self.content.background_alpha
                ))
            })?;
            content.insert(keys::BACKGROUND_ALPHA.into(), Value::Number(alpha));
        }
        out.insert(keys::CONTENT.into(), Value::Object(content));
        out.insert(
            keys::CUSTOM_PAYLOAD.into(),
            Value::Object(self.custom_payload.clone()),
        );

        if let Some(save) = self.save_to_inbox {
            out.insert(keys::SAVE_TO_INBOX.into(), Value::from(save));
        }
        if let Some(meta) = &self.inbox_metadata {
            out.insert(keys::INBOX_METADATA.into(), meta.to_json()?);
        }

        out.insert(keys::PROCESSED.into(), Value::from(self.processed));
        out.insert(keys::CONSUMED.into(), Value::from(self.consumed));
        out.insert(keys::READ.into(), Value::from(self.read));
        Ok(())
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn campaign_id(&self) -> Option<i64> {
        self.campaign_id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// True when an expiry is set and has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn trigger_type(&self) -> TriggerType {
        self.trigger.kind()
    }

    pub fn custom_payload(&self) -> &Map<String, Value> {
        &self.custom_payload
    }

    /// Tri-state: `None` when the payload did not say.
    pub fn save_to_inbox(&self) -> Option<bool> {
        self.save_to_inbox
    }

    pub fn is_inbox_message(&self) -> bool {
        self.save_to_inbox.unwrap_or(false)
    }

    /// Inbox message that is never shown as a popup.
    pub fn is_silent_inbox_message(&self) -> bool {
        self.is_inbox_message() && self.trigger_type() == TriggerType::Never
    }

    pub fn inbox_metadata(&self) -> Option<&InboxMetadata> {
        self.inbox_metadata.as_ref()
    }

    /// Content with its html body resolved.
    ///
    /// When html is absent or empty the bound [`ContentResolver`] is asked on
    /// every call and its answer is stored in place. Fails with
    /// `MissingResolver` if no resolver was bound or it has been dropped.
    pub fn content(&mut self) -> Result<&Content> {
        if !self.content.has_html() {
            let resolver = self
                .resolver
                .as_ref()
                .and_then(Weak::upgrade)
                .ok_or_else(|| InAppError::MissingResolver(self.message_id.clone()))?;
            self.content.html = resolver.get_html(&self.message_id);
        }
        Ok(&self.content)
    }

    /// Content as currently held, without resolving the body.
    pub fn content_unresolved(&self) -> &Content {
        &self.content
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn set_processed(&mut self, processed: bool) {
        self.processed = processed;
        self.notify_changed();
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn set_consumed(&mut self, consumed: bool) {
        self.consumed = consumed;
        self.notify_changed();
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn set_read(&mut self, read: bool) {
        self.read = read;
        self.notify_changed();
    }

    pub fn has_loaded_html_from_json(&self) -> bool {
        self.loaded_html_from_json
    }

    /// Bookkeeping only; does not notify.
    pub fn set_loaded_html_from_json(&mut self, loaded: bool) {
        self.loaded_html_from_json = loaded;
    }

    /// Replace the single listener slot; `None` unregisters.
    pub fn set_on_change_listener(&mut self, listener: Option<Arc<dyn MessageChangeListener>>) {
        self.listener = listener;
    }

    fn notify_changed(&self) {
        if let Some(listener) = &self.listener {
            listener.on_message_changed(self);
        }
    }
}

impl fmt::Debug for InAppMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InAppMessage")
            .field("message_id", &self.message_id)
            .field("campaign_id", &self.campaign_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("trigger", &self.trigger)
            .field("content", &self.content)
            .field("save_to_inbox", &self.save_to_inbox)
            .field("inbox_metadata", &self.inbox_metadata)
            .field("processed", &self.processed)
            .field("consumed", &self.consumed)
            .field("read", &self.read)
            .field("loaded_html_from_json", &self.loaded_html_from_json)
            .finish_non_exhaustive()
    }
}
