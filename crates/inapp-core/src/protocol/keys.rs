//! Field names of the in-app message wire payload.

pub const MESSAGE_ID: &str = "messageId";
pub const CAMPAIGN_ID: &str = "campaignId";
pub const CREATED_AT: &str = "createdAt";
pub const EXPIRES_AT: &str = "expiresAt";
pub const TRIGGER: &str = "trigger";
pub const TRIGGER_TYPE: &str = "type";
pub const CONTENT: &str = "content";
pub const CUSTOM_PAYLOAD: &str = "customPayload";
pub const SAVE_TO_INBOX: &str = "saveToInbox";
pub const INBOX_METADATA: &str = "inboxMetadata";
pub const PROCESSED: &str = "processed";
pub const CONSUMED: &str = "consumed";
pub const READ: &str = "read";

// content sub-object
pub const HTML: &str = "html";
pub const SHOULD_ANIMATE: &str = "shouldAnimate";
pub const DISPLAY_SETTINGS: &str = "inAppDisplaySettings";
pub const BACKGROUND_ALPHA: &str = "backgroundAlpha";
/// Older producers name the alpha field this way; accepted on input only.
pub const LEGACY_BACKGROUND_ALPHA: &str = "defaultBackgroundAlpha";
/// Custom payload location used before `customPayload` moved to the top level.
pub const LEGACY_PAYLOAD: &str = "payload";

// inbox metadata sub-object
pub const INBOX_TITLE: &str = "title";
pub const INBOX_SUBTITLE: &str = "subtitle";
pub const INBOX_ICON: &str = "icon";

// padding
pub const PADDING_TOP: &str = "top";
pub const PADDING_LEFT: &str = "left";
pub const PADDING_BOTTOM: &str = "bottom";
pub const PADDING_RIGHT: &str = "right";
pub const DISPLAY_OPTION: &str = "displayOption";
pub const PERCENTAGE: &str = "percentage";
pub const AUTO_EXPAND: &str = "AutoExpand";

// trigger types
pub const TRIGGER_IMMEDIATE: &str = "immediate";
