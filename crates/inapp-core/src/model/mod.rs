//! In-app message model.
//!
//! Value objects (`Trigger`, `Content`, `InboxMetadata`) are owned by the
//! `InAppMessage` entity, which also owns the parse/serialize protocol.

pub mod content;
pub mod inbox;
pub mod message;
pub mod trigger;

pub use content::Content;
pub use inbox::InboxMetadata;
pub use message::InAppMessage;
pub use trigger::{Trigger, TriggerType};
