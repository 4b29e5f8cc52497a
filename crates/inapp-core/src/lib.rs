//! In-app message core: wire protocol, value objects, and the message entity.
//!
//! This crate parses one in-app message from its JSON wire payload, tracks its
//! delivery state (processed / consumed / read), serializes it back for local
//! persistence, and resolves its html body lazily through a caller-supplied
//! [`ContentResolver`]. It carries no storage or runtime dependencies; the
//! store, the network layer, and rendering live elsewhere.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Structural problems
//! in a payload resolve to defaults or to a skipped message, never to a crash.
//!
//! # Concurrency
//! [`InAppMessage`] has no internal synchronization. Callers keep a
//! single-writer discipline (a mutex, a shard lock, or confinement to one
//! thread). Change listeners run synchronously on the mutating thread.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod campaign;
pub mod error;
pub mod listener;
pub mod model;
pub mod protocol;
pub mod resolver;

/// Shared result type.
pub use error::{ErrorCode, InAppError, Result};

pub use campaign::{CampaignIdValidator, DefaultCampaignIds};
pub use listener::MessageChangeListener;
pub use model::{Content, InAppMessage, InboxMetadata, Trigger, TriggerType};
pub use protocol::padding::{Padding, AUTO_EXPAND};
pub use resolver::ContentResolver;
