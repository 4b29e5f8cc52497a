//! In-app message store library entry.
//!
//! This crate wires the core message model to a concrete store: strict YAML
//! config, sync ingestion, html body resolution, and snapshot persistence. It
//! is consumed by the binary (`main.rs`) and by integration tests.

pub mod config;
pub mod store;

pub use config::StoreConfig;
pub use store::{HtmlBodies, MessageStore, SyncReport};
