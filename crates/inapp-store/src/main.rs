//! In-app store CLI
//!
//! `inapp-store [config.yaml] [payload.json]`
//! - load config (strict) and any saved snapshot
//! - apply the sync payload, if given
//! - save snapshot + html bodies

use std::env;
use std::fs;

use tracing_subscriber::{fmt, EnvFilter};

use inapp_store::{config, MessageStore};

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = env::args().skip(1);
    let cfg_path = args.next().unwrap_or_else(|| "inapp.yaml".into());
    let payload_path = args.next();

    let cfg = config::load_from_file(&cfg_path).expect("config load failed");
    let store = MessageStore::new(cfg);
    store.load().expect("snapshot load failed");

    if let Some(path) = payload_path {
        let body = fs::read_to_string(&path).expect("failed to read sync payload");
        let report = store.sync_from_str(&body).expect("sync failed");
        tracing::info!(%path, ?report, "sync payload applied");
    }

    store.save().expect("snapshot save failed");
    tracing::info!(
        messages = store.len(),
        unread_inbox = store.unread_inbox_count(),
        "inapp-store done"
    );
}
