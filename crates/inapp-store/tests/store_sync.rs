//! Sync, lifecycle, and persistence through the reference store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use inapp_core::ErrorCode;
use inapp_store::{config, MessageStore, SyncReport};

static NEXT: AtomicUsize = AtomicUsize::new(0);

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = NEXT.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("inapp-store-test-{}-{nanos}-{n}", std::process::id()))
}

fn store_in(dir: &Path, extra: &str) -> MessageStore {
    let yaml = format!("version: 1\nstorage:\n  dir: \"{}\"\n{extra}", dir.display());
    MessageStore::new(config::load_from_str(&yaml).unwrap())
}

fn batch() -> String {
    json!({
        "inAppMessages": [
            {
                "messageId": "inline",
                "campaignId": 1,
                "content": { "html": "<p>inline</p>" },
                "saveToInbox": true,
                "trigger": { "type": "never" }
            },
            {
                "messageId": "remote",
                "content": {},
                "saveToInbox": true
            },
            { "messageId": "no-content" },
            { "content": {} },
            { "messageId": "expired", "expiresAt": 1000, "content": {} },
            "not a message"
        ]
    })
    .to_string()
}

#[test]
fn sync_ingests_and_marks_processed() {
    let dir = temp_dir();
    let store = store_in(&dir, "");

    let report = store.sync_from_str(&batch()).unwrap();
    assert_eq!(
        report,
        SyncReport {
            added: 2,
            kept: 0,
            removed: 0,
            expired: 1,
            skipped: 3
        }
    );
    assert_eq!(store.ids().unwrap(), vec!["inline", "remote"]);
    assert_eq!(store.snapshot("inline").unwrap()["processed"], json!(true));
    assert_eq!(store.inbox_ids().unwrap(), vec!["inline", "remote"]);
    assert_eq!(store.unread_inbox_count(), 2);

    // inline html was moved into the body store
    assert_eq!(store.html("inline").unwrap().as_deref(), Some("<p>inline</p>"));
    assert_eq!(store.html("remote").unwrap(), None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn setters_refresh_the_snapshot() {
    let dir = temp_dir();
    let store = store_in(&dir, "sync:\n  mark_processed: false\n");
    store.sync_from_str(&batch()).unwrap();
    assert_eq!(store.snapshot("remote").unwrap()["processed"], json!(false));

    store.set_read("remote", true).unwrap();
    store.set_consumed("remote", true).unwrap();
    let snap = store.snapshot("remote").unwrap();
    assert_eq!(snap["read"], json!(true));
    assert_eq!(snap["consumed"], json!(true));
    assert!(store.is_read("remote").unwrap());
    assert_eq!(store.unread_inbox_count(), 1);

    let err = store.set_read("missing", true).expect_err("unknown id");
    assert_eq!(err.code(), ErrorCode::Malformed);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn resync_keeps_local_state_and_drops_stale() {
    let dir = temp_dir();
    let store = store_in(&dir, "");
    store.sync_from_str(&batch()).unwrap();
    store.set_read("remote", true).unwrap();

    let next = json!({
        "inAppMessages": [
            { "messageId": "remote", "content": {}, "read": false },
            { "messageId": "fresh", "content": {} }
        ]
    })
    .to_string();
    let report = store.sync_from_str(&next).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.kept, 1);
    assert_eq!(report.removed, 1);

    assert!(!store.contains("inline"));
    assert!(store.is_read("remote").unwrap());
    assert_eq!(store.ids().unwrap(), vec!["remote", "fresh"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn expired_messages_can_be_kept() {
    let dir = temp_dir();
    let store = store_in(&dir, "sync:\n  drop_expired: false\n");
    let report = store.sync_from_str(&batch()).unwrap();
    assert_eq!(report.expired, 0);
    assert!(store.contains("expired"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_sync_body_is_rejected() {
    let dir = temp_dir();
    let store = store_in(&dir, "");
    let err = store.sync_from_str("{ not json").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Malformed);
    assert!(store.is_empty());
}

#[test]
fn save_and_load_round_trip() {
    let dir = temp_dir();
    {
        let store = store_in(&dir, "");
        store.sync_from_str(&batch()).unwrap();
        store.set_read("inline", true).unwrap();
        store.save().unwrap();
    }

    let snapshot = fs::read_to_string(dir.join("itbl_inapp.json")).unwrap();
    assert!(!snapshot.contains("<p>inline</p>"), "html must stay out of the snapshot");
    assert_eq!(
        fs::read_to_string(dir.join("html").join("inline").join("index.html")).unwrap(),
        "<p>inline</p>"
    );

    let reloaded = store_in(&dir, "");
    assert_eq!(reloaded.load().unwrap(), 2);
    assert_eq!(reloaded.ids().unwrap(), vec!["inline", "remote"]);
    assert!(reloaded.is_read("inline").unwrap());
    assert_eq!(reloaded.snapshot("inline").unwrap()["campaignId"], json!(1));
    assert_eq!(reloaded.snapshot("inline").unwrap()["trigger"], json!({ "type": "never" }));
    // body comes back through the resolver, from disk
    assert_eq!(reloaded.html("inline").unwrap().as_deref(), Some("<p>inline</p>"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_without_snapshot_is_empty() {
    let dir = temp_dir();
    let store = store_in(&dir, "");
    assert_eq!(store.load().unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn snapshot_version_is_checked() {
    let dir = temp_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("itbl_inapp.json"),
        r#"{ "version": 9, "inAppMessages": [] }"#,
    )
    .unwrap();
    let store = store_in(&dir, "");
    let err = store.load().expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::UnsupportedVersion);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn remove_deletes_body_on_disk() {
    let dir = temp_dir();
    let store = store_in(&dir, "");
    store.sync_from_str(&batch()).unwrap();
    store.save().unwrap();
    let body = dir.join("html").join("inline");
    assert!(body.exists());

    assert!(store.remove("inline").unwrap());
    assert!(!body.exists());
    assert!(!store.bodies().contains("inline"));
    assert!(!store.remove("inline").unwrap());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn resync_survives_a_body_that_cannot_be_removed() {
    let dir = temp_dir();
    let store = store_in(&dir, "");
    let first = json!({
        "inAppMessages": [
            { "messageId": "a", "content": {} },
            { "messageId": "b", "content": {} }
        ]
    })
    .to_string();
    store.sync_from_str(&first).unwrap();

    // a regular file where the body directory of `a` would live
    fs::create_dir_all(dir.join("html")).unwrap();
    fs::write(dir.join("html").join("a"), "blocker").unwrap();

    let second = json!({
        "inAppMessages": [
            { "messageId": "b", "content": {} },
            { "messageId": "c", "content": {} }
        ]
    })
    .to_string();
    let report = store.sync_from_str(&second).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.kept, 1);
    assert_eq!(report.removed, 1);

    assert!(!store.contains("a"));
    assert!(store.contains("c"));
    assert_eq!(store.ids().unwrap(), vec!["b", "c"]);

    store.save().unwrap();
    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("itbl_inapp.json")).unwrap()).unwrap();
    let saved: Vec<&str> = snapshot["inAppMessages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["messageId"].as_str().unwrap())
        .collect();
    assert_eq!(saved, vec!["b", "c"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn remove_tolerates_a_body_that_cannot_be_removed() {
    let dir = temp_dir();
    let store = store_in(&dir, "");
    store.sync_from_str(&batch()).unwrap();

    fs::create_dir_all(dir.join("html")).unwrap();
    fs::write(dir.join("html").join("remote"), "blocker").unwrap();

    assert!(store.remove("remote").unwrap());
    assert!(!store.contains("remote"));
    assert!(store.snapshot("remote").is_none());
    assert_eq!(store.ids().unwrap(), vec!["inline"]);

    let _ = fs::remove_dir_all(&dir);
}
