#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use inapp_core::ErrorCode;
use inapp_store::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
storage:
  dir: "/tmp/inapp"
  snapshot_fil: "x.json" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "MALFORMED");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.storage.dir, "inapp-data");
    assert_eq!(cfg.storage.snapshot_file, "itbl_inapp.json");
    assert_eq!(cfg.storage.html_dir, "html");
    assert!(cfg.sync.drop_expired);
    assert!(cfg.sync.mark_processed);
    assert!(cfg.snapshot_path().ends_with("inapp-data/itbl_inapp.json"));
}

#[test]
fn wrong_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::UnsupportedVersion);
}

#[test]
fn storage_names_must_be_single_components() {
    for bad in [
        "version: 1\nstorage:\n  snapshot_file: \"../escape.json\"\n",
        "version: 1\nstorage:\n  html_dir: \"a/b\"\n",
        "version: 1\nstorage:\n  html_dir: \"..\"\n",
        "version: 1\nstorage:\n  dir: \"  \"\n",
        "version: 1\nstorage:\n  snapshot_file: \"same\"\n  html_dir: \"same\"\n",
    ] {
        let err = config::load_from_str(bad).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Malformed, "config={bad}");
    }
}

#[test]
fn sync_flags_are_configurable() {
    let cfg = config::load_from_str(
        r#"
version: 1
sync:
  drop_expired: false
  mark_processed: false
"#,
    )
    .expect("must parse");
    assert!(!cfg.sync.drop_expired);
    assert!(!cfg.sync.mark_processed);
}
