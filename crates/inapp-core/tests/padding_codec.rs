//! Display-inset codec tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Map, Value};

use inapp_core::protocol::padding::{decode_edge, encode_edge};
use inapp_core::{Padding, AUTO_EXPAND};

#[test]
fn edge_round_trip_over_valid_range() {
    for p in std::iter::once(AUTO_EXPAND).chain(0..=100) {
        let encoded = encode_edge(p);
        assert_eq!(decode_edge(encoded.as_object()), p, "padding={p}");
    }
}

#[test]
fn encode_shapes() {
    assert_eq!(encode_edge(-1), json!({ "displayOption": "AutoExpand" }));
    assert_eq!(encode_edge(15), json!({ "percentage": 15 }));
}

#[test]
fn decode_defaults() {
    assert_eq!(decode_edge(None), 0);
    assert_eq!(decode_edge(Some(&Map::new())), 0);

    let v = json!({ "displayOption": "AUTOEXPAND", "percentage": 40 });
    assert_eq!(decode_edge(v.as_object()), AUTO_EXPAND);

    let v = json!({ "displayOption": "Fixed", "percentage": 40 });
    assert_eq!(decode_edge(v.as_object()), 40);

    let v = json!({ "percentage": "nope" });
    assert_eq!(decode_edge(v.as_object()), 0);
}

#[test]
fn rect_decode_tolerates_missing_and_mistyped_edges() {
    let settings = json!({
        "top": { "percentage": 5 },
        "left": "not an object",
        "right": { "displayOption": "AutoExpand" }
    });
    let p = Padding::decode(settings.as_object().unwrap());
    assert_eq!(p, Padding::new(5, 0, 0, AUTO_EXPAND));

    assert_eq!(Padding::decode(&Map::new()), Padding::default());
}

#[test]
fn rect_encode_emits_all_edges() {
    let p = Padding::new(AUTO_EXPAND, 0, 20, 100);
    let v = p.encode();
    assert_eq!(
        v,
        json!({
            "top": { "displayOption": "AutoExpand" },
            "left": { "percentage": 0 },
            "bottom": { "percentage": 20 },
            "right": { "percentage": 100 }
        })
    );
    let back = Padding::decode(v.as_object().unwrap());
    assert_eq!(back, p);
    assert!(matches!(v, Value::Object(ref m) if m.len() == 4));
}
