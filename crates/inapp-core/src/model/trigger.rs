//! Display-timing descriptor.

use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use crate::protocol::keys;
use crate::protocol::lenient::opt_string;

/// When (or whether) a message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerType {
    Immediate,
    /// Never produced by parsing today; see `Trigger::from_json`.
    Event,
    Never,
}

/// Parsed trigger that keeps its original wire object.
///
/// Equality and hashing look at the raw object only: two triggers with
/// different payloads differ even when both decode to the same type.
#[derive(Debug, Clone)]
pub struct Trigger {
    raw: Option<Value>,
    kind: TriggerType,
}

impl Trigger {
    /// Missing trigger => `Immediate`. A present trigger is `Immediate` only
    /// for `type == "immediate"`; every other value decodes to `Never`.
    pub fn from_json(trigger: Option<&Map<String, Value>>) -> Self {
        let Some(obj) = trigger else {
            return Self::of_type(TriggerType::Immediate);
        };
        let kind = match opt_string(obj, keys::TRIGGER_TYPE).as_deref() {
            Some(keys::TRIGGER_IMMEDIATE) => TriggerType::Immediate,
            _ => TriggerType::Never,
        };
        Self {
            raw: Some(Value::Object(obj.clone())),
            kind,
        }
    }

    /// Trigger without a wire backing; serializes to nothing.
    pub fn of_type(kind: TriggerType) -> Self {
        Self { raw: None, kind }
    }

    pub fn kind(&self) -> TriggerType {
        self.kind
    }

    /// Original wire object, verbatim.
    pub fn to_json(&self) -> Option<&Value> {
        self.raw.as_ref()
    }
}

impl PartialEq for Trigger {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Trigger {}

impl Hash for Trigger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.raw {
            Some(raw) => {
                1u8.hash(state);
                hash_value(raw, state);
            }
            None => 0u8.hash(state),
        }
    }
}

/// Structural hash of a JSON value; object keys are visited in sorted order
/// so the result does not depend on the map's iteration order.
fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            5u8.hash(state);
            map.len().hash(state);
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (k, v) in entries {
                k.hash(state);
                hash_value(v, state);
            }
        }
    }
}
