//! Display-inset codec.
//!
//! Each edge is either a percentage of the screen or [`AUTO_EXPAND`], meaning
//! the message sizes itself to its content on that side.
//!
//! Wire shape per edge:
//! - `{"displayOption": "AutoExpand"}` (matched ignoring ASCII case on input)
//! - `{"percentage": 10}`

use serde_json::{Map, Value};

use super::keys;
use super::lenient::{opt_i32, opt_object, opt_string};

/// Sentinel edge value: size to content.
pub const AUTO_EXPAND: i32 = -1;

/// Four independent display insets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Padding {
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Decode all four edges from a present display-settings object.
    ///
    /// Callers holding an optional settings object pass an empty map when it
    /// is missing, which yields the zero rectangle.
    pub fn decode(settings: &Map<String, Value>) -> Self {
        Self {
            top: decode_edge(opt_object(settings, keys::PADDING_TOP)),
            left: decode_edge(opt_object(settings, keys::PADDING_LEFT)),
            bottom: decode_edge(opt_object(settings, keys::PADDING_BOTTOM)),
            right: decode_edge(opt_object(settings, keys::PADDING_RIGHT)),
        }
    }

    /// Encode all four edges into a display-settings object.
    pub fn encode(&self) -> Value {
        let mut out = Map::new();
        out.insert(keys::PADDING_TOP.into(), encode_edge(self.top));
        out.insert(keys::PADDING_LEFT.into(), encode_edge(self.left));
        out.insert(keys::PADDING_BOTTOM.into(), encode_edge(self.bottom));
        out.insert(keys::PADDING_RIGHT.into(), encode_edge(self.right));
        Value::Object(out)
    }
}

/// Decode one edge. Absent edge => 0.
pub fn decode_edge(edge: Option<&Map<String, Value>>) -> i32 {
    let Some(edge) = edge else {
        return 0;
    };
    let auto = opt_string(edge, keys::DISPLAY_OPTION)
        .is_some_and(|opt| opt.eq_ignore_ascii_case(keys::AUTO_EXPAND));
    if auto {
        AUTO_EXPAND
    } else {
        opt_i32(edge, keys::PERCENTAGE).unwrap_or(0)
    }
}

/// Encode one edge.
pub fn encode_edge(padding: i32) -> Value {
    let mut out = Map::new();
    if padding == AUTO_EXPAND {
        out.insert(keys::DISPLAY_OPTION.into(), Value::from(keys::AUTO_EXPAND));
    } else {
        out.insert(keys::PERCENTAGE.into(), Value::from(padding));
    }
    Value::Object(out)
}
