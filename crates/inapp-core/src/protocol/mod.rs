//! Wire-level helpers for the in-app message payload.
//!
//! - `keys`: field names of the JSON wire payload.
//! - `lenient`: single-field readers with the coercions a lenient JSON reader
//!   applies, plus the small defaulting chains the parse protocol relies on.
//! - `padding`: the display-inset codec.
//!
//! All readers are total: a missing or mistyped field yields `None` or a
//! default, never an error or a panic.

pub mod keys;
pub mod lenient;
pub mod padding;
