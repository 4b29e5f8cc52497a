//! Message body and display settings.

use std::hash::{Hash, Hasher};

use crate::protocol::padding::Padding;

/// Html body reference plus display settings.
///
/// Equality covers `html`, `padding` and `background_alpha`; `should_animate`
/// does not take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct Content {
    /// `None` until inlined by the payload or resolved from the store.
    pub html: Option<String>,
    pub padding: Padding,
    pub background_alpha: f64,
    pub should_animate: bool,
}

impl Content {
    pub fn new(
        html: Option<String>,
        padding: Padding,
        background_alpha: f64,
        should_animate: bool,
    ) -> Self {
        Self {
            html,
            padding,
            background_alpha,
            should_animate,
        }
    }

    /// True when an html body is present and non-empty.
    pub fn has_html(&self) -> bool {
        self.html.as_deref().is_some_and(|h| !h.is_empty())
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.html == other.html
            && self.padding == other.padding
            && alpha_bits(self.background_alpha) == alpha_bits(other.background_alpha)
    }
}

impl Eq for Content {}

impl Hash for Content {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.html.hash(state);
        self.padding.hash(state);
        alpha_bits(self.background_alpha).hash(state);
    }
}

/// Bit pattern used for alpha comparison: `-0.0` folds into `0.0`.
fn alpha_bits(alpha: f64) -> u64 {
    if alpha == 0.0 {
        0.0f64.to_bits()
    } else {
        alpha.to_bits()
    }
}
