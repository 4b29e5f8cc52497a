//! Top-level facade crate for the in-app message stack.
//!
//! Re-exports the core model and the reference store so users can depend on a single crate.

pub mod core {
    pub use inapp_core::*;
}

pub mod store {
    pub use inapp_store::*;
}
