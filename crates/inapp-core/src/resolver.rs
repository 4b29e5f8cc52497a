//! Lazy html body lookup.

/// Supplies a message's html body when the wire payload did not inline it.
///
/// Implementations may block (disk, network). Messages hold resolvers through
/// a `Weak`, so the owner of the resolver decides its lifetime.
pub trait ContentResolver: Send + Sync {
    /// Html body for `message_id`, or `None` when the resolver has none.
    fn get_html(&self, message_id: &str) -> Option<String>;
}
