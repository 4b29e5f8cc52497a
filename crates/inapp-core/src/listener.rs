//! Change notification port.

use crate::model::InAppMessage;

/// Notified synchronously after every lifecycle setter call on a message.
///
/// Runs on the mutating thread; implementations must not block.
pub trait MessageChangeListener: Send + Sync {
    fn on_message_changed(&self, message: &InAppMessage);
}

impl<F> MessageChangeListener for F
where
    F: Fn(&InAppMessage) + Send + Sync,
{
    fn on_message_changed(&self, message: &InAppMessage) {
        self(message)
    }
}
