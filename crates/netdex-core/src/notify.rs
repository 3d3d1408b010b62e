// ── Notification sink ──
//
// Fire-and-forget user-facing messages (e.g. "Updated printer (#42)").
// The core never observes whether delivery happened.

use tracing::info;

/// Receives short human-readable messages from the core.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Default sink: emits each message as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(target: "netdex::notify", "{message}");
    }
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message);
    }
}
