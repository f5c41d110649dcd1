//! # Session Events
//!
//! Broadcast channel announcing sign-in state changes.
//!
//! The gateway emits these events; view-models subscribe and react. The one
//! that matters most is [`SessionEvent::Expired`]: the session guard fires it
//! after any 401, and every subscriber treats it as "drop what you are doing
//! and show the sign-in screen".

use tokio::sync::broadcast;
use tracing::debug;

/// Buffered events per subscriber. Session changes are rare; a small buffer
/// only has to absorb a burst of 401s from concurrent requests.
const EVENT_CAPACITY: usize = 16;

/// A change in sign-in state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The operator signed in (or registered) successfully.
    SignedIn,

    /// The operator signed out on purpose.
    SignedOut,

    /// The server answered 401; credentials were cleared without asking.
    Expired,
}

/// Shared handle for emitting and subscribing to session events.
///
/// Cheap to clone; all clones feed the same channel.
#[derive(Debug, Clone)]
pub struct SessionWatch {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionWatch {
    /// Creates a new event channel.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        SessionWatch { tx }
    }

    /// Subscribes to future session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emits an event to all current subscribers.
    ///
    /// Emitting with no subscribers is fine; the event is simply dropped.
    pub fn emit(&self, event: SessionEvent) {
        debug!(?event, "Session event");
        let _ = self.tx.send(event);
    }
}

impl Default for SessionWatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let watch = SessionWatch::new();
        let mut rx = watch.subscribe();

        watch.emit(SessionEvent::SignedIn);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SignedIn);
    }

    #[tokio::test]
    async fn test_all_subscribers_see_expiry() {
        let watch = SessionWatch::new();
        let mut rx_a = watch.subscribe();
        let mut rx_b = watch.subscribe();

        watch.emit(SessionEvent::Expired);
        assert_eq!(rx_a.recv().await.unwrap(), SessionEvent::Expired);
        assert_eq!(rx_b.recv().await.unwrap(), SessionEvent::Expired);
    }

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        let watch = SessionWatch::new();
        watch.emit(SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_clones_share_one_channel() {
        let watch = SessionWatch::new();
        let clone = watch.clone();
        let mut rx = watch.subscribe();

        clone.emit(SessionEvent::SignedOut);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SignedOut);
    }
}
