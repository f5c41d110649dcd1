//! # Toast Notifications
//!
//! Screens report outcomes here instead of rendering anything themselves.
//! The shell subscribes once and turns each notice into whatever toast
//! widget it uses. Messages are already localized by the time they reach
//! the bus.

use tokio::sync::broadcast;

const NOTICE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One toast-worthy event.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Broadcast channel for user-facing notices.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CAPACITY);
        Notifier { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        let _ = self.tx.send(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let _ = self.tx.send(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notices_carry_level_and_message() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.success("تم الحفظ");
        notifier.error("فشل الطلب");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.level, NoticeLevel::Success);
        assert_eq!(first.message, "تم الحفظ");

        let second = rx.recv().await.unwrap();
        assert_eq!(second.level, NoticeLevel::Error);
    }
}
