//! User-facing notices (toasts) and navigation targets.
//!
//! Session operations never render anything. They describe what the user
//! should be told as a [`Notice`] and where the UI should go as a [`Route`].

use crate::model::OrderId;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            title: None,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Where the UI should navigate next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Route {
    /// The "order placed" page.
    Confirmation,
    /// Detail page of one order, where payment can be retried.
    OrderDetail(OrderId),
    /// The customer's profile page.
    Profile,
}

/// Fan-out of notices to whoever is listening.
///
/// Publishing with no listeners is not an error; the notice is dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn notify(&self, notice: Notice) {
        debug!(level = ?notice.level, message = %notice.message, "Notice");
        let _ = self.sender.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notices_reach_subscribers() {
        let notifier = Notifier::new(4);
        notifier.notify(Notice::info("nobody listening"));

        let mut listener = notifier.subscribe();
        notifier.notify(Notice::warning("Your cart is empty.").titled("Attention"));

        let notice = listener.recv().await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.title.as_deref(), Some("Attention"));
    }
}
