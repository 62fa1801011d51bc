//! Transient messages shown in the footer.

use crate::nav::View;
use chrono::{DateTime, Utc};

/// Oldest notifications are dropped past this many.
pub const MAX_NOTIFICATIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Follow-up the user can trigger from a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Re-run the failed load of a view.
    Retry(View),
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub action: Option<NotificationAction>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            action: None,
            created_at: Utc::now(),
        }
    }

    /// An error for `view` carrying a retry.
    pub fn load_failed(view: View, reason: &str) -> Self {
        Self::new(
            NotificationLevel::Error,
            format!("{} failed to load: {}", view.title(), reason),
        )
        .with_action(NotificationAction::Retry(view))
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_retry_for(&self, view: View) -> bool {
        self.action == Some(NotificationAction::Retry(view))
    }
}

/// Append `notification`, dropping the oldest entries beyond [`MAX_NOTIFICATIONS`].
pub fn push_bounded(log: &mut Vec<Notification>, notification: Notification) {
    log.push(notification);
    if log.len() > MAX_NOTIFICATIONS {
        let excess = log.len() - MAX_NOTIFICATIONS;
        log.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = Vec::new();
        for i in 0..MAX_NOTIFICATIONS + 5 {
            push_bounded(&mut log, Notification::new(NotificationLevel::Info, i.to_string()));
        }
        assert_eq!(log.len(), MAX_NOTIFICATIONS);
        assert_eq!(log[0].message, "5");
    }

    #[test]
    fn test_load_failed_carries_retry() {
        let note = Notification::load_failed(View::Cards, "offline");
        assert!(note.is_retry_for(View::Cards));
        assert!(!note.is_retry_for(View::Friends));
        assert_eq!(note.message, "Cards failed to load: offline");
    }
}
