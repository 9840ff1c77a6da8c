//! Notification sinks for timer alerts.
//!
//! This module provides:
//!
//! - The [`NotificationSink`] trait the alert coordinator delivers through
//! - A permission model mirroring platform notification APIs
//! - [`TerminalNotifier`], which writes alerts to the terminal
//! - [`MockNotificationSender`] for tests
//!
//! Delivery failures are never escalated. Callers log and move on.

mod content;
pub mod error;
mod terminal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;

pub use self::content::{NotificationContent, NotificationContentBuilder};
pub use self::error::NotificationError;
pub use self::terminal::TerminalNotifier;

/// Permission state of a notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    /// Not yet requested
    Default,
    Granted,
    Denied,
    /// The platform cannot show notifications at all
    Unsupported,
}

impl NotificationPermission {
    /// Returns true if notifications may be shown.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Destination for alert notifications.
pub trait NotificationSink {
    /// Current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Asks for permission and returns the resulting state.
    fn request_permission(&self) -> NotificationPermission;

    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn show(&self, content: &NotificationContent) -> Result<(), NotificationError>;
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn permission(&self) -> NotificationPermission {
        (**self).permission()
    }

    fn request_permission(&self) -> NotificationPermission {
        (**self).request_permission()
    }

    fn show(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        (**self).show(content)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn permission(&self) -> NotificationPermission {
        (**self).permission()
    }

    fn request_permission(&self) -> NotificationPermission {
        (**self).request_permission()
    }

    fn show(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        (**self).show(content)
    }
}

/// Mock notification sink for testing.
#[derive(Debug)]
pub struct MockNotificationSender {
    notifications: Mutex<Vec<NotificationContent>>,
    permission: Mutex<NotificationPermission>,
    grant_on_request: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotificationSender {
    /// Creates a mock that has already been granted permission.
    #[must_use]
    pub fn new() -> Self {
        Self::with_permission(NotificationPermission::Granted)
    }

    /// Creates a mock in the given permission state. Requests are granted
    /// unless [`set_grant_on_request`](Self::set_grant_on_request) says otherwise.
    #[must_use]
    pub fn with_permission(permission: NotificationPermission) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            permission: Mutex::new(permission),
            grant_on_request: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Forces the permission state, e.g. to simulate a user revoking it.
    pub fn set_permission(&self, permission: NotificationPermission) {
        *self.permission.lock().unwrap() = permission;
    }

    pub fn set_grant_on_request(&self, grant: bool) {
        self.grant_on_request.store(grant, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<NotificationContent> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.get_notifications()
            .into_iter()
            .map(|content| content.title)
            .collect()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl NotificationSink for MockNotificationSender {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    fn request_permission(&self) -> NotificationPermission {
        let mut permission = self.permission.lock().unwrap();
        if *permission == NotificationPermission::Default {
            *permission = if self.grant_on_request.load(Ordering::SeqCst) {
                NotificationPermission::Granted
            } else {
                NotificationPermission::Denied
            };
        }
        *permission
    }

    fn show(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        match self.permission() {
            NotificationPermission::Granted => {}
            NotificationPermission::Unsupported => return Err(NotificationError::NotAvailable),
            NotificationPermission::Denied => return Err(NotificationError::PermissionDenied),
            NotificationPermission::Default => {
                return Err(NotificationError::PermissionNotGranted)
            }
        }
        self.notifications.lock().unwrap().push(content.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> NotificationContent {
        NotificationContent::builder().title(title).body("body").build()
    }

    #[test]
    fn test_mock_records_notifications() {
        let mock = MockNotificationSender::new();
        mock.show(&content("one")).unwrap();
        mock.show(&content("two")).unwrap();

        assert_eq!(mock.notification_count(), 2);
        assert_eq!(mock.titles(), vec!["one", "two"]);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockNotificationSender::new();
        mock.set_should_fail(true);
        assert!(mock.show(&content("x")).is_err());
        assert_eq!(mock.notification_count(), 0);
    }

    #[test]
    fn test_mock_permission_request() {
        let mock = MockNotificationSender::with_permission(NotificationPermission::Default);
        assert!(mock.show(&content("x")).is_err());

        assert_eq!(mock.request_permission(), NotificationPermission::Granted);
        assert!(mock.show(&content("x")).is_ok());
    }

    #[test]
    fn test_mock_permission_denied() {
        let mock = MockNotificationSender::with_permission(NotificationPermission::Default);
        mock.set_grant_on_request(false);

        assert_eq!(mock.request_permission(), NotificationPermission::Denied);
        assert!(matches!(
            mock.show(&content("x")),
            Err(NotificationError::PermissionDenied)
        ));
    }

    #[test]
    fn test_unsupported_is_not_granted() {
        let mock = MockNotificationSender::with_permission(NotificationPermission::Unsupported);
        assert!(!mock.request_permission().is_granted());
        assert!(matches!(
            mock.show(&content("x")),
            Err(NotificationError::NotAvailable)
        ));
    }

    #[test]
    fn test_arc_forwarding() {
        let mock = Arc::new(MockNotificationSender::new());
        let sink: Box<dyn NotificationSink> = Box::new(Arc::clone(&mock));
        sink.show(&content("shared")).unwrap();
        assert_eq!(mock.titles(), vec!["shared"]);
    }
}
