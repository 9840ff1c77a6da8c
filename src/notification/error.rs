//! Notification system error types.

use thiserror::Error;

/// Errors that can occur when delivering a notification.
///
/// None of these are fatal: the alert coordinator logs them and carries on.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Notification permission was denied by the user.
    #[error("notification permission denied")]
    PermissionDenied,

    /// Permission has not been requested yet.
    #[error("notification permission not yet granted")]
    PermissionNotGranted,

    /// The platform has no notification support.
    #[error("notifications are not supported on this platform")]
    NotAvailable,

    /// Writing the notification failed.
    #[error("failed to send notification: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::PermissionNotGranted)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "allow notifications for this application and restart",
            Self::PermissionNotGranted => "grant notification permission before starting the exam",
            Self::NotAvailable => "alerts will only appear in the session log",
            Self::SendFailed(_) => "check that the terminal is still attached",
        }
    }
}
