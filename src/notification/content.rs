//! Notification content construction.

use serde::Serialize;

/// Maximum length of a notification title, in characters.
const MAX_TITLE_LENGTH: usize = 64;

/// Title and body of a single notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> NotificationContentBuilder {
        NotificationContentBuilder::default()
    }
}

/// Fluent builder for [`NotificationContent`].
#[derive(Debug, Default)]
pub struct NotificationContentBuilder {
    title: String,
    body: String,
}

impl NotificationContentBuilder {
    /// Sets the title. Overlong titles are truncated.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        let title: String = title.into();
        self.title = title.chars().take(MAX_TITLE_LENGTH).collect();
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn build(self) -> NotificationContent {
        NotificationContent {
            title: self.title,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let content = NotificationContent::builder()
            .title("Time's up!")
            .body("The exam time has ended")
            .build();
        assert_eq!(content.title, "Time's up!");
        assert_eq!(content.body, "The exam time has ended");
    }

    #[test]
    fn test_title_truncated() {
        let content = NotificationContent::builder().title("x".repeat(200)).build();
        assert_eq!(content.title.chars().count(), MAX_TITLE_LENGTH);
    }

    #[test]
    fn test_empty_defaults() {
        let content = NotificationContent::builder().build();
        assert!(content.title.is_empty());
        assert!(content.body.is_empty());
    }
}
