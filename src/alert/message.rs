//! Alert notification text.

use crate::notification::NotificationContent;
use crate::types::TimerConfig;

use super::AlertKind;

/// Builds the notification shown for an alert.
pub fn content_for(kind: AlertKind, config: &TimerConfig) -> NotificationContent {
    let builder = NotificationContent::builder();
    match kind {
        AlertKind::Warning => builder
            .title("Time running low")
            .body(format!(
                "{} remaining in the exam",
                format_span(config.warning_seconds())
            )),
        AlertKind::Critical => {
            let body = match config.critical_seconds() {
                0 => "The exam is about to end".to_string(),
                secs => format!("Only {} left! Finish your answers", format_span(secs)),
            };
            builder.title("Final countdown").body(body)
        }
        AlertKind::Finished => builder
            .title("Time's up!")
            .body("The exam time has ended"),
    }
    .build()
}

/// Phrases a threshold as whole minutes when possible, otherwise seconds.
///
/// Exactly one unit is singular ("1 minute"); everything else is plural.
pub fn format_span(seconds: u32) -> String {
    if seconds > 0 && seconds % 60 == 0 {
        pluralize(seconds / 60, "minute")
    } else {
        pluralize(seconds, "second")
    }
}

fn pluralize(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(60), "1 minute");
        assert_eq!(format_span(300), "5 minutes");
        assert_eq!(format_span(1), "1 second");
        assert_eq!(format_span(30), "30 seconds");
        assert_eq!(format_span(90), "90 seconds");
        assert_eq!(format_span(0), "0 seconds");
    }

    #[test]
    fn test_critical_singular() {
        let config = TimerConfig::from_minutes(30, 5, 1).unwrap();
        let content = content_for(AlertKind::Critical, &config);
        assert_eq!(content.title, "Final countdown");
        assert!(content.body.contains("Only 1 minute left"));
    }

    #[test]
    fn test_critical_plural() {
        let config = TimerConfig::from_minutes(30, 10, 3).unwrap();
        let content = content_for(AlertKind::Critical, &config);
        assert!(content.body.contains("Only 3 minutes left"));
    }

    #[test]
    fn test_critical_at_zero() {
        let config = TimerConfig::new(60, 30, 0).unwrap();
        let content = content_for(AlertKind::Critical, &config);
        assert_eq!(content.body, "The exam is about to end");
    }

    #[test]
    fn test_warning_and_finished() {
        let config = TimerConfig::from_minutes(60, 10, 5).unwrap();

        let warning = content_for(AlertKind::Warning, &config);
        assert_eq!(warning.title, "Time running low");
        assert_eq!(warning.body, "10 minutes remaining in the exam");

        let finished = content_for(AlertKind::Finished, &config);
        assert_eq!(finished.title, "Time's up!");
    }
}
