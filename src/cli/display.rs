//! Display utilities for the proctor CLI.
//!
//! This module provides formatted output for:
//! - Live session events
//! - The session summary
//! - Configuration and help text
//! - Error messages

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local, Utc};

use crate::driver::SessionEvent;
use crate::session::SessionSummary;
use crate::settings::Settings;
use crate::title::format_clock;
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot, Violation};

use super::input::HELP;

/// Clears the in-place countdown line.
const CLEAR_LINE: &str = "\r\x1b[K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Prints the banner shown when a session opens.
    pub fn show_banner(config: &TimerConfig) {
        println!("Proctor Timer");
        println!("─────────────────────────────");
        Self::print_config(config);
        println!("Type 's' to start, 'h' for help.");
    }

    /// Renders one session event.
    pub fn show_event(event: &SessionEvent) {
        let mut stdout = io::stdout().lock();
        let result = match event {
            SessionEvent::Tick { snapshot, .. } => {
                write!(stdout, "{}{}", CLEAR_LINE, Self::countdown_line(snapshot))
            }
            other => match Self::event_line(other) {
                Some(line) => writeln!(stdout, "{}{}", CLEAR_LINE, line),
                None => Ok(()),
            },
        };
        if result.is_ok() {
            let _ = stdout.flush();
        }
    }

    /// One-line text for a discrete event, or `None` for events rendered
    /// elsewhere.
    pub fn event_line(event: &SessionEvent) -> Option<String> {
        let line = match event {
            SessionEvent::Started(snapshot) => {
                format!("> Exam running, {} remaining", format_clock(snapshot.remaining_seconds))
            }
            SessionEvent::Paused(snapshot) => {
                format!("|| Exam paused at {}", format_clock(snapshot.remaining_seconds))
            }
            SessionEvent::Reset(snapshot) => format!(
                "[] Exam reset to {}; violations cleared",
                format_clock(snapshot.remaining_seconds)
            ),
            SessionEvent::Ignored { command, phase } => {
                format!("'{}' has no effect while {}", command, phase)
            }
            SessionEvent::StartRejected(error) => format!("Cannot start: {}", error),
            SessionEvent::Finished(_) => "* Exam finished".to_string(),
            SessionEvent::ViolationRecorded(violation) => {
                format!("! {}", Self::violation_line(violation))
            }
            SessionEvent::ViolationRejected(kind) => {
                format!("'{}' not recorded: no exam in progress", kind.label())
            }
            SessionEvent::Configured(snapshot) => {
                format!("Configuration updated: {}", Self::config_line(&snapshot.config))
            }
            SessionEvent::ConfigurationLocked(phase) => {
                format!("Configuration is locked while {}", phase)
            }
            SessionEvent::SoundToggled(enabled) => {
                format!("Sound {}", if *enabled { "on" } else { "off" })
            }
            SessionEvent::Status(summary) => Self::summary_text(summary),
            // Alerts are delivered by the notification sink.
            SessionEvent::Alert { .. } | SessionEvent::Tick { .. } => return None,
        };
        Some(line)
    }

    /// In-place countdown text.
    pub fn countdown_line(snapshot: &TimerSnapshot) -> String {
        format!(
            "{} {}  [{}]",
            Self::phase_icon(snapshot),
            format_clock(snapshot.remaining_seconds),
            snapshot.status.as_str()
        )
    }

    /// Prints the end-of-session summary.
    pub fn show_summary(summary: &SessionSummary) {
        println!("{}{}", CLEAR_LINE, Self::summary_text(summary));
    }

    /// Multi-line summary text.
    pub fn summary_text(summary: &SessionSummary) -> String {
        let mut lines = vec![
            "Session Summary".to_string(),
            "─────────────────────────────".to_string(),
            format!("State: {}", summary.timer.phase),
            format!(
                "Remaining: {} (elapsed {})",
                format_clock(summary.timer.remaining_seconds),
                format_clock(summary.timer.elapsed_seconds)
            ),
            format!("Status: {}", summary.timer.status.as_str()),
            format!("Sound: {}", if summary.sound_enabled { "on" } else { "off" }),
            format!("Violations: {}", summary.total_violations),
        ];
        for (kind, count) in summary.counts.iter() {
            lines.push(format!("  {}: {}", kind.label(), count));
        }

        if !summary.recent.is_empty() {
            lines.push("Recent:".to_string());
            for violation in &summary.recent {
                lines.push(format!("  {}", Self::violation_line(violation)));
            }
        }
        lines.join("\n")
    }

    /// Prints the effective configuration for `check`.
    pub fn show_config(settings: &Settings, config: &TimerConfig, source: Option<&Path>) {
        match source {
            Some(path) => println!("Settings: {}", path.display()),
            None => println!("Settings: built-in defaults"),
        }
        Self::print_config(config);
        println!("Sound: {}", if settings.sound_enabled { "on" } else { "off" });
        println!("Recent violations shown: {}", settings.recent_limit);
    }

    /// Prints the interactive key reference.
    pub fn show_help() {
        println!("{}Commands:", CLEAR_LINE);
        for (keys, description) in HELP {
            println!("  {:<12} {}", keys, description);
        }
    }

    /// Shows why a recognized command could not be used.
    pub fn show_invalid(message: &str) {
        println!("{}{}", CLEAR_LINE, message);
    }

    /// Shows a warning for an unrecognized input line.
    pub fn show_unknown(input: &str) {
        println!("{}Unknown command '{}' (type 'h' for help)", CLEAR_LINE, input);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Sets the terminal window title (OSC 0).
    pub fn set_terminal_title(title: &str) {
        let mut stdout = io::stdout().lock();
        if write!(stdout, "\x1b]0;{}\x07", title).is_ok() {
            let _ = stdout.flush();
        }
    }

    /// Formats a timestamp in local time.
    pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
    }

    fn print_config(config: &TimerConfig) {
        println!("Duration: {}", format_clock(config.total_seconds()));
        println!("Warning at: {}", format_clock(config.warning_seconds()));
        println!("Critical at: {}", format_clock(config.critical_seconds()));
    }

    fn config_line(config: &TimerConfig) -> String {
        format!(
            "{} total, warning at {}, critical at {}",
            format_clock(config.total_seconds()),
            format_clock(config.warning_seconds()),
            format_clock(config.critical_seconds())
        )
    }

    fn violation_line(violation: &Violation) -> String {
        format!(
            "{} {}",
            Self::format_timestamp(&violation.timestamp),
            violation.label
        )
    }

    fn phase_icon(snapshot: &TimerSnapshot) -> &'static str {
        match snapshot.phase {
            TimerPhase::Running => "⏱",
            TimerPhase::Paused => "⏸",
            TimerPhase::Finished => "⏰",
            TimerPhase::Idle => "·",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ViolationLedger;
    use crate::notification::NotificationPermission;
    use crate::session::SessionError;
    use crate::types::{TimerStatus, ViolationType};

    fn snapshot(phase: TimerPhase, remaining: u32) -> TimerSnapshot {
        let config = TimerConfig::default();
        TimerSnapshot {
            phase,
            status: TimerStatus::Normal,
            remaining_seconds: remaining,
            elapsed_seconds: config.total_seconds() - remaining,
            config,
        }
    }

    fn summary(violations: &[ViolationType], recent_limit: usize) -> SessionSummary {
        let mut ledger = ViolationLedger::new();
        for kind in violations {
            ledger.add(*kind);
        }
        SessionSummary {
            timer: snapshot(TimerPhase::Paused, 1800),
            counts: ledger.count_by_type(),
            total_violations: ledger.len(),
            violations: ledger.timeline(),
            recent: ledger.recent(Some(recent_limit)),
            alerts_fired: Vec::new(),
            sound_enabled: true,
        }
    }

    mod event_line_tests {
        use super::*;

        #[test]
        fn test_started_and_paused() {
            let started = SessionEvent::Started(snapshot(TimerPhase::Running, 3600));
            assert_eq!(
                Display::event_line(&started).unwrap(),
                "> Exam running, 1:00:00 remaining"
            );

            let paused = SessionEvent::Paused(snapshot(TimerPhase::Paused, 754));
            assert_eq!(Display::event_line(&paused).unwrap(), "|| Exam paused at 12:34");
        }

        #[test]
        fn test_ignored_names_command_and_phase() {
            let event = SessionEvent::Ignored {
                command: "start",
                phase: TimerPhase::Finished,
            };
            assert_eq!(
                Display::event_line(&event).unwrap(),
                "'start' has no effect while finished"
            );
        }

        #[test]
        fn test_start_rejected() {
            let event = SessionEvent::StartRejected(SessionError::PermissionRequired(
                NotificationPermission::Denied,
            ));
            assert!(Display::event_line(&event)
                .unwrap()
                .starts_with("Cannot start: notification permission is required"));
        }

        #[test]
        fn test_violation_rejected() {
            let event = SessionEvent::ViolationRejected(ViolationType::TabSwitch);
            assert_eq!(
                Display::event_line(&event).unwrap(),
                "'Tab switch detected' not recorded: no exam in progress"
            );
        }

        #[test]
        fn test_ticks_and_alerts_have_no_line() {
            let tick = SessionEvent::Tick {
                snapshot: snapshot(TimerPhase::Running, 10),
                status_changed: false,
            };
            assert!(Display::event_line(&tick).is_none());
        }

        #[test]
        fn test_sound_toggled() {
            assert_eq!(
                Display::event_line(&SessionEvent::SoundToggled(false)).unwrap(),
                "Sound off"
            );
        }
    }

    mod countdown_tests {
        use super::*;

        #[test]
        fn test_countdown_line() {
            let line = Display::countdown_line(&snapshot(TimerPhase::Running, 599));
            assert_eq!(line, "⏱ 09:59  [normal]");
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_summary_counts_every_type() {
            let text = Display::summary_text(&summary(&[ViolationType::TabSwitch], 5));
            assert!(text.contains("Violations: 1"));
            assert!(text.contains("Multiple faces detected: 0"));
            assert!(text.contains("Tab switch detected: 1"));
            assert!(text.contains("Prohibited application detected: 0"));
            assert!(text.contains("State: paused"));
        }

        #[test]
        fn test_summary_renders_recent_list() {
            let text = Display::summary_text(&summary(
                &[
                    ViolationType::TabSwitch,
                    ViolationType::MultipleFaces,
                    ViolationType::ProhibitedApp,
                ],
                2,
            ));
            let recent: Vec<_> = text
                .split("Recent:")
                .nth(1)
                .unwrap()
                .lines()
                .filter(|l| !l.is_empty())
                .collect();
            assert_eq!(recent.len(), 2);
            assert!(recent[0].ends_with("Prohibited application detected"));
            assert!(recent[1].ends_with("Multiple faces detected"));
        }

        #[test]
        fn test_summary_without_violations_has_no_recent_section() {
            let text = Display::summary_text(&summary(&[], 5));
            assert!(!text.contains("Recent:"));
        }
    }
}
