//! Window/tab title formatting.
//!
//! While the host view is hidden the title carries the countdown; once it is
//! visible again the original title comes back.

use crate::types::TimerPhase;

/// Formats the title shown for the host view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFormatter {
    original: String,
}

impl TitleFormatter {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Title for the given timer state.
    pub fn render(&self, remaining: u32, phase: TimerPhase, is_hidden: bool) -> String {
        if !is_hidden {
            return self.original.clone();
        }
        match phase {
            TimerPhase::Running => format!("⏱ {} · {}", format_clock(remaining), self.original),
            TimerPhase::Paused => format!("⏸ {} · {}", format_clock(remaining), self.original),
            TimerPhase::Finished => format!("⏰ Time's up! · {}", self.original),
            TimerPhase::Idle => self.original.clone(),
        }
    }
}

/// `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_clock(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "1:00:00");
        assert_eq!(format_clock(5025), "1:23:45");
    }

    #[test]
    fn test_visible_restores_original() {
        let title = TitleFormatter::new("Exam");
        for phase in [
            TimerPhase::Idle,
            TimerPhase::Running,
            TimerPhase::Paused,
            TimerPhase::Finished,
        ] {
            assert_eq!(title.render(90, phase, false), "Exam");
        }
    }

    #[test]
    fn test_hidden_titles() {
        let title = TitleFormatter::new("Exam");
        assert_eq!(title.render(90, TimerPhase::Running, true), "⏱ 01:30 · Exam");
        assert_eq!(title.render(90, TimerPhase::Paused, true), "⏸ 01:30 · Exam");
        assert_eq!(title.render(0, TimerPhase::Finished, true), "⏰ Time's up! · Exam");
        assert_eq!(title.render(90, TimerPhase::Idle, true), "Exam");
    }
}
