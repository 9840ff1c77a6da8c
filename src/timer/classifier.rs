//! Threshold classification.

use crate::types::TimerStatus;

/// Classifies the remaining time against the warning and critical thresholds.
///
/// Both boundaries are inclusive: a remaining time equal to a threshold maps
/// to that threshold's status, and critical is checked first.
pub fn classify(remaining: u32, warning: u32, critical: u32) -> TimerStatus {
    if remaining <= critical {
        TimerStatus::Critical
    } else if remaining <= warning {
        TimerStatus::Warning
    } else {
        TimerStatus::Normal
    }
}
