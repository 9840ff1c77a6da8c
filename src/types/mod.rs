//! Core data types for the exam timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and threshold-derived status
//! - Timer configuration with validation
//! - Read-only timer snapshots
//! - Violation records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// TimerPhase
// ============================================================================

/// Coarse run state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Configured but not yet started (or reset)
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Countdown suspended, remaining time preserved
    Paused,
    /// Countdown reached zero
    Finished,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Finished => "finished",
        }
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }

    /// Returns true while an exam is in progress (started and not yet finished).
    pub fn is_in_progress(&self) -> bool {
        matches!(self, TimerPhase::Running | TimerPhase::Paused)
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Severity classification derived purely from the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Normal,
    Warning,
    Critical,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Normal => "normal",
            TimerStatus::Warning => "warning",
            TimerStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Errors raised at the configuration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Total duration must be positive.
    #[error("duration must be greater than zero")]
    ZeroDuration,

    /// Critical threshold must be positive (minute-level configuration only).
    #[error("critical threshold must be greater than zero")]
    ZeroCritical,

    /// Warning threshold must be strictly below the total duration.
    #[error("warning threshold ({warning}) must be less than the duration ({total})")]
    WarningNotBelowTotal { warning: u32, total: u32 },

    /// Critical threshold must be strictly below the warning threshold.
    #[error("critical threshold ({critical}) must be less than the warning threshold ({warning})")]
    CriticalNotBelowWarning { critical: u32, warning: u32 },

    /// Minute values too large to express in seconds.
    #[error("duration of {0} minutes is too large")]
    Overflow(u32),
}

/// Validated timer configuration, in seconds.
///
/// Invariant: `0 <= critical < warning < total`. Values can only be built
/// through [`TimerConfig::new`] or [`TimerConfig::from_minutes`], so every
/// instance the engine sees has already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimerConfig", rename_all = "camelCase")]
pub struct TimerConfig {
    total_seconds: u32,
    warning_seconds: u32,
    critical_seconds: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimerConfig {
    total_seconds: u32,
    warning_seconds: u32,
    critical_seconds: u32,
}

impl TryFrom<RawTimerConfig> for TimerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTimerConfig) -> Result<Self, Self::Error> {
        Self::new(raw.total_seconds, raw.warning_seconds, raw.critical_seconds)
    }
}

impl Default for TimerConfig {
    /// 60 minute exam, warning at 10 minutes, critical at 5 minutes.
    fn default() -> Self {
        Self {
            total_seconds: 60 * 60,
            warning_seconds: 10 * 60,
            critical_seconds: 5 * 60,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration from second values.
    ///
    /// # Errors
    ///
    /// Returns an error unless `critical < warning < total`.
    pub fn new(total: u32, warning: u32, critical: u32) -> Result<Self, ConfigError> {
        if total == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if warning >= total {
            return Err(ConfigError::WarningNotBelowTotal { warning, total });
        }
        if critical >= warning {
            return Err(ConfigError::CriticalNotBelowWarning { critical, warning });
        }
        Ok(Self {
            total_seconds: total,
            warning_seconds: warning,
            critical_seconds: critical,
        })
    }

    /// Creates a configuration from the minute values a user enters.
    ///
    /// The user-facing surface is stricter than the engine invariant: all
    /// three values must be positive (`0 < critical < warning < duration`).
    ///
    /// # Errors
    ///
    /// Returns an error if any ordering constraint is violated.
    pub fn from_minutes(duration: u32, warning: u32, critical: u32) -> Result<Self, ConfigError> {
        if duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if critical == 0 {
            return Err(ConfigError::ZeroCritical);
        }
        if warning >= duration {
            return Err(ConfigError::WarningNotBelowTotal {
                warning,
                total: duration,
            });
        }
        if critical >= warning {
            return Err(ConfigError::CriticalNotBelowWarning { critical, warning });
        }
        let to_secs = |m: u32| m.checked_mul(60).ok_or(ConfigError::Overflow(m));
        Self::new(to_secs(duration)?, to_secs(warning)?, to_secs(critical)?)
    }

    /// Total exam duration in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Remaining time at which the warning status begins.
    pub fn warning_seconds(&self) -> u32 {
        self.warning_seconds
    }

    /// Remaining time at which the critical status begins.
    pub fn critical_seconds(&self) -> u32 {
        self.critical_seconds
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub status: TimerStatus,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    pub config: TimerConfig,
}

// ============================================================================
// Violations
// ============================================================================

/// Kinds of proctoring violation an invigilator can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationType {
    MultipleFaces,
    TabSwitch,
    ProhibitedApp,
}

impl ViolationType {
    /// Every known violation type, in display order.
    pub const ALL: [ViolationType; 3] = [
        ViolationType::MultipleFaces,
        ViolationType::TabSwitch,
        ViolationType::ProhibitedApp,
    ];

    /// Returns the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::MultipleFaces => "multipleFaces",
            ViolationType::TabSwitch => "tabSwitch",
            ViolationType::ProhibitedApp => "prohibitedApp",
        }
    }

    /// Human-readable label shown in logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ViolationType::MultipleFaces => "Multiple faces detected",
            ViolationType::TabSwitch => "Tab switch detected",
            ViolationType::ProhibitedApp => "Prohibited application detected",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recorded violation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ViolationType,
    pub timestamp: DateTime<Utc>,
    pub label: String,
}

impl Violation {
    /// Creates a violation captured now.
    pub fn new(kind: ViolationType) -> Self {
        Self::at(kind, Utc::now())
    }

    /// Creates a violation with an explicit capture time.
    pub fn at(kind: ViolationType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            timestamp,
            label: kind.label().to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
