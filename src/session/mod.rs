//! Exam session.
//!
//! Binds the timer engine, the alert coordinator and the violation ledger
//! together and applies the policies that sit above them:
//!
//! - Notification permission must be granted before the exam may start
//! - Violations are only accepted while the exam is in progress
//! - Reset clears the timer, the alert record and the ledger together

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::alert::{AlertCoordinator, AlertKind};
use crate::ledger::{ViolationCounts, ViolationLedger};
use crate::notification::{NotificationPermission, NotificationSink};
use crate::sound::ToneSink;
use crate::timer::{TimerEngine, TimerUpdate};
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot, Violation, ViolationType};

// ============================================================================
// SessionError
// ============================================================================

/// Policy rejections raised by the session. The engine itself never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The exam cannot start until notifications are allowed.
    #[error("notification permission is required before the exam can start (current: {0:?})")]
    PermissionRequired(NotificationPermission),

    /// Violations can only be recorded during an exam.
    #[error("no exam in progress; violation not recorded")]
    NotInProgress,
}

// ============================================================================
// TickReport / SessionSummary
// ============================================================================

/// Everything that happened on one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub update: TimerUpdate,
    pub fired: Vec<AlertKind>,
    pub status_changed: bool,
}

/// Number of violations listed as recent when nothing else is configured.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// End-of-session overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub timer: TimerSnapshot,
    pub counts: ViolationCounts,
    pub total_violations: usize,
    /// Full timeline, oldest first.
    pub violations: Vec<Violation>,
    /// Newest first, capped to the session's recent limit.
    pub recent: Vec<Violation>,
    pub alerts_fired: Vec<AlertKind>,
    pub sound_enabled: bool,
}

// ============================================================================
// ExamSession
// ============================================================================

#[derive(Debug)]
pub struct ExamSession {
    engine: TimerEngine,
    alerts: AlertCoordinator,
    ledger: ViolationLedger,
    recent_limit: usize,
}

impl ExamSession {
    /// Creates an idle session.
    pub fn new(
        config: TimerConfig,
        notifier: Box<dyn NotificationSink>,
        tone: Box<dyn ToneSink>,
    ) -> Self {
        Self {
            engine: TimerEngine::new(config),
            alerts: AlertCoordinator::new(notifier, tone),
            ledger: ViolationLedger::new(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Starts or resumes the exam.
    ///
    /// Requests notification permission first if it has not been granted.
    /// Returns `Ok(false)` when the engine absorbed the call (already
    /// running or finished).
    ///
    /// # Errors
    ///
    /// Returns `PermissionRequired` if permission is still not granted.
    pub fn start(&mut self) -> Result<bool, SessionError> {
        if !matches!(self.engine.phase(), TimerPhase::Idle | TimerPhase::Paused) {
            return Ok(false);
        }
        self.ensure_permission()?;
        Ok(self.engine.start())
    }

    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    /// Pauses a running exam, otherwise behaves like [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns `PermissionRequired` when starting without permission.
    pub fn toggle(&mut self) -> Result<bool, SessionError> {
        if self.engine.phase() == TimerPhase::Running {
            Ok(self.engine.pause())
        } else {
            self.start()
        }
    }

    /// Resets the timer, the alert record and the violation ledger.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.alerts.clear();
        self.ledger.clear();
        info!("session reset");
    }

    /// Applies one clock tick and delivers any alerts it triggers.
    pub fn tick(&mut self) -> Option<TickReport> {
        let update = self.engine.on_tick()?;
        let config = *self.engine.config();
        let fired = self.alerts.observe(&update, &config);
        let status_changed = update.status_changed(&config);
        if status_changed {
            debug!(status = %update.status, remaining = update.current, "status changed");
        }
        Some(TickReport {
            update,
            fired,
            status_changed,
        })
    }

    /// Waits for the engine's next clock tick.
    pub async fn next_tick(&mut self) {
        self.engine.next_tick().await;
    }

    /// Records a violation if the exam is running or paused.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` before start, after finish or after reset.
    pub fn add_violation(&mut self, kind: ViolationType) -> Result<Violation, SessionError> {
        if !self.engine.phase().is_in_progress() {
            debug!(kind = kind.as_str(), phase = %self.engine.phase(), "violation rejected");
            return Err(SessionError::NotInProgress);
        }
        Ok(self.ledger.add(kind))
    }

    /// Replaces the configuration while idle. Returns false once locked.
    pub fn configure(&mut self, config: TimerConfig) -> bool {
        self.engine.configure(config)
    }

    pub fn sound_enabled(&self) -> bool {
        self.alerts.sound_enabled()
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.alerts.set_sound_enabled(enabled);
    }

    /// Flips the sound flag and returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.alerts.sound_enabled();
        self.alerts.set_sound_enabled(enabled);
        enabled
    }

    /// Caps the `recent` list of the summary.
    pub fn set_recent_limit(&mut self, limit: usize) {
        self.recent_limit = limit;
    }

    /// Stops the clock before the session is dropped.
    pub fn teardown(&mut self) {
        self.engine.teardown();
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn phase(&self) -> TimerPhase {
        self.engine.phase()
    }

    pub fn config(&self) -> &TimerConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &ViolationLedger {
        &self.ledger
    }

    pub fn alerts(&self) -> &AlertCoordinator {
        &self.alerts
    }

    pub fn summary(&self) -> SessionSummary {
        let counts = self.ledger.count_by_type();
        SessionSummary {
            timer: self.engine.snapshot(),
            total_violations: counts.total(),
            counts,
            violations: self.ledger.timeline(),
            recent: self.ledger.recent(Some(self.recent_limit)),
            alerts_fired: self.alerts.record().fired().collect(),
            sound_enabled: self.alerts.sound_enabled(),
        }
    }

    fn ensure_permission(&self) -> Result<(), SessionError> {
        let notifier = self.alerts.notifier();
        let permission = match notifier.permission() {
            NotificationPermission::Granted => return Ok(()),
            NotificationPermission::Default => notifier.request_permission(),
            other => other,
        };
        if permission.is_granted() {
            Ok(())
        } else {
            Err(SessionError::PermissionRequired(permission))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
