//! Timer engine for the exam countdown.
//!
//! This module provides the core timer functionality:
//! - Phase transitions (Idle → Running ⇄ Paused → Finished, reset from anywhere)
//! - Countdown driven by the owned [`Clock`]
//! - Threshold status derived on demand from the remaining time
//! - Configuration locked once a run has started
//!
//! Every operation is total. Transitions that are not valid from the current
//! phase are absorbed as no-ops; callers that need feedback inspect the
//! returned flag or the resulting phase.

use tracing::debug;

use super::classifier::classify;
use super::clock::Clock;
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot, TimerStatus};

// ============================================================================
// TimerUpdate
// ============================================================================

/// The observable effect of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerUpdate {
    /// Remaining seconds before the tick
    pub previous: u32,
    /// Remaining seconds after the tick
    pub current: u32,
    /// Phase after the tick
    pub phase: TimerPhase,
    /// Status after the tick
    pub status: TimerStatus,
}

impl TimerUpdate {
    /// Returns true if this tick moved the status to a different severity.
    pub fn status_changed(&self, config: &TimerConfig) -> bool {
        let before = classify(
            self.previous,
            config.warning_seconds(),
            config.critical_seconds(),
        );
        before != self.status
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the countdown state and its transition rules.
#[derive(Debug)]
pub struct TimerEngine {
    config: TimerConfig,
    remaining_seconds: u32,
    phase: TimerPhase,
    clock: Clock,
}

impl TimerEngine {
    /// Creates an idle engine with the full duration remaining.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            remaining_seconds: config.total_seconds(),
            phase: TimerPhase::Idle,
            clock: Clock::new(),
        }
    }

    /// Starts or resumes the countdown.
    ///
    /// Valid from Idle and Paused. Returns false (state unchanged) when
    /// already running or finished.
    pub fn start(&mut self) -> bool {
        match self.phase {
            TimerPhase::Idle | TimerPhase::Paused => {
                self.clock.arm();
                self.phase = TimerPhase::Running;
                debug!(remaining = self.remaining_seconds, "timer running");
                true
            }
            TimerPhase::Running | TimerPhase::Finished => false,
        }
    }

    /// Pauses a running countdown. No-op from any other phase.
    pub fn pause(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.clock.disarm();
        self.phase = TimerPhase::Paused;
        debug!(remaining = self.remaining_seconds, "timer paused");
        true
    }

    /// Pauses if running, otherwise starts. No-op once finished.
    pub fn toggle(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Returns to Idle with the full duration remaining, from any phase.
    pub fn reset(&mut self) {
        self.clock.disarm();
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = self.config.total_seconds();
        debug!(remaining = self.remaining_seconds, "timer reset");
    }

    /// Applies one tick of the clock.
    ///
    /// Returns `None` when the timer is not running; such a tick is dropped.
    /// Reaching zero disarms the clock and finishes the run in the same step.
    pub fn on_tick(&mut self) -> Option<TimerUpdate> {
        if self.phase != TimerPhase::Running {
            return None;
        }

        let previous = self.remaining_seconds;
        self.remaining_seconds = previous.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.clock.disarm();
            self.phase = TimerPhase::Finished;
            debug!("timer finished");
        }

        Some(TimerUpdate {
            previous,
            current: self.remaining_seconds,
            phase: self.phase,
            status: self.status(),
        })
    }

    /// Replaces the configuration. Only permitted while Idle.
    ///
    /// The configuration must already be validated; the engine does not
    /// re-check it.
    pub fn configure(&mut self, config: TimerConfig) -> bool {
        if self.phase != TimerPhase::Idle {
            debug!(phase = %self.phase, "configuration locked, change ignored");
            return false;
        }
        self.config = config;
        self.remaining_seconds = config.total_seconds();
        true
    }

    /// Cancels the clock without touching the countdown. Called when the
    /// owner goes away so no tick outlives its observer.
    pub fn teardown(&mut self) {
        self.clock.disarm();
    }

    /// Waits for the next clock tick. Never resolves unless running.
    pub async fn next_tick(&mut self) {
        self.clock.tick().await;
    }

    /// Current configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Remaining seconds in this run.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Seconds elapsed in this run.
    pub fn elapsed_seconds(&self) -> u32 {
        self.config.total_seconds() - self.remaining_seconds
    }

    /// Threshold status for the current remaining time.
    pub fn status(&self) -> TimerStatus {
        classify(
            self.remaining_seconds,
            self.config.warning_seconds(),
            self.config.critical_seconds(),
        )
    }

    /// Returns true if the clock is currently armed.
    pub fn is_ticking(&self) -> bool {
        self.clock.is_armed()
    }

    /// Returns a copy of the observable state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            status: self.status(),
            remaining_seconds: self.remaining_seconds,
            elapsed_seconds: self.elapsed_seconds(),
            config: self.config,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
