//! Threshold alerts.
//!
//! The coordinator watches every tick the engine produces and fires a
//! one-shot side effect when the remaining time crosses downward through the
//! warning threshold, the critical threshold, or zero.
//!
//! A crossing is `previous > threshold && current <= threshold`. Testing the
//! pair rather than equality means a skipped sample still fires. Each kind is
//! recorded in the per-run [`AlertRecord`] and cannot fire again until the
//! record is cleared by a reset.

pub mod message;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::notification::NotificationSink;
use crate::sound::{Tone, ToneSink};
use crate::timer::TimerUpdate;
use crate::types::TimerConfig;

pub use message::{content_for, format_span};

// ============================================================================
// AlertKind
// ============================================================================

/// Thresholds that produce an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Critical,
    Finished,
}

impl AlertKind {
    /// Tone played alongside the notification, if any.
    pub fn tone(&self) -> Option<Tone> {
        match self {
            AlertKind::Warning => None,
            AlertKind::Critical => Some(Tone::critical()),
            AlertKind::Finished => Some(Tone::finished()),
        }
    }
}

/// Returns every threshold crossed by a single update, ignoring history.
pub fn crossings(update: &TimerUpdate, config: &TimerConfig) -> Vec<AlertKind> {
    let crossed = |threshold: u32| update.previous > threshold && update.current <= threshold;

    let mut kinds = Vec::new();
    if crossed(config.warning_seconds()) {
        kinds.push(AlertKind::Warning);
    }
    if crossed(config.critical_seconds()) {
        kinds.push(AlertKind::Critical);
    }
    if update.previous > 0 && update.current == 0 {
        kinds.push(AlertKind::Finished);
    }
    kinds
}

// ============================================================================
// AlertRecord
// ============================================================================

/// Alerts already fired in the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertRecord {
    fired: BTreeSet<AlertKind>,
}

impl AlertRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the crossings in `update` that have not fired yet, and marks
    /// them as fired.
    pub fn observe(&mut self, update: &TimerUpdate, config: &TimerConfig) -> Vec<AlertKind> {
        crossings(update, config)
            .into_iter()
            .filter(|kind| self.fired.insert(*kind))
            .collect()
    }

    pub fn contains(&self, kind: AlertKind) -> bool {
        self.fired.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }

    pub fn clear(&mut self) {
        self.fired.clear();
    }

    /// Fired kinds in threshold order.
    pub fn fired(&self) -> impl Iterator<Item = AlertKind> + '_ {
        self.fired.iter().copied()
    }
}

// ============================================================================
// AlertCoordinator
// ============================================================================

/// Turns threshold crossings into notifications and tones.
pub struct AlertCoordinator {
    record: AlertRecord,
    notifier: Box<dyn NotificationSink>,
    tone: Box<dyn ToneSink>,
    sound_enabled: bool,
}

impl AlertCoordinator {
    /// Creates a coordinator with sound enabled and an empty record.
    pub fn new(notifier: Box<dyn NotificationSink>, tone: Box<dyn ToneSink>) -> Self {
        Self {
            record: AlertRecord::new(),
            notifier,
            tone,
            sound_enabled: true,
        }
    }

    /// Observes one engine update and delivers any newly crossed alerts.
    ///
    /// Returns the kinds that fired.
    pub fn observe(&mut self, update: &TimerUpdate, config: &TimerConfig) -> Vec<AlertKind> {
        let fired = self.record.observe(update, config);
        for kind in &fired {
            self.dispatch(*kind, config);
        }
        fired
    }

    /// Delivers the notification and tone for one alert. Failures are logged
    /// and dropped.
    fn dispatch(&self, kind: AlertKind, config: &TimerConfig) {
        let content = content_for(kind, config);
        info!(alert = ?kind, title = %content.title, "alert fired");

        match self.notifier.show(&content) {
            Ok(()) => {}
            Err(e) if e.is_permission_error() => {
                debug!(alert = ?kind, "notification not delivered: {}", e);
            }
            Err(e) => warn!(alert = ?kind, "notification failed: {} ({})", e, e.suggestion()),
        }

        if let Some(tone) = kind.tone() {
            if !self.sound_enabled {
                debug!(alert = ?kind, "sound muted, tone skipped");
            } else if let Err(e) = self.tone.play(&tone) {
                if e.is_device_error() {
                    debug!(alert = ?kind, "no audio device, tone skipped: {}", e);
                } else {
                    warn!(alert = ?kind, "tone playback failed: {} ({})", e, e.suggestion());
                }
            }
        }
    }

    /// Forgets every fired alert. Called on reset.
    pub fn clear(&mut self) {
        self.record.clear();
    }

    pub fn record(&self) -> &AlertRecord {
        &self.record
    }

    pub fn notifier(&self) -> &dyn NotificationSink {
        self.notifier.as_ref()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }
}

impl std::fmt::Debug for AlertCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertCoordinator")
            .field("record", &self.record)
            .field("sound_enabled", &self.sound_enabled)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notification::MockNotificationSender;
    use crate::sound::MockTonePlayer;
    use crate::types::{TimerPhase, TimerStatus};

    fn update(previous: u32, current: u32) -> TimerUpdate {
        TimerUpdate {
            previous,
            current,
            phase: if current == 0 {
                TimerPhase::Finished
            } else {
                TimerPhase::Running
            },
            status: TimerStatus::Normal,
        }
    }

    fn config() -> TimerConfig {
        TimerConfig::new(60, 30, 10).unwrap()
    }

    fn coordinator() -> (
        AlertCoordinator,
        Arc<MockNotificationSender>,
        Arc<MockTonePlayer>,
    ) {
        let notifier = Arc::new(MockNotificationSender::new());
        let tone = Arc::new(MockTonePlayer::new());
        let coordinator =
            AlertCoordinator::new(Box::new(Arc::clone(&notifier)), Box::new(Arc::clone(&tone)));
        (coordinator, notifier, tone)
    }

    mod crossing_tests {
        use super::*;

        #[test]
        fn test_no_crossing_above_thresholds() {
            assert!(crossings(&update(45, 44), &config()).is_empty());
        }

        #[test]
        fn test_exact_landing_on_threshold() {
            assert_eq!(crossings(&update(31, 30), &config()), vec![AlertKind::Warning]);
            assert_eq!(crossings(&update(11, 10), &config()), vec![AlertKind::Critical]);
            assert_eq!(crossings(&update(1, 0), &config()), vec![AlertKind::Finished]);
        }

        #[test]
        fn test_skipped_sample_still_crosses() {
            assert_eq!(crossings(&update(33, 28), &config()), vec![AlertKind::Warning]);
        }

        #[test]
        fn test_already_below_is_not_a_crossing() {
            assert!(crossings(&update(30, 29), &config()).is_empty());
            assert!(crossings(&update(10, 9), &config()).is_empty());
        }

        #[test]
        fn test_all_three_in_one_update() {
            assert_eq!(
                crossings(&update(40, 0), &config()),
                vec![AlertKind::Warning, AlertKind::Critical, AlertKind::Finished]
            );
        }

        #[test]
        fn test_zero_critical_coincides_with_finish() {
            let config = TimerConfig::new(60, 30, 0).unwrap();
            assert_eq!(
                crossings(&update(1, 0), &config),
                vec![AlertKind::Critical, AlertKind::Finished]
            );
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_fires_once_per_run() {
            let mut record = AlertRecord::new();
            let crossing = update(31, 30);

            assert_eq!(record.observe(&crossing, &config()), vec![AlertKind::Warning]);
            assert!(record.observe(&crossing, &config()).is_empty());
            assert!(record.observe(&update(32, 29), &config()).is_empty());
            assert!(record.contains(AlertKind::Warning));
        }

        #[test]
        fn test_clear_rearms() {
            let mut record = AlertRecord::new();
            record.observe(&update(11, 10), &config());
            record.clear();

            assert!(record.is_empty());
            assert_eq!(record.observe(&update(11, 10), &config()), vec![AlertKind::Critical]);
        }

        #[test]
        fn test_fired_order() {
            let mut record = AlertRecord::new();
            record.observe(&update(1, 0), &config());
            record.observe(&update(31, 30), &config());
            let fired: Vec<_> = record.fired().collect();
            assert_eq!(fired, vec![AlertKind::Warning, AlertKind::Finished]);
        }
    }

    mod coordinator_tests {
        use super::*;

        #[test]
        fn test_warning_has_no_tone() {
            let (mut coordinator, notifier, tone) = coordinator();

            let fired = coordinator.observe(&update(31, 30), &config());

            assert_eq!(fired, vec![AlertKind::Warning]);
            assert_eq!(notifier.titles(), vec!["Time running low"]);
            assert_eq!(tone.play_count(), 0);
        }

        #[test]
        fn test_critical_and_finished_play_tones() {
            let (mut coordinator, notifier, tone) = coordinator();

            coordinator.observe(&update(11, 10), &config());
            coordinator.observe(&update(1, 0), &config());

            assert_eq!(notifier.titles(), vec!["Final countdown", "Time's up!"]);
            assert_eq!(
                tone.get_play_calls(),
                vec![Tone::critical(), Tone::finished()]
            );
        }

        #[test]
        fn test_duplicate_delivery_fires_once() {
            let (mut coordinator, notifier, tone) = coordinator();

            for _ in 0..3 {
                coordinator.observe(&update(11, 10), &config());
            }

            assert_eq!(notifier.notification_count(), 1);
            assert_eq!(tone.play_count(), 1);
        }

        #[test]
        fn test_muted_skips_tone_only() {
            let (mut coordinator, notifier, tone) = coordinator();
            coordinator.set_sound_enabled(false);

            coordinator.observe(&update(11, 10), &config());

            assert_eq!(notifier.notification_count(), 1);
            assert_eq!(tone.play_count(), 0);
        }

        #[test]
        fn test_unmute_restores_tone() {
            let (mut coordinator, _notifier, tone) = coordinator();
            coordinator.set_sound_enabled(false);
            coordinator.observe(&update(11, 10), &config());
            assert_eq!(tone.play_count(), 0);

            coordinator.set_sound_enabled(true);
            coordinator.observe(&update(1, 0), &config());
            assert_eq!(tone.get_play_calls(), vec![Tone::finished()]);
        }

        #[test]
        fn test_sink_failures_are_absorbed() {
            let (mut coordinator, notifier, tone) = coordinator();
            notifier.set_should_fail(true);
            tone.set_should_fail(true);

            let fired = coordinator.observe(&update(11, 10), &config());

            assert_eq!(fired, vec![AlertKind::Critical]);
            assert!(coordinator.record().contains(AlertKind::Critical));
            assert!(coordinator.observe(&update(11, 10), &config()).is_empty());
        }

        #[test]
        fn test_clear_allows_refire() {
            let (mut coordinator, notifier, _tone) = coordinator();
            coordinator.observe(&update(31, 30), &config());
            coordinator.clear();
            coordinator.observe(&update(31, 30), &config());

            assert_eq!(notifier.notification_count(), 2);
        }
    }
}
