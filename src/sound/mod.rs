//! Tone playback for timer alerts.
//!
//! This module provides:
//!
//! - The [`ToneSink`] trait the alert coordinator plays through
//! - [`RodioTonePlayer`], a synthesized beep on the default output device
//! - [`SilentTonePlayer`] for sessions without an audio device
//! - [`MockTonePlayer`] for tests
//!
//! Playback is fire-and-forget. Failures are logged by the caller and
//! otherwise ignored.

mod error;
mod player;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::{try_create_player, RodioTonePlayer};

/// A synthesized beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u64,
    /// Linear gain applied to the sine wave (1.0 = full scale)
    pub volume: f32,
}

impl Tone {
    /// Short high beep for the critical threshold.
    #[must_use]
    pub const fn critical() -> Self {
        Self {
            frequency_hz: 880.0,
            duration_ms: 300,
            volume: 0.25,
        }
    }

    /// Longer, lower tone for the end of the exam.
    #[must_use]
    pub const fn finished() -> Self {
        Self {
            frequency_hz: 660.0,
            duration_ms: 900,
            volume: 0.3,
        }
    }
}

/// Destination for alert tones.
///
/// Muting is decided by the caller; a sink plays whatever it is given.
pub trait ToneSink {
    /// Plays a tone without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, tone: &Tone) -> Result<(), SoundError>;
}

impl ToneSink for RodioTonePlayer {
    fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        RodioTonePlayer::play(self, tone)
    }
}

impl<T: ToneSink + ?Sized> ToneSink for Arc<T> {
    fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        (**self).play(tone)
    }
}

impl<T: ToneSink + ?Sized> ToneSink for Box<T> {
    fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        (**self).play(tone)
    }
}

/// Tone sink used when no audio device could be opened.
#[derive(Debug, Default)]
pub struct SilentTonePlayer;

impl ToneSink for SilentTonePlayer {
    fn play(&self, _tone: &Tone) -> Result<(), SoundError> {
        Err(SoundError::DeviceNotAvailable("no audio output".to_string()))
    }
}

/// Mock tone player for testing.
#[derive(Debug, Default)]
pub struct MockTonePlayer {
    play_calls: Mutex<Vec<Tone>>,
    should_fail: AtomicBool,
}

impl MockTonePlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<Tone> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl ToneSink for MockTonePlayer {
    fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(*tone);
        Ok(())
    }
}
