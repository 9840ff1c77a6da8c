//! Tone player implementation using rodio.
//!
//! Tones are synthesized sine beeps, so no audio assets are needed.

use std::time::Duration;

use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::Tone;

/// A tone player backed by the default audio output device.
///
/// Playback is non-blocking; each tone plays on a detached sink.
pub struct RodioTonePlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioTonePlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a tone in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if a sink cannot be created on the output stream.
    pub fn play(&self, tone: &Tone) -> Result<(), SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        let source = SineWave::new(tone.frequency_hz)
            .take_duration(Duration::from_millis(tone.duration_ms))
            .amplify(tone.volume);

        sink.append(source);
        sink.detach();

        debug!(frequency = tone.frequency_hz, "Tone playback started (detached)");
        Ok(())
    }
}

impl std::fmt::Debug for RodioTonePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioTonePlayer").finish_non_exhaustive()
    }
}

/// Creates a tone player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and the session runs
/// without sound.
#[must_use]
pub fn try_create_player() -> Option<RodioTonePlayer> {
    match RodioTonePlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}
