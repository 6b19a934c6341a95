//! Adapter contract shared by the real backend and test doubles.

use std::io;
use std::time::Duration;

use crate::error::{DecodeError, SeekError};
use crate::library::Track;

/// Output sample rate every stream is decoded at.
pub const SAMPLE_RATE: u64 = 48_000;
/// Bytes per decoded frame: 16-bit samples, two channels.
pub const BYTES_PER_SAMPLE: u64 = 4;

/// Opens tracks as playable voices.
pub trait AudioBackend {
    type Voice: Voice;

    /// Open `track`'s byte stream and prepare a voice for it. The voice is
    /// returned paused; the controller starts it.
    fn open(&mut self, track: &Track) -> Result<Self::Voice, DecodeError>;
}

/// One open, decodable stream bound to an output voice.
///
/// All calls must return promptly; they run on the UI thread.
pub trait Voice {
    fn play(&mut self);
    fn pause(&mut self);

    /// Reset the decoder's read cursor to the start. Only valid while
    /// playing; the voice must be closed afterwards.
    fn rewind(&mut self) -> Result<(), SeekError>;

    fn seek(&mut self, position: Duration) -> Result<(), SeekError>;

    /// `fraction` is in `[0.0, 1.0]`.
    fn set_volume(&mut self, fraction: f32);

    /// Current playback position.
    fn current(&self) -> Duration;

    /// Decoded stream length in bytes at [`SAMPLE_RATE`] and
    /// [`BYTES_PER_SAMPLE`].
    fn length(&self) -> u64;

    /// Move the underlying byte source back to offset zero without touching
    /// the decoder or the output voice.
    fn reset_source(&mut self) -> io::Result<()>;

    /// Release the voice. Calling it twice is harmless.
    fn close(&mut self);
}

/// Convert a duration to the adapter's byte length unit.
pub fn duration_to_length(d: Duration) -> u64 {
    let bytes = d.as_nanos() * u128::from(SAMPLE_RATE * BYTES_PER_SAMPLE) / 1_000_000_000;
    u64::try_from(bytes).unwrap_or(u64::MAX)
}

/// Inverse of [`duration_to_length`], truncating towards zero.
pub fn length_to_duration(length: u64) -> Duration {
    let nanos = u128::from(length) * 1_000_000_000 / u128::from(BYTES_PER_SAMPLE) / u128::from(SAMPLE_RATE);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
