use std::time::Duration;

use tracing::debug;

use crate::audio::{AudioBackend, Voice, length_to_duration};
use crate::error::{DecodeError, SeekError};
use crate::library::Track;

/// Upper bound of the volume scale.
pub const MAX_VOLUME: u8 = 128;

/// Shortest total duration a track can report, so progress never divides by
/// zero.
pub const MIN_TOTAL: Duration = Duration::from_nanos(1);

/// Playing/paused indicator shown next to the progress bar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
}

impl Status {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Playing => "▶",
            Self::Paused => "⏸",
        }
    }
}

/// Snapshot handed to the renderer on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// `"elapsed / total"`, whole seconds.
    pub label: String,
    /// `position / total`, in `[0.0, 1.0]`.
    pub fraction: f64,
}

/// State of the one open track.
pub struct PlaybackState<V> {
    voice: V,
    index: usize,
    position: Duration,
    total: Duration,
    volume: u8,
    playing: bool,
}

#[cfg(test)]
impl<V> PlaybackState<V> {
    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Format a `Duration` as `MM:SS`, dropping sub-second precision.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Single source of truth for what is playing and where.
pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    state: Option<PlaybackState<B::Voice>>,
    /// Volume of the most recently open track, carried into the next open.
    last_volume: u8,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B, initial_volume: u8) -> Self {
        Self {
            backend,
            state: None,
            last_volume: initial_volume.min(MAX_VOLUME),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<&PlaybackState<B::Voice>> {
        self.state.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.index)
    }

    /// Volume of the open track, or the carry-over value when none is open.
    pub fn volume(&self) -> u8 {
        self.state.as_ref().map_or(self.last_volume, |s| s.volume)
    }

    pub fn status(&self) -> Option<Status> {
        self.state.as_ref().map(|s| {
            if s.playing {
                Status::Playing
            } else {
                Status::Paused
            }
        })
    }

    /// Open `track` (at list position `index`) and start playing it at
    /// `volume`. Any previously open track is closed first, so a failure
    /// leaves nothing open.
    pub fn open(&mut self, index: usize, track: &Track, volume: u8) -> Result<(), DecodeError> {
        self.close();

        let mut voice = self.backend.open(track)?;
        let total = length_to_duration(voice.length()).max(MIN_TOTAL);
        let volume = volume.min(MAX_VOLUME);

        voice.set_volume(f32::from(volume) / f32::from(MAX_VOLUME));
        voice.play();

        debug!(index, ?total, volume, "track opened");
        self.last_volume = volume;
        self.state = Some(PlaybackState {
            voice,
            index,
            position: Duration::ZERO,
            total,
            volume,
            playing: true,
        });
        Ok(())
    }

    /// Release the open voice, if any.
    pub fn close(&mut self) {
        if let Some(mut s) = self.state.take() {
            debug!(index = s.index, "track closed");
            self.last_volume = s.volume;
            s.voice.close();
        }
    }

    /// Pause (snapshotting the position) or resume. Returns the new status,
    /// or `None` when nothing is open.
    pub fn toggle_pause(&mut self) -> Option<Status> {
        let s = self.state.as_mut()?;
        if s.playing {
            s.voice.pause();
            s.position = s.voice.current().min(s.total);
            s.playing = false;
            Some(Status::Paused)
        } else {
            s.voice.play();
            s.playing = true;
            Some(Status::Playing)
        }
    }

    /// Return the open track to its start before another track is opened.
    ///
    /// The adapter can only rewind a stream that is playing, and the voice
    /// is unusable afterwards, so a playing track is rewound and closed.
    /// A paused stream cannot be rewound by the adapter at all; instead its
    /// byte source is moved back to offset zero and the voice stays open for
    /// a later resume.
    ///
    /// A playing track is closed even when the adapter refuses the rewind.
    pub fn rewind(&mut self) -> Result<(), SeekError> {
        let Some(s) = self.state.as_mut() else {
            return Ok(());
        };

        if s.playing {
            let rewound = s.voice.rewind();
            self.close();
            rewound
        } else {
            s.voice
                .reset_source()
                .map_err(|e| SeekError::new(format!("cannot reset paused source: {e}")))
        }
    }

    /// Add `delta` to the volume, clamped to `[0, MAX_VOLUME]`.
    pub fn adjust_volume(&mut self, delta: i32) {
        let Some(s) = self.state.as_mut() else {
            return;
        };
        let v = i32::from(s.volume)
            .saturating_add(delta)
            .clamp(0, i32::from(MAX_VOLUME));
        s.volume = v as u8;
        s.voice.set_volume(f32::from(s.volume) / f32::from(MAX_VOLUME));
        self.last_volume = s.volume;
    }

    /// Move the position by `delta_secs`, clamped to the track.
    pub fn adjust_seek(&mut self, delta_secs: i64) -> Result<(), SeekError> {
        let Some(s) = self.state.as_mut() else {
            return Ok(());
        };
        let from = if s.playing {
            s.voice.current().min(s.total)
        } else {
            s.position
        };
        let step = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs >= 0 {
            from.saturating_add(step).min(s.total)
        } else {
            from.saturating_sub(step)
        };
        Self::seek_state(s, target)
    }

    /// Absolute seek to `fraction` of the track.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<(), SeekError> {
        let Some(s) = self.state.as_mut() else {
            return Ok(());
        };
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = s.total.mul_f64(f).min(s.total);
        Self::seek_state(s, target)
    }

    fn seek_state(s: &mut PlaybackState<B::Voice>, target: Duration) -> Result<(), SeekError> {
        s.voice.seek(target)?;
        s.position = target;
        Ok(())
    }

    /// Refresh the position from the adapter (while playing) and report
    /// progress. `None` when nothing is open.
    pub fn poll_progress(&mut self) -> Option<Progress> {
        let s = self.state.as_mut()?;
        if s.playing {
            s.position = s.voice.current().min(s.total);
        }

        let fraction = (s.position.as_nanos() as f64 / s.total.as_nanos() as f64).min(1.0);
        Some(Progress {
            label: format!("{} / {}", format_mmss(s.position), format_mmss(s.total)),
            fraction,
        })
    }
}

impl<B: AudioBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.close();
    }
}
