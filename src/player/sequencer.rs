use tracing::{debug, warn};

use crate::audio::AudioBackend;
use crate::error::{DecodeError, ExhaustedError};
use crate::library::Track;

use super::controller::PlaybackController;

/// Picks the next track on completion or manual selection.
pub struct TrackSequencer<'a> {
    tracks: &'a [Track],
}

impl<'a> TrackSequencer<'a> {
    pub fn new(tracks: &'a [Track]) -> Self {
        Self { tracks }
    }

    /// Open the track after `from` (or `from` itself in repeat mode),
    /// skipping tracks that fail to open. At most one full pass over the
    /// list is attempted; if every track fails nothing is left open.
    pub fn advance<B: AudioBackend>(
        &self,
        controller: &mut PlaybackController<B>,
        from: usize,
        repeat: bool,
        volume: u8,
    ) -> Result<usize, ExhaustedError> {
        let count = self.tracks.len();
        let start = if repeat { from } else { from + 1 };

        for attempt in 0..count {
            let index = (start + attempt) % count;
            match controller.open(index, &self.tracks[index], volume) {
                Ok(()) => {
                    debug!(from, index, attempt, "advanced");
                    return Ok(index);
                }
                Err(e) => warn!(index, error = %e, "skipping unplayable track"),
            }
        }

        controller.close();
        warn!(attempts = count, "no playable track in library");
        Err(ExhaustedError { attempts: count })
    }

    /// Open exactly `index`. A failure is returned as-is; nothing else is
    /// tried.
    pub fn play_selected<B: AudioBackend>(
        &self,
        controller: &mut PlaybackController<B>,
        index: usize,
        volume: u8,
    ) -> Result<(), DecodeError> {
        let track = self
            .tracks
            .get(index)
            .ok_or(DecodeError::NoSuchTrack(index))?;
        controller.open(index, track, volume)
    }
}
