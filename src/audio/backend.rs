use std::io;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::error::{DecodeError, SeekError, StartupError};
use crate::library::Track;

use super::sink::{SharedSource, decode};
use super::types::{AudioBackend, Voice, duration_to_length};

/// Real audio output: one `rodio` stream, one `Sink` per open voice.
pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self, StartupError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| StartupError::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped; that would land on
        // top of the restored terminal.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AudioBackend for RodioBackend {
    type Voice = RodioVoice;

    fn open(&mut self, track: &Track) -> Result<RodioVoice, DecodeError> {
        let (source, byte_len) = SharedSource::open(track)?;
        let decoder = decode(track, source.clone(), byte_len)?;

        let total = decoder
            .total_duration()
            .or(track.duration)
            .unwrap_or(Duration::ZERO);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(decoder);

        debug!(path = %track.path.display(), ?total, "voice opened");
        Ok(RodioVoice {
            sink: Some(sink),
            source,
            total,
        })
    }
}

pub struct RodioVoice {
    sink: Option<Sink>,
    source: SharedSource,
    total: Duration,
}

impl Voice for RodioVoice {
    fn play(&mut self) {
        if let Some(s) = &self.sink {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    fn rewind(&mut self) -> Result<(), SeekError> {
        self.seek(Duration::ZERO)
    }

    fn seek(&mut self, position: Duration) -> Result<(), SeekError> {
        let Some(s) = &self.sink else {
            return Err(SeekError::new("voice is closed"));
        };
        s.try_seek(position)
            .map_err(|e| SeekError::new(e.to_string()))
    }

    fn set_volume(&mut self, fraction: f32) {
        if let Some(s) = &self.sink {
            s.set_volume(fraction.clamp(0.0, 1.0));
        }
    }

    fn current(&self) -> Duration {
        match &self.sink {
            // A drained sink has played everything.
            Some(s) if s.empty() => self.total,
            Some(s) => s.get_pos(),
            None => Duration::ZERO,
        }
    }

    fn length(&self) -> u64 {
        duration_to_length(self.total)
    }

    fn reset_source(&mut self) -> io::Result<()> {
        self.source.rewind()
    }

    fn close(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }
}

impl Drop for RodioVoice {
    fn drop(&mut self) {
        self.close();
    }
}
