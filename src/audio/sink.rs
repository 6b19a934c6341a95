//! Helpers to build a `rodio` decoder over a shared file handle.
//!
//! The file handle is shared between the decoder (which lives on rodio's
//! mixer thread) and the voice, so the voice can reposition it directly.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::sync::{Arc, Mutex, MutexGuard};

use rodio::Decoder;

use crate::error::DecodeError;
use crate::library::{FormatTag, Track};

/// Seekable byte source handed to the decoder.
#[derive(Clone)]
pub(super) struct SharedSource {
    inner: Arc<Mutex<BufReader<File>>>,
}

impl SharedSource {
    pub(super) fn open(track: &Track) -> Result<(Self, u64), DecodeError> {
        let open_err = |source| DecodeError::Open {
            path: track.path.clone(),
            source,
        };
        let file = File::open(&track.path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();
        let source = Self {
            inner: Arc::new(Mutex::new(BufReader::new(file))),
        };
        Ok((source, len))
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, BufReader<File>>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("byte source lock poisoned"))
    }

    /// Reposition the file to offset zero.
    pub(super) fn rewind(&self) -> io::Result<()> {
        self.lock()?.seek(SeekFrom::Start(0)).map(|_| ())
    }
}

impl Read for SharedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.lock()?.read(buf)
    }
}

impl Seek for SharedSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.lock()?.seek(pos)
    }
}

fn format_hint(format: FormatTag) -> &'static str {
    match format {
        FormatTag::Ogg => "ogg",
        FormatTag::Mp3 => "mp3",
        FormatTag::Wav => "wav",
        FormatTag::Flac => "flac",
    }
}

/// Build a decoder for `track`, selecting the decoder by its format tag.
pub(super) fn decode(
    track: &Track,
    source: SharedSource,
    byte_len: u64,
) -> Result<Decoder<SharedSource>, DecodeError> {
    Decoder::builder()
        .with_data(source)
        .with_byte_len(byte_len)
        .with_seekable(true)
        .with_hint(format_hint(track.format))
        .build()
        .map_err(|e| DecodeError::Decode {
            path: track.path.clone(),
            reason: e.to_string(),
        })
}
