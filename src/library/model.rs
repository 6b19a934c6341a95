use std::path::PathBuf;
use std::time::Duration;

use lofty::file::FileType;

use super::display::describe;

/// Container/codec family of a track, decided from its metadata at scan time.
///
/// The decode adapter picks its decoder variant from this tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatTag {
    Ogg,
    Mp3,
    Wav,
    Flac,
}

impl FormatTag {
    pub fn from_file_type(file_type: FileType) -> Self {
        match file_type {
            FileType::Mpeg => Self::Mp3,
            FileType::Vorbis | FileType::Opus | FileType::Speex => Self::Ogg,
            FileType::Flac => Self::Flac,
            _ => Self::Wav,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub format: FormatTag,
    /// Duration reported by the tag reader, if any.
    pub duration: Option<Duration>,
}

impl Track {
    /// Second list line: `album⋅artist`.
    pub fn description(&self) -> String {
        describe(self.album.as_deref(), self.artist.as_deref())
    }
}
