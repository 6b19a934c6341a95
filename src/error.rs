//! Error types shared by the playback core and the startup path.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Opening a track failed. Never fatal: the caller reports it and either
/// skips forward (automatic advance) or stops (manual selection).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("no track at position {0}")]
    NoSuchTrack(usize),
}

/// The adapter refused a seek or rewind.
#[derive(Debug, Error)]
#[error("seek failed: {reason}")]
pub struct SeekError {
    pub reason: String,
}

impl SeekError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Every track in the list failed to open during one automatic advance pass.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no playable track found after {attempts} attempts")]
pub struct ExhaustedError {
    pub attempts: usize,
}

/// Fatal problems detected before the event loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot determine the home directory")]
    NoHomeDir,

    #[error("could not find or open music directory {}", .0.display())]
    MissingMusicDir(PathBuf),

    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
}
