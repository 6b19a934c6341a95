//! Recording `AudioBackend` double for the playback core's tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crate::audio::{AudioBackend, Voice, duration_to_length};
use crate::error::{DecodeError, SeekError};
use crate::library::{FormatTag, Track};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(String),
    Play(usize),
    Pause(usize),
    Rewind(usize),
    Seek(usize, Duration),
    SetVolume(usize, f32),
    ResetSource(usize),
    Close(usize),
}

#[derive(Debug, Default)]
pub struct FakeLog {
    pub calls: Vec<Call>,
    /// Position reported by every open voice.
    pub position: Duration,
    /// Titles that fail to open.
    pub broken: HashSet<String>,
    /// Seeks, rewinds and source resets all fail.
    pub fail_seeks: bool,
    pub voices_opened: usize,
}

impl FakeLog {
    pub fn opened_titles(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Open(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub log: Rc<RefCell<FakeLog>>,
}

pub struct FakeVoice {
    id: usize,
    log: Rc<RefCell<FakeLog>>,
    length: u64,
    closed: bool,
}

impl FakeVoice {
    fn record(&self, call: Call) {
        self.log.borrow_mut().calls.push(call);
    }
}

impl AudioBackend for FakeBackend {
    type Voice = FakeVoice;

    fn open(&mut self, track: &Track) -> Result<FakeVoice, DecodeError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Open(track.title.clone()));
        if log.broken.contains(&track.title) {
            return Err(DecodeError::Decode {
                path: track.path.clone(),
                reason: "broken fixture".into(),
            });
        }
        log.voices_opened += 1;
        log.position = Duration::ZERO;
        Ok(FakeVoice {
            id: log.voices_opened,
            log: self.log.clone(),
            length: duration_to_length(track.duration.unwrap_or_default()),
            closed: false,
        })
    }
}

impl Voice for FakeVoice {
    fn play(&mut self) {
        self.record(Call::Play(self.id));
    }

    fn pause(&mut self) {
        self.record(Call::Pause(self.id));
    }

    fn rewind(&mut self) -> Result<(), SeekError> {
        self.record(Call::Rewind(self.id));
        if self.log.borrow().fail_seeks {
            return Err(SeekError::new("fixture refuses rewinds"));
        }
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), SeekError> {
        if self.log.borrow().fail_seeks {
            return Err(SeekError::new("fixture refuses seeks"));
        }
        self.record(Call::Seek(self.id, position));
        self.log.borrow_mut().position = position;
        Ok(())
    }

    fn set_volume(&mut self, fraction: f32) {
        self.record(Call::SetVolume(self.id, fraction));
    }

    fn current(&self) -> Duration {
        self.log.borrow().position
    }

    fn length(&self) -> u64 {
        self.length
    }

    fn reset_source(&mut self) -> io::Result<()> {
        self.record(Call::ResetSource(self.id));
        if self.log.borrow().fail_seeks {
            return Err(io::Error::other("fixture source is stuck"));
        }
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.record(Call::Close(self.id));
        }
    }
}

pub fn track(title: &str, secs: u64) -> Track {
    Track {
        path: format!("/music/{title}.ogg").into(),
        title: title.into(),
        artist: None,
        album: None,
        format: FormatTag::Ogg,
        duration: Some(Duration::from_secs(secs)),
    }
}
