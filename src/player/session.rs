//! The session object the event loop owns and feeds events into.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::audio::AudioBackend;
use crate::config::Settings;
use crate::library::Track;

use super::controller::{PlaybackController, Progress, Status};
use super::debounce::{AdjustKind, DebounceTimer, InputDebouncer};
use super::filter::TrackFilter;
use super::schedule::{Scheduled, Scheduler};
use super::sequencer::TrackSequencer;

/// User intent decoded from a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Play,
    TogglePause,
    ToggleRepeat,
    VolumeUp,
    VolumeDown,
    SeekForward,
    SeekBackward,
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Start typing a title filter.
    StartFilter,
    FilterPush(char),
    FilterPop,
    /// Drop the filter and show every track again.
    ClearFilter,
    Quit,
}

/// Everything the session reacts to, in arrival order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LoopEvent {
    Tick,
    Key(Action),
    /// Left click inside the progress bar, at this fraction of its width.
    PointerInBar(f64),
    /// Left click anywhere else.
    PointerOutside,
    DebounceFired(DebounceTimer),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    expires_at: Instant,
}

pub struct Session<B: AudioBackend> {
    tracks: Vec<Track>,
    controller: PlaybackController<B>,
    debouncer: InputDebouncer,
    scheduler: Scheduler,

    repeat: bool,
    /// Index into `tracks` of the highlighted row.
    selected: usize,
    page_size: usize,
    filter: TrackFilter,

    progress: Option<Progress>,
    status: Option<StatusMessage>,
    status_ttl: Duration,
    tick: Duration,

    volume_step: i32,
    seek_seconds: i64,
}

impl<B: AudioBackend> Session<B> {
    /// Build a session over `tracks` and arm the first tick at `now + tick`.
    pub fn new(tracks: Vec<Track>, backend: B, settings: &Settings, now: Instant) -> Self {
        let tick = Duration::from_millis(settings.ui.tick_ms);
        let mut scheduler = Scheduler::new();
        scheduler.schedule(now + tick, Scheduled::Tick);

        Self {
            tracks,
            controller: PlaybackController::new(backend, settings.playback.initial_volume),
            debouncer: InputDebouncer::new(Duration::from_millis(settings.controls.debounce_ms)),
            scheduler,

            repeat: settings.playback.repeat,
            selected: 0,
            page_size: 10,
            filter: TrackFilter::default(),

            progress: None,
            status: None,
            status_ttl: Duration::from_millis(settings.ui.status_ttl_ms),
            tick,

            volume_step: i32::try_from(settings.controls.volume_step).unwrap_or(i32::MAX),
            seek_seconds: i64::from(settings.controls.seek_seconds),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn filter(&self) -> &TrackFilter {
        &self.filter
    }

    /// Indices of the tracks the list currently shows.
    pub fn visible(&self) -> Vec<usize> {
        self.filter.visible(&self.tracks)
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Index of the track currently open, for list highlighting.
    pub fn now_playing(&self) -> Option<usize> {
        self.controller.current_index()
    }

    pub fn status(&self) -> Option<Status> {
        self.controller.status()
    }

    pub fn volume(&self) -> u8 {
        self.controller.volume()
    }

    /// Last polled progress, `None` when nothing is open.
    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    /// Transient status message, if it has not expired at `now`.
    pub fn status_message(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| m.expires_at > now)
            .map(|m| m.text.as_str())
    }

    #[cfg(test)]
    pub fn controller(&self) -> &PlaybackController<B> {
        &self.controller
    }

    /// Rows moved by page up/down; follows the rendered list height.
    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Next timer due at `now`, as a loop event.
    pub fn pop_due(&mut self, now: Instant) -> Option<LoopEvent> {
        self.scheduler.pop_due(now).map(|s| match s {
            Scheduled::Tick => LoopEvent::Tick,
            Scheduled::Debounce(t) => LoopEvent::DebounceFired(t),
        })
    }

    /// Close the open track. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.controller.close();
        self.progress = None;
    }

    fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: now + self.status_ttl,
        });
    }

    /// Apply one event to the session.
    pub fn handle(&mut self, event: LoopEvent, now: Instant) -> Flow {
        match event {
            LoopEvent::Tick => self.on_tick(now),
            LoopEvent::Key(action) => return self.on_action(action, now),
            LoopEvent::PointerInBar(fraction) => {
                if self.controller.is_open() {
                    if let Err(e) = self.controller.seek_to_fraction(fraction) {
                        warn!(error = %e, "pointer seek failed");
                        self.notify(format!("Cannot seek: {e}"), now);
                    }
                    self.progress = self.controller.poll_progress();
                }
            }
            LoopEvent::PointerOutside => {
                self.controller.toggle_pause();
            }
            LoopEvent::DebounceFired(timer) => self.on_debounce(timer, now),
        }
        Flow::Continue
    }

    fn on_action(&mut self, action: Action, now: Instant) -> Flow {
        match action {
            Action::Quit => {
                self.shutdown();
                return Flow::Quit;
            }
            Action::Play => self.play_selected(now),
            Action::TogglePause => {
                self.controller.toggle_pause();
            }
            Action::ToggleRepeat => {
                self.repeat = !self.repeat;
                let state = if self.repeat { "on" } else { "off" };
                self.notify(format!("Repeat {state}"), now);
            }
            Action::VolumeUp => self.defer(AdjustKind::Volume, 1, now),
            Action::VolumeDown => self.defer(AdjustKind::Volume, -1, now),
            Action::SeekForward => self.defer(AdjustKind::Seek, 1, now),
            Action::SeekBackward => self.defer(AdjustKind::Seek, -1, now),
            Action::CursorUp => self.move_cursor(-1),
            Action::CursorDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-(self.page_size as isize)),
            Action::PageDown => self.move_cursor(self.page_size as isize),
            Action::Top => self.move_cursor(isize::MIN),
            Action::Bottom => self.move_cursor(isize::MAX),
            Action::StartFilter => {
                self.filter.begin();
                self.keep_selection_visible();
            }
            Action::FilterPush(c) => {
                self.filter.push(c);
                self.keep_selection_visible();
            }
            Action::FilterPop => {
                self.filter.pop();
                self.keep_selection_visible();
            }
            Action::ClearFilter => self.filter.clear(),
        }
        Flow::Continue
    }

    /// Move the highlight `by` rows within the visible list.
    fn move_cursor(&mut self, by: isize) {
        let visible = self.visible();
        let Some(last) = visible.len().checked_sub(1) else {
            return;
        };
        let row = visible
            .iter()
            .position(|&i| i == self.selected)
            .map_or(0, |row| row.saturating_add_signed(by).min(last));
        self.selected = visible[row];
    }

    /// Snap the highlight to the first visible track if the filter hid it.
    /// With nothing visible the selection is left alone, so clearing the
    /// filter restores it.
    fn keep_selection_visible(&mut self) {
        let visible = self.visible();
        if !visible.contains(&self.selected) {
            if let Some(&first) = visible.first() {
                self.selected = first;
            }
        }
    }

    fn play_selected(&mut self, now: Instant) {
        let index = self.selected;
        if !self.visible().contains(&index) {
            return;
        }
        self.filter.commit();

        let rewind_failure = self.controller.rewind().err();
        if let Some(e) = &rewind_failure {
            warn!(error = %e, "rewind before switching tracks failed");
        }

        let volume = self.controller.volume();
        match TrackSequencer::new(&self.tracks).play_selected(&mut self.controller, index, volume) {
            Ok(()) => {
                let title = &self.tracks[index].title;
                let text = match &rewind_failure {
                    Some(e) => format!("Cannot seek: {e} • Current Song: {title}"),
                    None => format!("Current Song: {title}"),
                };
                self.notify(text, now);
            }
            Err(e) => {
                warn!(index, error = %e, "selected track failed to open");
                self.notify(format!("Cannot Play Audio: {e}"), now);
            }
        }
        self.progress = self.controller.poll_progress();
    }

    fn defer(&mut self, kind: AdjustKind, unit: i32, now: Instant) {
        if !self.controller.is_open() {
            return;
        }
        let timer = self.debouncer.push(kind, unit);
        self.scheduler
            .schedule(now + self.debouncer.window(), Scheduled::Debounce(timer));
    }

    fn on_debounce(&mut self, timer: DebounceTimer, now: Instant) {
        let Some(delta) = self.debouncer.fire(timer) else {
            return;
        };
        debug!(kind = ?timer.kind, delta, "applying coalesced adjustment");

        match timer.kind {
            AdjustKind::Volume => self
                .controller
                .adjust_volume(delta.saturating_mul(self.volume_step)),
            AdjustKind::Seek => {
                let secs = i64::from(delta).saturating_mul(self.seek_seconds);
                if let Err(e) = self.controller.adjust_seek(secs) {
                    warn!(error = %e, "seek failed");
                    self.notify(format!("Cannot seek: {e}"), now);
                }
                self.progress = self.controller.poll_progress();
            }
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.scheduler.schedule(now + self.tick, Scheduled::Tick);

        self.progress = self.controller.poll_progress();
        let finished = self.progress.as_ref().is_some_and(|p| p.fraction == 1.0);
        if !finished {
            return;
        }

        let Some(from) = self.controller.current_index() else {
            return;
        };
        let volume = self.controller.volume();
        match TrackSequencer::new(&self.tracks).advance(&mut self.controller, from, self.repeat, volume)
        {
            Ok(index) => {
                let title = self.tracks[index].title.clone();
                self.notify(format!("Current Song: {title}"), now);
            }
            Err(e) => self.notify(format!("Library is unplayable: {e}"), now),
        }
        self.progress = self.controller.poll_progress();
    }
}
