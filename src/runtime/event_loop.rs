use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioBackend;
use crate::config;
use crate::player::{Flow, LoopEvent, Session};
use crate::ui::{self, AppLayout};

use super::keymap::{action_for, pointer_event};

/// Main terminal event loop: delivers due timers, redraws, then waits for
/// input until the next timer is due. Returns `Ok(())` when quit is
/// requested.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let idle = Duration::from_millis(settings.ui.tick_ms);
    let mut layout = AppLayout::default();

    loop {
        // Timers (ticks and debounce fires) in firing order.
        let now = Instant::now();
        while let Some(ev) = session.pop_due(now) {
            if session.handle(ev, now) == Flow::Quit {
                return Ok(());
            }
        }

        terminal.draw(|f| {
            layout = ui::draw(f, session, &settings.ui.header_text, now);
        })?;
        session.set_page_size(layout.list_rows() / 2);

        let timeout = session
            .next_deadline()
            .map_or(idle, |d| d.saturating_duration_since(Instant::now()));
        if !event::poll(timeout)? {
            continue;
        }

        let ev = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                action_for(key, session.filter().is_editing()).map(LoopEvent::Key)
            }
            Event::Mouse(mouse) => pointer_event(mouse, &layout),
            _ => None,
        };

        if let Some(ev) = ev {
            if session.handle(ev, Instant::now()) == Flow::Quit {
                return Ok(());
            }
        }
    }
}
