//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};

use crate::audio::AudioBackend;
use crate::player::Session;

const CONTROLS: &str = "[enter] play | [space] pause | [←/→] seek | [↑/↓] volume | \
                        [j/k] move | [h/l] page | [g/G] top/bottom | [/] filter | [r] repeat | [q] quit";

const NO_PROGRESS: &str = "--:-- / --:--";

/// Screen regions of the last rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub glyph: Rect,
    pub progress_bar: Rect,
    pub progress_label: Rect,
    pub list: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Fraction of the progress bar's width under `(column, row)`, or `None`
    /// when the point is outside the bar.
    pub fn bar_fraction(&self, column: u16, row: u16) -> Option<f64> {
        let bar = self.progress_bar;
        let inside = bar.width > 0
            && column >= bar.x
            && column < bar.x + bar.width
            && row >= bar.y
            && row < bar.y + bar.height;
        if !inside {
            return None;
        }
        let span = f64::from(bar.width.saturating_sub(1).max(1));
        Some((f64::from(column - bar.x) / span).clamp(0.0, 1.0))
    }

    /// Rows available to the list's items.
    pub fn list_rows(&self) -> usize {
        usize::from(self.list.height.saturating_sub(2))
    }
}

/// Split `area` into the player's regions.
pub fn layout(area: Rect, label_width: u16) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(label_width + 2),
        ])
        .split(rows[0]);

    AppLayout {
        glyph: top[0],
        progress_bar: top[1],
        progress_label: top[2],
        list: rows[1],
        status: rows[2],
        footer: rows[3],
    }
}

/// Render the entire UI into `frame` and return the regions used.
pub fn draw<B: AudioBackend>(
    frame: &mut Frame,
    session: &Session<B>,
    header: &str,
    now: Instant,
) -> AppLayout {
    let (label, fraction) = match session.progress() {
        Some(p) => (p.label.as_str(), p.fraction),
        None => (NO_PROGRESS, 0.0),
    };
    let regions = layout(frame.area(), label.chars().count() as u16);

    // Progress line: glyph, bar, "elapsed / total".
    let glyph = session.status().map_or(" ", |s| s.glyph());
    frame.render_widget(Paragraph::new(format!(" {glyph}")), regions.glyph);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::DarkGray))
        .ratio(fraction.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, regions.progress_bar);

    frame.render_widget(
        Paragraph::new(label).alignment(Alignment::Center),
        regions.progress_label,
    );

    // Track list: title on the first line, album⋅artist dimmed below.
    let playing = session.now_playing();
    let visible = session.visible();
    let tracks = session.tracks();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|&i| (i, &tracks[i]))
        .map(|(i, t)| {
            let marker = if Some(i) == playing { "♪ " } else { "  " };
            let mut title_style = Style::default();
            if Some(i) == playing {
                title_style = title_style.fg(Color::Magenta).add_modifier(Modifier::BOLD);
            }
            ListItem::new(vec![
                Line::from(vec![Span::raw(marker), Span::styled(t.title.clone(), title_style)]),
                Line::from(Span::styled(
                    format!("  {}", t.description()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let filter = session.filter();
    let title = if filter.is_active() {
        let cursor = if filter.is_editing() { "_" } else { "" };
        format!("{header} | filter: {}{cursor}", filter.query())
    } else {
        header.to_string()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(visible.iter().position(|&i| i == session.selected()));
    frame.render_stateful_widget(list, regions.list, &mut state);

    // Status line: transient message, otherwise mode and volume.
    let status = match session.status_message(now) {
        Some(msg) => msg.to_string(),
        None => format!(
            " repeat: {} • volume: {}/128 • {} tracks",
            if session.repeat() { "on" } else { "off" },
            session.volume(),
            session.tracks().len()
        ),
    };
    frame.render_widget(Paragraph::new(status), regions.status);

    frame.render_widget(
        Paragraph::new(CONTROLS).style(Style::default().fg(Color::DarkGray)),
        regions.footer,
    );

    regions
}
