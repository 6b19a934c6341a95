use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::player::{Action, LoopEvent};
use crate::ui::AppLayout;

/// Translate a key press into an [`Action`]. While `filtering`, printable
/// keys type into the title filter instead.
pub fn action_for(key: KeyEvent, filtering: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('j' | 'n') if filtering => Some(Action::CursorDown),
            KeyCode::Char('k' | 'p') if filtering => Some(Action::CursorUp),
            _ => None,
        };
    }

    if filtering {
        match key.code {
            KeyCode::Esc => return Some(Action::ClearFilter),
            KeyCode::Backspace => return Some(Action::FilterPop),
            KeyCode::Char(c) if !c.is_control() => return Some(Action::FilterPush(c)),
            _ => {}
        }
    }

    let action = match key.code {
        KeyCode::Enter => Action::Play,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('r') => Action::ToggleRepeat,
        KeyCode::Char('/') => Action::StartFilter,
        KeyCode::Up => Action::VolumeUp,
        KeyCode::Down => Action::VolumeDown,
        KeyCode::Right => Action::SeekForward,
        KeyCode::Left => Action::SeekBackward,
        KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Char('h') | KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('l') | KeyCode::PageDown => Action::PageDown,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Classify a left click against the last rendered layout.
pub fn pointer_event(mouse: MouseEvent, layout: &AppLayout) -> Option<LoopEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    Some(match layout.bar_fraction(mouse.column, mouse.row) {
        Some(f) => LoopEvent::PointerInBar(f),
        None => LoopEvent::PointerOutside,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16, kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn browse(code: KeyCode) -> Option<Action> {
        action_for(key(code), false)
    }

    fn typing(code: KeyCode) -> Option<Action> {
        action_for(key(code), true)
    }

    #[test]
    fn arrows_adjust_volume_and_seek() {
        assert_eq!(browse(KeyCode::Up), Some(Action::VolumeUp));
        assert_eq!(browse(KeyCode::Down), Some(Action::VolumeDown));
        assert_eq!(browse(KeyCode::Right), Some(Action::SeekForward));
        assert_eq!(browse(KeyCode::Left), Some(Action::SeekBackward));
    }

    #[test]
    fn playback_keys() {
        assert_eq!(browse(KeyCode::Enter), Some(Action::Play));
        assert_eq!(browse(KeyCode::Char(' ')), Some(Action::TogglePause));
        assert_eq!(browse(KeyCode::Char('r')), Some(Action::ToggleRepeat));
        assert_eq!(browse(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(browse(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(Action::Quit)
        );
        assert_eq!(browse(KeyCode::Char('x')), None);
    }

    #[test]
    fn slash_starts_filter_and_letters_then_type_into_it() {
        assert_eq!(browse(KeyCode::Char('/')), Some(Action::StartFilter));
        assert_eq!(typing(KeyCode::Char('q')), Some(Action::FilterPush('q')));
        assert_eq!(typing(KeyCode::Char('j')), Some(Action::FilterPush('j')));
        assert_eq!(typing(KeyCode::Char(' ')), Some(Action::FilterPush(' ')));
        assert_eq!(typing(KeyCode::Backspace), Some(Action::FilterPop));
        assert_eq!(typing(KeyCode::Esc), Some(Action::ClearFilter));
        assert_eq!(typing(KeyCode::Enter), Some(Action::Play));
        assert_eq!(typing(KeyCode::Up), Some(Action::VolumeUp));
    }

    #[test]
    fn control_keys_move_and_quit_while_filtering() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl('j'), true), Some(Action::CursorDown));
        assert_eq!(action_for(ctrl('p'), true), Some(Action::CursorUp));
        assert_eq!(action_for(ctrl('c'), true), Some(Action::Quit));
        assert_eq!(action_for(ctrl('j'), false), None);
    }

    #[test]
    fn key_event_kind_is_not_inspected_here() {
        let mut k = key(KeyCode::Char('j'));
        k.kind = KeyEventKind::Repeat;
        assert_eq!(action_for(k, false), Some(Action::CursorDown));
    }

    #[test]
    fn clicks_are_split_by_bar_region() {
        let layout = AppLayout {
            progress_bar: Rect::new(4, 1, 11, 1),
            ..AppLayout::default()
        };

        assert_eq!(
            pointer_event(click(4, 1, MouseEventKind::Down(MouseButton::Left)), &layout),
            Some(LoopEvent::PointerInBar(0.0))
        );
        assert_eq!(
            pointer_event(click(9, 1, MouseEventKind::Down(MouseButton::Left)), &layout),
            Some(LoopEvent::PointerInBar(0.5))
        );
        assert_eq!(
            pointer_event(click(9, 5, MouseEventKind::Down(MouseButton::Left)), &layout),
            Some(LoopEvent::PointerOutside)
        );
        assert_eq!(
            pointer_event(click(9, 1, MouseEventKind::Moved), &layout),
            None
        );
    }
}
