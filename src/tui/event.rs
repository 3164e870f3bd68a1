use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global
    ForceQuit, // Ctrl+C
    Resize,

    // Screen-level commands
    NewChat,          // Ctrl+N
    Logout,           // Ctrl+L
    ToggleAuthScreen, // Ctrl+S
    FocusNext,        // Tab
    FocusPrev,        // Shift+Tab

    // Text editing
    Submit,
    Escape,
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    CursorUp,
    CursorDown,

    // Chat scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    MouseClick(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Wait up to `timeout` for the next event we care about.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {e}");
            return None;
        }
    }
    match event::read() {
        Ok(raw) => map_event(raw),
        Err(e) => {
            log::warn!("Event read failed: {e}");
            None
        }
    }
}

pub fn map_event(raw: Event) -> Option<TuiEvent> {
    match raw {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            MouseEventKind::Down(_) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; only presses and repeats act
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NewChat),
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(TuiEvent::Logout),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::ToggleAuthScreen),
        (_, KeyCode::BackTab) => Some(TuiEvent::FocusPrev),
        (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::InputChar(c))
        }
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton, MouseEvent};

    fn key(modifiers: KeyModifiers, code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(
            map_event(key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_event(key(KeyModifiers::CONTROL, KeyCode::Char('n'))),
            Some(TuiEvent::NewChat)
        );
        assert_eq!(
            map_event(key(KeyModifiers::CONTROL, KeyCode::Char('l'))),
            Some(TuiEvent::Logout)
        );
        assert_eq!(
            map_event(key(KeyModifiers::CONTROL, KeyCode::Char('s'))),
            Some(TuiEvent::ToggleAuthScreen)
        );
        assert_eq!(map_event(key(KeyModifiers::CONTROL, KeyCode::Char('x'))), None);
    }

    #[test]
    fn shifted_characters_are_text() {
        assert_eq!(
            map_event(key(KeyModifiers::SHIFT, KeyCode::Char('A'))),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event(Event::Key(release)), None);
    }

    #[test]
    fn mouse_wheel_and_click() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 4,
                row: 7,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(map_event(mouse(MouseEventKind::ScrollUp)), Some(TuiEvent::ScrollUp));
        assert_eq!(
            map_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(TuiEvent::MouseClick(4, 7))
        );
        assert_eq!(map_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn tab_and_backtab() {
        assert_eq!(map_event(key(KeyModifiers::NONE, KeyCode::Tab)), Some(TuiEvent::FocusNext));
        assert_eq!(
            map_event(key(KeyModifiers::SHIFT, KeyCode::BackTab)),
            Some(TuiEvent::FocusPrev)
        );
    }
}
