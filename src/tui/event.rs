use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::core::gesture::PointerId;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    SwipeLeft,
    SwipeRight,
    Reload, // New list: restarts the deck

    // Pointer events carry the button as the pointer id
    PointerDown { pointer: PointerId, col: u16, row: u16 },
    PointerDrag { pointer: PointerId, col: u16, row: u16 },
    PointerUp { pointer: PointerId, col: u16, row: u16 },
    FocusLost,
    Resize,
}

/// Poll for an event with timeout
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a raw crossterm event onto a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => translate_mouse(mouse_event),
        Event::FocusLost => Some(TuiEvent::FocusLost),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Kitty protocol reports releases too; act on presses only
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Left) | (_, KeyCode::Char('h')) => Some(TuiEvent::SwipeLeft),
        (_, KeyCode::Right) | (_, KeyCode::Char('l')) => Some(TuiEvent::SwipeRight),
        (_, KeyCode::Char('r')) => Some(TuiEvent::Reload),
        _ => None,
    }
}

fn translate_mouse(mouse_event: MouseEvent) -> Option<TuiEvent> {
    let (col, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(button) => Some(TuiEvent::PointerDown {
            pointer: pointer_id(button),
            col,
            row,
        }),
        MouseEventKind::Drag(button) => Some(TuiEvent::PointerDrag {
            pointer: pointer_id(button),
            col,
            row,
        }),
        MouseEventKind::Up(button) => Some(TuiEvent::PointerUp {
            pointer: pointer_id(button),
            col,
            row,
        }),
        _ => None,
    }
}

fn pointer_id(button: MouseButton) -> PointerId {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_swipe_keys() {
        assert_eq!(translate(key(KeyCode::Left)), Some(TuiEvent::SwipeLeft));
        assert_eq!(translate(key(KeyCode::Char('h'))), Some(TuiEvent::SwipeLeft));
        assert_eq!(translate(key(KeyCode::Right)), Some(TuiEvent::SwipeRight));
        assert_eq!(translate(key(KeyCode::Char('l'))), Some(TuiEvent::SwipeRight));
        assert_eq!(translate(key(KeyCode::Char('r'))), Some(TuiEvent::Reload));
        assert_eq!(translate(key(KeyCode::Esc)), Some(TuiEvent::Quit));
        assert_eq!(translate(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(release), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(event), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_mouse_buttons_become_pointers() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 4, 7)),
            Some(TuiEvent::PointerDown { pointer: 0, col: 4, row: 7 })
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Drag(MouseButton::Right), 1, 2)),
            Some(TuiEvent::PointerDrag { pointer: 1, col: 1, row: 2 })
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Up(MouseButton::Left), 9, 0)),
            Some(TuiEvent::PointerUp { pointer: 0, col: 9, row: 0 })
        );
        assert_eq!(translate(mouse(MouseEventKind::Moved, 1, 1)), None);
    }

    #[test]
    fn test_focus_and_resize() {
        assert_eq!(translate(Event::FocusLost), Some(TuiEvent::FocusLost));
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
