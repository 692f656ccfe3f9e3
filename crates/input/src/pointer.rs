//! Mouse mapping. Only the left button drives selection.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Drag,
    Up,
}

/// Pointer event in terminal cell coordinates (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

/// Map a terminal mouse event; other buttons, moves without a button, and
/// scrolling are ignored.
pub fn handle_mouse_event(event: MouseEvent) -> Option<PointerEvent> {
    let kind = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Drag,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        _ => return None,
    };
    Some(PointerEvent {
        kind,
        column: event.column,
        row: event.row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_left_button_sequence() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(PointerEvent {
                kind: PointerKind::Down,
                column: 3,
                row: 4
            })
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 6))
                .map(|p| p.kind),
            Some(PointerKind::Drag)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 6)).map(|p| p.kind),
            Some(PointerKind::Up)
        );
    }

    #[test]
    fn test_other_mouse_input_ignored() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            None
        );
        assert_eq!(handle_mouse_event(mouse(MouseEventKind::Moved, 0, 0)), None);
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 0, 0)),
            None
        );
    }
}
