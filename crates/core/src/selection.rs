//! Selection module - drag rectangle tracking
//!
//! A drag is Inert until the pointer goes down while a round is running, then
//! Dragging until release. Release hands back a normalized rectangle so nothing
//! downstream cares which way the player dragged.

use crate::types::{Phase, Point, Rect, Selection};

/// Drag state machine over {Inert, Dragging}
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    current: Selection,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at `point`.
    ///
    /// Only takes effect while `phase` is Running; otherwise a no-op returning false.
    pub fn begin(&mut self, point: Point, phase: Phase) -> bool {
        if phase != Phase::Running {
            return false;
        }
        self.current = Selection {
            start: point,
            end: point,
            active: true,
        };
        true
    }

    /// Move the free corner of the drag. No-op while Inert.
    pub fn update(&mut self, point: Point) -> bool {
        if !self.current.active {
            return false;
        }
        self.current.end = point;
        true
    }

    /// Finish the drag and return its normalized rectangle.
    ///
    /// Returns None when called while Inert.
    pub fn end(&mut self) -> Option<Rect> {
        let rect = self.current.rect();
        self.reset();
        rect
    }

    /// Drop any in-progress drag without producing a rectangle
    pub fn reset(&mut self) {
        self.current = Selection::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.current.active
    }

    pub fn selection(&self) -> Selection {
        self.current
    }

    /// Live rectangle for renderers, None while Inert
    pub fn current_rect(&self) -> Option<Rect> {
        self.current.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_requires_running() {
        let mut sel = SelectionEngine::new();
        assert!(!sel.begin(Point::new(1.0, 1.0), Phase::Idle));
        assert!(!sel.begin(Point::new(1.0, 1.0), Phase::Ended));
        assert!(!sel.is_dragging());

        assert!(sel.begin(Point::new(1.0, 1.0), Phase::Running));
        assert!(sel.is_dragging());
        let s = sel.selection();
        assert_eq!(s.start, s.end);
    }

    #[test]
    fn test_update_ignored_while_inert() {
        let mut sel = SelectionEngine::new();
        assert!(!sel.update(Point::new(5.0, 5.0)));
        assert_eq!(sel.selection(), Selection::default());
    }

    #[test]
    fn test_end_normalizes_reverse_drag() {
        let mut sel = SelectionEngine::new();
        sel.begin(Point::new(9.0, 7.0), Phase::Running);
        sel.update(Point::new(3.0, 8.0));
        sel.update(Point::new(2.0, 1.0));

        let rect = sel.end().unwrap();
        assert_eq!(
            rect,
            Rect {
                left: 2.0,
                right: 9.0,
                top: 1.0,
                bottom: 7.0
            }
        );
    }

    #[test]
    fn test_end_resets_to_inert() {
        let mut sel = SelectionEngine::new();
        sel.begin(Point::new(1.0, 2.0), Phase::Running);
        sel.update(Point::new(3.0, 4.0));
        assert!(sel.end().is_some());

        assert!(!sel.is_dragging());
        assert_eq!(sel.selection(), Selection::default());
        assert_eq!(sel.end(), None);
    }

    #[test]
    fn test_click_without_drag_is_degenerate() {
        let mut sel = SelectionEngine::new();
        sel.begin(Point::new(4.0, 4.0), Phase::Running);
        let rect = sel.end().unwrap();
        assert!(rect.is_degenerate());
    }
}
