//! Pointer dragging of the base image.
//!
//! A drag starts only when the pointer goes down inside the base rect. While
//! dragging, exactly one axis follows the pointer: horizontal by default,
//! vertical when the axis lock allows vertical moves. There is no clamping,
//! so the base image can be pushed partly or fully off the canvas.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutState;

/// Drag state machine: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer position relative to the base rect origin at drag start.
    Dragging { offset_x: f64, offset_y: f64 },
}

/// Interprets pointer events against the base rect of a [`LayoutState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    state: DragState,
    allow_vertical_move: bool,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn allow_vertical_move(&self) -> bool {
        self.allow_vertical_move
    }

    pub fn set_axis_lock(&mut self, allow_vertical_move: bool) {
        self.allow_vertical_move = allow_vertical_move;
    }

    pub fn toggle_axis_lock(&mut self) {
        self.allow_vertical_move = !self.allow_vertical_move;
    }

    /// Start a drag if `(x, y)` hits the base rect. Returns whether it did.
    pub fn pointer_down(&mut self, x: f64, y: f64, layout: &LayoutState) -> bool {
        match layout.base_rect() {
            Some(rect) if rect.contains(x, y) => {
                self.state = DragState::Dragging {
                    offset_x: x - rect.x,
                    offset_y: y - rect.y,
                };
                tracing::trace!(x, y, "Base drag started");
                true
            }
            _ => false,
        }
    }

    /// Follow the pointer on the unlocked axis. Returns whether the base moved.
    pub fn pointer_move(&mut self, x: f64, y: f64, layout: &mut LayoutState) -> bool {
        let DragState::Dragging { offset_x, offset_y } = self.state else {
            return false;
        };

        if self.allow_vertical_move {
            layout.move_base_y(y - offset_y);
        } else {
            layout.move_base_x(x - offset_x);
        }
        true
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pointer left the canvas.
    pub fn pointer_leave(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ImageSize;

    fn layout_with_base() -> LayoutState {
        let mut layout = LayoutState::default();
        // contain-fit to {0, 175, 800, 450}
        layout.fit_base(ImageSize::new(1600, 900)).unwrap();
        layout
    }

    #[test]
    fn test_drag_moves_horizontally_by_default() {
        let mut layout = layout_with_base();
        let mut drag = DragController::new();

        assert!(drag.pointer_down(400.0, 400.0, &layout));
        assert!(drag.pointer_move(300.0, 600.0, &mut layout));

        let rect = layout.base_rect().unwrap();
        assert!((rect.x + 100.0).abs() < 1e-9);
        assert!((rect.y - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_lock_moves_vertically() {
        let mut layout = layout_with_base();
        let mut drag = DragController::new();
        drag.set_axis_lock(true);

        assert!(drag.pointer_down(400.0, 400.0, &layout));
        drag.pointer_move(10.0, 350.0, &mut layout);

        let rect = layout.base_rect().unwrap();
        assert!(rect.x.abs() < 1e-9);
        assert!((rect.y - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_down_outside_base_does_not_drag() {
        let mut layout = layout_with_base();
        let before = layout.base_rect();
        let mut drag = DragController::new();

        assert!(!drag.pointer_down(400.0, 100.0, &layout));
        assert_eq!(drag.state(), DragState::Idle);
        assert!(!drag.pointer_move(200.0, 100.0, &mut layout));
        assert_eq!(layout.base_rect(), before);
    }

    #[test]
    fn test_pointer_down_without_base_does_not_drag() {
        let layout = LayoutState::default();
        let mut drag = DragController::new();
        assert!(!drag.pointer_down(0.0, 0.0, &layout));
    }

    #[test]
    fn test_release_and_leave_end_drag() {
        let mut layout = layout_with_base();
        let mut drag = DragController::new();

        drag.pointer_down(400.0, 400.0, &layout);
        drag.pointer_up();
        assert!(!drag.pointer_move(0.0, 0.0, &mut layout));

        drag.pointer_down(400.0, 400.0, &layout);
        drag.pointer_leave();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_can_leave_canvas() {
        let mut layout = layout_with_base();
        let mut drag = DragController::new();

        drag.pointer_down(10.0, 400.0, &layout);
        drag.pointer_move(-2000.0, 400.0, &mut layout);
        let rect = layout.base_rect().unwrap();
        assert!((rect.x + 2010.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_axis_lock() {
        let mut drag = DragController::new();
        assert!(!drag.allow_vertical_move());
        drag.toggle_axis_lock();
        assert!(drag.allow_vertical_move());
    }
}
