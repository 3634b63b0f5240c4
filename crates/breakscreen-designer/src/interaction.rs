//! Pointer interaction: the drag/resize/marquee gesture state machine.
//!
//! A gesture spans pointer-down → pointer-moves → pointer-up. Intermediate
//! moves mutate live widget geometry directly for visual feedback; only
//! the final geometry is wrapped into one Move/Resize command at
//! pointer-up, so undo history records one entry per gesture, not one per
//! tick. `cancel_gesture` (hosts bind it to Escape) restores the captured
//! origin state and records nothing.

use breakscreen_core::{Point, Rect, Result, WidgetId};

use crate::canvas::ChildGeometry;
use crate::commands::{DesignerCommand, MoveWidgets, ResizeWidget, WidgetMove};
use crate::designer::Designer;

/// Corner being dragged during a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Active gesture state. Origin geometry, including descendants of any
/// dragged group, is captured at gesture start, both for cancellation
/// and so the command wrapped at pointer-up carries exact pre-gesture
/// child positions.
#[derive(Debug, Clone)]
pub(crate) enum Gesture {
    Idle,
    Move {
        start: Point,
        origins: Vec<(WidgetId, Point)>,
        child_origins: Vec<ChildGeometry>,
    },
    Resize {
        id: WidgetId,
        handle: ResizeHandle,
        origin: Rect,
        start: Point,
        child_origins: Vec<ChildGeometry>,
    },
    Marquee {
        origin: Point,
        additive: bool,
    },
}

impl Designer {
    /// Whether a drag/resize/marquee gesture is in progress.
    pub fn gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Pointer-down on the canvas. A hit on an interactive widget selects
    /// it (additive per the flag) and begins a move gesture over the whole
    /// selection; a miss begins a marquee gesture.
    pub fn pointer_down(&mut self, point: Point, additive: bool) {
        if self.gesture_active() {
            tracing::warn!("pointer-down during active gesture, cancelling previous");
            self.cancel_gesture();
        }

        match self.canvas.widget_at_point(point) {
            Some(id) => {
                if !self.canvas.is_selected(&id) {
                    self.canvas.select_widget(&id, additive);
                } else if additive {
                    // Re-selecting additively promotes to reference.
                    self.canvas.select_widget(&id, true);
                }
                let selected = self.canvas.selected_ids();
                let origins: Vec<(WidgetId, Point)> = selected
                    .iter()
                    .filter_map(|id| self.canvas.widget(id).map(|w| (id.clone(), w.position)))
                    .collect();
                let child_origins = self.canvas.group_descendant_geometry(selected.iter());
                self.gesture = Gesture::Move {
                    start: point,
                    origins,
                    child_origins,
                };
            }
            None => {
                self.canvas.start_selection_box(point);
                self.gesture = Gesture::Marquee {
                    origin: point,
                    additive,
                };
            }
        }
    }

    /// Starts a corner-handle resize gesture on a widget. Returns `false`
    /// for an unknown widget.
    pub fn begin_resize(&mut self, id: &str, handle: ResizeHandle, point: Point) -> bool {
        if self.gesture_active() {
            self.cancel_gesture();
        }
        let Some(origin) = self.canvas.widget_rect(id, false) else {
            tracing::warn!(widget_id = id, "resize on unknown widget, ignored");
            return false;
        };
        if !self.canvas.is_selected(id) {
            self.canvas.select_widget(id, false);
        }
        let owned = id.to_string();
        let child_origins = self
            .canvas
            .group_descendant_geometry(std::iter::once(&owned));
        self.gesture = Gesture::Resize {
            id: owned,
            handle,
            origin,
            start: point,
            child_origins,
        };
        true
    }

    /// Pointer-move: live feedback only, no history.
    pub fn pointer_move(&mut self, point: Point) {
        match self.gesture.clone() {
            Gesture::Idle => {}
            Gesture::Move { start, origins, .. } => {
                let dx = point.x - start.x;
                let dy = point.y - start.y;
                for (id, origin) in &origins {
                    self.canvas.set_widget_position(id, origin.offset(dx, dy));
                }
            }
            Gesture::Resize {
                id,
                handle,
                origin,
                start,
                ..
            } => {
                let rect = resized_rect(origin, handle, point.x - start.x, point.y - start.y);
                self.canvas.set_widget_position(&id, rect.position());
                self.canvas.set_widget_size(&id, rect.size());
            }
            Gesture::Marquee { origin, .. } => {
                self.canvas.update_selection_box(point, origin);
            }
        }
    }

    /// Pointer-up: completes the gesture, wrapping the final geometry in
    /// a single command (or the marquee rect in a selection).
    pub fn pointer_up(&mut self, point: Point) -> Result<()> {
        self.pointer_move(point);
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => Ok(()),
            Gesture::Move {
                origins,
                child_origins,
                ..
            } => {
                let moves: Vec<WidgetMove> = origins
                    .into_iter()
                    .filter_map(|(id, from)| {
                        let to = self.canvas.widget(&id)?.position;
                        (to != from).then_some(WidgetMove { id, from, to })
                    })
                    .collect();
                if moves.is_empty() {
                    return Ok(());
                }
                self.execute(DesignerCommand::MoveWidgets(MoveWidgets {
                    moves,
                    prior_children: child_origins,
                }))
            }
            Gesture::Resize {
                id,
                origin,
                child_origins,
                ..
            } => {
                let Some(widget) = self.canvas.widget(&id) else {
                    return Ok(());
                };
                let (to_position, to_size) = (widget.position, widget.size);
                if to_position == origin.position() && to_size == origin.size() {
                    return Ok(());
                }
                self.execute(DesignerCommand::ResizeWidget(ResizeWidget {
                    id,
                    from_position: origin.position(),
                    from_size: origin.size(),
                    to_position,
                    to_size,
                    prior_children: child_origins,
                }))
            }
            Gesture::Marquee { additive, .. } => {
                if let Some(rect) = self.canvas.end_selection_box() {
                    self.canvas.select_widgets_in_rect(rect, additive);
                }
                Ok(())
            }
        }
    }

    /// Aborts the gesture in progress, restoring the captured origin
    /// geometry. No history entry is recorded.
    pub fn cancel_gesture(&mut self) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => {}
            Gesture::Move {
                origins,
                child_origins,
                ..
            } => {
                for (id, origin) in origins {
                    self.canvas.set_widget_position(&id, origin);
                }
                self.canvas.restore_geometry(&child_origins);
            }
            Gesture::Resize {
                id,
                origin,
                child_origins,
                ..
            } => {
                self.canvas.set_widget_size(&id, origin.size());
                self.canvas.set_widget_position(&id, origin.position());
                self.canvas.restore_geometry(&child_origins);
            }
            Gesture::Marquee { .. } => {
                self.canvas.end_selection_box();
            }
        }
    }
}

/// New rect for a corner drag of (dx, dy). Extents are floored at 1 px;
/// variant clamps (QR square, group minimum) apply when the size lands on
/// the widget.
fn resized_rect(origin: Rect, handle: ResizeHandle, dx: f64, dy: f64) -> Rect {
    let (x1, y1, x2, y2) = (origin.x, origin.y, origin.right(), origin.bottom());
    let (nx1, ny1, nx2, ny2) = match handle {
        ResizeHandle::TopLeft => (x1 + dx, y1 + dy, x2, y2),
        ResizeHandle::TopRight => (x1, y1 + dy, x2 + dx, y2),
        ResizeHandle::BottomLeft => (x1 + dx, y1, x2, y2 + dy),
        ResizeHandle::BottomRight => (x1, y1, x2 + dx, y2 + dy),
    };
    let width = (nx2 - nx1).max(1.0);
    let height = (ny2 - ny1).max(1.0);
    Rect::new(nx1.min(nx2), ny1.min(ny2), width, height)
}
