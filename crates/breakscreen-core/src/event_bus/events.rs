//! Event type definitions for the designer event bus.

use crate::geometry::{Point, Size};
use crate::types::WidgetId;

/// Coarse event grouping used by subscription filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// Selection set changes.
    Selection,
    /// Undo/redo availability changes.
    History,
    /// Group move/resize lockstep notifications.
    Group,
    /// Widget lifecycle (added/removed).
    Widget,
}

/// Events published by the designer engine.
///
/// Payloads carry values (ids, copies), never references into the live
/// widget collection.
#[derive(Debug, Clone)]
pub enum DesignerEvent {
    /// The ordered selection changed. `ids[0]`, when present, is the
    /// reference widget. This list is the sole source of truth for "what
    /// is currently selected".
    SelectionChanged { ids: Vec<WidgetId> },

    /// Undo/redo stack availability or labels changed.
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
        undo_description: Option<String>,
        redo_description: Option<String>,
    },

    /// A group widget moved; its children were repositioned in lockstep by
    /// the same offset.
    GroupMoved {
        id: WidgetId,
        position: Point,
        offset: (f64, f64),
        child_ids: Vec<WidgetId>,
    },

    /// A group widget resized; its children were scaled in lockstep by the
    /// given factors relative to the group origin.
    GroupResized {
        id: WidgetId,
        size: Size,
        scale: (f64, f64),
        child_ids: Vec<WidgetId>,
    },

    /// A widget entered the live collection.
    WidgetAdded { id: WidgetId },

    /// A widget left the live collection.
    WidgetRemoved { id: WidgetId },
}

impl DesignerEvent {
    /// The category this event belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            DesignerEvent::SelectionChanged { .. } => EventCategory::Selection,
            DesignerEvent::HistoryChanged { .. } => EventCategory::History,
            DesignerEvent::GroupMoved { .. } | DesignerEvent::GroupResized { .. } => {
                EventCategory::Group
            }
            DesignerEvent::WidgetAdded { .. } | DesignerEvent::WidgetRemoved { .. } => {
                EventCategory::Widget
            }
        }
    }
}
