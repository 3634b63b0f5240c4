//! Editing-rule constants shared across the designer.

/// Minimum side length of a QR widget, in pixels. QR widgets are kept
/// square; any smaller resize request is floored to this value.
pub const MIN_QR_SIZE: f64 = 10.0;

/// Padding added around the union of child rects when computing a group's
/// bounding rect.
pub const GROUP_PADDING: f64 = 10.0;

/// Minimum width of a group widget. Smaller child unions expand around
/// their center to reach it.
pub const MIN_GROUP_WIDTH: f64 = 100.0;

/// Minimum height of a group widget.
pub const MIN_GROUP_HEIGHT: f64 = 100.0;

/// Offset applied to pasted widgets, per paste, on both axes.
pub const PASTE_OFFSET: f64 = 20.0;

/// Maximum undo/redo stack depth. Oldest entries are dropped beyond this;
/// a memory bound, not a correctness concern.
pub const MAX_HISTORY_DEPTH: usize = 50;

/// Per-widget z-index margin reserved above a new group, so later groups
/// stacked on top never collide with it.
pub const GROUP_Z_MARGIN_PER_WIDGET: i32 = 10;
