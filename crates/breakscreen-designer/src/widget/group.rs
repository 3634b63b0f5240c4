//! Group widget: a composite referencing a set of child widget ids,
//! treated as one unit while grouped.

use serde::{Deserialize, Serialize};

use breakscreen_core::constants::{GROUP_PADDING, MIN_GROUP_HEIGHT, MIN_GROUP_WIDTH};
use breakscreen_core::{Rect, Size, WidgetId};

use super::{WidgetBehavior, WidgetKind};

/// Fallback extent for a group with no resolvable children.
pub const DEFAULT_GROUP_SIZE: Size = Size {
    width: MIN_GROUP_WIDTH,
    height: MIN_GROUP_HEIGHT,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWidget {
    child_ids: Vec<WidgetId>,
}

impl GroupWidget {
    pub fn new(child_ids: Vec<WidgetId>) -> Self {
        Self { child_ids }
    }

    pub fn child_ids(&self) -> &[WidgetId] {
        &self.child_ids
    }

    pub fn child_count(&self) -> usize {
        self.child_ids.len()
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.child_ids.iter().any(|c| c == id)
    }

    /// Appends a child id. Duplicates are ignored.
    pub fn add_child(&mut self, id: WidgetId) {
        if !self.has_child(&id) {
            self.child_ids.push(id);
        }
    }

    /// Removes a child id. Returns `true` if it was present.
    pub fn remove_child(&mut self, id: &str) -> bool {
        let before = self.child_ids.len();
        self.child_ids.retain(|c| c != id);
        self.child_ids.len() != before
    }

    /// Replaces the child list wholesale.
    pub fn set_children(&mut self, child_ids: Vec<WidgetId>) {
        self.child_ids = child_ids;
    }

    /// Computes the group bounding rect for the given child rects: the
    /// union plus the fixed padding margin, with x/y clamped so they never
    /// go negative, expanded around its center up to the minimum group
    /// size (and re-clamped afterwards, so a group hugging the canvas
    /// origin grows right/down instead).
    pub fn compute_bounds(child_rects: &[Rect]) -> Rect {
        let Some(union) = Rect::union_all(child_rects.iter().copied()) else {
            return Rect::new(0.0, 0.0, DEFAULT_GROUP_SIZE.width, DEFAULT_GROUP_SIZE.height);
        };

        let x = (union.x - GROUP_PADDING).max(0.0);
        let y = (union.y - GROUP_PADDING).max(0.0);
        let right = union.right() + GROUP_PADDING;
        let bottom = union.bottom() + GROUP_PADDING;
        let mut rect = Rect::new(x, y, right - x, bottom - y);

        if rect.width < MIN_GROUP_WIDTH {
            let grow = MIN_GROUP_WIDTH - rect.width;
            rect.x = (rect.x - grow / 2.0).max(0.0);
            rect.width = MIN_GROUP_WIDTH;
        }
        if rect.height < MIN_GROUP_HEIGHT {
            let grow = MIN_GROUP_HEIGHT - rect.height;
            rect.y = (rect.y - grow / 2.0).max(0.0);
            rect.height = MIN_GROUP_HEIGHT;
        }

        rect
    }
}

impl WidgetBehavior for GroupWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Group
    }

    fn clamp_size(&self, requested: Size) -> Size {
        Size::new(
            requested.width.max(MIN_GROUP_WIDTH),
            requested.height.max(MIN_GROUP_HEIGHT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_management() {
        let mut group = GroupWidget::default();
        group.add_child("widget-1-a".to_string());
        group.add_child("widget-2-b".to_string());
        group.add_child("widget-1-a".to_string()); // duplicate ignored

        assert_eq!(group.child_count(), 2);
        assert!(group.has_child("widget-1-a"));
        assert!(group.remove_child("widget-1-a"));
        assert!(!group.remove_child("widget-1-a"));
        assert_eq!(group.child_ids(), &["widget-2-b"]);
    }

    #[test]
    fn test_compute_bounds_pads_and_clamps() {
        // Two 100x50 widgets at y=10: union (10,10)-(220,60). The 10px
        // padding drives x/y to the clamp and the height under the 100
        // minimum, which expands around center and re-clamps at 0.
        let rects = [
            Rect::new(10.0, 10.0, 100.0, 50.0),
            Rect::new(120.0, 10.0, 100.0, 50.0),
        ];
        let bounds = GroupWidget::compute_bounds(&rects);
        assert_eq!(bounds.x, 0.0);
        assert_eq!(bounds.y, 0.0);
        assert_eq!(bounds.width, 230.0);
        assert_eq!(bounds.height, 100.0);
    }

    #[test]
    fn test_compute_bounds_minimum_centered() {
        let rects = [Rect::new(500.0, 500.0, 20.0, 20.0)];
        let bounds = GroupWidget::compute_bounds(&rects);
        // Padded rect is (490,490) 40x40; expansion is centered.
        assert_eq!(bounds.width, 100.0);
        assert_eq!(bounds.height, 100.0);
        assert_eq!(bounds.x, 460.0);
        assert_eq!(bounds.y, 460.0);
    }

    #[test]
    fn test_compute_bounds_no_children() {
        let bounds = GroupWidget::compute_bounds(&[]);
        assert_eq!(bounds.width, MIN_GROUP_WIDTH);
        assert_eq!(bounds.height, MIN_GROUP_HEIGHT);
    }
}
