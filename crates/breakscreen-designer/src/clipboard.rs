//! Copy/cut/paste with id remapping.
//!
//! The clipboard is an explicit instance the host injects into one or
//! more designers as `Shared<Clipboard>`, not a module-global singleton.
//! It holds deep-cloned `WidgetData` snapshots captured at copy/cut time,
//! independent of later mutations to the live collection.

use std::collections::HashMap;

use breakscreen_core::constants::PASTE_OFFSET;
use breakscreen_core::WidgetId;

use crate::factory;
use crate::widget::{WidgetData, WidgetProperties};

#[derive(Debug, Default)]
pub struct Clipboard {
    items: Vec<WidgetData>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Deep-clones and stores the given records, replacing any previous
    /// clipboard contents.
    pub fn copy(&mut self, items: &[WidgetData]) {
        self.items = items.to_vec();
    }

    /// Same snapshot as `copy`; deleting the originals is the caller's
    /// responsibility (the designer issues a delete command after cut).
    pub fn cut(&mut self, items: &[WidgetData]) {
        self.copy(items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Produces ready-to-insert records: each stored item gets a fresh
    /// unique id, and group `childIds` are rewritten through the remap
    /// table built in the same pass, so pasted groups reference the newly
    /// generated ids of their pasted children, never the originals. Child
    /// ids absent from the snapshot are dropped with a warning.
    ///
    /// The stored snapshot is advanced by the fixed (20, 20) offset before
    /// cloning, so successive pastes cascade: source + 20, source + 40, …
    /// An empty clipboard yields an empty vec, not an error.
    pub fn paste(&mut self) -> Vec<WidgetData> {
        if self.items.is_empty() {
            tracing::warn!("paste with empty clipboard, nothing to do");
            return Vec::new();
        }

        for item in &mut self.items {
            item.position.x += PASTE_OFFSET;
            item.position.y += PASTE_OFFSET;
        }

        let id_map: HashMap<WidgetId, WidgetId> = self
            .items
            .iter()
            .map(|item| (item.id.clone(), factory::generate_widget_id()))
            .collect();

        self.items
            .iter()
            .map(|item| {
                let mut pasted = item.clone();
                pasted.id = id_map[&item.id].clone();
                if let WidgetProperties::Group(group) = &mut pasted.properties {
                    let remapped: Vec<WidgetId> = group
                        .child_ids()
                        .iter()
                        .filter_map(|child_id| match id_map.get(child_id) {
                            Some(new_id) => Some(new_id.clone()),
                            None => {
                                tracing::warn!(
                                    child = %child_id,
                                    "pasted group child not in clipboard, dropping reference"
                                );
                                None
                            }
                        })
                        .collect();
                    group.set_children(remapped);
                }
                pasted
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::GroupWidget;
    use breakscreen_core::{Point, Rect, Size};

    fn box_at(x: f64, y: f64) -> WidgetData {
        factory::box_widget(Rect::new(x, y, 100.0, 50.0))
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut clipboard = Clipboard::new();
        assert!(clipboard.paste().is_empty());
    }

    #[test]
    fn test_successive_pastes_cascade() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(&[box_at(50.0, 50.0)]);

        let first = clipboard.paste();
        assert_eq!(first[0].position, Point::new(70.0, 70.0));

        let second = clipboard.paste();
        assert_eq!(second[0].position, Point::new(90.0, 90.0));
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_snapshot_independent_of_source_mutation() {
        let mut clipboard = Clipboard::new();
        let mut source = box_at(50.0, 50.0);
        clipboard.copy(std::slice::from_ref(&source));

        // Mutating the source after copy must not affect the snapshot.
        source.position = Point::new(999.0, 999.0);
        let pasted = clipboard.paste();
        assert_eq!(pasted[0].position, Point::new(70.0, 70.0));
    }

    #[test]
    fn test_group_child_ids_remapped() {
        let a = box_at(0.0, 0.0);
        let b = box_at(120.0, 0.0);
        let group = WidgetData {
            id: "widget-1-group".to_string(),
            position: Point::new(0.0, 0.0),
            size: Size::new(230.0, 100.0),
            z_index: 30,
            properties: WidgetProperties::Group(GroupWidget::new(vec![
                a.id.clone(),
                b.id.clone(),
            ])),
        };

        let mut clipboard = Clipboard::new();
        clipboard.copy(&[a.clone(), b.clone(), group]);
        let pasted = clipboard.paste();
        assert_eq!(pasted.len(), 3);

        let pasted_group = pasted
            .iter()
            .find(|d| matches!(d.properties, WidgetProperties::Group(_)))
            .unwrap();
        let WidgetProperties::Group(g) = &pasted_group.properties else {
            unreachable!()
        };
        assert_eq!(g.child_count(), 2);
        assert!(g.has_child(&pasted[0].id));
        assert!(g.has_child(&pasted[1].id));
        assert!(!g.has_child(&a.id));
        assert!(!g.has_child(&b.id));
    }

    #[test]
    fn test_unresolvable_child_reference_dropped() {
        let group = WidgetData {
            id: "widget-2-group".to_string(),
            position: Point::default(),
            size: Size::new(100.0, 100.0),
            z_index: 1,
            properties: WidgetProperties::Group(GroupWidget::new(vec![
                "widget-gone".to_string(),
            ])),
        };

        let mut clipboard = Clipboard::new();
        clipboard.copy(&[group]);
        let pasted = clipboard.paste();
        let WidgetProperties::Group(g) = &pasted[0].properties else {
            unreachable!()
        };
        assert_eq!(g.child_count(), 0);
    }
}
