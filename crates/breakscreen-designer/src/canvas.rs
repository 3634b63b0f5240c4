//! Canvas: owns the widget collection and mirrors every model mutation to
//! the render port.
//!
//! The methods here are the direct mutation building blocks used by
//! commands. Calling them from outside a command bypasses undo history,
//! a deliberate escape hatch the drag interaction uses for live feedback
//! before wrapping the final geometry into a command.

use breakscreen_core::{DesignerError, DesignerEvent, EventBus, Point, Rect, Result, Size, WidgetId};

use crate::render_port::RenderPort;
use crate::selection_manager::SelectionManager;
use crate::widget::{Widget, WidgetData};
use crate::widget_store::WidgetStore;

/// Exact geometry of a group descendant at snapshot time.
#[derive(Debug, Clone)]
pub struct ChildGeometry {
    pub id: WidgetId,
    pub position: Point,
    pub size: Size,
}

pub struct Canvas {
    store: WidgetStore,
    selection: SelectionManager,
    port: Box<dyn RenderPort>,
    events: EventBus,
    preview_mode: bool,
}

impl Canvas {
    pub fn new(port: Box<dyn RenderPort>, events: EventBus) -> Self {
        Self {
            store: WidgetStore::new(),
            selection: SelectionManager::new(events.clone()),
            port,
            events,
            preview_mode: false,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.store.get(id)
    }

    /// Defensive copy of a widget's logical record.
    pub fn widget_data(&self, id: &str) -> Option<WidgetData> {
        self.store.get(id).map(|w| w.data())
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.store.iter()
    }

    pub fn widget_count(&self) -> usize {
        self.store.len()
    }

    pub fn contains_widget(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    /// Widget ids in paint order (ascending z-index).
    pub fn ids_z_order(&self) -> Vec<WidgetId> {
        self.store.ids_z_order()
    }

    /// A widget's bounding rect. `use_rendered = true` reads the actual
    /// on-screen box from the port (which can diverge transiently during
    /// host animations); `false` reads the logical data. Callers pick
    /// deliberately.
    pub fn widget_rect(&self, id: &str, use_rendered: bool) -> Option<Rect> {
        if use_rendered {
            self.port.rendered_rect(id)
        } else {
            self.store.get(id).map(|w| w.rect())
        }
    }

    /// Topmost interactive widget containing `point`, by descending
    /// z-index. Grouped children never hit; their group shell does.
    pub fn widget_at_point(&self, point: Point) -> Option<WidgetId> {
        self.store.ids_z_order().into_iter().rev().find(|id| {
            self.store
                .get(id)
                .map(|w| w.interactive && w.rect().contains_point(point))
                .unwrap_or(false)
        })
    }

    pub fn next_z(&mut self) -> i32 {
        self.store.next_z()
    }

    pub fn bump_next_z(&mut self, z: i32) {
        self.store.bump_next_z(z);
    }

    pub fn max_z(&self) -> Option<i32> {
        self.store.max_z()
    }

    // ------------------------------------------------------------------
    // Widget lifecycle
    // ------------------------------------------------------------------

    /// Inserts a live widget, mounts its visual element, and mirrors its
    /// runtime flags. Fails on id collision; the existing widget is never
    /// overwritten.
    pub fn insert_widget(&mut self, widget: Widget) -> Result<()> {
        if self.store.contains(&widget.id) {
            return Err(DesignerError::DuplicateId {
                id: widget.id.clone(),
            });
        }

        let data = widget.data();
        self.port.mount(&data);
        if widget.selected {
            self.port.set_selected(&widget.id, true);
        }
        if !widget.interactive {
            self.port.set_interactive(&widget.id, false);
        }
        if widget.group_id.is_some() {
            self.port.set_grouped(&widget.id, true);
        }
        if widget.is_group() {
            self.port
                .set_group_icon_visible(&widget.id, !self.preview_mode);
        }

        self.store.bump_next_z(widget.z_index);
        let id = widget.id.clone();
        self.store.insert(widget);
        self.events.publish(DesignerEvent::WidgetAdded { id });
        Ok(())
    }

    /// Removes a widget, detaching its visual element. Returns the removed
    /// widget so commands can snapshot it for undo.
    pub fn remove_widget(&mut self, id: &str) -> Option<Widget> {
        if self.selection.is_selected(id) {
            self.selection
                .deselect_widget(&mut self.store, self.port.as_mut(), id);
        }
        let widget = self.store.remove(id)?;
        self.port.unmount(id);
        self.events.publish(DesignerEvent::WidgetRemoved {
            id: id.to_string(),
        });
        Some(widget)
    }

    /// Removes every widget and clears the selection. The z counter is
    /// not rewound; z-index values are never reused.
    pub fn clear(&mut self) {
        for id in self.store.ids_z_order() {
            self.remove_widget(&id);
        }
    }

    // ------------------------------------------------------------------
    // Geometry mutation
    // ------------------------------------------------------------------

    /// Moves a widget. Moving a group moves its children in lockstep by
    /// the same offset and publishes a `GroupMoved` event carrying the
    /// offset and child ids.
    pub fn set_widget_position(&mut self, id: &str, position: Point) -> bool {
        let Some(widget) = self.store.get_mut(id) else {
            tracing::warn!(widget_id = id, "position update for unknown widget");
            return false;
        };
        let old = widget.position;
        widget.set_position(position);
        self.port.set_position(id, position);

        let offset = (position.x - old.x, position.y - old.y);
        if offset.0 == 0.0 && offset.1 == 0.0 {
            return true;
        }

        let group_info = self
            .store
            .get(id)
            .and_then(|w| w.as_group().map(|g| (w.id.clone(), g.child_ids().to_vec())));
        if let Some((group_id, child_ids)) = group_info {
            for child_id in &child_ids {
                match self.store.get(child_id).map(|c| c.position) {
                    Some(p) => {
                        self.set_widget_position(child_id, p.offset(offset.0, offset.1));
                    }
                    None => tracing::warn!(
                        group = %group_id,
                        child = %child_id,
                        "group references missing child"
                    ),
                }
            }
            self.events.publish(DesignerEvent::GroupMoved {
                id: group_id,
                position,
                offset,
                child_ids,
            });
        }
        true
    }

    /// Resizes a widget, clamped by its variant (QR square, group
    /// minimum). Resizing a group rescales its children in lockstep
    /// relative to the group origin and publishes `GroupResized`.
    pub fn set_widget_size(&mut self, id: &str, size: Size) -> bool {
        let Some(widget) = self.store.get_mut(id) else {
            tracing::warn!(widget_id = id, "size update for unknown widget");
            return false;
        };
        let old = widget.size;
        widget.set_size(size);
        let applied = widget.size;
        self.port.set_size(id, applied);

        if applied == old {
            return true;
        }

        let group_info = self.store.get(id).and_then(|w| {
            w.as_group()
                .map(|g| (w.id.clone(), w.position, g.child_ids().to_vec()))
        });
        if let Some((group_id, origin, child_ids)) = group_info {
            let sx = if old.width.abs() > 1e-6 {
                applied.width / old.width
            } else {
                1.0
            };
            let sy = if old.height.abs() > 1e-6 {
                applied.height / old.height
            } else {
                1.0
            };

            for child_id in &child_ids {
                let Some((child_pos, child_size)) =
                    self.store.get(child_id).map(|c| (c.position, c.size))
                else {
                    tracing::warn!(
                        group = %group_id,
                        child = %child_id,
                        "group references missing child"
                    );
                    continue;
                };
                let new_pos = Point::new(
                    origin.x + (child_pos.x - origin.x) * sx,
                    origin.y + (child_pos.y - origin.y) * sy,
                );
                let new_size = Size::new(child_size.width * sx, child_size.height * sy);
                self.set_widget_position(child_id, new_pos);
                self.set_widget_size(child_id, new_size);
            }
            self.events.publish(DesignerEvent::GroupResized {
                id: group_id,
                size: applied,
                scale: (sx, sy),
                child_ids,
            });
        }
        true
    }

    pub fn set_widget_z_index(&mut self, id: &str, z_index: i32) -> bool {
        let Some(widget) = self.store.get_mut(id) else {
            tracing::warn!(widget_id = id, "z-index update for unknown widget");
            return false;
        };
        widget.set_z_index(z_index);
        self.port.set_z_index(id, z_index);
        self.store.bump_next_z(z_index);
        true
    }

    /// Sets or clears a widget's owning group. Grouped widgets lose
    /// pointer events and gain the grouped visual flag; freed widgets get
    /// both back.
    pub fn set_member_of(&mut self, id: &str, group_id: Option<WidgetId>) -> bool {
        let Some(widget) = self.store.get_mut(id) else {
            tracing::warn!(widget_id = id, "group membership update for unknown widget");
            return false;
        };
        let grouped = group_id.is_some();
        widget.group_id = group_id;
        widget.interactive = !grouped;
        self.port.set_interactive(id, !grouped);
        self.port.set_grouped(id, grouped);
        true
    }

    /// Exact geometry of every descendant of the groups among `ids`,
    /// parents before their descendants. Geometry commands snapshot this
    /// before touching a group so undo can restore children exactly:
    /// reversing the lockstep offset or scale alone reintroduces
    /// floating-point drift.
    pub fn group_descendant_geometry<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a WidgetId>,
    ) -> Vec<ChildGeometry> {
        fn walk(canvas: &Canvas, id: &str, out: &mut Vec<ChildGeometry>) {
            let Some(group) = canvas.widget(id).and_then(|w| w.as_group()) else {
                return;
            };
            for child_id in group.child_ids() {
                if let Some(child) = canvas.widget(child_id) {
                    out.push(ChildGeometry {
                        id: child_id.clone(),
                        position: child.position,
                        size: child.size,
                    });
                    walk(canvas, child_id, out);
                }
            }
        }

        let mut out = Vec::new();
        for id in ids {
            walk(self, id, &mut out);
        }
        out
    }

    /// Overwrites widget geometry with exact snapshots, in order (parents
    /// first, so descendant snapshots win over lockstep propagation).
    pub fn restore_geometry(&mut self, children: &[ChildGeometry]) {
        for child in children {
            self.set_widget_position(&child.id, child.position);
            self.set_widget_size(&child.id, child.size);
        }
    }

    /// Current logical rects of a group's children, skipping broken
    /// references.
    pub fn group_child_rects(&self, group_id: &str) -> Vec<Rect> {
        let Some(group) = self.store.get(group_id).and_then(|w| w.as_group()) else {
            return Vec::new();
        };
        group
            .child_ids()
            .iter()
            .filter_map(|id| self.store.get(id).map(|w| w.rect()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_ids(&self) -> Vec<WidgetId> {
        self.selection.selected_ids().to_vec()
    }

    pub fn reference_widget(&self) -> Option<WidgetId> {
        self.selection.reference_widget().cloned()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn select_widget(&mut self, id: &str, add_to_selection: bool) {
        self.selection
            .select_widget(&mut self.store, self.port.as_mut(), id, add_to_selection);
    }

    pub fn deselect_widget(&mut self, id: &str) {
        self.selection
            .deselect_widget(&mut self.store, self.port.as_mut(), id);
    }

    pub fn toggle_widget_selection(&mut self, id: &str) {
        self.selection
            .toggle_widget_selection(&mut self.store, self.port.as_mut(), id);
    }

    pub fn clear_selection(&mut self) {
        self.selection
            .clear_selection(&mut self.store, self.port.as_mut());
    }

    pub fn select_exact(&mut self, ids: &[WidgetId]) {
        self.selection
            .select_exact(&mut self.store, self.port.as_mut(), ids);
    }

    /// Selects everything, topmost widget as reference.
    pub fn select_all(&mut self) {
        let mut ids = self.store.ids_z_order();
        ids.reverse();
        self.select_exact(&ids);
    }

    pub fn set_on_selection_change(&mut self, callback: Box<dyn Fn(&[WidgetId])>) {
        self.selection.set_on_change(callback);
    }

    pub fn start_selection_box(&mut self, origin: Point) {
        self.selection
            .start_selection_box(self.port.as_mut(), origin);
    }

    pub fn update_selection_box(&mut self, current: Point, origin: Point) {
        self.selection
            .update_selection_box(self.port.as_mut(), current, origin);
    }

    pub fn end_selection_box(&mut self) -> Option<Rect> {
        self.selection.end_selection_box(self.port.as_mut())
    }

    pub fn select_widgets_in_rect(&mut self, rect: Rect, add_to_selection: bool) {
        self.selection.select_widgets_in_rect(
            &mut self.store,
            self.port.as_mut(),
            rect,
            add_to_selection,
        );
    }

    // ------------------------------------------------------------------
    // Preview mode
    // ------------------------------------------------------------------

    /// Preview mode hides the group interaction affordance icons without
    /// altering selection state.
    pub fn set_preview_mode(&mut self, preview: bool) {
        self.preview_mode = preview;
        for id in self.store.ids_z_order() {
            if self.store.get(&id).map(|w| w.is_group()).unwrap_or(false) {
                self.port.set_group_icon_visible(&id, !preview);
            }
        }
    }

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }
}
