//! Manages widget selection state and selection operations.
//!
//! # Selection Model
//!
//! - Selection is an *ordered* id list; the first element is the
//!   **reference widget**, the anchor for align and make-same-size
//!   operations.
//! - Additively selecting an already-selected widget promotes it to
//!   reference (removed and re-added as the new first element) instead of
//!   toggling it off.
//! - Marquee (rubber-band) selection selects every interactive widget
//!   whose bounding rect intersects the dragged rectangle;
//!   boundary-touching counts as intersecting.
//!
//! Every mutating call triggers both the bus `SelectionChanged` event and
//! the direct callback, carrying the full ordered id list. Consumers must
//! treat that list as the sole source of truth for what is selected.

use smallvec::SmallVec;

use breakscreen_core::{DesignerEvent, EventBus, Point, Rect, WidgetId};

use crate::render_port::RenderPort;
use crate::widget_store::WidgetStore;

type SelectionCallback = Box<dyn Fn(&[WidgetId])>;

pub struct SelectionManager {
    order: SmallVec<[WidgetId; 8]>,
    active_box: Option<Rect>,
    events: EventBus,
    on_change: Option<SelectionCallback>,
}

impl SelectionManager {
    /// Creates a manager with no selection, publishing on `events`.
    pub fn new(events: EventBus) -> Self {
        Self {
            order: SmallVec::new(),
            active_box: None,
            events,
            on_change: None,
        }
    }

    /// The ordered selection; index 0 is the reference widget.
    pub fn selected_ids(&self) -> &[WidgetId] {
        &self.order
    }

    pub fn reference_widget(&self) -> Option<&WidgetId> {
        self.order.first()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.order.iter().any(|s| s == id)
    }

    pub fn selected_count(&self) -> usize {
        self.order.len()
    }

    /// Registers the direct notification callback, invoked alongside the
    /// bus event on every mutation.
    pub fn set_on_change(&mut self, callback: SelectionCallback) {
        self.on_change = Some(callback);
    }

    /// Selects a widget. Non-additive selection clears the rest first;
    /// additive re-selection promotes the widget to reference.
    pub fn select_widget(
        &mut self,
        store: &mut WidgetStore,
        port: &mut dyn RenderPort,
        id: &str,
        add_to_selection: bool,
    ) {
        if !store.contains(id) {
            tracing::warn!(widget_id = id, "selecting unknown widget, ignored");
            return;
        }
        self.select_widget_inner(store, port, id, add_to_selection);
        self.notify();
    }

    pub fn deselect_widget(&mut self, store: &mut WidgetStore, port: &mut dyn RenderPort, id: &str) {
        if let Some(pos) = self.order.iter().position(|s| s == id) {
            self.order.remove(pos);
            self.sync_flag(store, port, id, false);
            self.notify();
        }
    }

    /// Selects or deselects based on current membership.
    pub fn toggle_widget_selection(
        &mut self,
        store: &mut WidgetStore,
        port: &mut dyn RenderPort,
        id: &str,
    ) {
        if self.is_selected(id) {
            self.deselect_widget(store, port, id);
        } else {
            self.select_widget(store, port, id, true);
        }
    }

    pub fn clear_selection(&mut self, store: &mut WidgetStore, port: &mut dyn RenderPort) {
        self.clear_inner(store, port);
        self.notify();
    }

    /// Replaces the selection wholesale with `ids` (in order), dropping
    /// ids that are not in the store. Used by commands to report their
    /// resulting selection.
    pub fn select_exact(
        &mut self,
        store: &mut WidgetStore,
        port: &mut dyn RenderPort,
        ids: &[WidgetId],
    ) {
        self.clear_inner(store, port);
        for id in ids {
            if store.contains(id) && !self.is_selected(id) {
                self.order.push(id.clone());
                self.sync_flag(store, port, id, true);
            }
        }
        self.notify();
    }

    /// Starts the marquee rectangle at `origin`.
    pub fn start_selection_box(&mut self, port: &mut dyn RenderPort, origin: Point) {
        let rect = Rect::from_points(origin, origin);
        self.active_box = Some(rect);
        port.set_marquee(Some(rect));
    }

    /// Resizes the marquee: top-left is the componentwise minimum of the
    /// two points, dimensions their absolute differences.
    pub fn update_selection_box(
        &mut self,
        port: &mut dyn RenderPort,
        current: Point,
        origin: Point,
    ) {
        if self.active_box.is_none() {
            return;
        }
        let rect = Rect::from_points(origin, current);
        self.active_box = Some(rect);
        port.set_marquee(Some(rect));
    }

    /// Removes the marquee visual and returns its final rect, or `None`
    /// if no marquee was active.
    pub fn end_selection_box(&mut self, port: &mut dyn RenderPort) -> Option<Rect> {
        let rect = self.active_box.take();
        if rect.is_some() {
            port.set_marquee(None);
        }
        rect
    }

    /// Whether a marquee gesture is in progress.
    pub fn selection_box_active(&self) -> bool {
        self.active_box.is_some()
    }

    /// Selects every interactive widget intersecting `rect` (AABB test;
    /// touching counts), preserving/extending the reference-widget rule.
    pub fn select_widgets_in_rect(
        &mut self,
        store: &mut WidgetStore,
        port: &mut dyn RenderPort,
        rect: Rect,
        add_to_selection: bool,
    ) {
        if !add_to_selection {
            self.clear_inner(store, port);
        }

        for id in store.ids_z_order() {
            let Some(widget) = store.get(&id) else {
                continue;
            };
            // Grouped children have pointer events disabled; the marquee
            // picks up their group shell instead.
            if !widget.interactive {
                continue;
            }
            if rect.intersects(&widget.rect()) {
                self.select_widget_inner(store, port, &id, true);
            }
        }

        self.notify();
    }

    fn select_widget_inner(
        &mut self,
        store: &mut WidgetStore,
        port: &mut dyn RenderPort,
        id: &str,
        add_to_selection: bool,
    ) {
        if !add_to_selection {
            self.clear_inner(store, port);
        }
        if let Some(pos) = self.order.iter().position(|s| s == id) {
            // Already selected: promote to reference.
            let id = self.order.remove(pos);
            self.order.insert(0, id);
        } else {
            self.order.push(id.to_string());
            self.sync_flag(store, port, id, true);
        }
    }

    fn clear_inner(&mut self, store: &mut WidgetStore, port: &mut dyn RenderPort) {
        let ids: Vec<WidgetId> = self.order.drain(..).collect();
        for id in &ids {
            self.sync_flag(store, port, id, false);
        }
    }

    fn sync_flag(
        &self,
        store: &mut WidgetStore,
        port: &mut dyn RenderPort,
        id: &str,
        selected: bool,
    ) {
        if let Some(widget) = store.get_mut(id) {
            widget.selected = selected;
            port.set_selected(id, selected);
        }
    }

    fn notify(&self) {
        let ids: Vec<WidgetId> = self.order.to_vec();
        if let Some(callback) = &self.on_change {
            callback(&ids);
        }
        self.events.publish(DesignerEvent::SelectionChanged { ids });
    }
}
