//! Render port: the abstract visual surface the canvas mirrors every
//! model mutation onto.
//!
//! Command and selection logic never touch the rendering substrate
//! directly. A browser host backs this trait with DOM elements; tests and
//! native hosts use [`HeadlessPort`]. Concrete ports that cannot attach to
//! their host surface (missing container element, invalid template) must
//! fail fast at construction with `DesignerError::Structural` rather than
//! degrade.

use std::collections::HashMap;

use breakscreen_core::{Point, Rect, Size};

use crate::widget::WidgetData;

/// Per-widget visual operations plus the marquee rectangle.
pub trait RenderPort {
    /// Creates the visual element for a widget.
    fn mount(&mut self, data: &WidgetData);

    /// Removes a widget's visual element and releases its listeners.
    fn unmount(&mut self, id: &str);

    fn set_position(&mut self, id: &str, position: Point);

    fn set_size(&mut self, id: &str, size: Size);

    fn set_z_index(&mut self, id: &str, z_index: i32);

    /// Toggles the selection affordance class.
    fn set_selected(&mut self, id: &str, selected: bool);

    /// Enables or disables pointer events on the element.
    fn set_interactive(&mut self, id: &str, interactive: bool);

    /// Toggles the grouped-member visual flag.
    fn set_grouped(&mut self, id: &str, grouped: bool);

    /// Shows or hides a group's interaction affordance icon (hidden in
    /// preview mode; selection state is unaffected).
    fn set_group_icon_visible(&mut self, id: &str, visible: bool);

    /// Shows the marquee rectangle, or removes it when `None`.
    fn set_marquee(&mut self, rect: Option<Rect>);

    /// The actual on-screen rect of a widget. Can diverge transiently from
    /// the logical rect while the host animates; callers choose which to
    /// read deliberately.
    fn rendered_rect(&self, id: &str) -> Option<Rect>;
}

/// Mirrored visual state of one widget in a [`HeadlessPort`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortElement {
    pub rect: Rect,
    pub z_index: i32,
    pub selected: bool,
    pub interactive: bool,
    pub grouped: bool,
    pub group_icon_visible: bool,
}

/// In-memory render port for tests and non-browser hosts. Holds the state
/// a DOM implementation would push into element styles, and answers
/// `rendered_rect` from that mirror.
#[derive(Debug, Default)]
pub struct HeadlessPort {
    elements: HashMap<String, PortElement>,
    marquee: Option<Rect>,
}

impl HeadlessPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mirrored element state, if mounted.
    pub fn element(&self, id: &str) -> Option<&PortElement> {
        self.elements.get(id)
    }

    /// The marquee rectangle currently shown, if any.
    pub fn marquee(&self) -> Option<Rect> {
        self.marquee
    }

    pub fn mounted_count(&self) -> usize {
        self.elements.len()
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut PortElement> {
        let found = self.elements.get_mut(id);
        if found.is_none() {
            tracing::warn!(widget_id = id, "render port operation on unmounted widget");
        }
        found
    }
}

impl RenderPort for HeadlessPort {
    fn mount(&mut self, data: &WidgetData) {
        self.elements.insert(
            data.id.clone(),
            PortElement {
                rect: data.rect(),
                z_index: data.z_index,
                interactive: true,
                group_icon_visible: true,
                ..PortElement::default()
            },
        );
    }

    fn unmount(&mut self, id: &str) {
        self.elements.remove(id);
    }

    fn set_position(&mut self, id: &str, position: Point) {
        if let Some(el) = self.element_mut(id) {
            el.rect.x = position.x;
            el.rect.y = position.y;
        }
    }

    fn set_size(&mut self, id: &str, size: Size) {
        if let Some(el) = self.element_mut(id) {
            el.rect.width = size.width;
            el.rect.height = size.height;
        }
    }

    fn set_z_index(&mut self, id: &str, z_index: i32) {
        if let Some(el) = self.element_mut(id) {
            el.z_index = z_index;
        }
    }

    fn set_selected(&mut self, id: &str, selected: bool) {
        if let Some(el) = self.element_mut(id) {
            el.selected = selected;
        }
    }

    fn set_interactive(&mut self, id: &str, interactive: bool) {
        if let Some(el) = self.element_mut(id) {
            el.interactive = interactive;
        }
    }

    fn set_grouped(&mut self, id: &str, grouped: bool) {
        if let Some(el) = self.element_mut(id) {
            el.grouped = grouped;
        }
    }

    fn set_group_icon_visible(&mut self, id: &str, visible: bool) {
        if let Some(el) = self.element_mut(id) {
            el.group_icon_visible = visible;
        }
    }

    fn set_marquee(&mut self, rect: Option<Rect>) {
        self.marquee = rect;
    }

    fn rendered_rect(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).map(|el| el.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    #[test]
    fn test_mount_and_mutate() {
        let mut port = HeadlessPort::new();
        let data = factory::box_widget(Rect::new(10.0, 10.0, 50.0, 50.0));
        port.mount(&data);

        port.set_position(&data.id, Point::new(30.0, 40.0));
        port.set_z_index(&data.id, 9);
        port.set_selected(&data.id, true);

        let el = port.element(&data.id).unwrap();
        assert_eq!(el.rect, Rect::new(30.0, 40.0, 50.0, 50.0));
        assert_eq!(el.z_index, 9);
        assert!(el.selected);

        port.unmount(&data.id);
        assert!(port.rendered_rect(&data.id).is_none());
    }
}
