//! Widget model: the closed set of widget variants and the live widget
//! object the canvas manipulates.
//!
//! `WidgetData` is the plain serializable record exchanged with the host
//! (layout load/save, clipboard). A live [`Widget`] carries the same data
//! plus runtime flags (`selected`, `interactive`, owning group) that never
//! serialize. Type-specific behavior (the QR square constraint, group child
//! management) lives in the variant structs and is dispatched through
//! [`WidgetProperties`], not inheritance chains.

use serde::{Deserialize, Serialize};

use breakscreen_core::{Point, Rect, Size, WidgetId};

mod box_widget;
mod group;
mod image;
mod qr;
mod text;

pub use box_widget::BoxWidget;
pub use group::{GroupWidget, DEFAULT_GROUP_SIZE};
pub use image::ImageWidget;
pub use qr::QrWidget;
pub use text::TextWidget;

/// Widget kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Box,
    Text,
    Qr,
    Image,
    Group,
}

impl WidgetKind {
    /// Kind as the wire-format tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Box => "box",
            WidgetKind::Text => "text",
            WidgetKind::Qr => "qr",
            WidgetKind::Image => "image",
            WidgetKind::Group => "group",
        }
    }
}

/// Variant-specific behavior hooks.
pub trait WidgetBehavior {
    /// The kind tag of this variant.
    fn kind(&self) -> WidgetKind;

    /// Clamp a requested size to the variant's constraints. The default
    /// accepts the request unchanged.
    fn clamp_size(&self, requested: Size) -> Size {
        requested
    }
}

/// Type-specific payload, serialized as
/// `{"type": "...", "properties": {...}}` next to the common fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum WidgetProperties {
    Box(BoxWidget),
    Text(TextWidget),
    Qr(QrWidget),
    Image(ImageWidget),
    Group(GroupWidget),
}

impl WidgetBehavior for WidgetProperties {
    fn kind(&self) -> WidgetKind {
        match self {
            WidgetProperties::Box(w) => w.kind(),
            WidgetProperties::Text(w) => w.kind(),
            WidgetProperties::Qr(w) => w.kind(),
            WidgetProperties::Image(w) => w.kind(),
            WidgetProperties::Group(w) => w.kind(),
        }
    }

    fn clamp_size(&self, requested: Size) -> Size {
        match self {
            WidgetProperties::Box(w) => w.clamp_size(requested),
            WidgetProperties::Text(w) => w.clamp_size(requested),
            WidgetProperties::Qr(w) => w.clamp_size(requested),
            WidgetProperties::Image(w) => w.clamp_size(requested),
            WidgetProperties::Group(w) => w.clamp_size(requested),
        }
    }
}

/// The serializable widget record. Group `childIds` round-trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetData {
    pub id: WidgetId,
    pub position: Point,
    pub size: Size,
    pub z_index: i32,
    #[serde(flatten)]
    pub properties: WidgetProperties,
}

impl WidgetData {
    /// Kind tag of this record.
    pub fn kind(&self) -> WidgetKind {
        self.properties.kind()
    }

    /// Logical bounding rect.
    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }
}

/// A live widget on the canvas.
///
/// Owned exclusively by the canvas widget store; every other component
/// holds ids or [`WidgetData`] copies.
#[derive(Debug, Clone)]
pub struct Widget {
    pub id: WidgetId,
    pub position: Point,
    pub size: Size,
    pub z_index: i32,
    /// Selection affordance flag, mirrored to the render port.
    pub selected: bool,
    /// Pointer-events flag. Disabled while the widget is grouped.
    pub interactive: bool,
    /// The group this widget currently belongs to, if any. Runtime-only;
    /// reconstructed from group `childIds` on layout load.
    pub group_id: Option<WidgetId>,
    pub properties: WidgetProperties,
}

impl Widget {
    /// Builds a live widget from its serialized record. Sizes are clamped
    /// through the variant on the way in, so a hand-edited layout cannot
    /// smuggle in a non-square QR widget.
    pub fn from_data(data: WidgetData) -> Self {
        let size = data.properties.clamp_size(data.size);
        Self {
            id: data.id,
            position: data.position,
            size,
            z_index: data.z_index,
            selected: false,
            interactive: true,
            group_id: None,
            properties: data.properties,
        }
    }

    /// Defensive copy of the logical record.
    pub fn data(&self) -> WidgetData {
        WidgetData {
            id: self.id.clone(),
            position: self.position,
            size: self.size,
            z_index: self.z_index,
            properties: self.properties.clone(),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.properties.kind()
    }

    /// Logical bounding rect. The rendered rect, which can diverge
    /// transiently during host animations, is read through the render port
    /// (`Canvas::widget_rect` with `use_rendered = true`).
    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Applies a size, clamped by the variant (QR stays square with a
    /// 10 px floor, groups keep their minimum).
    pub fn set_size(&mut self, size: Size) {
        self.size = self.properties.clamp_size(size);
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    pub fn is_group(&self) -> bool {
        matches!(self.properties, WidgetProperties::Group(_))
    }

    pub fn as_group(&self) -> Option<&GroupWidget> {
        match &self.properties {
            WidgetProperties::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupWidget> {
        match &mut self.properties {
            WidgetProperties::Group(g) => Some(g),
            _ => None,
        }
    }
}
