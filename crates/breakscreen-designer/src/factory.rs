//! Widget factory: id generation, construction of live widgets from
//! serialized records, convenience constructors per kind, and the lenient
//! decoder that tolerates unknown widget types.

use chrono::Utc;
use uuid::Uuid;

use breakscreen_core::{Point, Rect, Size, WidgetId};

use crate::widget::{
    BoxWidget, GroupWidget, ImageWidget, QrWidget, TextWidget, Widget, WidgetBehavior,
    WidgetData, WidgetProperties,
};

/// Generates a fresh widget id in the `widget-{timestamp}-{random}`
/// pattern. Unique enough for interactive use, not cryptographically so.
pub fn generate_widget_id() -> WidgetId {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("widget-{}-{}", millis, &suffix[..8])
}

/// Builds a live widget from a serialized record.
pub fn create_widget(data: WidgetData) -> Widget {
    Widget::from_data(data)
}

/// Decodes one widget record from raw JSON, falling back to a minimal
/// base (box) widget when the `type` tag is unknown or the payload is
/// malformed. Never fails for object-shaped input; a non-object entry is
/// dropped with a warning.
pub fn widget_data_lenient(value: &serde_json::Value) -> Option<WidgetData> {
    if let Ok(data) = serde_json::from_value::<WidgetData>(value.clone()) {
        return Some(data);
    }

    let Some(obj) = value.as_object() else {
        tracing::warn!("dropping non-object widget entry: {}", value);
        return None;
    };

    let id = obj
        .get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(generate_widget_id);
    let position: Point = obj
        .get("position")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    let size: Size = obj
        .get("size")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_else(|| Size::new(100.0, 100.0));
    let z_index = obj.get("zIndex").and_then(|v| v.as_i64()).unwrap_or(0) as i32;
    let kind = obj
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("<missing>");

    tracing::warn!(
        widget_id = %id,
        kind,
        "unknown widget type, falling back to base widget"
    );

    Some(WidgetData {
        id,
        position,
        size,
        z_index,
        properties: WidgetProperties::Box(BoxWidget::default()),
    })
}

/// A box widget covering `rect`, with default visuals.
pub fn box_widget(rect: Rect) -> WidgetData {
    WidgetData {
        id: generate_widget_id(),
        position: rect.position(),
        size: rect.size(),
        z_index: 0,
        properties: WidgetProperties::Box(BoxWidget::default()),
    }
}

/// A text widget covering `rect`.
pub fn text_widget(rect: Rect, text: &str) -> WidgetData {
    WidgetData {
        id: generate_widget_id(),
        position: rect.position(),
        size: rect.size(),
        z_index: 0,
        properties: WidgetProperties::Text(TextWidget {
            text: text.to_string(),
            ..TextWidget::default()
        }),
    }
}

/// A square QR widget at `position`. The side is clamped through the
/// variant, so callers cannot request a sub-minimum panel.
pub fn qr_widget(position: Point, side: f64, image_url: &str) -> WidgetData {
    let qr = QrWidget {
        image_url: image_url.to_string(),
    };
    let size = qr.clamp_size(Size::new(side, side));
    WidgetData {
        id: generate_widget_id(),
        position,
        size,
        z_index: 0,
        properties: WidgetProperties::Qr(qr),
    }
}

/// An image widget covering `rect`.
pub fn image_widget(rect: Rect, image_url: &str) -> WidgetData {
    WidgetData {
        id: generate_widget_id(),
        position: rect.position(),
        size: rect.size(),
        z_index: 0,
        properties: WidgetProperties::Image(ImageWidget {
            image_url: image_url.to_string(),
        }),
    }
}

/// A group widget over the given children. The bounding rect derives from
/// the child rects per the padding/minimum-size rule.
pub fn group_widget(
    id: WidgetId,
    child_ids: Vec<WidgetId>,
    child_rects: &[Rect],
    z_index: i32,
) -> WidgetData {
    let bounds = GroupWidget::compute_bounds(child_rects);
    WidgetData {
        id,
        position: bounds.position(),
        size: bounds.size(),
        z_index,
        properties: WidgetProperties::Group(GroupWidget::new(child_ids)),
    }
}
