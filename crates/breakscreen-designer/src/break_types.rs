//! Break-type metadata and the default layout seeded for a new design.
//!
//! The metadata record comes from the host's break-type service; the
//! designer consumes it as plain strings and numbers, never parsing the
//! message templates or URLs.

use serde::{Deserialize, Serialize};

use breakscreen_core::{Point, Rect};

use crate::factory;
use crate::widget::{TextWidget, WidgetData, WidgetProperties};

/// Canvas extent the default layouts are composed for.
const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Per-break-type metadata supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakTypeMeta {
    pub name: String,
    pub background_image_url: String,
    pub countdown_message: String,
    pub end_message: String,
    pub duration_seconds: u32,
}

/// Builds the starting layout for a break type: a full-canvas backdrop,
/// the break title, the countdown message template, and a QR panel in the
/// bottom-right corner. Widgets are returned bottom-to-top; z-indices are
/// assigned when the records are added to a designer.
pub fn default_layout(meta: &BreakTypeMeta) -> Vec<WidgetData> {
    let mut widgets = Vec::new();

    let mut backdrop = factory::box_widget(Rect::new(
        0.0,
        0.0,
        DEFAULT_CANVAS_WIDTH,
        DEFAULT_CANVAS_HEIGHT,
    ));
    if let WidgetProperties::Box(properties) = &mut backdrop.properties {
        properties.background_color = "#1b1b1bcc".to_string();
    }
    widgets.push(backdrop);

    if !meta.background_image_url.is_empty() {
        widgets.push(factory::image_widget(
            Rect::new(0.0, 0.0, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            &meta.background_image_url,
        ));
    }

    let mut title = factory::text_widget(Rect::new(150.0, 120.0, 500.0, 80.0), &meta.name);
    if let WidgetProperties::Text(properties) = &mut title.properties {
        properties.font = "sans-serif".to_string();
    }
    widgets.push(title);

    let countdown = WidgetData {
        properties: WidgetProperties::Text(TextWidget {
            text: meta.countdown_message.clone(),
            template: meta.countdown_message.clone(),
            font: "monospace".to_string(),
        }),
        ..factory::text_widget(Rect::new(150.0, 240.0, 500.0, 120.0), "")
    };
    widgets.push(countdown);

    widgets.push(factory::qr_widget(
        Point::new(DEFAULT_CANVAS_WIDTH - 140.0, DEFAULT_CANVAS_HEIGHT - 140.0),
        120.0,
        "",
    ));

    widgets
}
