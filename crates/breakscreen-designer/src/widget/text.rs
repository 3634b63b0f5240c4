use serde::{Deserialize, Serialize};

use super::{WidgetBehavior, WidgetKind};

/// A text widget. `template` may contain countdown placeholders
/// (e.g. `{timer}`) that the overlay runtime substitutes each tick; the
/// designer treats both fields as opaque strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextWidget {
    pub text: String,
    pub template: String,
    pub font: String,
}

impl Default for TextWidget {
    fn default() -> Self {
        Self {
            text: "Text".to_string(),
            template: String::new(),
            font: "sans-serif".to_string(),
        }
    }
}

impl WidgetBehavior for TextWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }
}
