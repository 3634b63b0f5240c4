use serde::{Deserialize, Serialize};

use super::{WidgetBehavior, WidgetKind};

/// A colored rectangle, the backdrop building block of an overlay layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxWidget {
    pub background_color: String,
    pub border_radius: f64,
}

impl Default for BoxWidget {
    fn default() -> Self {
        Self {
            background_color: "#333333".to_string(),
            border_radius: 0.0,
        }
    }
}

impl WidgetBehavior for BoxWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Box
    }
}
