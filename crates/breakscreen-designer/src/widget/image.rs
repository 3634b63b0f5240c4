use serde::{Deserialize, Serialize};

use super::{WidgetBehavior, WidgetKind};

/// A free-form image widget. The URL is an opaque string supplied by the
/// host's storage layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageWidget {
    pub image_url: String,
}

impl WidgetBehavior for ImageWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Image
    }
}
