use serde::{Deserialize, Serialize};

use breakscreen_core::constants::MIN_QR_SIZE;
use breakscreen_core::Size;

use super::{WidgetBehavior, WidgetKind};

/// A QR-code panel. The image itself is produced server-side; the designer
/// only places the panel and keeps it scannable: always square, never
/// below the minimum side length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrWidget {
    pub image_url: String,
}

impl WidgetBehavior for QrWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Qr
    }

    /// Any (w, h) request collapses to a square of side `max(w, h)`,
    /// floored at [`MIN_QR_SIZE`].
    fn clamp_size(&self, requested: Size) -> Size {
        let side = requested.width.max(requested.height).max(MIN_QR_SIZE);
        Size::new(side, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_square() {
        let qr = QrWidget::default();
        assert_eq!(
            qr.clamp_size(Size::new(120.0, 80.0)),
            Size::new(120.0, 120.0)
        );
        assert_eq!(
            qr.clamp_size(Size::new(30.0, 90.0)),
            Size::new(90.0, 90.0)
        );
    }

    #[test]
    fn test_clamp_floors_at_minimum() {
        let qr = QrWidget::default();
        assert_eq!(qr.clamp_size(Size::new(2.0, 4.0)), Size::new(10.0, 10.0));
        assert_eq!(qr.clamp_size(Size::new(0.0, 0.0)), Size::new(10.0, 10.0));
    }
}
