//! Layout exchange: hydrating the canvas from `WidgetData[]` and
//! exporting it back, plus the JSON layout-file format.
//!
//! Group `childIds` round-trip exactly. Decoding is lenient per widget:
//! an unknown type tag falls back to a base widget through the factory
//! rather than failing the whole layout.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::designer::Designer;
use crate::factory;
use crate::widget::{Widget, WidgetData, WidgetProperties};

/// Layout file format version.
const LAYOUT_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout JSON is not an array of widgets")]
    NotAnArray,

    #[error("layout parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Layout metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Complete layout file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    pub metadata: LayoutMetadata,
    pub widgets: Vec<WidgetData>,
}

impl LayoutFile {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            version: LAYOUT_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
            },
            widgets: Vec::new(),
        }
    }

    /// Writes the layout as pretty JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("writing layout to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Reads a layout file, decoding widgets leniently.
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<LayoutFile> {
        let json = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading layout from {}", path.as_ref().display()))?;

        #[derive(Deserialize)]
        struct RawLayoutFile {
            version: String,
            metadata: LayoutMetadata,
            widgets: Vec<serde_json::Value>,
        }

        let raw: RawLayoutFile = serde_json::from_str(&json)?;
        Ok(LayoutFile {
            version: raw.version,
            metadata: raw.metadata,
            widgets: raw
                .widgets
                .iter()
                .filter_map(factory::widget_data_lenient)
                .collect(),
        })
    }
}

/// Decodes a JSON array of widget records, leniently per entry.
pub fn widgets_from_json(json: &str) -> Result<Vec<WidgetData>, LayoutError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let Some(entries) = value.as_array() else {
        return Err(LayoutError::NotAnArray);
    };
    Ok(entries.iter().filter_map(factory::widget_data_lenient).collect())
}

/// Encodes widget records as a JSON array.
pub fn widgets_to_json(widgets: &[WidgetData]) -> Result<String, LayoutError> {
    Ok(serde_json::to_string(widgets)?)
}

impl Designer {
    /// The current widget collection as serializable records, in paint
    /// order.
    pub fn export_layout(&self) -> Vec<WidgetData> {
        self.canvas
            .ids_z_order()
            .into_iter()
            .filter_map(|id| self.canvas.widget_data(&id))
            .collect()
    }

    /// Hydrates the canvas from widget records: clears live widgets and
    /// history, mounts each record, restores grouped-children
    /// interactivity from group `childIds`, and advances the z counter
    /// past the maximum. Duplicate ids: the record painted first (lowest
    /// z-index) wins; the rest are skipped with a warning.
    pub fn load_layout(&mut self, items: &[WidgetData]) {
        self.canvas.clear();
        self.clear_history();

        let mut ordered: Vec<&WidgetData> = items.iter().collect();
        ordered.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));

        for item in ordered {
            if let Err(err) = self.canvas.insert_widget(Widget::from_data(item.clone())) {
                tracing::warn!(widget_id = %item.id, %err, "skipping layout record");
            }
        }

        // Re-link group membership now that every record is live.
        for item in items {
            let WidgetProperties::Group(group) = &item.properties else {
                continue;
            };
            for child_id in group.child_ids() {
                if child_id == &item.id {
                    tracing::warn!(group = %item.id, "group lists itself as a child, skipping");
                    continue;
                }
                if self.canvas.contains_widget(child_id) {
                    self.canvas.set_member_of(child_id, Some(item.id.clone()));
                } else {
                    tracing::warn!(
                        group = %item.id,
                        child = %child_id,
                        "layout group references missing child"
                    );
                }
            }
        }
    }

    /// Saves the current layout under `name`.
    pub fn save_layout_to_file(&self, name: &str, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = LayoutFile::new(name);
        file.widgets = self.export_layout();
        file.save_to_file(path)
    }

    /// Replaces the current layout with the contents of a layout file.
    pub fn load_layout_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = LayoutFile::load_from_file(path)?;
        self.load_layout(&file.widgets);
        Ok(())
    }
}
