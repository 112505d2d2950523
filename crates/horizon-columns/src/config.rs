//! Column view configuration.
//!
//! [`ColumnConfig`] holds the tunables a host sets on a column view: spacing,
//! padding, the minimum item size, adaptive sizing and the separator line.
//! It can be built in code or loaded from TOML/JSON.
//!
//! ```
//! use horizon_columns::ColumnConfig;
//!
//! let config = ColumnConfig::from_toml_str(r##"
//! item_spacing = 10.0
//! adaptive_width = true
//!
//! [padding]
//! left = 16.0
//! right = 16.0
//!
//! [separator]
//! color = "#DDDDDD"
//! "##).unwrap();
//!
//! assert_eq!(config.item_spacing, 10.0);
//! assert_eq!(config.min_item_size.width, 40.0);
//! ```

use std::path::Path;

use horizon_columns_core::logging::targets;
use horizon_columns_core::{Color, Insets, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::{ColumnError, Result};
use crate::layout::DEFAULT_MIN_ITEM_SIZE;

/// The hairline drawn along the bottom edge of the row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separator {
    /// Line color.
    pub color: Color,
    /// Whether the line is drawn at all.
    pub visible: bool,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            color: Color::LIGHT_GRAY,
            visible: true,
        }
    }
}

impl Separator {
    /// Line thickness in logical points: one physical pixel.
    pub fn thickness(scale_factor: f32) -> f32 {
        if scale_factor > 0.0 {
            1.0 / scale_factor
        } else {
            1.0
        }
    }

    /// The rectangle the separator occupies inside a row of the given size.
    ///
    /// Returns `None` when the separator is hidden.
    pub fn rect(&self, bounds: Size, scale_factor: f32) -> Option<Rect> {
        if !self.visible {
            return None;
        }
        let thickness = Self::thickness(scale_factor);
        Some(Rect::new(
            0.0,
            bounds.height - thickness,
            bounds.width,
            thickness,
        ))
    }
}

/// Layout and appearance settings for a column view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Gap between adjacent items.
    pub item_spacing: f32,
    /// Size left/center items from their renderer's measured content.
    pub adaptive_width: bool,
    /// Leading/trailing (and top/bottom) inset of the whole row.
    pub padding: Insets,
    /// Floor for item width in the average style; item height in that style.
    pub min_item_size: Size,
    /// Bottom separator line.
    pub separator: Separator,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            item_spacing: 0.0,
            adaptive_width: false,
            padding: Insets::ZERO,
            min_item_size: DEFAULT_MIN_ITEM_SIZE,
            separator: Separator::default(),
        }
    }
}

impl ColumnConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item spacing.
    pub fn with_item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Sets the row padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the minimum item size.
    pub fn with_min_item_size(mut self, size: Size) -> Self {
        self.min_item_size = size;
        self
    }

    /// Enables or disables adaptive item widths.
    pub fn with_adaptive_width(mut self, adaptive: bool) -> Self {
        self.adaptive_width = adaptive;
        self
    }

    /// Sets the separator line.
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a configuration from JSON text. Missing keys take defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let text = std::fs::read_to_string(path).map_err(|err| ColumnError::io(path, err))?;
        let config = match extension.as_str() {
            "toml" => Self::from_toml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ColumnError::UnsupportedFormat { extension }),
        };

        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded column config");
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
