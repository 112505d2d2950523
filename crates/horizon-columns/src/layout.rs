//! Item sizing and row placement.
//!
//! Three mutually exclusive styles decide how wide each item is:
//!
//! | Style     | Item size                                      | Row            |
//! |-----------|------------------------------------------------|----------------|
//! | `Left`    | fixed default, or measured when adaptive       | fills container |
//! | `Center`  | same as `Left`                                 | centered when content is narrower |
//! | `Average` | even share of the usable width, floored at min | fills container |
//!
//! [`LayoutEngine`] is pure: it takes the configuration, item count and
//! container size and returns sizes, rectangles and the row frame. The
//! controller caches its results per reload.

use horizon_columns_core::logging::targets;
use horizon_columns_core::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::config::ColumnConfig;

/// Item size used by the `Left` and `Center` styles without adaptive sizing.
pub const DEFAULT_ITEM_SIZE: Size = Size::new(80.0, 40.0);

/// Default floor for item size in the `Average` style.
pub const DEFAULT_MIN_ITEM_SIZE: Size = Size::new(40.0, 40.0);

/// Whether two laid-out widths differ by more than f32 rounding noise.
///
/// Measured text produces fractional widths, so any real change counts.
pub fn widths_differ(a: f32, b: f32) -> bool {
    (a - b).abs() > f32::EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// How items are sized and the row is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    /// Items start at the leading edge.
    #[default]
    Left,
    /// Like `Left`, but a row narrower than its container is centered.
    Center,
    /// Items share the container width evenly.
    Average,
}

/// Horizontal frame of the row inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowFrame {
    /// The row spans the whole container.
    #[default]
    Fill,
    /// The row is `width` wide and centered in the container.
    Centered { width: f32 },
}

impl RowFrame {
    /// The row's displayed width in a container of `container_width`.
    pub fn width(&self, container_width: f32) -> f32 {
        match *self {
            Self::Fill => container_width,
            Self::Centered { width } => width.min(container_width),
        }
    }

    /// The row's leading x coordinate in a container of `container_width`.
    pub fn origin_x(&self, container_width: f32) -> f32 {
        ((container_width - self.width(container_width)) / 2.0).max(0.0)
    }

    /// Whether the row is re-anchored to the center.
    pub fn is_centered(&self) -> bool {
        matches!(self, Self::Centered { .. })
    }
}

/// Computes item sizes and positions for one layout style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutEngine {
    style: LayoutStyle,
}

impl LayoutEngine {
    /// Create an engine for `style`.
    pub fn new(style: LayoutStyle) -> Self {
        Self { style }
    }

    /// The style this engine lays out.
    pub fn style(&self) -> LayoutStyle {
        self.style
    }

    /// The per-item size shared by every item of a reload.
    ///
    /// In the `Average` style this is the even share of the usable width,
    /// floored at the minimum width, with the minimum height. Otherwise it
    /// is [`DEFAULT_ITEM_SIZE`]. With zero items the `Average` share is
    /// zero, which the floor lifts to the minimum.
    pub fn base_item_size(&self, config: &ColumnConfig, count: usize, container: Size) -> Size {
        match self.style {
            LayoutStyle::Left | LayoutStyle::Center => DEFAULT_ITEM_SIZE,
            LayoutStyle::Average => {
                let gaps = count.saturating_sub(1) as f32;
                let usable = container.width
                    - config.item_spacing * gaps
                    - config.padding.left
                    - config.padding.right;
                let share = if count > 0 { usable / count as f32 } else { 0.0 };
                let width = share.max(config.min_item_size.width);

                tracing::trace!(
                    target: targets::LAYOUT,
                    count,
                    usable,
                    share,
                    width,
                    "average item width"
                );

                Size::new(width, config.min_item_size.height)
            }
        }
    }

    /// Whether items should be sized from their renderer's measurement.
    pub fn uses_measurement(&self, config: &ColumnConfig) -> bool {
        config.adaptive_width && self.style != LayoutStyle::Average
    }

    /// Size for an adaptively measured item inside `bounds`.
    ///
    /// Width is the measured width; height fills the container minus the
    /// vertical padding.
    pub fn adaptive_size(&self, config: &ColumnConfig, measured: Size, bounds: Size) -> Size {
        let height = (bounds.height - config.padding.vertical()).max(0.0);
        Size::new(measured.width.max(0.0), height)
    }

    /// Lay out `sizes` left to right, starting at the leading padding.
    pub fn place(&self, config: &ColumnConfig, sizes: &[Size]) -> Vec<Rect> {
        let mut x = config.padding.left;
        sizes
            .iter()
            .map(|size| {
                let rect = Rect::new(x, config.padding.top, size.width, size.height);
                x += size.width + config.item_spacing;
                rect
            })
            .collect()
    }

    /// Total row width for `sizes`, padding included.
    pub fn content_width(&self, config: &ColumnConfig, sizes: &[Size]) -> f32 {
        let items: f32 = sizes.iter().map(|size| size.width).sum();
        let gaps = sizes.len().saturating_sub(1) as f32 * config.item_spacing;
        config.padding.left + items + gaps + config.padding.right
    }

    /// The row frame for content of `content_width` in a container of
    /// `container_width`.
    ///
    /// Only the `Center` style with content narrower than the container
    /// yields a centered frame.
    pub fn row_frame(&self, content_width: f32, container_width: f32) -> RowFrame {
        match self.style {
            LayoutStyle::Center if content_width < container_width => RowFrame::Centered {
                width: content_width,
            },
            _ => RowFrame::Fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_columns_core::Insets;

    const EPS: f32 = 1e-3;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_widths_differ_catches_sub_point_changes() {
        assert!(widths_differ(40.0, 40.4));
        assert!(widths_differ(300.25, 300.0));
        assert!(!widths_differ(40.0, 40.0));
        assert!(!widths_differ(0.1 + 0.2, 0.3));
        assert!(!widths_differ(1000.0, 1000.0 + f32::EPSILON));
    }

    #[test]
    fn test_average_three_items() {
        let engine = LayoutEngine::new(LayoutStyle::Average);
        let config = ColumnConfig::new().with_item_spacing(10.0);
        let size = engine.base_item_size(&config, 3, Size::new(300.0, 44.0));

        assert!(approx(size.width, 280.0 / 3.0));
        assert_eq!(size.height, 40.0);
    }

    #[test]
    fn test_average_single_item() {
        let engine = LayoutEngine::new(LayoutStyle::Average);
        let config = ColumnConfig::new().with_min_item_size(Size::new(100.0, 40.0));
        let size = engine.base_item_size(&config, 1, Size::new(300.0, 44.0));

        assert_eq!(size.width, 300.0);
    }

    #[test]
    fn test_average_floors_at_min_width() {
        let engine = LayoutEngine::new(LayoutStyle::Average);
        let config = ColumnConfig::new()
            .with_item_spacing(4.0)
            .with_padding(Insets::symmetric(10.0, 0.0))
            .with_min_item_size(Size::new(60.0, 36.0));
        let container = Size::new(200.0, 44.0);
        let size = engine.base_item_size(&config, 5, container);

        assert_eq!(size, Size::new(60.0, 36.0));

        // Floored rows overflow the container and scroll.
        let sizes = vec![size; 5];
        assert!(engine.content_width(&config, &sizes) > container.width);
    }

    #[test]
    fn test_average_padding_reduces_share() {
        let engine = LayoutEngine::new(LayoutStyle::Average);
        let config = ColumnConfig::new()
            .with_item_spacing(10.0)
            .with_padding(Insets::new(20.0, 0.0, 20.0, 0.0));
        let size = engine.base_item_size(&config, 2, Size::new(300.0, 44.0));

        assert!(approx(size.width, (300.0 - 10.0 - 40.0) / 2.0));
    }

    #[test]
    fn test_zero_items() {
        let config = ColumnConfig::default();
        for style in [LayoutStyle::Left, LayoutStyle::Center, LayoutStyle::Average] {
            let engine = LayoutEngine::new(style);
            let size = engine.base_item_size(&config, 0, Size::new(300.0, 44.0));
            assert!(size.width.is_finite());
            assert!(engine.place(&config, &[]).is_empty());
        }
    }

    #[test]
    fn test_left_and_center_use_default_size() {
        let config = ColumnConfig::new().with_item_spacing(10.0);
        for style in [LayoutStyle::Left, LayoutStyle::Center] {
            let engine = LayoutEngine::new(style);
            assert_eq!(
                engine.base_item_size(&config, 7, Size::new(300.0, 44.0)),
                DEFAULT_ITEM_SIZE
            );
        }
    }

    #[test]
    fn test_measurement_only_outside_average() {
        let adaptive = ColumnConfig::new().with_adaptive_width(true);
        assert!(LayoutEngine::new(LayoutStyle::Left).uses_measurement(&adaptive));
        assert!(LayoutEngine::new(LayoutStyle::Center).uses_measurement(&adaptive));
        assert!(!LayoutEngine::new(LayoutStyle::Average).uses_measurement(&adaptive));
        assert!(!LayoutEngine::new(LayoutStyle::Left).uses_measurement(&ColumnConfig::default()));
    }

    #[test]
    fn test_adaptive_size_clamps_height() {
        let engine = LayoutEngine::new(LayoutStyle::Left);
        let config = ColumnConfig::new().with_padding(Insets::new(0.0, 6.0, 0.0, 4.0));
        let size = engine.adaptive_size(&config, Size::new(57.0, 200.0), Size::new(320.0, 44.0));
        assert_eq!(size, Size::new(57.0, 34.0));

        let squashed = engine.adaptive_size(&config, Size::new(57.0, 20.0), Size::new(320.0, 8.0));
        assert_eq!(squashed.height, 0.0);
    }

    #[test]
    fn test_place_and_content_width() {
        let engine = LayoutEngine::new(LayoutStyle::Left);
        let config = ColumnConfig::new()
            .with_item_spacing(5.0)
            .with_padding(Insets::new(8.0, 2.0, 12.0, 2.0));
        let sizes = [Size::new(30.0, 40.0), Size::new(50.0, 40.0), Size::new(20.0, 40.0)];

        let rects = engine.place(&config, &sizes);
        assert_eq!(rects[0], Rect::new(8.0, 2.0, 30.0, 40.0));
        assert_eq!(rects[1], Rect::new(43.0, 2.0, 50.0, 40.0));
        assert_eq!(rects[2], Rect::new(98.0, 2.0, 20.0, 40.0));

        assert_eq!(engine.content_width(&config, &sizes), 8.0 + 100.0 + 10.0 + 12.0);
        assert_eq!(engine.content_width(&config, &[]), 20.0);
    }

    #[test]
    fn test_center_row_frame() {
        let engine = LayoutEngine::new(LayoutStyle::Center);

        let narrow = engine.row_frame(180.0, 300.0);
        assert_eq!(narrow, RowFrame::Centered { width: 180.0 });
        assert_eq!(narrow.width(300.0), 180.0);
        assert_eq!(narrow.origin_x(300.0), 60.0);

        let wide = engine.row_frame(420.0, 300.0);
        assert_eq!(wide, RowFrame::Fill);
        assert_eq!(wide.width(300.0), 300.0);
        assert_eq!(wide.origin_x(300.0), 0.0);

        assert_eq!(engine.row_frame(300.0, 300.0), RowFrame::Fill);
    }

    #[test]
    fn test_other_styles_always_fill() {
        for style in [LayoutStyle::Left, LayoutStyle::Average] {
            assert_eq!(LayoutEngine::new(style).row_frame(10.0, 300.0), RowFrame::Fill);
        }
    }

    #[test]
    fn test_style_serde() {
        let style: LayoutStyle = serde_json::from_str("\"center\"").unwrap();
        assert_eq!(style, LayoutStyle::Center);
        assert_eq!(serde_json::to_string(&LayoutStyle::Average).unwrap(), "\"average\"");
    }
}
