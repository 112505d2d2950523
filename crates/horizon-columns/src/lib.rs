//! Horizon Columns: a horizontally scrolling column selector.
//!
//! A column view shows a row of variable-width tabs or segments, backed by
//! a host list surface. Items come from a host data source, each item type
//! is drawn by a registered renderer type, and taps are forwarded to a
//! host delegate.
//!
//! Three layout styles are available:
//!
//! - [`LayoutStyle::Left`]: items start at the leading edge
//! - [`LayoutStyle::Center`]: a row narrower than its container is centered
//! - [`LayoutStyle::Average`]: items share the container width evenly
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_columns::model::{ColumnDataSource, ColumnItem, ItemRenderer};
//! use horizon_columns::{ColumnConfig, ColumnView, HeadlessSurface, LayoutStyle, Property, Size};
//!
//! struct Tab { title: String, selected: Property<bool> }
//!
//! impl ColumnItem<bool> for Tab {
//!     fn name(&self) -> &str { &self.title }
//!     fn state(&self) -> bool { self.selected.get() }
//!     fn set_state(&self, state: bool) { self.selected.set(state); }
//! }
//!
//! #[derive(Default)]
//! struct TabCell { title: String }
//!
//! impl ItemRenderer<bool> for TabCell {
//!     fn load_data(&mut self, item: &dyn ColumnItem<bool>) { self.title = item.name().into(); }
//!     fn update_state(&mut self, _selected: &bool) {}
//!     fn measure(item: &dyn ColumnItem<bool>) -> Size {
//!         Size::new(item.name().len() as f32 * 10.0, 30.0)
//!     }
//! }
//!
//! struct Tabs(Vec<Arc<Tab>>);
//!
//! impl ColumnDataSource<bool> for Tabs {
//!     fn items(&self) -> Vec<Arc<dyn ColumnItem<bool>>> {
//!         self.0.iter().map(|tab| tab.clone() as Arc<dyn ColumnItem<bool>>).collect()
//!     }
//! }
//!
//! let tabs = Arc::new(Tabs(vec![
//!     Arc::new(Tab { title: "Home".into(), selected: Property::new(true) }),
//!     Arc::new(Tab { title: "Videos".into(), selected: Property::new(false) }),
//! ]));
//!
//! let mut view = ColumnView::with_style(LayoutStyle::Center)
//!     .with_config(ColumnConfig::new().with_adaptive_width(true).with_item_spacing(10.0));
//! view.register::<TabCell, Tab>();
//! view.set_data_source(&tabs);
//!
//! let mut surface = HeadlessSurface::new(Size::new(320.0, 44.0));
//! view.reload_data(&mut surface, || println!("row ready"));
//! surface.process(&mut view);
//!
//! // 40 + 10 + 60 wide, centered in 320.
//! assert_eq!(surface.frame_origin_x(), 105.0);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod registry;
pub mod surface;
pub mod view;

pub use config::{ColumnConfig, Separator};
pub use error::{ColumnError, Result};
pub use layout::{LayoutEngine, LayoutStyle, RowFrame};
pub use model::{ColumnDataSource, ColumnDelegate, ColumnItem, ItemRenderer};
pub use registry::{PlaceholderRenderer, RendererId, RendererRegistry};
pub use surface::{HeadlessSurface, ListSurface, PassId};
pub use view::ColumnView;

pub use horizon_columns_core::{Color, Insets, Point, Property, Rect, Signal, Size};
