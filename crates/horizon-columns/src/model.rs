//! Items, renderers and the host collaborators of a column view.
//!
//! # Architecture
//!
//! - **Item** ([`ColumnItem`]): a host-owned model for one column entry
//! - **Renderer** ([`ItemRenderer`]): the cell that draws one item
//! - **Data source** ([`ColumnDataSource`]): hands the view its items
//! - **Delegate** ([`ColumnDelegate`]): receives selection events
//!
//! The view never owns items or collaborators. It reads item state, writes
//! state updates back through the item, and binds items to renderers that
//! the host surface owns and recycles.
//!
//! # Example
//!
//! ```
//! use horizon_columns::model::{ColumnItem, ItemRenderer};
//! use horizon_columns::{Property, Size};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum TabState { Normal, Selected }
//!
//! struct TitleItem {
//!     title: String,
//!     state: Property<TabState>,
//! }
//!
//! impl ColumnItem<TabState> for TitleItem {
//!     fn name(&self) -> &str { &self.title }
//!     fn state(&self) -> TabState { self.state.get() }
//!     fn set_state(&self, state: TabState) { self.state.set(state); }
//! }
//!
//! #[derive(Default)]
//! struct TitleCell { text: String, selected: bool }
//!
//! impl ItemRenderer<TabState> for TitleCell {
//!     fn load_data(&mut self, item: &dyn ColumnItem<TabState>) {
//!         self.text = item.name().to_string();
//!         self.selected = item.state() == TabState::Selected;
//!     }
//!
//!     fn update_state(&mut self, state: &TabState) {
//!         self.selected = *state == TabState::Selected;
//!     }
//!
//!     fn measure(item: &dyn ColumnItem<TabState>) -> Size {
//!         Size::new(item.name().len() as f32 * 8.0 + 24.0, 32.0)
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use horizon_columns_core::Size;

/// One entry of a column row.
///
/// The concrete Rust type of an item is its identity in the
/// [`RendererRegistry`](crate::RendererRegistry). State is mutated through
/// `&self`, so implementations keep it in an interior-mutable cell such as
/// [`Property`](crate::Property).
pub trait ColumnItem<S>: Any + Send + Sync {
    /// The item's logical name (usually its title).
    fn name(&self) -> &str;

    /// The item's current state.
    fn state(&self) -> S;

    /// Replace the item's state.
    fn set_state(&self, state: S);

    /// Type tag used to look up the item's renderer.
    fn item_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Human-readable type name, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<S: 'static> dyn ColumnItem<S> {
    /// Downcast to the concrete item type.
    pub fn downcast_ref<I: ColumnItem<S>>(&self) -> Option<&I> {
        let any: &dyn Any = self;
        any.downcast_ref::<I>()
    }
}

/// The visual cell bound to one item for one display cycle.
///
/// Renderers are created by the registry's factory, owned by the host
/// surface and re-bound to different items as the row scrolls.
pub trait ItemRenderer<S>: Any + Send {
    /// Bind the renderer to an item, replacing whatever it showed before.
    fn load_data(&mut self, item: &dyn ColumnItem<S>);

    /// Re-render for a new state without reloading the item.
    fn update_state(&mut self, state: &S);

    /// Intrinsic size of this renderer showing `item`, against unconstrained
    /// bounds. Used for adaptive widths without creating an instance.
    fn measure(item: &dyn ColumnItem<S>) -> Size
    where
        Self: Sized;
}

impl<S: 'static> dyn ItemRenderer<S> {
    /// Downcast to the concrete renderer type.
    pub fn downcast_ref<R: ItemRenderer<S>>(&self) -> Option<&R> {
        let any: &dyn Any = self;
        any.downcast_ref::<R>()
    }
}

/// Supplies the ordered items of a column view.
///
/// Called fresh for every operation that needs the list; the view does not
/// cache it.
pub trait ColumnDataSource<S>: Send + Sync {
    /// The current items, in display order.
    fn items(&self) -> Vec<Arc<dyn ColumnItem<S>>>;
}

/// Receives selection changes from a column view.
///
/// Both methods default to doing nothing.
pub trait ColumnDelegate: Send + Sync {
    /// The item at `index` was selected.
    fn did_select(&self, _index: usize) {}

    /// The item at `index` was deselected.
    fn did_deselect(&self, _index: usize) {}
}
