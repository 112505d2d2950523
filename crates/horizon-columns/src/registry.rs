//! Item type to renderer type registry.
//!
//! Each item type is registered once against the renderer that draws it.
//! The mapping is keyed by the item's [`TypeId`] and resolved when the
//! registration is made, so rendering never looks types up by name.
//!
//! ```
//! use horizon_columns::model::{ColumnItem, ItemRenderer};
//! use horizon_columns::{RendererRegistry, Size};
//!
//! struct Tab(String);
//!
//! impl ColumnItem<bool> for Tab {
//!     fn name(&self) -> &str { &self.0 }
//!     fn state(&self) -> bool { false }
//!     fn set_state(&self, _state: bool) {}
//! }
//!
//! #[derive(Default)]
//! struct TabCell;
//!
//! impl ItemRenderer<bool> for TabCell {
//!     fn load_data(&mut self, _item: &dyn ColumnItem<bool>) {}
//!     fn update_state(&mut self, _state: &bool) {}
//!     fn measure(_item: &dyn ColumnItem<bool>) -> Size { Size::new(80.0, 40.0) }
//! }
//!
//! let mut registry = RendererRegistry::<bool>::new();
//! registry.register::<TabCell, Tab>();
//! assert!(registry.contains::<Tab>());
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use horizon_columns_core::logging::targets;
use horizon_columns_core::Size;

use crate::error::{ColumnError, Result};
use crate::model::{ColumnItem, ItemRenderer};

/// Identifies a renderer type; surfaces use it as the reuse key for cells.
#[derive(Debug, Clone, Copy)]
pub struct RendererId {
    type_id: TypeId,
    name: &'static str,
}

impl RendererId {
    /// The identifier of renderer type `R`.
    pub fn of<R: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            name: std::any::type_name::<R>(),
        }
    }

    /// The identifier of the built-in [`PlaceholderRenderer`].
    pub fn placeholder() -> Self {
        Self::of::<PlaceholderRenderer>()
    }

    /// Whether this is the placeholder renderer.
    pub fn is_placeholder(&self) -> bool {
        self.type_id == TypeId::of::<PlaceholderRenderer>()
    }

    /// The renderer's type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for RendererId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RendererId {}

impl Hash for RendererId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.name.rsplit("::").next().unwrap_or(self.name);
        write!(f, "{short}")
    }
}

/// Empty renderer used for slots whose item type has no registration.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl<S: 'static> ItemRenderer<S> for PlaceholderRenderer {
    fn load_data(&mut self, _item: &dyn ColumnItem<S>) {}

    fn update_state(&mut self, _state: &S) {}

    fn measure(_item: &dyn ColumnItem<S>) -> Size {
        Size::ZERO
    }
}

type MeasureFn<S> = fn(&dyn ColumnItem<S>) -> Size;
type CreateFn<S> = fn() -> Box<dyn ItemRenderer<S>>;

fn create_renderer<S: 'static, R: ItemRenderer<S> + Default>() -> Box<dyn ItemRenderer<S>> {
    Box::new(R::default())
}

/// A registered renderer: its identifier plus the capabilities the view
/// needs without holding an instance.
pub struct RendererEntry<S> {
    id: RendererId,
    measure: MeasureFn<S>,
    create: CreateFn<S>,
}

impl<S: 'static> RendererEntry<S> {
    fn of<R: ItemRenderer<S> + Default>() -> Self {
        Self {
            id: RendererId::of::<R>(),
            measure: R::measure,
            create: create_renderer::<S, R>,
        }
    }

    /// The renderer identifier.
    pub fn id(&self) -> RendererId {
        self.id
    }

    /// Measure `item` with this renderer.
    pub fn measure(&self, item: &dyn ColumnItem<S>) -> Size {
        (self.measure)(item)
    }

    /// Create a fresh, unbound renderer instance.
    pub fn create(&self) -> Box<dyn ItemRenderer<S>> {
        (self.create)()
    }
}

impl<S> fmt::Debug for RendererEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererEntry").field("id", &self.id).finish()
    }
}

/// Maps item types to the renderer types that draw them.
///
/// At most one renderer per item type; registering an item type again
/// replaces the earlier mapping.
pub struct RendererRegistry<S> {
    entries: HashMap<TypeId, RendererEntry<S>>,
}

impl<S: 'static> Default for RendererRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> RendererRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register renderer `R` for items of type `I`.
    ///
    /// Returns the renderer previously registered for `I`, if any.
    pub fn register<R, I>(&mut self) -> Option<RendererId>
    where
        R: ItemRenderer<S> + Default,
        I: ColumnItem<S>,
    {
        let entry = RendererEntry::of::<R>();
        let renderer = entry.id;
        let previous = self.entries.insert(TypeId::of::<I>(), entry).map(|e| e.id);

        match previous {
            Some(old) if old != renderer => tracing::debug!(
                target: targets::REGISTRY,
                item = std::any::type_name::<I>(),
                old = %old,
                new = %renderer,
                "renderer registration replaced"
            ),
            _ => tracing::trace!(
                target: targets::REGISTRY,
                item = std::any::type_name::<I>(),
                renderer = %renderer,
                "renderer registered"
            ),
        }

        previous
    }

    /// Remove the registration for item type `I`.
    pub fn unregister<I: ColumnItem<S>>(&mut self) -> Option<RendererId> {
        self.entries.remove(&TypeId::of::<I>()).map(|e| e.id)
    }

    /// Whether item type `I` has a renderer.
    pub fn contains<I: ColumnItem<S>>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<I>())
    }

    /// Number of registered item types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the renderer registered for `item`'s runtime type.
    pub fn lookup(&self, item: &dyn ColumnItem<S>) -> Result<&RendererEntry<S>> {
        self.entries
            .get(&item.item_type())
            .ok_or_else(|| ColumnError::unregistered(item.type_name()))
    }

    /// The renderer identifier for `item`, or `None` when unregistered.
    pub fn renderer_id(&self, item: &dyn ColumnItem<S>) -> Option<RendererId> {
        self.entries.get(&item.item_type()).map(|e| e.id)
    }

    /// Measure `item` with its registered renderer.
    pub fn measure(&self, item: &dyn ColumnItem<S>) -> Result<Size> {
        self.lookup(item).map(|entry| entry.measure(item))
    }

    /// Create a renderer instance suitable for `item`.
    pub fn create(&self, item: &dyn ColumnItem<S>) -> Result<Box<dyn ItemRenderer<S>>> {
        self.lookup(item).map(RendererEntry::create)
    }

    /// Create a renderer by identifier.
    ///
    /// Unknown identifiers (including the placeholder) yield a
    /// [`PlaceholderRenderer`].
    pub fn instantiate(&self, id: RendererId) -> Box<dyn ItemRenderer<S>> {
        self.entries
            .values()
            .find(|entry| entry.id == id)
            .map(RendererEntry::create)
            .unwrap_or_else(|| Box::new(PlaceholderRenderer) as Box<dyn ItemRenderer<S>>)
    }
}

impl<S> fmt::Debug for RendererRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TextItem(&'static str);
    struct BadgeItem(&'static str);
    struct UnknownItem;

    impl ColumnItem<u8> for TextItem {
        fn name(&self) -> &str {
            self.0
        }
        fn state(&self) -> u8 {
            0
        }
        fn set_state(&self, _state: u8) {}
    }

    impl ColumnItem<u8> for BadgeItem {
        fn name(&self) -> &str {
            self.0
        }
        fn state(&self) -> u8 {
            0
        }
        fn set_state(&self, _state: u8) {}
    }

    impl ColumnItem<u8> for UnknownItem {
        fn name(&self) -> &str {
            "unknown"
        }
        fn state(&self) -> u8 {
            0
        }
        fn set_state(&self, _state: u8) {}
    }

    #[derive(Default)]
    struct TextCell {
        text: String,
    }

    impl ItemRenderer<u8> for TextCell {
        fn load_data(&mut self, item: &dyn ColumnItem<u8>) {
            self.text = item.name().to_string();
        }
        fn update_state(&mut self, _state: &u8) {}
        fn measure(item: &dyn ColumnItem<u8>) -> Size {
            Size::new(item.name().len() as f32 * 10.0, 20.0)
        }
    }

    #[derive(Default)]
    struct WideCell;

    impl ItemRenderer<u8> for WideCell {
        fn load_data(&mut self, _item: &dyn ColumnItem<u8>) {}
        fn update_state(&mut self, _state: &u8) {}
        fn measure(_item: &dyn ColumnItem<u8>) -> Size {
            Size::new(200.0, 20.0)
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = RendererRegistry::<u8>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register::<TextCell, TextItem>(), None);
        registry.register::<WideCell, BadgeItem>();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.renderer_id(&TextItem("a")),
            Some(RendererId::of::<TextCell>())
        );
        assert_eq!(
            registry.lookup(&BadgeItem("b")).unwrap().id(),
            RendererId::of::<WideCell>()
        );
    }

    #[test]
    fn test_reregister_overwrites() {
        let mut registry = RendererRegistry::<u8>::new();
        registry.register::<TextCell, TextItem>();
        let previous = registry.register::<WideCell, TextItem>();

        assert_eq!(previous, Some(RendererId::of::<TextCell>()));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.renderer_id(&TextItem("a")),
            Some(RendererId::of::<WideCell>())
        );
        assert_eq!(
            registry.measure(&TextItem("a")).unwrap(),
            Size::new(200.0, 20.0)
        );
    }

    #[test]
    fn test_unregistered_is_recoverable_error() {
        let registry = RendererRegistry::<u8>::new();
        let err = registry.lookup(&UnknownItem).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("UnknownItem"));
        assert!(registry.renderer_id(&UnknownItem).is_none());
        assert!(registry.measure(&UnknownItem).is_err());
    }

    #[test]
    fn test_create_and_instantiate() {
        let mut registry = RendererRegistry::<u8>::new();
        registry.register::<TextCell, TextItem>();

        let mut cell = registry.create(&TextItem("news")).unwrap();
        cell.load_data(&TextItem("news"));
        let cell = cell.downcast_ref::<TextCell>().unwrap();
        assert_eq!(cell.text, "news");

        let by_id = registry.instantiate(RendererId::of::<TextCell>());
        assert!(by_id.downcast_ref::<TextCell>().is_some());

        let fallback = registry.instantiate(RendererId::placeholder());
        assert!(fallback.downcast_ref::<PlaceholderRenderer>().is_some());
    }

    #[test]
    fn test_unregister() {
        let mut registry = RendererRegistry::<u8>::new();
        registry.register::<TextCell, TextItem>();
        assert!(registry.contains::<TextItem>());
        assert_eq!(
            registry.unregister::<TextItem>(),
            Some(RendererId::of::<TextCell>())
        );
        assert!(!registry.contains::<TextItem>());
    }

    #[test]
    fn test_renderer_id_display() {
        assert_eq!(RendererId::of::<TextCell>().to_string(), "TextCell");
        assert!(RendererId::placeholder().is_placeholder());
        assert!(!RendererId::of::<TextCell>().is_placeholder());
    }
}
