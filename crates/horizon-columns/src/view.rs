//! The column controller.
//!
//! [`ColumnView`] owns the layout engine, the configuration and the
//! renderer registry. It pulls items from a weakly held data source, drives
//! a [`ListSurface`] through full and partial reloads, and forwards
//! selection to a weakly held delegate and to its own signals.
//!
//! # Reload cycle
//!
//! 1. [`reload_data`](ColumnView::reload_data) recomputes the cached item
//!    size and asks the surface to re-render everything, handing it a
//!    [`PassId`].
//! 2. The surface renders on its own schedule, calling back into the view
//!    for the item count, renderer ids, item sizes and bindings.
//! 3. The surface reports the pass through
//!    [`render_pass_finished`](ColumnView::render_pass_finished). In the
//!    `Center` style the view now measures the laid-out content and
//!    re-anchors the row. The completion callback runs last.

use std::sync::{Arc, Weak};

use horizon_columns_core::logging::{span_names, targets};
use horizon_columns_core::{PerfSpan, Rect, Signal, Size};
use parking_lot::Mutex;
use slotmap::SlotMap;

use crate::config::ColumnConfig;
use crate::layout::{LayoutEngine, LayoutStyle, RowFrame, widths_differ};
use crate::model::{ColumnDataSource, ColumnDelegate, ColumnItem, ItemRenderer};
use crate::registry::{RendererId, RendererRegistry};
use crate::surface::{ListSurface, PassId};

type Completion = Box<dyn FnOnce() + Send>;

enum RenderPass {
    Full(Option<Completion>),
    Partial(usize),
}

/// A horizontally scrolling row of selectable items.
///
/// `S` is the per-item state type (typically a small enum such as
/// normal/selected).
///
/// # Signals
///
/// - `item_selected(usize)`: emitted after the delegate hears about a selection
/// - `item_deselected(usize)`: emitted after the delegate hears about a deselection
/// - `reloaded()`: emitted when a full reload has rendered and its
///   completion has run
pub struct ColumnView<S: 'static> {
    engine: LayoutEngine,
    config: ColumnConfig,
    registry: RendererRegistry<S>,
    data_source: Option<Weak<dyn ColumnDataSource<S>>>,
    delegate: Option<Weak<dyn ColumnDelegate>>,
    item_size: Size,
    row_frame: RowFrame,
    has_reloaded: bool,
    pending: Mutex<SlotMap<PassId, RenderPass>>,

    /// Signal emitted when an item is selected.
    pub item_selected: Signal<usize>,
    /// Signal emitted when an item is deselected.
    pub item_deselected: Signal<usize>,
    /// Signal emitted when a full reload completes.
    pub reloaded: Signal<()>,
}

impl<S: 'static> Default for ColumnView<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> ColumnView<S> {
    /// Create a left-aligned column view.
    pub fn new() -> Self {
        Self::with_style(LayoutStyle::default())
    }

    /// Create a column view with the given layout style.
    ///
    /// The style cannot be changed afterwards.
    pub fn with_style(style: LayoutStyle) -> Self {
        Self {
            engine: LayoutEngine::new(style),
            config: ColumnConfig::default(),
            registry: RendererRegistry::new(),
            data_source: None,
            delegate: None,
            item_size: Size::ZERO,
            row_frame: RowFrame::Fill,
            has_reloaded: false,
            pending: Mutex::new(SlotMap::with_key()),
            item_selected: Signal::new(),
            item_deselected: Signal::new(),
            reloaded: Signal::new(),
        }
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: ColumnConfig) -> Self {
        self.config = config;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The layout style fixed at construction.
    pub fn style(&self) -> LayoutStyle {
        self.engine.style()
    }

    /// The layout engine for this view's style.
    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// The current configuration.
    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next reload.
    pub fn set_config(&mut self, config: ColumnConfig) {
        self.config = config;
    }

    /// The renderer registry.
    pub fn registry(&self) -> &RendererRegistry<S> {
        &self.registry
    }

    /// Mutable access to the renderer registry.
    pub fn registry_mut(&mut self) -> &mut RendererRegistry<S> {
        &mut self.registry
    }

    /// Register renderer `R` for items of type `I`.
    ///
    /// See [`RendererRegistry::register`].
    pub fn register<R, I>(&mut self) -> Option<RendererId>
    where
        R: ItemRenderer<S> + Default,
        I: ColumnItem<S>,
    {
        self.registry.register::<R, I>()
    }

    /// The item size cached by the last reload.
    pub fn item_size(&self) -> Size {
        self.item_size
    }

    /// The row frame last applied to the surface.
    pub fn row_frame(&self) -> RowFrame {
        self.row_frame
    }

    /// Whether `reload_data` has been called at least once.
    pub fn has_reloaded(&self) -> bool {
        self.has_reloaded
    }

    /// Number of render passes waiting to be reported finished.
    pub fn pending_passes(&self) -> usize {
        self.pending.lock().len()
    }

    /// The bottom separator's rectangle for a row of the given size.
    pub fn separator_rect(&self, bounds: Size, scale_factor: f32) -> Option<Rect> {
        self.config.separator.rect(bounds, scale_factor)
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Set the data source. The view holds it weakly.
    pub fn set_data_source<D>(&mut self, source: &Arc<D>)
    where
        D: ColumnDataSource<S> + 'static,
    {
        let weak = Arc::downgrade(source);
        self.data_source = Some(weak as Weak<dyn ColumnDataSource<S>>);
    }

    /// Detach the data source.
    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    /// Set the delegate. The view holds it weakly.
    pub fn set_delegate<D>(&mut self, delegate: &Arc<D>)
    where
        D: ColumnDelegate + 'static,
    {
        let weak = Arc::downgrade(delegate);
        self.delegate = Some(weak as Weak<dyn ColumnDelegate>);
    }

    /// Detach the delegate.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The current items, freshly fetched from the data source.
    ///
    /// Empty when no data source is set or it has been dropped.
    pub fn items(&self) -> Vec<Arc<dyn ColumnItem<S>>> {
        self.data_source
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|source| source.items())
            .unwrap_or_default()
    }

    fn delegate(&self) -> Option<Arc<dyn ColumnDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // =========================================================================
    // Reloading
    // =========================================================================

    /// Reload every item, running `on_complete` once the surface has
    /// rendered (and, in the `Center` style, the row has been re-anchored).
    pub fn reload_data<F>(&mut self, surface: &mut dyn ListSurface<S>, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.start_reload(surface, Some(Box::new(on_complete)));
    }

    /// Reload every item without a completion callback.
    pub fn reload(&mut self, surface: &mut dyn ListSurface<S>) {
        self.start_reload(surface, None);
    }

    fn start_reload(&mut self, surface: &mut dyn ListSurface<S>, completion: Option<Completion>) {
        let _perf = PerfSpan::new(span_names::RELOAD);

        let bounds = surface.bounds();
        let count = self.item_count();
        self.item_size = self.engine.base_item_size(&self.config, count, bounds);
        self.has_reloaded = true;

        let pass = self.pending.get_mut().insert(RenderPass::Full(completion));
        tracing::debug!(
            target: targets::VIEW,
            style = ?self.style(),
            count,
            item_size = ?self.item_size,
            ?pass,
            "reloading column"
        );

        surface.reload_all(pass);
    }

    /// Called by the surface once the render pass `pass` has finished.
    ///
    /// Returns `false` for a pass this view is not waiting on.
    pub fn render_pass_finished(&mut self, surface: &mut dyn ListSurface<S>, pass: PassId) -> bool {
        let Some(finished) = self.pending.get_mut().remove(pass) else {
            tracing::warn!(target: targets::VIEW, ?pass, "unknown render pass reported finished");
            return false;
        };
        let _perf = PerfSpan::new(span_names::RENDER_PASS);

        match finished {
            RenderPass::Full(completion) => {
                if self.style() == LayoutStyle::Center {
                    self.apply_centering(surface);
                }
                if let Some(completion) = completion {
                    completion();
                }
                self.reloaded.emit(());
            }
            RenderPass::Partial(index) => {
                if self.style() == LayoutStyle::Center {
                    let content = surface.content_width();
                    let displayed = surface.frame_width();
                    if widths_differ(content, displayed) {
                        tracing::debug!(
                            target: targets::VIEW,
                            index,
                            content,
                            displayed,
                            "content width changed, reloading to re-center"
                        );
                        self.reload(surface);
                    }
                }
            }
        }

        true
    }

    fn apply_centering(&mut self, surface: &mut dyn ListSurface<S>) {
        let container = surface.bounds().width;
        let content = surface.content_width();
        let frame = self.engine.row_frame(content, container);

        tracing::trace!(target: targets::VIEW, content, container, ?frame, "centering row");

        self.row_frame = frame;
        surface.apply_row_frame(frame);
    }

    /// Set the state of the item at `index` and show it.
    ///
    /// On-screen renderers receive the state directly; an off-screen slot is
    /// reloaded instead. Indices that are negative or past the end are
    /// ignored.
    pub fn update_state(&self, surface: &mut dyn ListSurface<S>, state: S, index: i32) {
        let items = self.items();
        let Some(index) = checked_index(index, items.len()) else {
            tracing::trace!(target: targets::VIEW, index, count = items.len(), "update_state ignored");
            return;
        };
        let item = &items[index];

        match surface.visible_renderer(index) {
            Some(renderer) => {
                renderer.update_state(&state);
                item.set_state(state);
            }
            None => {
                item.set_state(state);
                surface.reload_items(&[index], None);
            }
        }
    }

    /// Re-render the item at `index`.
    ///
    /// In the `Center` style a change in content width triggers a full
    /// reload once the slot has rendered. Indices that are negative or past
    /// the end are ignored.
    pub fn reload_content(&mut self, surface: &mut dyn ListSurface<S>, index: i32) {
        let count = self.item_count();
        let Some(index) = checked_index(index, count) else {
            tracing::trace!(target: targets::VIEW, index, count, "reload_content ignored");
            return;
        };

        let pass = self.pending.get_mut().insert(RenderPass::Partial(index));
        surface.reload_items(&[index], Some(pass));
    }

    // =========================================================================
    // Surface callbacks
    // =========================================================================

    /// Number of slots to render.
    pub fn item_count(&self) -> usize {
        self.items().len()
    }

    /// The renderer to dequeue for the slot at `index`.
    ///
    /// Unregistered item types get the placeholder renderer.
    pub fn renderer_for(&self, index: usize) -> RendererId {
        let items = self.items();
        let Some(item) = items.get(index) else {
            return RendererId::placeholder();
        };
        self.registry.renderer_id(item.as_ref()).unwrap_or_else(|| {
            tracing::warn!(
                target: targets::VIEW,
                index,
                item_type = item.type_name(),
                "no renderer registered, using placeholder"
            );
            RendererId::placeholder()
        })
    }

    /// Load the item at `index` into `renderer`.
    ///
    /// Returns `false`, leaving the renderer untouched, when the index is
    /// out of range or the item type is unregistered.
    pub fn bind_item(&self, index: usize, renderer: &mut dyn ItemRenderer<S>) -> bool {
        let items = self.items();
        let Some(item) = items.get(index) else {
            return false;
        };
        if let Err(err) = self.registry.lookup(item.as_ref()) {
            tracing::warn!(target: targets::VIEW, index, %err, "skipping bind");
            return false;
        }
        renderer.load_data(item.as_ref());
        true
    }

    /// Size of the slot at `index` inside a container of `bounds`.
    pub fn size_for_item(&self, index: usize, bounds: Size) -> Size {
        if !self.engine.uses_measurement(&self.config) {
            return self.item_size;
        }

        let items = self.items();
        let Some(item) = items.get(index) else {
            return Size::ZERO;
        };
        match self.registry.measure(item.as_ref()) {
            Ok(measured) => self.engine.adaptive_size(&self.config, measured, bounds),
            Err(err) => {
                tracing::warn!(target: targets::VIEW, index, %err, "cannot measure item");
                Size::ZERO
            }
        }
    }

    /// The surface selected the slot at `index`.
    pub fn did_select(&self, index: usize) {
        if let Some(delegate) = self.delegate() {
            delegate.did_select(index);
        }
        self.item_selected.emit(index);
    }

    /// The surface deselected the slot at `index`.
    pub fn did_deselect(&self, index: usize) {
        if let Some(delegate) = self.delegate() {
            delegate.did_deselect(index);
        }
        self.item_deselected.emit(index);
    }
}

fn checked_index(index: i32, count: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&index| index < count)
}

impl<S: 'static> std::fmt::Debug for ColumnView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnView")
            .field("style", &self.style())
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("item_size", &self.item_size)
            .field("row_frame", &self.row_frame)
            .field("has_reloaded", &self.has_reloaded)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ColumnView<bool>: Send, Sync);
