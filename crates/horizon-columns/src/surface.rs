//! The list surface a column view drives.
//!
//! A [`ListSurface`] is the host's scrolling list: it owns renderer
//! instances, decides which slots are on screen and renders on its own
//! schedule. The view asks it to reload and, once a render pass is done,
//! the surface reports back through
//! [`ColumnView::render_pass_finished`](crate::ColumnView::render_pass_finished).
//!
//! [`HeadlessSurface`] is a complete in-memory implementation used by tests
//! and hosts without a graphical list.

use std::collections::{HashMap, VecDeque};

use horizon_columns_core::logging::targets;
use horizon_columns_core::{Rect, Size};
use slotmap::new_key_type;

use crate::layout::RowFrame;
use crate::model::ItemRenderer;
use crate::registry::RendererId;
use crate::view::ColumnView;

new_key_type! {
    /// Ticket for a render pass the view is waiting on.
    pub struct PassId;
}

/// The host list view, as seen by a column view.
pub trait ListSurface<S> {
    /// Size of the visible container.
    fn bounds(&self) -> Size;

    /// Re-render every slot, then finish `pass`.
    fn reload_all(&mut self, pass: PassId);

    /// Re-render the given slots, then finish `pass` if one is given.
    fn reload_items(&mut self, indices: &[usize], pass: Option<PassId>);

    /// The renderer bound to `index` if that slot is currently on screen.
    fn visible_renderer(&mut self, index: usize) -> Option<&mut dyn ItemRenderer<S>>;

    /// Laid-out width of all slots, padding included.
    fn content_width(&self) -> f32;

    /// Width the row is currently displayed at.
    fn frame_width(&self) -> f32;

    /// Re-anchor the row inside its container.
    fn apply_row_frame(&mut self, frame: RowFrame);
}

struct Slot<S> {
    rect: Rect,
    renderer: Option<(RendererId, Box<dyn ItemRenderer<S>>)>,
}

enum Request {
    Full(PassId),
    Items(Vec<usize>, Option<PassId>),
}

/// In-memory list surface.
///
/// Reload requests are queued and rendered by [`process`](Self::process),
/// which plays the part of the host's render loop. Off-screen renderers are
/// returned to a per-type reuse pool.
pub struct HeadlessSurface<S> {
    bounds: Size,
    scroll_x: f32,
    sizes: Vec<Size>,
    slots: Vec<Slot<S>>,
    pool: HashMap<RendererId, Vec<Box<dyn ItemRenderer<S>>>>,
    requests: VecDeque<Request>,
    row_frame: RowFrame,
    content_width: f32,
    bind_count: usize,
    selected: Option<usize>,
}

impl<S: 'static> HeadlessSurface<S> {
    /// Create an empty surface with the given container size.
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            scroll_x: 0.0,
            sizes: Vec::new(),
            slots: Vec::new(),
            pool: HashMap::new(),
            requests: VecDeque::new(),
            row_frame: RowFrame::Fill,
            content_width: 0.0,
            bind_count: 0,
            selected: None,
        }
    }

    /// Resize the container. Takes effect on the next reload.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Render every queued request, reporting finished passes to `view`.
    ///
    /// Returns the number of passes finished. Requests queued while
    /// processing (a centering check asking for a full reload, say) are
    /// rendered in the same call.
    pub fn process(&mut self, view: &mut ColumnView<S>) -> usize {
        let mut finished = 0;

        while let Some(request) = self.requests.pop_front() {
            let pass = match request {
                Request::Full(pass) => {
                    self.render_all(view);
                    Some(pass)
                }
                Request::Items(indices, pass) => {
                    self.render_items(view, &indices);
                    pass
                }
            };

            if let Some(pass) = pass {
                view.render_pass_finished(self, pass);
                self.refresh_bindings(view);
                finished += 1;
            }
        }

        finished
    }

    /// Number of reload requests waiting for [`process`](Self::process).
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    /// Scroll the row to `x`, clamped to the scrollable range, and bind any
    /// slots that came on screen.
    pub fn set_scroll_x(&mut self, view: &ColumnView<S>, x: f32) {
        self.scroll_x = x;
        self.clamp_scroll();
        self.refresh_bindings(view);
    }

    /// Current horizontal scroll offset.
    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    /// Select the slot at `index` as a user tap would.
    ///
    /// The previously selected slot, if different, is deselected first.
    /// Returns `false` if there is no such slot.
    pub fn tap(&mut self, view: &ColumnView<S>, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        if let Some(previous) = self.selected.filter(|&previous| previous != index) {
            view.did_deselect(previous);
        }
        self.selected = Some(index);
        view.did_select(index);
        true
    }

    /// The selected slot, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Number of laid-out slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Frame of the slot at `index`, in row coordinates.
    pub fn slot_rect(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).map(|slot| slot.rect)
    }

    /// Whether the slot at `index` intersects the visible part of the row.
    pub fn is_visible(&self, index: usize) -> bool {
        let viewport = self.viewport();
        self.slots
            .get(index)
            .is_some_and(|slot| slot.rect.overlaps_horizontally(&viewport))
    }

    /// Renderer identifier bound to `index`, if the slot is bound.
    pub fn bound_renderer(&self, index: usize) -> Option<RendererId> {
        self.slots
            .get(index)
            .and_then(|slot| slot.renderer.as_ref())
            .map(|(id, _)| *id)
    }

    /// Downcast the renderer bound to `index`.
    pub fn renderer_as<R: ItemRenderer<S>>(&self, index: usize) -> Option<&R> {
        let (_, renderer) = self.slots.get(index)?.renderer.as_ref()?;
        renderer.downcast_ref::<R>()
    }

    /// The current row frame.
    pub fn row_frame(&self) -> RowFrame {
        self.row_frame
    }

    /// Leading x of the row inside the container.
    pub fn frame_origin_x(&self) -> f32 {
        self.row_frame.origin_x(self.bounds.width)
    }

    /// Total number of times a renderer was bound to an item.
    pub fn bind_count(&self) -> usize {
        self.bind_count
    }

    /// Renderers parked in the reuse pool.
    pub fn pooled(&self) -> usize {
        self.pool.values().map(Vec::len).sum()
    }

    fn viewport(&self) -> Rect {
        Rect::new(self.scroll_x, 0.0, self.frame_width(), self.bounds.height)
    }

    fn max_scroll_x(&self) -> f32 {
        (self.content_width - self.frame_width()).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll_x());
    }

    fn render_all(&mut self, view: &ColumnView<S>) {
        let count = view.item_count();
        self.sizes = (0..count)
            .map(|index| view.size_for_item(index, self.bounds))
            .collect();

        for index in 0..self.slots.len() {
            self.recycle_slot(index);
        }

        self.slots = view
            .layout_engine()
            .place(view.config(), &self.sizes)
            .into_iter()
            .map(|rect| Slot {
                rect,
                renderer: None,
            })
            .collect();
        self.content_width = view.layout_engine().content_width(view.config(), &self.sizes);
        if self.selected.is_some_and(|selected| selected >= count) {
            self.selected = None;
        }
        self.clamp_scroll();

        tracing::trace!(
            target: targets::SURFACE,
            count,
            content_width = self.content_width,
            "rendered all slots"
        );

        self.refresh_bindings(view);
    }

    fn render_items(&mut self, view: &ColumnView<S>, indices: &[usize]) {
        let mut resized = false;

        for &index in indices {
            let Some(current) = self.sizes.get(index).copied() else {
                continue;
            };
            let size = view.size_for_item(index, self.bounds);
            if size != current {
                self.sizes[index] = size;
                resized = true;
            }
            self.recycle_slot(index);
        }

        if resized {
            let rects = view.layout_engine().place(view.config(), &self.sizes);
            for (slot, rect) in self.slots.iter_mut().zip(rects) {
                slot.rect = rect;
            }
            self.content_width = view.layout_engine().content_width(view.config(), &self.sizes);
            self.clamp_scroll();
        }

        tracing::trace!(
            target: targets::SURFACE,
            ?indices,
            resized,
            "rendered slots"
        );

        self.refresh_bindings(view);
    }

    fn refresh_bindings(&mut self, view: &ColumnView<S>) {
        for index in 0..self.slots.len() {
            let visible = self.is_visible(index);
            let bound = self.slots[index].renderer.is_some();
            if visible && !bound {
                self.bind_slot(view, index);
            } else if !visible && bound {
                self.recycle_slot(index);
            }
        }
    }

    fn bind_slot(&mut self, view: &ColumnView<S>, index: usize) {
        let id = view.renderer_for(index);
        let mut renderer = self
            .pool
            .get_mut(&id)
            .and_then(Vec::pop)
            .unwrap_or_else(|| view.registry().instantiate(id));

        view.bind_item(index, renderer.as_mut());
        self.bind_count += 1;
        self.slots[index].renderer = Some((id, renderer));
    }

    fn recycle_slot(&mut self, index: usize) {
        let taken = self
            .slots
            .get_mut(index)
            .and_then(|slot| slot.renderer.take());
        if let Some((id, renderer)) = taken {
            self.pool.entry(id).or_default().push(renderer);
        }
    }
}

impl<S: 'static> ListSurface<S> for HeadlessSurface<S> {
    fn bounds(&self) -> Size {
        self.bounds
    }

    fn reload_all(&mut self, pass: PassId) {
        self.requests.push_back(Request::Full(pass));
    }

    fn reload_items(&mut self, indices: &[usize], pass: Option<PassId>) {
        self.requests.push_back(Request::Items(indices.to_vec(), pass));
    }

    fn visible_renderer(&mut self, index: usize) -> Option<&mut dyn ItemRenderer<S>> {
        if !self.is_visible(index) {
            return None;
        }
        let (_, renderer) = self.slots.get_mut(index)?.renderer.as_mut()?;
        let renderer: &mut dyn ItemRenderer<S> = renderer.as_mut();
        Some(renderer)
    }

    fn content_width(&self) -> f32 {
        self.content_width
    }

    fn frame_width(&self) -> f32 {
        self.row_frame.width(self.bounds.width)
    }

    fn apply_row_frame(&mut self, frame: RowFrame) {
        tracing::trace!(target: targets::SURFACE, ?frame, "row frame applied");
        self.row_frame = frame;
        self.clamp_scroll();
    }
}

impl<S> std::fmt::Debug for HeadlessSurface<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("bounds", &self.bounds)
            .field("scroll_x", &self.scroll_x)
            .field("slots", &self.slots.len())
            .field("row_frame", &self.row_frame)
            .field("content_width", &self.content_width)
            .field("pending_requests", &self.requests.len())
            .finish()
    }
}
