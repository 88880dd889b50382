//! The normalized-height grid layout engine.

use std::fmt;

use tracing::{debug, trace, warn};

use super::config::GridConfig;
use super::measure::{measure_item, MeasureHeight};
use super::snapshot::{cell_width_for, LayoutSnapshot};
use super::transition::OffsetRatio;
use super::types::{Point, Rect, Size, Viewport};
use super::visible::{VisibleFrames, VisibleIndices};
use super::window;
use crate::model::change::{Change, ChangeTracked};
use crate::model::error::LayoutError;

/// Padding applied around the viewport when asking for visible frames, so
/// elements touching the edge are realised before they scroll into view.
pub const VISIBLE_RECT_GUARD: f64 = 1.0;

/// Lifecycle of the cached layout.
///
/// `Stale → Computing → Ready`. A ready layout goes back to stale on a
/// viewport width or orientation change, an explicit reload, a new
/// configuration or measurer, or a mutation while no viewport is attached.
/// Incremental inserts, removals and updates keep it ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// The snapshot does not reflect the current inputs; the next
    /// [`GridLayout::prepare`] recomputes everything.
    Stale,
    /// A full recomputation is running.
    Computing,
    /// The snapshot is current.
    Ready,
}

/// Multi-column grid whose rows take the height of their tallest cell.
///
/// The engine never owns items. Every operation that needs item content
/// borrows the host's sequence and hands items to the measurer `M`; only the
/// derived measurements are cached.
///
/// # Full Layout
/// [`prepare`](Self::prepare) measures every item at the current cell width,
/// groups items into rows of `column_count`, normalizes row heights and
/// computes cumulative row offsets. The new snapshot replaces the old one
/// only once it is complete.
///
/// # Incremental Updates
/// [`insert_at`](Self::insert_at), [`remove_at`](Self::remove_at) and
/// [`update_at`](Self::update_at) touch only the affected measurements and
/// rebuild rows from the row holding the smallest touched index onward.
///
/// # Windowing
/// [`indices_visible_in`](Self::indices_visible_in) and
/// [`frames_visible_in`](Self::frames_visible_in) cost O(visible rows ×
/// columns + log rows).
pub struct GridLayout<M> {
    config: GridConfig,
    measurer: Option<M>,
    viewport: Option<Viewport>,
    snapshot: LayoutSnapshot,
    state: LayoutState,
    pending_ratio: Option<OffsetRatio>,
}

impl<M> fmt::Debug for GridLayout<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridLayout")
            .field("config", &self.config)
            .field("has_measurer", &self.measurer.is_some())
            .field("viewport", &self.viewport)
            .field("snapshot", &self.snapshot)
            .field("state", &self.state)
            .field("pending_ratio", &self.pending_ratio)
            .finish()
    }
}

impl<M> GridLayout<M> {
    /// Create an engine with the given configuration and measurer.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ConfigurationInvalid`] if `config` fails validation.
    pub fn new(config: GridConfig, measurer: M) -> Result<Self, LayoutError> {
        let mut layout = Self::without_measurer(config)?;
        layout.measurer = Some(measurer);
        Ok(layout)
    }

    /// Create an engine with no measurer; every item measures as zero height
    /// until [`set_measurer`](Self::set_measurer) is called.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ConfigurationInvalid`] if `config` fails validation.
    pub fn without_measurer(config: GridConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            config,
            measurer: None,
            viewport: None,
            snapshot: LayoutSnapshot::default(),
            state: LayoutState::Stale,
            pending_ratio: None,
        })
    }

    // === Configuration ===

    /// Current configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Apply a new configuration. The layout becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ConfigurationInvalid`] and keeps the previous
    /// configuration if `config` fails validation.
    pub fn configure(&mut self, config: GridConfig) -> Result<(), LayoutError> {
        config.validate()?;
        self.config = config;
        self.invalidate("configuration changed");
        Ok(())
    }

    /// Replace the measurer. The layout becomes stale.
    pub fn set_measurer(&mut self, measurer: M) {
        self.measurer = Some(measurer);
        self.invalidate("measurer replaced");
    }

    /// The measurer, if one is attached.
    pub fn measurer(&self) -> Option<&M> {
        self.measurer.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Whether the next [`prepare`](Self::prepare) will recompute everything.
    pub fn needs_full_layout(&self) -> bool {
        self.state != LayoutState::Ready
    }

    /// Force a full recomputation on the next [`prepare`](Self::prepare).
    pub fn reload(&mut self) {
        self.invalidate("reload requested");
    }

    fn invalidate(&mut self, reason: &'static str) {
        if self.state != LayoutState::Stale {
            trace!(reason, "Layout invalidated");
        }
        self.state = LayoutState::Stale;
    }

    // === Viewport ===

    /// The attached viewport, if any.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Attach or update the viewport.
    ///
    /// Returns `true` if the change invalidated the layout: the first
    /// attachment, a width change, or an orientation flip. Scrolling or a
    /// height change that keeps the orientation does not invalidate.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let invalidates = match self.viewport {
            None => true,
            Some(previous) => {
                previous.bounds.width != viewport.bounds.width
                    || previous.orientation() != viewport.orientation()
            }
        };
        self.viewport = Some(viewport);
        if invalidates {
            self.invalidate("viewport bounds changed");
        }
        invalidates
    }

    /// Detach the viewport. Later mutations defer to a full recomputation.
    pub fn detach_viewport(&mut self) {
        self.viewport = None;
    }

    fn is_incremental_ready(&self) -> bool {
        self.viewport.is_some() && self.state == LayoutState::Ready
    }

    // === Full Layout ===

    /// Recompute the whole layout if it is stale.
    ///
    /// Does nothing while no viewport is attached; the layout stays stale and
    /// the previous snapshot keeps answering queries.
    pub fn prepare<T>(&mut self, items: &[T])
    where
        M: MeasureHeight<T>,
    {
        if self.state == LayoutState::Ready {
            return;
        }
        let Some(viewport) = self.viewport else {
            debug!("Layout requested without a viewport; deferring");
            return;
        };

        self.state = LayoutState::Computing;

        let column_count = self.config.columns_for(viewport.orientation());
        let viewport_width = viewport.bounds.width;
        let cell_width = cell_width_for(&self.config, viewport_width, column_count);

        if self.measurer.is_none() && !items.is_empty() {
            warn!(items = items.len(), "No measurer attached; items measure as zero height");
        }
        let heights: Vec<f64> = items
            .iter()
            .enumerate()
            .map(|(index, item)| measure_item(self.measurer.as_ref(), item, cell_width, index))
            .collect();

        let snapshot = LayoutSnapshot::build(self.config, viewport_width, column_count, heights);
        debug!(
            items = snapshot.item_count(),
            columns = snapshot.column_count(),
            cell_width = snapshot.cell_width(),
            content_height = snapshot.content_size().height,
            "Full layout computed"
        );
        self.snapshot = snapshot;
        self.state = LayoutState::Ready;
    }

    /// Replace the item sequence and recompute the whole layout.
    pub fn set_items<T>(&mut self, items: &[T])
    where
        M: MeasureHeight<T>,
    {
        self.reload();
        self.prepare(items);
    }

    // === Incremental Updates ===

    /// Account for items inserted at `indices`.
    ///
    /// `items` is the sequence after insertion. Each new item is measured and
    /// spliced in; rows are rebuilt from the row holding the smallest index.
    /// Without a viewport, or while stale, the layout is left stale instead.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if an index is not within `items`.
    pub fn insert_at<T>(&mut self, items: &[T], indices: &[usize]) -> Result<(), LayoutError>
    where
        M: MeasureHeight<T>,
    {
        let mut ascending = indices.to_vec();
        ascending.sort_unstable();
        ascending.dedup();

        if let Some(&highest) = ascending.last() {
            if highest >= items.len() {
                return Err(LayoutError::out_of_range(highest, items.len()));
            }
        }
        if !self.is_incremental_ready() {
            self.invalidate("insert before layout is ready");
            return Ok(());
        }
        if self.snapshot.item_count() + ascending.len() != items.len() {
            warn!(
                cached = self.snapshot.item_count(),
                inserted = ascending.len(),
                items = items.len(),
                "Insert does not match item count; falling back to full layout"
            );
            self.invalidate("insert count mismatch");
            return Ok(());
        }
        let Some(&first) = ascending.first() else {
            return Ok(());
        };

        let cell_width = self.snapshot.cell_width();
        for &index in &ascending {
            let height = measure_item(self.measurer.as_ref(), &items[index], cell_width, index);
            self.snapshot.insert_height(index, height);
        }
        self.snapshot.rebuild_rows_from(first);
        trace!(
            inserted = ascending.len(),
            from_row = first / self.snapshot.column_count(),
            "Incremental insert"
        );
        Ok(())
    }

    /// Account for items removed from `indices` (pre-removal positions).
    ///
    /// Removal runs from the highest index down; rows are rebuilt from the
    /// row holding the smallest index. Without a viewport, or while stale, the
    /// layout is left stale instead.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if an index is not a laid-out item.
    pub fn remove_at(&mut self, indices: &[usize]) -> Result<(), LayoutError> {
        if !self.is_incremental_ready() {
            self.invalidate("remove before layout is ready");
            return Ok(());
        }

        let mut descending = indices.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        descending.dedup();

        let (Some(&highest), Some(&lowest)) = (descending.first(), descending.last()) else {
            return Ok(());
        };
        if highest >= self.snapshot.item_count() {
            return Err(LayoutError::out_of_range(highest, self.snapshot.item_count()));
        }

        for &index in &descending {
            self.snapshot.remove_height(index);
        }
        self.snapshot.rebuild_rows_from(lowest);
        trace!(
            removed = descending.len(),
            from_row = lowest / self.snapshot.column_count(),
            "Incremental remove"
        );
        Ok(())
    }

    /// Account for items replaced in place at `indices`.
    ///
    /// The replaced items are measured again and rows are rebuilt from the
    /// row holding the smallest index.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if an index is not within `items`
    /// or not a laid-out item.
    pub fn update_at<T>(&mut self, items: &[T], indices: &[usize]) -> Result<(), LayoutError>
    where
        M: MeasureHeight<T>,
    {
        if let Some(&bad) = indices.iter().find(|&&index| index >= items.len()) {
            return Err(LayoutError::out_of_range(bad, items.len()));
        }
        if !self.is_incremental_ready() {
            self.invalidate("update before layout is ready");
            return Ok(());
        }
        if let Some(&bad) = indices
            .iter()
            .find(|&&index| index >= self.snapshot.item_count())
        {
            return Err(LayoutError::out_of_range(bad, self.snapshot.item_count()));
        }
        let Some(&first) = indices.iter().min() else {
            return Ok(());
        };

        let cell_width = self.snapshot.cell_width();
        for &index in indices {
            let height = measure_item(self.measurer.as_ref(), &items[index], cell_width, index);
            self.snapshot.set_height(index, height);
        }
        self.snapshot.rebuild_rows_from(first);
        trace!(updated = indices.len(), "Incremental update");
        Ok(())
    }

    /// Bring the layout in line with the latest change recorded by `items`,
    /// then finish any pending full recomputation.
    ///
    /// The container only remembers its latest change, so the same change may
    /// be applied more than once. A change whose item count does not line up
    /// with the cached layout (already applied, or changes missed in between)
    /// falls back to a full recomputation.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError::IndexOutOfRange`] from the incremental update.
    pub fn apply_change<T>(&mut self, items: &ChangeTracked<T>) -> Result<(), LayoutError>
    where
        M: MeasureHeight<T>,
    {
        let slice = items.as_slice();
        let cached = self.snapshot.item_count();
        match items.latest_change() {
            Change::Reset => self.reload(),
            Change::Inserted(indices) => self.insert_at(slice, indices)?,
            Change::Deleted(indices) if cached != slice.len() + indices.len() => {
                self.fall_back_to_full_layout(cached, slice.len(), "delete count mismatch");
            }
            Change::Deleted(indices) => self.remove_at(indices)?,
            Change::Updated(_) if cached != slice.len() => {
                self.fall_back_to_full_layout(cached, slice.len(), "update count mismatch");
            }
            Change::Updated(indices) => self.update_at(slice, indices)?,
        }
        self.prepare(slice);
        Ok(())
    }

    fn fall_back_to_full_layout(&mut self, cached: usize, items: usize, reason: &'static str) {
        if self.is_incremental_ready() {
            warn!(
                cached,
                items, reason, "Change does not match cached layout; falling back to full layout"
            );
        }
        self.invalidate(reason);
    }

    // === Queries ===

    /// The current snapshot.
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    /// Number of laid-out items.
    pub fn len(&self) -> usize {
        self.snapshot.item_count()
    }

    /// Check if no items are laid out.
    pub fn is_empty(&self) -> bool {
        self.snapshot.item_count() == 0
    }

    /// Active column count.
    pub fn column_count(&self) -> usize {
        self.snapshot.column_count()
    }

    /// Active cell width.
    pub fn cell_width(&self) -> f64 {
        self.snapshot.cell_width()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.snapshot.row_count()
    }

    /// Measured height of every item.
    pub fn item_heights(&self) -> &[f64] {
        self.snapshot.item_heights()
    }

    /// Normalized height of every row.
    pub fn row_heights(&self) -> &[f64] {
        self.snapshot.row_heights()
    }

    /// Vertical origin of every row.
    pub fn row_offsets(&self) -> &[f64] {
        self.snapshot.row_offsets()
    }

    /// Total scrollable size, footer included.
    pub fn content_size(&self) -> Size {
        self.snapshot.content_size()
    }

    /// Z-index reported for separator frames.
    pub fn separator_z_index(&self) -> i32 {
        self.snapshot.config().separator_z_index()
    }

    /// Frame of the cell for item `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if `index` is not a laid-out item.
    pub fn frame_for_item(&self, index: usize) -> Result<Rect, LayoutError> {
        self.snapshot
            .cell_frame(index)
            .ok_or_else(|| LayoutError::out_of_range(index, self.snapshot.item_count()))
    }

    /// Frame of the footer.
    pub fn frame_for_footer(&self) -> Rect {
        self.snapshot.footer_frame()
    }

    /// Frame of the vertical separator left of item `index`, if it has one.
    pub fn frame_for_vertical_separator(&self, index: usize) -> Option<Rect> {
        self.snapshot.vertical_separator_frame(index)
    }

    /// Frame of the horizontal separator above item `index`, if it has one.
    pub fn frame_for_horizontal_separator(&self, index: usize) -> Option<Rect> {
        self.snapshot.horizontal_separator_frame(index)
    }

    /// Indices of every element whose frame intersects `rect`.
    pub fn indices_visible_in(&self, rect: Rect) -> VisibleIndices {
        let visible = window::visible_indices(&self.snapshot, rect);
        trace!(?rect, elements = visible.len(), "Windowing query");
        visible
    }

    /// Frames of every element whose frame intersects `rect`.
    pub fn frames_visible_in(&self, rect: Rect) -> VisibleFrames {
        let visible = window::visible_frames(&self.snapshot, rect);
        trace!(?rect, elements = visible.len(), "Windowing query");
        visible
    }

    /// Frames visible in the attached viewport, padded by [`VISIBLE_RECT_GUARD`].
    ///
    /// Empty when no viewport is attached.
    pub fn frames_in_viewport(&self) -> VisibleFrames {
        match self.viewport {
            Some(viewport) => self.frames_visible_in(viewport.visible_rect().outset(VISIBLE_RECT_GUARD)),
            None => VisibleFrames::default(),
        }
    }

    // === Transitions ===

    /// Remember the scroll position before a layout transition.
    ///
    /// If the cell width implied by the attached viewport differs from the
    /// cached one, the layout is marked stale so the next
    /// [`prepare`](Self::prepare) runs before the new offset is computed.
    pub fn prepare_transition(&mut self, old_content_height: f64, current_offset: f64, top_inset: f64) {
        if let Some(viewport) = self.viewport {
            let column_count = self.config.columns_for(viewport.orientation());
            let cell_width = cell_width_for(&self.config, viewport.bounds.width, column_count);
            if cell_width != self.snapshot.cell_width() {
                self.invalidate("cell width changed across transition");
            }
        }
        self.pending_ratio = OffsetRatio::capture(old_content_height, current_offset, top_inset);
        trace!(ratio = ?self.pending_ratio, "Transition prepared");
    }

    /// [`prepare_transition`](Self::prepare_transition) using the attached
    /// viewport's scroll offset and top inset.
    pub fn prepare_transition_from_viewport(&mut self, old_content_height: f64) {
        if let Some(viewport) = self.viewport {
            self.prepare_transition(old_content_height, viewport.offset.y, viewport.insets.top);
        }
    }

    /// Resolve the scroll offset to use once the transition has been laid out.
    ///
    /// Consumes the ratio captured by
    /// [`prepare_transition`](Self::prepare_transition). Without a captured
    /// ratio or a viewport, `proposed` is returned unchanged. The horizontal
    /// component is always kept.
    pub fn target_offset_after_transition(&mut self, proposed: Point) -> Point {
        let Some(ratio) = self.pending_ratio.take() else {
            return proposed;
        };
        let Some(viewport) = self.viewport else {
            return proposed;
        };
        let y = ratio.resolve(
            self.snapshot.content_size().height,
            viewport.bounds.height,
            viewport.insets.top,
        );
        Point::new(proposed.x, y)
    }
}
