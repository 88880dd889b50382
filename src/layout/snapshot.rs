//! Cached grid geometry.
//!
//! A [`LayoutSnapshot`] holds everything derived from one configuration, one
//! viewport width and one sequence of measured heights:
//!
//! - column count and cell width
//! - per-item measured heights
//! - per-row normalized heights (max of the row's cells)
//! - cumulative row offsets
//! - content size
//!
//! # Invariants
//! - `row_heights.len() == row_offsets.len() == ceil(item_heights.len() / column_count)`
//! - `row_heights[r] == max(item_heights[r*C .. min(r*C+C, n)])`
//! - `row_offsets[0] == 0`,
//!   `row_offsets[r] == row_offsets[r-1] + row_heights[r-1] ± horizontal_separator_height`
//!   (minus under overlapping cells)
//! - `content_size.height == bottom of last row + footer_height`
//!   (just `footer_height` when there are no rows)
//! - `row_reach[r] == max(bottom of rows 0..=r)`
//! - `row_descents[r]` counts rows in `1..=r` whose leading edge lies above
//!   the previous row's leading edge
//!
//! Row origins only move upward under overlapping cells with a row shorter
//! than the separator. `row_reach` and `row_descents` are prefix values, so
//! they stay exact when rows are rebuilt from a later row.

use super::config::GridConfig;
use super::types::{Rect, Size};

/// Derived geometry for one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    config: GridConfig,
    viewport_width: f64,
    column_count: usize,
    cell_width: f64,
    item_heights: Vec<f64>,
    row_heights: Vec<f64>,
    row_offsets: Vec<f64>,
    row_reach: Vec<f64>,
    row_descents: Vec<usize>,
    content_size: Size,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
            viewport_width: 0.0,
            column_count: 1,
            cell_width: 0.0,
            item_heights: Vec::new(),
            row_heights: Vec::new(),
            row_offsets: Vec::new(),
            row_reach: Vec::new(),
            row_descents: Vec::new(),
            content_size: Size::ZERO,
        }
    }
}

/// Width of one cell for the given viewport width and column count.
///
/// Attached cells split the full width; otherwise the vertical separators
/// are subtracted first. Never negative.
pub fn cell_width_for(config: &GridConfig, viewport_width: f64, column_count: usize) -> f64 {
    let columns = column_count.max(1) as f64;
    let content_width = if config.attached_cells {
        viewport_width
    } else {
        viewport_width - config.vertical_separator_width * (columns - 1.0)
    };
    (content_width / columns).max(0.0)
}

impl LayoutSnapshot {
    /// Build a snapshot from already-measured heights.
    ///
    /// `column_count` is clamped to at least 1.
    pub fn build(
        config: GridConfig,
        viewport_width: f64,
        column_count: usize,
        item_heights: Vec<f64>,
    ) -> Self {
        let column_count = column_count.max(1);
        let mut snapshot = Self {
            config,
            viewport_width,
            column_count,
            cell_width: cell_width_for(&config, viewport_width, column_count),
            item_heights,
            row_heights: Vec::new(),
            row_offsets: Vec::new(),
            row_reach: Vec::new(),
            row_descents: Vec::new(),
            content_size: Size::ZERO,
        };
        snapshot.rebuild_rows_from(0);
        snapshot
    }

    /// Recompute row heights, row offsets and content size starting at the row
    /// that contains `item_index`.
    ///
    /// Rows strictly before that row keep their heights and offsets: their
    /// membership cannot change when items at or after `item_index` change.
    pub fn rebuild_rows_from(&mut self, item_index: usize) {
        let columns = self.column_count;
        let first_row = (item_index / columns).min(self.row_heights.len());

        self.row_heights.truncate(first_row);
        self.row_offsets.truncate(first_row);
        self.row_reach.truncate(first_row);
        self.row_descents.truncate(first_row);

        let mut row = first_row;
        while row * columns < self.item_heights.len() {
            let start = row * columns;
            let end = (start + columns).min(self.item_heights.len());
            let height = self.item_heights[start..end]
                .iter()
                .copied()
                .fold(0.0, f64::max);
            let offset = match row {
                0 => 0.0,
                _ => self.next_row_origin(row - 1),
            };
            self.row_heights.push(height);
            self.row_offsets.push(offset);
            self.push_row_summary(row);
            row += 1;
        }

        self.content_size = Size::new(self.viewport_width, self.rows_bottom() + self.config.footer_height);
    }

    fn next_row_origin(&self, row: usize) -> f64 {
        let bottom = self.row_offsets[row] + self.row_heights[row];
        if self.config.overlapping_cells {
            bottom - self.config.horizontal_separator_height
        } else {
            bottom + self.config.horizontal_separator_height
        }
    }

    fn push_row_summary(&mut self, row: usize) {
        let bottom = self.row_offsets[row] + self.row_heights[row];
        let (reach, descents) = match row {
            0 => (bottom, 0),
            _ => {
                let descended = self.row_leading_edge(row) < self.row_leading_edge(row - 1);
                (
                    self.row_reach[row - 1].max(bottom),
                    self.row_descents[row - 1] + usize::from(descended),
                )
            }
        };
        self.row_reach.push(reach);
        self.row_descents.push(descents);
    }

    fn rows_bottom(&self) -> f64 {
        match (self.row_offsets.last(), self.row_heights.last()) {
            (Some(offset), Some(height)) => offset + height,
            _ => 0.0,
        }
    }

    // === Measured heights ===

    /// Splice a newly measured height in at `index`, shifting later entries.
    ///
    /// # Panics
    /// Panics if `index > item_count()`.
    pub fn insert_height(&mut self, index: usize, height: f64) {
        self.item_heights.insert(index, height);
    }

    /// Drop the measured height at `index`.
    ///
    /// # Panics
    /// Panics if `index >= item_count()`.
    pub fn remove_height(&mut self, index: usize) {
        self.item_heights.remove(index);
    }

    /// Overwrite the measured height at `index`.
    ///
    /// # Panics
    /// Panics if `index >= item_count()`.
    pub fn set_height(&mut self, index: usize, height: f64) {
        self.item_heights[index] = height;
    }

    // === Accessors ===

    /// Configuration this snapshot was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Viewport width this snapshot was built for.
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Width of every cell.
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Number of laid-out items.
    pub fn item_count(&self) -> usize {
        self.item_heights.len()
    }

    /// Number of rows, including a partial last row.
    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    /// Measured height of every item.
    pub fn item_heights(&self) -> &[f64] {
        &self.item_heights
    }

    /// Normalized height of every row.
    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Vertical origin of every row.
    pub fn row_offsets(&self) -> &[f64] {
        &self.row_offsets
    }

    /// Total scrollable size, footer included.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    // === Geometry ===

    /// Topmost edge of `row` including the separator above it.
    pub(crate) fn row_leading_edge(&self, row: usize) -> f64 {
        match row {
            0 => self.row_offsets[0],
            _ => self.horizontal_separator_y(row).min(self.row_offsets[row]),
        }
    }

    /// First row whose bottom, or the bottom of any row before it, reaches `y`.
    ///
    /// Every row before the returned one, separators included, ends above `y`.
    pub(crate) fn first_row_reaching(&self, y: f64) -> usize {
        self.row_reach.partition_point(|&reach| reach < y)
    }

    /// Whether some row after `row` has a leading edge above its predecessor's.
    pub(crate) fn rows_descend_after(&self, row: usize) -> bool {
        match (self.row_descents.get(row), self.row_descents.last()) {
            (Some(through), Some(total)) => total > through,
            _ => false,
        }
    }

    /// Left edge of cells in `column`.
    pub(crate) fn column_x(&self, column: usize) -> f64 {
        let stride = if self.config.attached_cells {
            self.cell_width
        } else {
            self.cell_width + self.config.vertical_separator_width
        };
        column as f64 * stride
    }

    /// Left edge of the vertical separator that precedes `column`.
    pub(crate) fn vertical_separator_x(&self, column: usize) -> f64 {
        let width = self.config.vertical_separator_width;
        if self.config.attached_cells {
            self.column_x(column) - width / 2.0
        } else {
            self.column_x(column) - width
        }
    }

    /// Top edge of the horizontal separator that precedes `row`.
    pub(crate) fn horizontal_separator_y(&self, row: usize) -> f64 {
        if self.config.overlapping_cells {
            self.row_offsets[row]
        } else {
            self.row_offsets[row] - self.config.horizontal_separator_height
        }
    }

    /// Frame of the cell for item `index`, or `None` past the end.
    pub fn cell_frame(&self, index: usize) -> Option<Rect> {
        if index >= self.item_count() {
            return None;
        }
        let row = index / self.column_count;
        let column = index % self.column_count;
        Some(Rect::new(
            self.column_x(column),
            self.row_offsets[row],
            self.cell_width,
            self.row_heights[row],
        ))
    }

    /// Frame of the vertical separator left of item `index`.
    ///
    /// `None` for items in the first column, which have no separator, and past the end.
    pub fn vertical_separator_frame(&self, index: usize) -> Option<Rect> {
        if index >= self.item_count() || index % self.column_count == 0 {
            return None;
        }
        let row = index / self.column_count;
        let column = index % self.column_count;
        Some(Rect::new(
            self.vertical_separator_x(column),
            self.row_offsets[row],
            self.config.vertical_separator_width,
            self.row_heights[row],
        ))
    }

    /// Frame of the horizontal separator above item `index`.
    ///
    /// `None` for items in the first row, which have no separator, and past the end.
    pub fn horizontal_separator_frame(&self, index: usize) -> Option<Rect> {
        if index >= self.item_count() || index < self.column_count {
            return None;
        }
        let row = index / self.column_count;
        let column = index % self.column_count;
        Some(Rect::new(
            self.column_x(column),
            self.horizontal_separator_y(row),
            self.cell_width,
            self.config.horizontal_separator_height,
        ))
    }

    /// Frame of the footer, pinned to the bottom of the content.
    pub fn footer_frame(&self) -> Rect {
        let footer_height = self.config.footer_height;
        Rect::new(
            0.0,
            self.content_size.height - footer_height,
            self.content_size.width,
            footer_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(columns: usize) -> GridConfig {
        GridConfig::default()
            .with_columns(columns, columns)
            .with_footer_height(0.0)
    }

    mod cell_width {
        use super::*;

        #[test]
        fn subtracts_separators_between_columns() {
            let config = plain(3).with_separators(6.0, 0.0);
            assert_eq!(cell_width_for(&config, 312.0, 3), 100.0);
        }

        #[test]
        fn attached_cells_ignore_separators() {
            let config = plain(3).with_separators(6.0, 0.0).with_attached_cells(true);
            assert_eq!(cell_width_for(&config, 300.0, 3), 100.0);
        }

        #[test]
        fn never_negative() {
            let config = plain(4).with_separators(50.0, 0.0);
            assert_eq!(cell_width_for(&config, 100.0, 4), 0.0);
        }
    }

    mod rows {
        use super::*;

        fn short_overlapping_rows() -> LayoutSnapshot {
            let config = plain(1)
                .with_separators(0.0, 4.0)
                .with_overlapping_cells(true);
            LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 0.0, 0.0, 10.0])
        }

        #[test]
        fn short_overlapping_rows_move_upward() {
            let snapshot = short_overlapping_rows();
            assert_eq!(snapshot.row_offsets(), &[0.0, 6.0, 2.0, -2.0]);
            assert!(snapshot.rows_descend_after(0));
            assert!(snapshot.rows_descend_after(2));
            assert!(!snapshot.rows_descend_after(3));
        }

        #[test]
        fn reaching_row_uses_tallest_bottom_so_far() {
            let snapshot = short_overlapping_rows();
            assert_eq!(snapshot.first_row_reaching(5.0), 0);
            assert_eq!(snapshot.first_row_reaching(10.0), 0);
            assert_eq!(snapshot.first_row_reaching(10.5), 4);
        }

        #[test]
        fn monotone_rows_never_descend() {
            let config = plain(1).with_separators(0.0, 4.0);
            let snapshot = LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 0.0, 0.0, 10.0]);
            assert!(!snapshot.rows_descend_after(0));
        }

        #[test]
        fn rebuild_keeps_row_summaries_exact() {
            let config = plain(1)
                .with_separators(0.0, 4.0)
                .with_overlapping_cells(true);
            let mut snapshot = LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 10.0, 10.0]);
            snapshot.set_height(1, 0.0);
            snapshot.insert_height(3, 0.0);
            snapshot.rebuild_rows_from(1);

            let rebuilt = LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 0.0, 10.0, 0.0]);
            assert_eq!(snapshot, rebuilt);
        }

        #[test]
        fn row_height_is_max_of_row() {
            let snapshot = LayoutSnapshot::build(plain(2), 200.0, 2, vec![10.0, 30.0, 20.0, 5.0]);
            assert_eq!(snapshot.row_heights(), &[30.0, 20.0]);
            assert_eq!(snapshot.row_offsets(), &[0.0, 30.0]);
            assert_eq!(snapshot.content_size(), Size::new(200.0, 50.0));
        }

        #[test]
        fn partial_last_row_uses_present_cells_only() {
            let snapshot = LayoutSnapshot::build(plain(2), 200.0, 2, vec![10.0, 20.0, 5.0]);
            assert_eq!(snapshot.row_heights(), &[20.0, 5.0]);
            assert_eq!(snapshot.row_offsets(), &[0.0, 20.0]);
            assert_eq!(snapshot.content_size().height, 25.0);
        }

        #[test]
        fn separators_add_between_rows() {
            let config = plain(1).with_separators(0.0, 2.0).with_footer_height(10.0);
            let snapshot = LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 10.0, 10.0]);
            assert_eq!(snapshot.row_offsets(), &[0.0, 12.0, 24.0]);
            assert_eq!(snapshot.content_size().height, 44.0);
        }

        #[test]
        fn overlapping_cells_subtract_separators() {
            let config = plain(1)
                .with_separators(0.0, 2.0)
                .with_footer_height(10.0)
                .with_overlapping_cells(true);
            let snapshot = LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 10.0, 10.0]);
            assert_eq!(snapshot.row_offsets(), &[0.0, 8.0, 16.0]);
            assert_eq!(snapshot.content_size().height, 36.0);
        }

        #[test]
        fn empty_content_is_footer_only() {
            let config = plain(3).with_separators(1.0, 1.0).with_footer_height(44.0);
            let snapshot = LayoutSnapshot::build(config, 320.0, 3, Vec::new());
            assert_eq!(snapshot.row_count(), 0);
            assert_eq!(snapshot.content_size(), Size::new(320.0, 44.0));
        }

        #[test]
        fn rebuild_from_later_row_keeps_earlier_rows() {
            let mut snapshot =
                LayoutSnapshot::build(plain(2), 200.0, 2, vec![10.0, 30.0, 20.0, 5.0]);
            snapshot.set_height(3, 50.0);
            snapshot.rebuild_rows_from(3);
            assert_eq!(snapshot.row_heights(), &[30.0, 50.0]);
            assert_eq!(snapshot.row_offsets(), &[0.0, 30.0]);
            assert_eq!(snapshot.content_size().height, 80.0);
        }

        #[test]
        fn rebuild_after_append_adds_new_row() {
            let mut snapshot = LayoutSnapshot::build(plain(2), 200.0, 2, vec![10.0, 30.0]);
            snapshot.insert_height(2, 7.0);
            snapshot.rebuild_rows_from(2);
            assert_eq!(snapshot.row_heights(), &[30.0, 7.0]);
            assert_eq!(snapshot.row_offsets(), &[0.0, 30.0]);
        }

        #[test]
        fn rebuild_after_removing_lone_last_item_drops_row() {
            let mut snapshot = LayoutSnapshot::build(plain(2), 200.0, 2, vec![10.0, 30.0, 5.0]);
            snapshot.remove_height(2);
            snapshot.rebuild_rows_from(2);
            assert_eq!(snapshot.row_count(), 1);
            assert_eq!(snapshot.content_size().height, 30.0);
        }
    }

    mod frames {
        use super::*;

        fn grid() -> LayoutSnapshot {
            let config = GridConfig::default()
                .with_columns(2, 2)
                .with_separators(2.0, 4.0)
                .with_footer_height(44.0);
            LayoutSnapshot::build(config, 202.0, 2, vec![10.0, 30.0, 20.0])
        }

        #[test]
        fn cell_frames_use_column_stride_and_row_offset() {
            let snapshot = grid();
            assert_eq!(snapshot.cell_frame(0), Some(Rect::new(0.0, 0.0, 100.0, 30.0)));
            assert_eq!(snapshot.cell_frame(1), Some(Rect::new(102.0, 0.0, 100.0, 30.0)));
            assert_eq!(snapshot.cell_frame(2), Some(Rect::new(0.0, 34.0, 100.0, 20.0)));
            assert_eq!(snapshot.cell_frame(3), None);
        }

        #[test]
        fn vertical_separator_sits_left_of_cell() {
            let snapshot = grid();
            assert_eq!(snapshot.vertical_separator_frame(0), None);
            assert_eq!(
                snapshot.vertical_separator_frame(1),
                Some(Rect::new(100.0, 0.0, 2.0, 30.0))
            );
        }

        #[test]
        fn horizontal_separator_sits_above_cell() {
            let snapshot = grid();
            assert_eq!(snapshot.horizontal_separator_frame(1), None);
            assert_eq!(
                snapshot.horizontal_separator_frame(2),
                Some(Rect::new(0.0, 30.0, 100.0, 4.0))
            );
        }

        #[test]
        fn footer_is_pinned_to_content_bottom() {
            let snapshot = grid();
            assert_eq!(snapshot.content_size().height, 98.0);
            assert_eq!(snapshot.footer_frame(), Rect::new(0.0, 54.0, 202.0, 44.0));
        }

        #[test]
        fn attached_separator_straddles_cell_edge() {
            let config = GridConfig::default()
                .with_columns(2, 2)
                .with_separators(2.0, 0.0)
                .with_attached_cells(true);
            let snapshot = LayoutSnapshot::build(config, 200.0, 2, vec![10.0, 10.0]);
            assert_eq!(snapshot.cell_frame(1), Some(Rect::new(100.0, 0.0, 100.0, 10.0)));
            assert_eq!(
                snapshot.vertical_separator_frame(1),
                Some(Rect::new(99.0, 0.0, 2.0, 10.0))
            );
        }

        #[test]
        fn overlapping_separator_covers_top_of_cell() {
            let config = GridConfig::default()
                .with_columns(1, 1)
                .with_separators(0.0, 2.0)
                .with_overlapping_cells(true);
            let snapshot = LayoutSnapshot::build(config, 100.0, 1, vec![10.0, 10.0]);
            assert_eq!(snapshot.cell_frame(1), Some(Rect::new(0.0, 8.0, 100.0, 10.0)));
            assert_eq!(
                snapshot.horizontal_separator_frame(1),
                Some(Rect::new(0.0, 8.0, 100.0, 2.0))
            );
        }
    }
}
