//! Viewport windowing scan.
//!
//! Each axis is scanned independently: columns left to right, rows top to
//! bottom starting at the first row that reaches the rectangle (binary search
//! on row bottoms). Both scans stop at the first element that starts past the
//! far edge, so the cost is proportional to the visible rows and columns, not
//! the item count. The two 1-D hit lists are then crossed into item indices.
//!
//! # Inclusion Policy
//! An element spanning `[start, end]` on an axis is hit when
//! `start <= rect_max && end >= rect_min`. Both edges are inclusive, matching
//! [`Rect::intersects`], so an element is reported exactly when its frame
//! intersects the query rectangle. Zero-thickness separators are therefore
//! reported when they lie on or inside the rectangle.
//!
//! Row origins move upward only under overlapping cells with a row shorter
//! than the separator. The row scan then keeps going past the far edge until
//! no later row can move back into the rectangle.

use super::snapshot::LayoutSnapshot;
use super::types::Rect;
use super::visible::{ElementFrame, ElementKind, VisibleFrames, VisibleIndices};

/// Slots hit along one axis: cell columns/rows and separator columns/rows.
#[derive(Debug, Default, PartialEq)]
struct AxisHits {
    cells: Vec<usize>,
    separators: Vec<usize>,
}

fn spans(start: f64, end: f64, min: f64, max: f64) -> bool {
    start <= max && end >= min
}

fn scan_columns(snapshot: &LayoutSnapshot, min_x: f64, max_x: f64) -> AxisHits {
    let mut hits = AxisHits::default();
    let cell_width = snapshot.cell_width();
    let separator_width = snapshot.config().vertical_separator_width;

    for column in 0..snapshot.column_count() {
        let cell_x = snapshot.column_x(column);
        let separator_x = (column > 0).then(|| snapshot.vertical_separator_x(column));

        let leading_edge = separator_x.map_or(cell_x, |x| x.min(cell_x));
        if leading_edge > max_x {
            break;
        }

        if let Some(x) = separator_x {
            if spans(x, x + separator_width, min_x, max_x) {
                hits.separators.push(column);
            }
        }
        if spans(cell_x, cell_x + cell_width, min_x, max_x) {
            hits.cells.push(column);
        }
    }
    hits
}

fn scan_rows(snapshot: &LayoutSnapshot, min_y: f64, max_y: f64) -> AxisHits {
    let mut hits = AxisHits::default();
    let offsets = snapshot.row_offsets();
    let heights = snapshot.row_heights();
    let separator_height = snapshot.config().horizontal_separator_height;

    for row in snapshot.first_row_reaching(min_y)..offsets.len() {
        let cell_y = offsets[row];
        let separator_y = (row > 0).then(|| snapshot.horizontal_separator_y(row));

        if snapshot.row_leading_edge(row) > max_y {
            if snapshot.rows_descend_after(row) {
                continue;
            }
            break;
        }

        if let Some(y) = separator_y {
            if spans(y, y + separator_height, min_y, max_y) {
                hits.separators.push(row);
            }
        }
        if spans(cell_y, cell_y + heights[row], min_y, max_y) {
            hits.cells.push(row);
        }
    }
    hits
}

fn cross(rows: &[usize], columns: &[usize], column_count: usize, item_count: usize) -> Vec<usize> {
    rows.iter()
        .flat_map(|row| columns.iter().map(move |column| row * column_count + column))
        .filter(|&index| index < item_count)
        .collect()
}

/// Indices of every element whose frame intersects `rect`.
pub(crate) fn visible_indices(snapshot: &LayoutSnapshot, rect: Rect) -> VisibleIndices {
    let columns = scan_columns(snapshot, rect.min_x(), rect.max_x());
    let rows = scan_rows(snapshot, rect.min_y(), rect.max_y());
    let column_count = snapshot.column_count();
    let item_count = snapshot.item_count();

    VisibleIndices {
        cells: cross(&rows.cells, &columns.cells, column_count, item_count),
        footer: snapshot.footer_frame().intersects(&rect),
        vertical_separators: cross(&rows.cells, &columns.separators, column_count, item_count),
        horizontal_separators: cross(&rows.separators, &columns.cells, column_count, item_count),
    }
}

/// Frames of every element whose frame intersects `rect`.
pub(crate) fn visible_frames(snapshot: &LayoutSnapshot, rect: Rect) -> VisibleFrames {
    let indices = visible_indices(snapshot, rect);
    let z_index = snapshot.config().separator_z_index();

    VisibleFrames {
        cells: indices
            .cells
            .iter()
            .filter_map(|&i| snapshot.cell_frame(i).map(|f| ElementFrame::cell(i, f)))
            .collect(),
        footer: indices
            .footer
            .then(|| ElementFrame::footer(snapshot.footer_frame())),
        vertical_separators: indices
            .vertical_separators
            .iter()
            .filter_map(|&i| {
                snapshot.vertical_separator_frame(i).map(|f| {
                    ElementFrame::separator(ElementKind::VerticalSeparator, i, f, z_index)
                })
            })
            .collect(),
        horizontal_separators: indices
            .horizontal_separators
            .iter()
            .filter_map(|&i| {
                snapshot.horizontal_separator_frame(i).map(|f| {
                    ElementFrame::separator(ElementKind::HorizontalSeparator, i, f, z_index)
                })
            })
            .collect(),
    }
}
