//! Windowing query results

use serde::Serialize;

use super::types::Rect;

/// Kind of layout element a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A content cell.
    Cell,
    /// The footer below the last row.
    Footer,
    /// Separator left of a cell (columns ≥ 1).
    VerticalSeparator,
    /// Separator above a cell (rows ≥ 1).
    HorizontalSeparator,
}

/// Indices of the elements intersecting a query rectangle.
///
/// Cell and separator indices are item indices: vertical separator `i` is the
/// one left of cell `i`, horizontal separator `i` the one above it. Each list
/// is in row-major order and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VisibleIndices {
    /// Cells intersecting the rectangle.
    pub cells: Vec<usize>,
    /// Whether the footer intersects the rectangle.
    pub footer: bool,
    /// Vertical separators intersecting the rectangle.
    pub vertical_separators: Vec<usize>,
    /// Horizontal separators intersecting the rectangle.
    pub horizontal_separators: Vec<usize>,
}

impl VisibleIndices {
    /// Check if nothing at all is visible.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
            && !self.footer
            && self.vertical_separators.is_empty()
            && self.horizontal_separators.is_empty()
    }

    /// Total number of visible elements, footer included.
    pub fn len(&self) -> usize {
        self.cells.len()
            + usize::from(self.footer)
            + self.vertical_separators.len()
            + self.horizontal_separators.len()
    }

    /// Check if the cell for `index` is visible.
    pub fn contains_cell(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

/// One positioned element, as handed to the host for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementFrame {
    /// What the element is.
    pub kind: ElementKind,
    /// Item index (0 for the footer).
    pub index: usize,
    /// Position and size in content coordinates.
    pub frame: Rect,
    /// Stacking order relative to cells (cells and footer are 0).
    pub z_index: i32,
}

impl ElementFrame {
    /// Frame for a cell.
    pub fn cell(index: usize, frame: Rect) -> Self {
        Self {
            kind: ElementKind::Cell,
            index,
            frame,
            z_index: 0,
        }
    }

    /// Frame for the footer.
    pub fn footer(frame: Rect) -> Self {
        Self {
            kind: ElementKind::Footer,
            index: 0,
            frame,
            z_index: 0,
        }
    }

    /// Frame for a separator.
    pub fn separator(kind: ElementKind, index: usize, frame: Rect, z_index: i32) -> Self {
        Self {
            kind,
            index,
            frame,
            z_index,
        }
    }
}

/// Frames of the elements intersecting a query rectangle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VisibleFrames {
    /// Cell frames.
    pub cells: Vec<ElementFrame>,
    /// Footer frame, if visible.
    pub footer: Option<ElementFrame>,
    /// Vertical separator frames.
    pub vertical_separators: Vec<ElementFrame>,
    /// Horizontal separator frames.
    pub horizontal_separators: Vec<ElementFrame>,
}

impl VisibleFrames {
    /// Iterate over every element: cells, footer, vertical then horizontal separators.
    pub fn iter(&self) -> impl Iterator<Item = &ElementFrame> {
        self.cells
            .iter()
            .chain(self.footer.iter())
            .chain(self.vertical_separators.iter())
            .chain(self.horizontal_separators.iter())
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Frame of the cell for `index`, if it is visible.
    pub fn cell_frame(&self, index: usize) -> Option<Rect> {
        self.cells.iter().find(|e| e.index == index).map(|e| e.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod indices {
        use super::*;

        #[test]
        fn default_is_empty() {
            let visible = VisibleIndices::default();
            assert!(visible.is_empty());
            assert_eq!(visible.len(), 0);
        }

        #[test]
        fn footer_alone_is_not_empty() {
            let visible = VisibleIndices {
                footer: true,
                ..Default::default()
            };
            assert!(!visible.is_empty());
            assert_eq!(visible.len(), 1);
        }

        #[test]
        fn len_counts_every_set() {
            let visible = VisibleIndices {
                cells: vec![0, 1, 2],
                footer: true,
                vertical_separators: vec![1],
                horizontal_separators: vec![2],
            };
            assert_eq!(visible.len(), 6);
            assert!(visible.contains_cell(2));
            assert!(!visible.contains_cell(3));
        }
    }

    mod frames {
        use super::*;

        #[test]
        fn iter_orders_cells_footer_then_separators() {
            let visible = VisibleFrames {
                cells: vec![ElementFrame::cell(0, Rect::ZERO)],
                footer: Some(ElementFrame::footer(Rect::ZERO)),
                vertical_separators: vec![ElementFrame::separator(
                    ElementKind::VerticalSeparator,
                    1,
                    Rect::ZERO,
                    -10,
                )],
                horizontal_separators: Vec::new(),
            };
            let kinds: Vec<_> = visible.iter().map(|e| e.kind).collect();
            assert_eq!(
                kinds,
                vec![
                    ElementKind::Cell,
                    ElementKind::Footer,
                    ElementKind::VerticalSeparator
                ]
            );
            assert_eq!(visible.len(), 3);
        }

        #[test]
        fn cell_frame_looks_up_by_index() {
            let frame = Rect::new(0.0, 10.0, 50.0, 20.0);
            let visible = VisibleFrames {
                cells: vec![ElementFrame::cell(4, frame)],
                ..Default::default()
            };
            assert_eq!(visible.cell_frame(4), Some(frame));
            assert_eq!(visible.cell_frame(5), None);
        }

        #[test]
        fn element_kind_serializes_snake_case() {
            let json = serde_json::to_string(&ElementKind::HorizontalSeparator).unwrap();
            assert_eq!(json, "\"horizontal_separator\"");
        }
    }
}
