//! Layout test harness
//!
//! Drives a [`GridLayout`] the way a host would: owns the item sequence,
//! forwards every mutation to the engine, and moves the viewport. Items are
//! plain heights measured by identity, so expected geometry can be read
//! straight off the test input.

use std::fmt::Write;

use crate::layout::{
    ElementKind, GridConfig, GridLayout, LayoutSnapshot, Point, Rect, Viewport, VisibleFrames,
    VisibleIndices,
};

/// Measurer that reports each item's own value as its height.
pub type HeightMeasurer = fn(&f64, f64) -> f64;

/// The identity measurer.
pub fn item_height(height: &f64, _width: f64) -> f64 {
    *height
}

/// Host-side driver for a grid of fixed-height items.
pub struct LayoutHarness {
    items: Vec<f64>,
    layout: GridLayout<HeightMeasurer>,
    viewport: Viewport,
}

impl LayoutHarness {
    /// Lay out `heights` in a `width` × `height` viewport scrolled to the top.
    pub fn new(config: GridConfig, width: f64, height: f64, heights: Vec<f64>) -> Self {
        let viewport = Viewport::new(width, height);
        let mut layout =
            GridLayout::<HeightMeasurer>::new(config, item_height).expect("valid test config");
        layout.set_viewport(viewport);
        layout.prepare(&heights);
        Self {
            items: heights,
            layout,
            viewport,
        }
    }

    /// The engine under test.
    pub fn layout(&self) -> &GridLayout<HeightMeasurer> {
        &self.layout
    }

    /// Mutable access to the engine under test.
    pub fn layout_mut(&mut self) -> &mut GridLayout<HeightMeasurer> {
        &mut self.layout
    }

    /// Current item heights.
    pub fn items(&self) -> &[f64] {
        &self.items
    }

    /// Insert one item and update the layout incrementally.
    pub fn insert(&mut self, index: usize, height: f64) {
        self.items.insert(index, height);
        self.layout
            .insert_at(&self.items, &[index])
            .expect("insert index in range");
    }

    /// Remove items at pre-removal `indices` and update the layout incrementally.
    pub fn delete(&mut self, indices: &[usize]) {
        let mut descending = indices.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        descending.dedup();
        for &index in &descending {
            self.items.remove(index);
        }
        self.layout.remove_at(indices).expect("delete index in range");
    }

    /// Replace one item and update the layout incrementally.
    pub fn update(&mut self, index: usize, height: f64) {
        self.items[index] = height;
        self.layout
            .update_at(&self.items, &[index])
            .expect("update index in range");
    }

    /// Resize the viewport, keeping the scroll offset, and finish any pending layout.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.bounds.width = width;
        self.viewport.bounds.height = height;
        self.layout.set_viewport(self.viewport);
        self.layout.prepare(&self.items);
    }

    /// Scroll to vertical offset `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.viewport.offset = Point::new(0.0, y);
        self.layout.set_viewport(self.viewport);
    }

    /// A fresh engine laid out from scratch over the current items.
    pub fn full_rebuild(&self) -> GridLayout<HeightMeasurer> {
        let mut layout = GridLayout::<HeightMeasurer>::new(*self.layout.config(), item_height)
            .expect("valid test config");
        layout.set_viewport(self.viewport);
        layout.prepare(&self.items);
        layout
    }

    /// Indices of cells realised for the current viewport.
    pub fn visible_cells(&self) -> Vec<usize> {
        self.layout
            .frames_in_viewport()
            .cells
            .iter()
            .map(|element| element.index)
            .collect()
    }

    /// One line per element visible in `rect`.
    pub fn frame_table(&self, rect: Rect) -> String {
        render_frames(&self.layout.frames_visible_in(rect))
    }
}

/// Render frames as `kind[index] x=.. y=.. w=.. h=.. z=..` lines.
pub fn render_frames(frames: &VisibleFrames) -> String {
    let mut out = String::new();
    for element in frames.iter() {
        let kind = match element.kind {
            ElementKind::Cell => "cell",
            ElementKind::Footer => "footer",
            ElementKind::VerticalSeparator => "vsep",
            ElementKind::HorizontalSeparator => "hsep",
        };
        let f = element.frame;
        let _ = writeln!(
            out,
            "{kind}[{}] x={} y={} w={} h={} z={}",
            element.index, f.x, f.y, f.width, f.height, element.z_index
        );
    }
    out.trim_end().to_string()
}

/// Every element whose frame intersects `rect`, found by checking all of them.
pub fn brute_force_visible(snapshot: &LayoutSnapshot, rect: Rect) -> VisibleIndices {
    let hits = |frame: Option<Rect>| frame.is_some_and(|f| f.intersects(&rect));
    let all = 0..snapshot.item_count();
    VisibleIndices {
        cells: all.clone().filter(|&i| hits(snapshot.cell_frame(i))).collect(),
        footer: snapshot.footer_frame().intersects(&rect),
        vertical_separators: all
            .clone()
            .filter(|&i| hits(snapshot.vertical_separator_frame(i)))
            .collect(),
        horizontal_separators: all
            .filter(|&i| hits(snapshot.horizontal_separator_frame(i)))
            .collect(),
    }
}
