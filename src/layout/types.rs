//! Core geometry value types

use serde::{Deserialize, Serialize};

/// A point in content coordinates (origin at the top-left of the content area).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Zero-sized value.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Orientation implied by these bounds.
    ///
    /// Strictly narrower than tall is portrait; a square counts as landscape.
    pub fn orientation(&self) -> Orientation {
        if self.width < self.height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Axis-aligned rectangle.
///
/// Width and height are expected to be non-negative; the `min_*`/`max_*`
/// accessors assume so.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Left edge.
    pub fn min_x(&self) -> f64 {
        self.x
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Origin of the rectangle.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Grow the rectangle by `amount` on every side.
    ///
    /// Used to pad a visible region with a guard band so elements touching
    /// the edge are reported before they scroll into view.
    pub fn outset(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Closed-interval overlap test on both axes.
    ///
    /// Rectangles that only share an edge count as intersecting, which keeps
    /// zero-thickness separators reportable.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }
}

/// Content insets reported by the host scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Inset above the content.
    pub top: f64,
    /// Inset left of the content.
    pub left: f64,
    /// Inset below the content.
    pub bottom: f64,
    /// Inset right of the content.
    pub right: f64,
}

impl EdgeInsets {
    /// Create new insets.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Viewport orientation, selecting which configured column count applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Width strictly less than height.
    Portrait,
    /// Width greater than or equal to height.
    Landscape,
}

/// Read-only description of the host scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Visible bounds size.
    pub bounds: Size,
    /// Content insets.
    pub insets: EdgeInsets,
    /// Current scroll offset.
    pub offset: Point,
}

impl Viewport {
    /// Viewport of the given size, scrolled to the top with no insets.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Size::new(width, height),
            insets: EdgeInsets::default(),
            offset: Point::default(),
        }
    }

    /// Set the scroll offset.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    /// Set the content insets.
    pub fn with_insets(mut self, insets: EdgeInsets) -> Self {
        self.insets = insets;
        self
    }

    /// Orientation of the bounds.
    pub fn orientation(&self) -> Orientation {
        self.bounds.orientation()
    }

    /// Region of content currently on screen.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.bounds.width,
            self.bounds.height,
        )
    }
}
