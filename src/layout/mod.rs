//! Normalized-height grid layout.
//!
//! Items flow left to right into rows of a fixed column count; every row is
//! as tall as its tallest cell. The engine caches per-item measurements and
//! cumulative row offsets so that:
//!
//! - frame lookups are O(1),
//! - viewport queries touch only the visible rows and columns,
//! - inserts, removals and updates rebuild rows from the first affected row only.
//!
//! Pure geometry lives in [`snapshot`] and [`window`]; [`grid`] owns the
//! lifecycle (viewport tracking, invalidation, scroll-ratio transitions).

pub mod config;
pub mod grid;
pub mod measure;
pub mod snapshot;
pub mod transition;
pub mod types;
pub mod visible;
mod window;

pub use config::{GridConfig, DEFAULT_FOOTER_HEIGHT};
pub use grid::{GridLayout, LayoutState, VISIBLE_RECT_GUARD};
pub use measure::{sanitize_height, MeasureHeight};
pub use snapshot::{cell_width_for, LayoutSnapshot};
pub use transition::OffsetRatio;
pub use types::{EdgeInsets, Orientation, Point, Rect, Size, Viewport};
pub use visible::{ElementFrame, ElementKind, VisibleFrames, VisibleIndices};
