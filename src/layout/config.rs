//! Grid configuration.

use serde::{Deserialize, Serialize};

use super::types::Orientation;
use crate::model::error::LayoutError;

/// Default footer height, matching a standard toolbar row.
pub const DEFAULT_FOOTER_HEIGHT: f64 = 44.0;

/// Parameters that shape the grid geometry.
///
/// Changing any of these requires a full recomputation; the engine marks its
/// layout stale whenever a new configuration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Column count when the viewport is narrower than it is tall.
    pub portrait_columns: usize,
    /// Column count otherwise.
    pub landscape_columns: usize,
    /// Thickness of the separator between adjacent columns.
    pub vertical_separator_width: f64,
    /// Thickness of the separator between adjacent rows.
    pub horizontal_separator_height: f64,
    /// Height of the footer region below the last row.
    pub footer_height: f64,
    /// Cells fill the full width; vertical separators overlay cell edges.
    pub attached_cells: bool,
    /// Rows overlap by the horizontal separator thickness.
    pub overlapping_cells: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            portrait_columns: 1,
            landscape_columns: 1,
            vertical_separator_width: 0.0,
            horizontal_separator_height: 0.0,
            footer_height: DEFAULT_FOOTER_HEIGHT,
            attached_cells: false,
            overlapping_cells: false,
        }
    }
}

impl GridConfig {
    /// Set portrait and landscape column counts.
    pub fn with_columns(mut self, portrait: usize, landscape: usize) -> Self {
        self.portrait_columns = portrait;
        self.landscape_columns = landscape;
        self
    }

    /// Set separator thicknesses.
    pub fn with_separators(mut self, vertical_width: f64, horizontal_height: f64) -> Self {
        self.vertical_separator_width = vertical_width;
        self.horizontal_separator_height = horizontal_height;
        self
    }

    /// Set the footer height.
    pub fn with_footer_height(mut self, footer_height: f64) -> Self {
        self.footer_height = footer_height;
        self
    }

    /// Enable or disable attached-cells mode.
    pub fn with_attached_cells(mut self, attached: bool) -> Self {
        self.attached_cells = attached;
        self
    }

    /// Enable or disable overlapping-cells mode.
    pub fn with_overlapping_cells(mut self, overlapping: bool) -> Self {
        self.overlapping_cells = overlapping;
        self
    }

    /// Column count for the given orientation.
    pub fn columns_for(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Portrait => self.portrait_columns,
            Orientation::Landscape => self.landscape_columns,
        }
    }

    /// Z-index separators are drawn at relative to cells.
    ///
    /// Attached cells leave no gap for separators, so they are drawn on top.
    pub fn separator_z_index(&self) -> i32 {
        if self.attached_cells {
            10
        } else {
            -10
        }
    }

    /// Reject configurations the engine cannot lay out.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ConfigurationInvalid`] when a column count is zero or
    /// a thickness is negative or not finite.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.portrait_columns < 1 {
            return Err(LayoutError::invalid_config(
                "portrait_columns",
                "column count must be at least 1",
            ));
        }
        if self.landscape_columns < 1 {
            return Err(LayoutError::invalid_config(
                "landscape_columns",
                "column count must be at least 1",
            ));
        }
        for (field, value) in [
            ("vertical_separator_width", self.vertical_separator_width),
            ("horizontal_separator_height", self.horizontal_separator_height),
            ("footer_height", self.footer_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::invalid_config(
                    field,
                    format!("must be a finite, non-negative length (got {value})"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_column_with_toolbar_footer() {
        let config = GridConfig::default();
        assert_eq!(config.portrait_columns, 1);
        assert_eq!(config.landscape_columns, 1);
        assert_eq!(config.footer_height, 44.0);
        assert!(!config.attached_cells);
        assert!(!config.overlapping_cells);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn columns_follow_orientation() {
        let config = GridConfig::default().with_columns(2, 4);
        assert_eq!(config.columns_for(Orientation::Portrait), 2);
        assert_eq!(config.columns_for(Orientation::Landscape), 4);
    }

    #[test]
    fn zero_portrait_columns_rejected() {
        let err = GridConfig::default().with_columns(0, 2).validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ConfigurationInvalid { field: "portrait_columns", .. }
        ));
    }

    #[test]
    fn zero_landscape_columns_rejected() {
        let err = GridConfig::default().with_columns(2, 0).validate().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ConfigurationInvalid { field: "landscape_columns", .. }
        ));
    }

    #[test]
    fn negative_separator_rejected() {
        let err = GridConfig::default()
            .with_separators(-1.0, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ConfigurationInvalid { field: "vertical_separator_width", .. }
        ));
    }

    #[test]
    fn nan_footer_rejected() {
        let err = GridConfig::default()
            .with_footer_height(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ConfigurationInvalid { field: "footer_height", .. }
        ));
    }

    #[test]
    fn separator_z_index_depends_on_attachment() {
        assert_eq!(GridConfig::default().separator_z_index(), -10);
        assert_eq!(
            GridConfig::default().with_attached_cells(true).separator_z_index(),
            10
        );
    }
}
