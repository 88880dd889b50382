//! Offline layout inspection.
//!
//! Lays out a set of cards for a given viewport and reports the frames a host
//! would realise, without any rendering surface.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::ResolvedConfig;
use crate::layout::{GridLayout, Point, Size, Viewport, VisibleFrames};
use crate::model::card::Card;
use crate::model::error::InspectError;

/// Viewport to inspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InspectRequest {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Vertical scroll offset.
    pub offset: f64,
}

/// What the layout looks like from the requested viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    /// Total scrollable size.
    pub content_size: Size,
    /// Active column count.
    pub column_count: usize,
    /// Active cell width.
    pub cell_width: f64,
    /// Elements intersecting the viewport, padded by the guard band.
    pub visible: VisibleFrames,
}

/// Read cards from a JSON array file, or fall back to the built-in samples.
///
/// # Errors
///
/// Returns [`InspectError::ReadItems`] or [`InspectError::ParseItems`] if the
/// file cannot be read or is not a JSON array of cards.
pub fn load_cards(path: Option<&Path>) -> Result<Vec<Card>, InspectError> {
    let Some(path) = path else {
        return Ok(Card::samples());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| InspectError::ReadItems {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| InspectError::ParseItems {
        path: path.to_path_buf(),
        source,
    })
}

/// Lay out `cards` with `config` and report what `request` sees.
///
/// # Errors
///
/// Returns [`InspectError::Layout`] if the resolved grid configuration is invalid.
pub fn inspect(
    config: &ResolvedConfig,
    cards: &[Card],
    request: InspectRequest,
) -> Result<InspectReport, InspectError> {
    let mut layout = GridLayout::new(config.grid_config()?, config.measurer())?;
    layout.set_viewport(
        Viewport::new(request.width, request.height).with_offset(Point::new(0.0, request.offset)),
    );
    layout.prepare(cards);

    info!(
        cards = cards.len(),
        rows = layout.row_count(),
        content_height = layout.content_size().height,
        "Layout inspected"
    );

    Ok(InspectReport {
        content_size: layout.content_size(),
        column_count: layout.column_count(),
        cell_width: layout.cell_width(),
        visible: layout.frames_in_viewport(),
    })
}

/// Write `report` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns [`InspectError::Encode`] or [`InspectError::Output`] on failure.
pub fn write_report(report: &InspectReport, mut writer: impl Write) -> Result<(), InspectError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
