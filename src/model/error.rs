//! Error types for normgrid.
//!
//! Errors are `thiserror` enums carrying structured context so callers can match
//! on the failure instead of parsing messages.
//!
//! # Error Hierarchy
//!
//! - [`LayoutError`] - Caller errors against the layout engine and the change-tracked
//!   container (bad indices, invalid configuration). Never retried.
//! - [`InspectError`] - Failures of the `normgrid` inspector: configuration, logging
//!   setup, reading the item file, writing the report.
//!
//! # Measurement Failures
//!
//! A measurer that returns a negative or non-finite height, or no measurer at all,
//! is not an error. The engine degrades the item to zero height and logs a warning
//! (see [`crate::layout::measure::sanitize_height`]).

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Errors reported by the layout engine and the change-tracked container.
///
/// All operations validate their input before mutating state, so an `Err`
/// guarantees the previous layout snapshot is still in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// An index addressed an element beyond the end of the sequence.
    #[error("Index {index} out of range (len: {len})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Sequence length at the time of the access.
        len: usize,
    },

    /// The grid configuration cannot be laid out.
    #[error("Invalid configuration for {field}: {reason}")]
    ConfigurationInvalid {
        /// Name of the rejected field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl LayoutError {
    /// Build an [`LayoutError::IndexOutOfRange`].
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`LayoutError::ConfigurationInvalid`].
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigurationInvalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures of the `normgrid` inspector binary.
///
/// Every variant converts via `From` so the inspector composes with `?`.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The item file could not be read.
    #[error("Failed to read items from {path:?}: {source}")]
    ReadItems {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The item file is not a JSON array of cards.
    #[error("Failed to parse items in {path:?}: {source}")]
    ParseItems {
        /// Path with malformed content.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The resolved configuration or a query was rejected by the engine.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The report could not be serialised.
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    /// The report could not be written.
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
