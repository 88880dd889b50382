//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::layout::config::GridConfig;
use crate::measure::{CardMeasurer, CardMetrics, MeasureStyle, TextMetrics};
use crate::model::error::LayoutError;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "NORMGRID_CONFIG";

/// Environment variable overriding the portrait column count.
pub const PORTRAIT_COLUMNS_ENV_VAR: &str = "NORMGRID_PORTRAIT_COLUMNS";

/// Environment variable overriding the landscape column count.
pub const LANDSCAPE_COLUMNS_ENV_VAR: &str = "NORMGRID_LANDSCAPE_COLUMNS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything not specified keeps its default.
/// Corresponds to `~/.config/normgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Columns when the viewport is narrower than it is tall.
    #[serde(default)]
    pub portrait_columns: Option<usize>,

    /// Columns otherwise.
    #[serde(default)]
    pub landscape_columns: Option<usize>,

    /// Vertical separator thickness.
    #[serde(default)]
    pub vertical_separator_width: Option<f64>,

    /// Horizontal separator thickness.
    #[serde(default)]
    pub horizontal_separator_height: Option<f64>,

    /// Footer height.
    #[serde(default)]
    pub footer_height: Option<f64>,

    /// Cells fill the full width with separators overlaid.
    #[serde(default)]
    pub attached_cells: Option<bool>,

    /// Rows overlap by the horizontal separator thickness.
    #[serde(default)]
    pub overlapping_cells: Option<bool>,

    /// Card shape to measure.
    #[serde(default)]
    pub style: Option<MeasureStyle>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Card measurement section.
    #[serde(default)]
    pub measure: Option<MeasureSection>,
}

/// `[measure]` section of the config file.
///
/// ```toml
/// [measure]
/// glyph_width = 7.0
/// line_height = 17.0
/// image_aspect = 0.75
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MeasureSection {
    /// Advance of one text column.
    #[serde(default)]
    pub glyph_width: Option<f64>,
    /// Height of one text line.
    #[serde(default)]
    pub line_height: Option<f64>,
    /// Image height divided by image width.
    #[serde(default)]
    pub image_aspect: Option<f64>,
    /// Sum of vertical margins.
    #[serde(default)]
    pub vertical_padding: Option<f64>,
    /// Sum of horizontal label margins.
    #[serde(default)]
    pub side_padding: Option<f64>,
    /// List thumbnail width.
    #[serde(default)]
    pub thumbnail_width: Option<f64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Grid geometry. Not yet validated.
    pub grid: GridConfig,
    /// Card shape to measure.
    pub style: MeasureStyle,
    /// Card measurement metrics.
    pub card_metrics: CardMetrics,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            style: MeasureStyle::default(),
            card_metrics: CardMetrics::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// The grid configuration, validated.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ConfigurationInvalid`] if a merged value cannot be laid out.
    pub fn grid_config(&self) -> Result<GridConfig, LayoutError> {
        self.grid.validate()?;
        Ok(self.grid)
    }

    /// Measurer for the configured card style.
    pub fn measurer(&self) -> CardMeasurer {
        CardMeasurer::new(self.style, self.card_metrics)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/normgrid/normgrid.log` on Unix-like systems,
/// or the platform state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("normgrid").join("normgrid.log")
    } else {
        PathBuf::from("normgrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/normgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("normgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `NORMGRID_CONFIG` environment variable
/// 3. Default path `~/.config/normgrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `NORMGRID_PORTRAIT_COLUMNS`: Override portrait column count
/// - `NORMGRID_LANDSCAPE_COLUMNS`: Override landscape column count
///
/// Values that do not parse as a column count are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(columns) = env_columns(PORTRAIT_COLUMNS_ENV_VAR) {
        config.grid.portrait_columns = columns;
    }
    if let Some(columns) = env_columns(LANDSCAPE_COLUMNS_ENV_VAR) {
        config.grid.landscape_columns = columns;
    }
    config
}

fn env_columns(var: &str) -> Option<usize> {
    std::env::var(var).ok()?.trim().parse().ok()
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let grid = GridConfig {
        portrait_columns: config
            .portrait_columns
            .unwrap_or(defaults.grid.portrait_columns),
        landscape_columns: config
            .landscape_columns
            .unwrap_or(defaults.grid.landscape_columns),
        vertical_separator_width: config
            .vertical_separator_width
            .unwrap_or(defaults.grid.vertical_separator_width),
        horizontal_separator_height: config
            .horizontal_separator_height
            .unwrap_or(defaults.grid.horizontal_separator_height),
        footer_height: config.footer_height.unwrap_or(defaults.grid.footer_height),
        attached_cells: config.attached_cells.unwrap_or(defaults.grid.attached_cells),
        overlapping_cells: config
            .overlapping_cells
            .unwrap_or(defaults.grid.overlapping_cells),
    };

    ResolvedConfig {
        grid,
        style: config.style.unwrap_or(defaults.style),
        card_metrics: merge_measure(config.measure, defaults.card_metrics),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

fn merge_measure(section: Option<MeasureSection>, defaults: CardMetrics) -> CardMetrics {
    let Some(section) = section else {
        return defaults;
    };
    CardMetrics {
        text: TextMetrics {
            glyph_width: section.glyph_width.unwrap_or(defaults.text.glyph_width),
            line_height: section.line_height.unwrap_or(defaults.text.line_height),
        },
        image_aspect: section.image_aspect.unwrap_or(defaults.image_aspect),
        vertical_padding: section.vertical_padding.unwrap_or(defaults.vertical_padding),
        side_padding: section.side_padding.unwrap_or(defaults.side_padding),
        thumbnail_width: section.thumbnail_width.unwrap_or(defaults.thumbnail_width),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    portrait_columns: Option<usize>,
    landscape_columns: Option<usize>,
    style: Option<MeasureStyle>,
) -> ResolvedConfig {
    if let Some(columns) = portrait_columns {
        config.grid.portrait_columns = columns;
    }

    if let Some(columns) = landscape_columns {
        config.grid.landscape_columns = columns;
    }

    if let Some(style) = style {
        config.style = style;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
