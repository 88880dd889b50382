//! Configuration module.
//!
//! Settings resolve through four layers, later ones winning:
//! built-in defaults, the TOML config file, environment variables, CLI flags.

mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    MeasureSection, ResolvedConfig, CONFIG_ENV_VAR, LANDSCAPE_COLUMNS_ENV_VAR,
    PORTRAIT_COLUMNS_ENV_VAR,
};
