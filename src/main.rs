//! normgrid inspector - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use normgrid::inspect::{inspect, load_cards, write_report, InspectRequest};
use normgrid::measure::MeasureStyle;

/// normgrid inspector - print the frames a grid layout would realise
#[derive(Parser, Debug)]
#[command(name = "normgrid")]
#[command(version)]
#[command(about = "Lay out cards in a normalized-height grid and report visible frames as JSON")]
pub struct Args {
    /// JSON array of cards (uses built-in samples if not provided)
    pub items: Option<PathBuf>,

    /// Viewport width
    #[arg(long, default_value_t = 375.0)]
    pub width: f64,

    /// Viewport height
    #[arg(long, default_value_t = 667.0)]
    pub height: f64,

    /// Vertical scroll offset
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset: f64,

    /// Columns when the viewport is narrower than it is tall
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub portrait_columns: Option<u32>,

    /// Columns otherwise
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub landscape_columns: Option<u32>,

    /// Card shape to measure
    #[arg(long, value_enum)]
    pub style: Option<MeasureStyle>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = normgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = normgrid::config::merge_config(config_file);
        let with_env = normgrid::config::apply_env_overrides(merged);
        normgrid::config::apply_cli_overrides(
            with_env,
            args.portrait_columns.map(|c| c as usize),
            args.landscape_columns.map(|c| c as usize),
            args.style,
        )
    };

    normgrid::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let cards = load_cards(args.items.as_deref())?;
    let report = inspect(
        &config,
        &cards,
        InspectRequest {
            width: args.width,
            height: args.height,
            offset: args.offset,
        },
    )?;

    write_report(&report, std::io::stdout().lock())?;

    Ok(())
}
