//! `calgrid` CLI — lay out calendar events and inspect zoom metrics.
//!
//! ## Usage
//!
//! ```sh
//! # Lay out one day column (stdin → stdout)
//! cat events.json | calgrid layout --date 2026-03-02
//!
//! # Lay out a week starting Monday, at zoom step 2, from file to file
//! calgrid layout --week 2026-03-02 --zoom 2 -i events.json -o grid.json
//!
//! # Override gaps, density bounds or the malformed-event policy
//! calgrid --config grid.json layout --date 2026-03-02 -i events.json
//!
//! # Density, hour height and day height for a zoom step
//! calgrid zoom --zoom -1.5
//!
//! # Offset of the current-time line
//! calgrid now --at 2026-03-02T14:15:00
//! ```

use anyhow::{Context, Result};
use calgrid_engine::config::GridConfig;
use calgrid_engine::{layout_day, layout_week, Appointment, PositionedEvent, ZoomController};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calgrid",
    version,
    about = "Calendar grid layout CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file overriding gaps, density and zoom bounds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a JSON array of events for a day or a week
    Layout {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Day to lay out (YYYY-MM-DD)
        #[arg(long, conflicts_with = "week")]
        date: Option<NaiveDate>,
        /// First day of a seven-day week to lay out (YYYY-MM-DD)
        #[arg(long)]
        week: Option<NaiveDate>,
        /// Zoom step
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        zoom: f64,
    },
    /// Show density, hour height and day height for a zoom step
    Zoom {
        /// Zoom step
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        zoom: f64,
    },
    /// Show the vertical offset of the current-time indicator
    Now {
        /// Instant to place (defaults to the local wall-clock time)
        #[arg(long)]
        at: Option<NaiveDateTime>,
        /// Zoom step
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        zoom: f64,
    },
}

#[derive(Serialize)]
struct PositionedDto<'a> {
    #[serde(flatten)]
    appointment: &'a Appointment,
    top: i32,
    height: i32,
    left_percent: f64,
    width_percent: f64,
    inset_px: f64,
    lane: usize,
    cluster_lane_count: usize,
}

impl<'a> From<&PositionedEvent<'a, Appointment>> for PositionedDto<'a> {
    fn from(p: &PositionedEvent<'a, Appointment>) -> Self {
        Self {
            appointment: p.event,
            top: p.top,
            height: p.height,
            left_percent: p.left_percent,
            width_percent: p.width_percent,
            inset_px: p.inset_px,
            lane: p.lane,
            cluster_lane_count: p.cluster_lane_count,
        }
    }
}

#[derive(Serialize)]
struct DayDto<'a> {
    date: NaiveDate,
    density: f64,
    day_height: i32,
    events: Vec<PositionedDto<'a>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            input,
            output,
            date,
            week,
            zoom,
        } => {
            let events = read_events(input.as_deref())?;
            info!(events = events.len(), "loaded events");

            let controller = ZoomController::with_zoom(config.zoom, config.density, zoom);
            let mapper = controller.mapper();
            let density = mapper.density();
            let day_height = mapper.day_height();

            let rendered = match (date, week) {
                (Some(date), None) => {
                    let positioned = layout_day(&events, date, density, &config.layout)
                        .context("Failed to lay out day")?;
                    let day = DayDto {
                        date,
                        density,
                        day_height,
                        events: positioned.iter().map(PositionedDto::from).collect(),
                    };
                    serde_json::to_string_pretty(&day)?
                }
                (None, Some(first_day)) => {
                    let columns = layout_week(&events, first_day, density, &config.layout)
                        .context("Failed to lay out week")?;
                    let days: Vec<DayDto> = columns
                        .iter()
                        .map(|column| DayDto {
                            date: column.date,
                            density,
                            day_height,
                            events: column.events.iter().map(PositionedDto::from).collect(),
                        })
                        .collect();
                    serde_json::to_string_pretty(&days)?
                }
                _ => anyhow::bail!("Specify exactly one of --date or --week"),
            };

            emit(output.as_deref(), &rendered)?;
        }
        Commands::Zoom { zoom } => {
            let controller = ZoomController::with_zoom(config.zoom, config.density, zoom);
            let (min, max) = controller.bounds();
            println!("Zoom:         {:.2} (bounds {} to {})", controller.zoom(), min, max);
            println!("Density:      {:.3} px/min", controller.density());
            println!("Hour height:  {:.1} px", controller.hour_height());
            println!("Day height:   {} px", controller.mapper().day_height());
        }
        Commands::Now { at, zoom } => {
            let now = at.unwrap_or_else(|| Local::now().naive_local());
            let controller = ZoomController::with_zoom(config.zoom, config.density, zoom);
            let offset = controller
                .mapper()
                .now_indicator(now, now.date())
                .context("Current time falls outside its own day")?;
            debug!(%now, offset, "current-time indicator");
            println!("{}", offset);
        }
    }

    Ok(())
}

/// Install a stderr subscriber so stdout stays machine-readable.
///
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GridConfig> {
    let Some(path) = path else {
        return Ok(GridConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GridConfig::from_json(&json).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Load the event array from `path`, or from stdin when no path is given.
fn read_events(path: Option<&Path>) -> Result<Vec<Appointment>> {
    let json = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        None => io::read_to_string(io::stdin().lock()).context("Failed to read from stdin")?,
    };
    serde_json::from_str(&json).context("Failed to parse events JSON")
}

/// Write rendered JSON to `path`, or to stdout followed by a newline.
fn emit(path: Option<&Path>, rendered: &str) -> Result<()> {
    if let Some(path) = path {
        return fs::write(path, rendered)
            .with_context(|| format!("Failed to write file: {}", path.display()));
    }
    let mut out = io::stdout().lock();
    writeln!(out, "{rendered}").context("Failed to write to stdout")
}
