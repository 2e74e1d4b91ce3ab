use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;
use tripdash::{
    TripDashError, compare_trips, compute_insights,
    config::{AppConfig, OutputFormat},
    loader, report,
    replay::{PlaybackSpeed, ReplayCursor, ReplayFrame},
    writer,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize every trip in a file
    Insights {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare a trip against a baseline trip
    Compare {
        #[arg(long)]
        current: PathBuf,

        #[arg(long)]
        comparison: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the trips in a file
    List {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Step through a trip and print one frame per tick
    Replay {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_parser = parse_playback_speed)]
        speed: Option<PlaybackSpeed>,

        #[arg(short, long)]
        ticks: Option<usize>,
    },
    /// Store default output format and playback speed
    Config {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(short, long, value_parser = parse_playback_speed)]
        speed: Option<PlaybackSpeed>,
    },
}

fn parse_playback_speed(value: &str) -> Result<PlaybackSpeed, String> {
    value
        .trim_start_matches('x')
        .parse::<u32>()
        .ok()
        .and_then(PlaybackSpeed::from_multiplier)
        .ok_or_else(|| format!("unsupported playback speed {value}, expected 1, 5, 10 or 100"))
}

fn emit<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    output: Option<&Path>,
    render: impl Fn(&T) -> String,
) -> Result<(), TripDashError> {
    writer::emit_summaries(items, format, output, &mut io::stdout().lock(), render)
}

fn print_frame(frame: &ReplayFrame) -> Result<(), TripDashError> {
    let line = serde_json::to_string(frame)
        .map_err(|e| TripDashError::SummarySerializeError { source: e })?;
    println!("{line}");
    Ok(())
}

fn run(command: &Commands, config: &AppConfig) -> Result<(), TripDashError> {
    match command {
        Commands::Insights {
            input,
            format,
            output,
        } => {
            let summaries = loader::load_trips(input)?
                .iter()
                .map(compute_insights)
                .collect::<Vec<_>>();
            emit(
                &summaries,
                format.unwrap_or(config.default_format),
                output.as_deref(),
                report::render_insights,
            )
        }
        Commands::Compare {
            current,
            comparison,
            format,
            output,
        } => {
            let current = loader::load_trip(current)?;
            let comparison = loader::load_trip(comparison)?;
            let summary = compare_trips(&current, &comparison)?;
            emit(
                &[summary],
                format.unwrap_or(config.default_format),
                output.as_deref(),
                report::render_comparison,
            )
        }
        Commands::List { input } => {
            let listing = loader::load_trips(input)?
                .iter()
                .map(|trip| trip.metadata())
                .collect::<Vec<_>>();
            println!("{}", report::render_listing(&listing));
            Ok(())
        }
        Commands::Replay {
            input,
            speed,
            ticks,
        } => {
            let trip = loader::load_trip(input)?;
            if !trip.has_points() {
                warn!("Trip {} has no telemetry points, nothing to replay", trip.id);
            }
            let mut cursor = ReplayCursor::new(&trip.points);
            cursor.set_speed(speed.unwrap_or(config.playback_speed));
            info!(
                "Replaying trip {} at x{} ({:?} per tick)",
                trip.id,
                cursor.speed().multiplier(),
                cursor.speed().tick_interval()
            );

            cursor
                .play_frames(*ticks)
                .iter()
                .try_for_each(print_frame)
        }
        Commands::Config { format, speed } => {
            let updated = AppConfig {
                default_format: format.unwrap_or(config.default_format),
                playback_speed: speed.unwrap_or(config.playback_speed),
            };
            updated.save()?;
            info!("Saved config to {:?}", AppConfig::default_path()?);
            emit(&[updated], OutputFormat::Json, None, |_| String::new())
        }
    }
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    let config = AppConfig::from_local_file()
        .unwrap_or_else(|e| {
            warn!("Ignoring unreadable config file: {e}");
            None
        })
        .unwrap_or_default();

    if let Err(e) = run(&cli.command, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
