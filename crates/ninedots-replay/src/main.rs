//! ninedots-replay: CLI tool that replays scripted pointer input through a
//! puzzle session.
//!
//! Reads a JSON script of timestamped pointer events, drives a session on
//! a manual clock so warning timeouts follow the script's timestamps, and
//! prints the final board. Useful for:
//!
//! - Reproducing a reported game move by move
//! - Checking how the continuity tolerance treats near-miss starts
//! - Rendering a finished board to SVG
//!
//! # Script format
//!
//! ```text
//! [
//!   {"at_ms": 0,   "event": {"type": "down", "x": 205, "y": 155}},
//!   {"at_ms": 40,  "event": {"type": "move", "x": 505, "y": 155}},
//!   {"at_ms": 80,  "event": {"type": "up"}},
//!   {"at_ms": 900, "event": {"type": "reset"}}
//! ]
//! ```
//!
//! # Usage
//!
//! ```text
//! cargo run --bin ninedots-replay -- [OPTIONS] <SCRIPT_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod script;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ninedots_engine::{ManualClock, PuzzleConfig, PuzzleSession};
use ninedots_export::{CanvasSize, SvgMetadata};
use tracing_subscriber::EnvFilter;

/// Replay a pointer script through a nine dots session.
///
/// Applies every scripted event in order and prints the resulting board
/// state, the strokes that were refused, and the banner a player would see.
#[derive(Parser)]
#[command(name = "ninedots-replay", version)]
struct Cli {
    /// Path to the JSON script.
    script_path: PathBuf,

    /// Continuity tolerance as a fraction of the larger coordinate sum.
    #[arg(long, default_value_t = PuzzleConfig::DEFAULT_CONTINUITY_TOLERANCE)]
    tolerance: f64,

    /// How long the continuity warning stays up, in milliseconds.
    #[arg(long, default_value_t = PuzzleConfig::DEFAULT_WARNING_DURATION_MS)]
    warning_ms: u64,

    /// Full puzzle config as a JSON file.
    ///
    /// When provided, `--tolerance` and `--warning-ms` are ignored. Missing
    /// fields fall back to their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final board as SVG to this file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Output the report as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Log every step and commit as it is applied.
    #[arg(long)]
    trace: bool,

    /// Show engine debug logs (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

/// Build a [`PuzzleConfig`] from CLI arguments.
///
/// If `--config` is provided, the file is parsed and the individual flags
/// are ignored. Otherwise the flags are applied over the defaults.
fn config_from_cli(cli: &Cli) -> Result<PuzzleConfig, String> {
    if let Some(ref path) = cli.config {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
        return serde_json::from_str(&json)
            .map_err(|e| format!("Error parsing {}: {e}", path.display()));
    }

    Ok(PuzzleConfig {
        continuity_tolerance: cli.tolerance,
        warning_duration_ms: cli.warning_ms,
        ..PuzzleConfig::default()
    })
}

fn init_tracing(cli: &Cli) {
    let fallback = if cli.verbose || cli.trace {
        "debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = match PuzzleSession::with_clock(config, ManualClock::new()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let steps = match std::fs::read_to_string(&cli.script_path)
        .map_err(|e| format!("Error reading {}: {e}", cli.script_path.display()))
        .and_then(|json| {
            script::parse(&json)
                .map_err(|e| format!("Error parsing {}: {e}", cli.script_path.display()))
        }) {
        Ok(steps) => steps,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Script: {} ({} steps)",
        cli.script_path.display(),
        steps.len(),
    );
    eprintln!("Config: {:#?}", session.config());
    eprintln!();

    let report = script::replay(&mut session, &steps, cli.trace);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report.report());
    }

    if let Some(ref svg_path) = cli.svg
        && let Err(msg) = write_svg(svg_path, &cli.script_path, &report)
    {
        eprintln!("{msg}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn write_svg(svg_path: &Path, script_path: &Path, report: &script::ReplayReport) -> Result<(), String> {
    let title = script_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("replay");
    let desc = format!(
        "phase: {:?}, strokes: {}, touched: {}",
        report.snapshot.phase,
        report.snapshot.strokes.len(),
        report.snapshot.touched_count(),
    );
    let metadata = SvgMetadata {
        title: Some(title),
        description: Some(&desc),
    };
    let svg = ninedots_export::to_svg(&report.snapshot, CanvasSize::CLASSIC, &metadata);
    std::fs::write(svg_path, &svg)
        .map_err(|e| format!("Error writing SVG to {}: {e}", svg_path.display()))?;
    eprintln!("SVG written to {} ({} bytes)", svg_path.display(), svg.len());
    Ok(())
}
