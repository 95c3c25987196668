//! # Axis-Lock Replay
//!
//! Replays a recorded motion trace through one configured processor and
//! prints what each sample turned into.
//!
//! # Usage
//!
//! ```bash
//! # Replay through the first declared processor
//! axlock_replay --config processors.toml --trace drift.trace
//!
//! # Pick a processor, show decision logs
//! axlock_replay -c processors.toml -t drift.trace -p scroll -v
//! ```

#![deny(warnings)]

use std::path::PathBuf;

use axlock_common::config::{LogLevel, load_processor_file};
use axlock_filter::replay::{ReplaySummary, parse_trace, replay};
use axlock_filter::{EngineError, ManualScheduler, ProcessorRegistry};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Axis-lock trace replay
#[derive(Parser, Debug)]
#[command(name = "axlock_replay")]
#[command(version)]
#[command(about = "Replay relative-motion traces through an axis-lock processor")]
#[command(long_about = None)]
struct Args {
    /// Processor configuration file (`[shared]` + `[[processor]]` entries).
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Trace file: one `<t_ms> <channel> <value>` sample per line.
    #[arg(short, long, value_name = "FILE")]
    trace: PathBuf,

    /// Processor to replay through (defaults to the first declared).
    #[arg(short, long)]
    processor: Option<String>,

    /// Enable verbose logging (overrides `log_level`)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("replay failed: {}", e);
        eprintln!("axlock_replay: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let file = load_processor_file(&args.config)?;
    setup_tracing(&args, file.shared.log_level)?;

    info!(
        "axlock_replay v{} ({})",
        env!("CARGO_PKG_VERSION"),
        file.shared.service_name
    );

    let scheduler = ManualScheduler::new();
    let registry = ProcessorRegistry::from_file_config(&file, &scheduler)?;

    let (name, engine) = match &args.processor {
        Some(name) => (name.as_str(), registry.require(name)?),
        None => registry
            .first()
            .ok_or_else(|| EngineError::UnknownProcessor("<none declared>".to_string()))?,
    };
    info!(processor = name, config = ?engine.config(), "replaying");

    let text = std::fs::read_to_string(&args.trace)?;
    let samples = parse_trace(&text)?;
    let run = replay(engine, &scheduler, &samples);

    for record in &run.records {
        println!("{record}");
    }
    if run.trailing_releases > 0 {
        println!("{:>8} -- released", scheduler.now_ms());
    }

    let summary = ReplaySummary::from_run(&run);
    info!(
        passed = summary.passed,
        suppressed = summary.suppressed,
        ignored = summary.ignored,
        releases = summary.releases,
        "replay complete"
    );
    if engine.config().track_remainders {
        let (rx, ry) = run.final_remainders;
        info!(remainder_x = rx, remainder_y = ry, "suppressed motion");
    }

    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the file's log level.
fn setup_tracing(
    args: &Args,
    configured: LogLevel,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured
    };

    let filter = EnvFilter::from_default_env().add_directive(level.as_str().parse()?);

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
