//! Arbiter CLI - run the miner behavior tree on a fixed cadence.
//!
//! Loads `.arbiter/miner.yaml` (or `--config`), ticks the tree once per cycle for a bounded number
//! of frames and logs one line per frame.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use arbiter_bt::{Blackboard, TreeDriver};
use arbiter_core::{Clock, SystemClock};
use arbiter_miner::{blackboard, build_tree, MinerConfig, FRAME};
use arbiter_tools::{TraceLog, TraceSink, TracingSink, TRACE_LOG, TRACE_SINK};

#[derive(Parser)]
#[command(name = "arbiter")]
#[command(about = "Behavior tree arbitration demo: the miner routine", version)]
struct Cli {
    /// Config file (defaults to .arbiter/miner.yaml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames to run, overriding `max_frames`
    #[arg(short, long)]
    frames: Option<u64>,

    /// Tick period in milliseconds, overriding `cycle_ms`
    #[arg(long)]
    cycle_ms: Option<u64>,

    /// Verbose output (node activation trace)
    #[arg(short, long)]
    verbose: bool,

    /// Print the captured trace as JSON lines on exit
    #[arg(long)]
    trace_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = match &cli.config {
        Some(path) => MinerConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            MinerConfig::load_from_dir(&cwd)?
        }
    };
    if let Some(frames) = cli.frames {
        config.max_frames = frames;
    }
    if let Some(cycle_ms) = cli.cycle_ms {
        config.cycle_ms = cycle_ms;
    }

    run_miner(&config, cli.verbose, cli.trace_json)
}

fn run_miner(config: &MinerConfig, verbose: bool, trace_json: bool) -> Result<()> {
    tracing::info!(
        frames = config.max_frames,
        cycle_ms = config.cycle_ms,
        "Starting miner"
    );

    let tree = build_tree(config).context("Failed to assemble the miner tree")?;
    let mut driver = TreeDriver::new(tree, SystemClock::new(), config.cycle());

    let mut bb = Blackboard::new();
    blackboard::seed(&mut bb, config);
    if verbose {
        bb.set(TRACE_SINK, Box::new(TracingSink) as Box<dyn TraceSink>);
    }
    if trace_json {
        bb.set(TRACE_LOG, TraceLog::default());
    }

    let status = driver.run_frames_with(config.max_frames, &mut bb, |report, bb| {
        bb.set(FRAME, report.tick + 1);
        tracing::info!(
            frame = report.tick,
            status = %report.status,
            position = %blackboard::position(bb),
            energy = blackboard::energy(bb),
            elapsed_us = report.elapsed.as_micros() as u64,
            "frame"
        );
    });

    let wind_down = driver.clock().now();
    driver.reset(&mut bb);
    tracing::info!(
        %status,
        energy = blackboard::energy(&bb),
        wall_ms = wind_down.as_millis() as u64,
        "Miner finished"
    );

    if trace_json {
        if let Some(log) = bb.get(TRACE_LOG) {
            for event in &log.events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    Ok(())
}
