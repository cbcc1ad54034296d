//! Rewind Sim - headless record-and-rewind run
//!
//! Drops a bouncing ball, records it for a while, holds rewind, then lets it
//! go and reports what the controller did. Useful for tuning `rewind.toml`.
//!
//! # Usage
//!
//! ```bash
//! # Defaults from the user's rewind.toml (or built-in defaults)
//! rewind-sim
//!
//! # Override timings
//! rewind-sim --interval 0.05 --window 3 --speed 2 --record 6 --rewind 1.5
//!
//! # Write the effective settings back out
//! rewind-sim --window 3 --save-config rewind.toml
//! ```

mod ball;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use rewind_core::{ManualClock, RewindRuntime, RewindStats, RuntimeConfig};
use rewind_shared::{RewindConfig, config};

use ball::Ball;

/// Rewind Sim - headless record-and-rewind run
#[derive(Parser, Debug)]
#[command(name = "rewind-sim")]
#[command(about = "Record a bouncing ball, rewind it, and report the result")]
#[command(version)]
struct Cli {
    /// Config file to start from (defaults to the platform rewind.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between history samples
    #[arg(long)]
    interval: Option<f64>,

    /// Seconds of history retained
    #[arg(long)]
    window: Option<f64>,

    /// Rewind speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Fraction of velocity restored when the rewind ends
    #[arg(long)]
    damping: Option<f32>,

    /// Pause the shared time scale while rewinding
    #[arg(long)]
    pause_time: bool,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Seconds to record before rewinding
    #[arg(long, default_value_t = 4.0)]
    record: f64,

    /// Seconds to hold rewind
    #[arg(long, default_value_t = 1.0)]
    rewind: f64,

    /// Seconds to keep simulating after release
    #[arg(long, default_value_t = 1.0)]
    resume: f64,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let rewind_config = effective_config(&cli)?;
    rewind_config
        .validate()
        .context("invalid rewind configuration")?;

    if let Some(path) = &cli.save_config {
        config::save_to(path, &rewind_config)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    run(&cli, rewind_config)
}

/// Load the base config and apply command line overrides
fn effective_config(cli: &Cli) -> Result<RewindConfig> {
    let mut rewind_config = match &cli.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => config::load(),
    };

    if let Some(interval) = cli.interval {
        rewind_config.recorder.sample_interval = interval;
    }
    if let Some(window) = cli.window {
        rewind_config.recorder.retention_window = window;
    }
    if let Some(speed) = cli.speed {
        rewind_config.playback.rewind_speed = speed;
    }
    if let Some(damping) = cli.damping {
        rewind_config.playback.damping_factor = damping;
    }
    if cli.pause_time {
        rewind_config.playback.pause_time_scale = true;
    }
    Ok(rewind_config)
}

fn run(cli: &Cli, rewind_config: RewindConfig) -> Result<()> {
    let recorder = rewind_config.recorder;
    let ball = Ball::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.5, 0.0, 0.0));
    let mut runtime = RewindRuntime::new(
        ball,
        rewind_config,
        (),
        ManualClock::new(0.0),
        RuntimeConfig::with_tick_rate(cli.tick_rate),
    )?;
    let tick = runtime.tick_duration();

    tracing::info!(
        "Recording for {:.2}s at {} Hz (interval {:.3}s, window {:.2}s)",
        cli.record,
        runtime.tick_rate(),
        recorder.sample_interval,
        recorder.retention_window
    );
    run_phase(&mut runtime, tick, cli.record, false);
    let recorded = runtime.stats();
    report("recorded", &recorded);
    let before = runtime.target().position;

    run_phase(&mut runtime, tick, cli.rewind, true);
    report("rewinding", &runtime.stats());
    let rewound_to = runtime.target().position;

    // One release tick restores motion and resumes recording
    runtime.frame_with_delta(tick, false);
    let restored_velocity = runtime.target().linear_velocity;
    run_phase(&mut runtime, tick, cli.resume, false);
    let finished = runtime.stats();
    report("resumed", &finished);

    println!("position before rewind:  {:?}", before);
    println!("position after rewind:   {:?}", rewound_to);
    println!("velocity on release:     {:?}", restored_velocity);
    println!("final position:          {:?}", runtime.target().position);
    println!("bounces:                 {}", runtime.target().bounces());
    println!(
        "history:                 {} -> {} entries",
        recorded.history_len, finished.history_len
    );
    Ok(())
}

/// Run whole ticks covering `seconds` of frame time
fn run_phase(
    runtime: &mut RewindRuntime<Ball, (), ManualClock>,
    tick: Duration,
    seconds: f64,
    rewind_held: bool,
) {
    let frames = (seconds / tick.as_secs_f64()).round().max(0.0) as u64;
    for _ in 0..frames {
        runtime.frame_with_delta(tick, rewind_held);
    }
}

fn report(phase: &str, stats: &RewindStats) {
    tracing::info!(
        phase,
        mode = ?stats.mode,
        entries = stats.history_len,
        history_span = stats.history_span,
        cursor = ?stats.cursor,
        rewound = stats.rewound_seconds,
        rewinds = stats.completed_rewinds,
        dropped = stats.dropped_samples,
        "rewind stats"
    );
}
