#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Maze Chase level on a simulated clock.

mod config;

use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use maze_chase_core::{Command, Event, GameState, SimulationConfig};
use maze_chase_level::{load_level, LoadSource};
use maze_chase_world::{self as world, query, World};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Runs a level headlessly until the seeker wins, is caught or gets stuck.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about)]
struct Cli {
    /// TOML file overriding grid size, cadence and default pursuers.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level file centred on the grid before the run starts.
    #[arg(long, default_value = "levels/level1.txt")]
    level: PathBuf,
    /// Simulated milliseconds advanced by each tick.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Simulated seconds after which an unfinished run is abandoned.
    #[arg(long, default_value_t = 300)]
    max_seconds: u64,
    /// Print a JSON snapshot after every tick.
    #[arg(long)]
    frames: bool,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load(path)?,
        None => SimulationConfig::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    play(&cli, config, &mut out)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn play(cli: &Cli, config: SimulationConfig, out: &mut impl Write) -> Result<()> {
    let mut world = World::with_config(config);
    let mut events = Vec::new();

    let loaded = load_level(&cli.level, config.rows, config.columns)
        .with_context(|| format!("failed to load level {}", cli.level.display()))?;
    if loaded.source == LoadSource::Missing {
        warn!("continuing with an empty layout");
    }
    world::apply(
        &mut world,
        Command::LoadLevel {
            level: loaded.level,
        },
        &mut events,
    );
    world::apply(&mut world, Command::StartRun, &mut events);
    if let Some(reason) = events.iter().find_map(|event| match event {
        Event::CommandRejected { reason } => Some(*reason),
        _ => None,
    }) {
        bail!("run could not start: {reason:?}");
    }

    let dt = Duration::from_millis(cli.tick_ms);
    let limit = Duration::from_secs(cli.max_seconds);
    while query::game_state(&world) == GameState::Running && query::elapsed(&world) < limit {
        events.clear();
        world::apply(&mut world, Command::Tick { dt }, &mut events);
        if cli.frames {
            serde_json::to_writer(&mut *out, &query::snapshot(&world))
                .context("failed to write frame")?;
            writeln!(out)?;
        }
    }

    let score = query::score(&world);
    let elapsed = format_elapsed(query::elapsed(&world));
    match query::game_state(&world) {
        GameState::Terminal(reason) => {
            info!(?reason, score, "run finished");
            writeln!(out, "{reason:?} with score {score} in {elapsed}")?;
        }
        GameState::Running | GameState::Editing => {
            warn!(limit_seconds = cli.max_seconds, "time limit reached");
            writeln!(out, "Unfinished with score {score} after {elapsed}")?;
        }
    }
    Ok(())
}

fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
