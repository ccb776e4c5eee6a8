//! Simulation settings read from a TOML file.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use maze_chase_core::SimulationConfig;

/// Largest number of cells allowed along either side of the grid.
const MAX_SIDE: u32 = 1_024;

/// Reads the configuration at `path`; absent keys keep their defaults.
pub(crate) fn load(path: &Path) -> Result<SimulationConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid configuration in {}", path.display()))
}

fn parse(contents: &str) -> Result<SimulationConfig> {
    let config: SimulationConfig =
        toml::from_str(contents).context("failed to parse configuration toml contents")?;
    if config.rows == 0 || config.columns == 0 {
        bail!(
            "grid must have at least one cell, got {}x{}",
            config.rows,
            config.columns
        );
    }
    if config.rows > MAX_SIDE || config.columns > MAX_SIDE {
        bail!(
            "grid sides are limited to {MAX_SIDE} cells, got {}x{}",
            config.rows,
            config.columns
        );
    }
    Ok(config)
}
