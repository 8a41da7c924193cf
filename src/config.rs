//! Command-line options and the validated game configuration.

use bevy::prelude::*;
use clap::Parser;
use std::time::Duration;

use crate::game::SNAKE_START_LENGTH;

#[derive(Parser, Debug)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake on a 3D board")]
pub struct Cli {
    /// Cells per side of the square grid (odd); the grid spans ±grid_size/2
    #[arg(long, default_value_t = 19)]
    pub grid_size: u32,

    /// World units per cell
    #[arg(long, default_value_t = 1.0)]
    pub cell_size: f32,

    /// Milliseconds between snake moves
    #[arg(long, default_value_t = 200)]
    pub move_interval: u64,

    /// Milliseconds between restarting and the first move
    #[arg(long, default_value_t = 500)]
    pub restart_delay: u64,

    /// Verbose logging
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub debug: bool,

    /// Keep the camera fixed; `false` allows orbiting with the left mouse button
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub fixed_camera: bool,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be odd, got {0}")]
    EvenGridSize(u32),

    #[error("grid size {got} is too small, the starting snake needs at least {min}")]
    GridTooSmall { got: u32, min: u32 },

    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f32),

    #[error("move interval must be at least 1 ms")]
    ZeroMoveInterval,
}

/// Validated settings shared by every plugin.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub grid_size: u32,
    pub cell_size: f32,
    pub move_interval: Duration,
    pub restart_delay: Duration,
    pub debug: bool,
    pub fixed_camera: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 19,
            cell_size: 1.0,
            move_interval: Duration::from_millis(200),
            restart_delay: Duration::from_millis(500),
            debug: true,
            fixed_camera: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Smallest odd grid that fits the starting snake, which extends from the
    /// origin towards negative x.
    pub fn min_grid_size() -> u32 {
        2 * SNAKE_START_LENGTH as u32 - 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size % 2 == 0 {
            return Err(ConfigError::EvenGridSize(self.grid_size));
        }
        if self.grid_size < Self::min_grid_size() {
            return Err(ConfigError::GridTooSmall {
                got: self.grid_size,
                min: Self::min_grid_size(),
            });
        }
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.move_interval.is_zero() {
            return Err(ConfigError::ZeroMoveInterval);
        }
        Ok(())
    }

    /// Side length of the board in world units.
    pub fn arena_extent(&self) -> f32 {
        self.grid_size as f32 * self.cell_size
    }
}

impl TryFrom<Cli> for GameConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let config = GameConfig {
            grid_size: cli.grid_size,
            cell_size: cli.cell_size,
            move_interval: Duration::from_millis(cli.move_interval),
            restart_delay: Duration::from_millis(cli.restart_delay),
            debug: cli.debug,
            fixed_camera: cli.fixed_camera,
            seed: cli.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
