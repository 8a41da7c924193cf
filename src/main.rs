//! Grid snake on a 3D board.
//!
//! The snake state machine lives in [`game`]; [`snake`] drives it from the
//! move clock, [`rendering`] draws it, and [`ui`] handles score and restarts.

mod config;
mod game;
mod input;
mod rendering;
mod snake;
mod ui;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;

use config::{Cli, GameConfig};
use game::BACKGROUND_COLOR;
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

fn main() -> AppExit {
    let config = match GameConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return AppExit::error();
        }
    };

    let level = if config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        resolution: WindowResolution::new(900, 900),
                        title: "Snake Game".to_string(),
                        ..Default::default()
                    }),
                    ..default()
                })
                .set(LogPlugin { level, ..default() }),
        )
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(config)
        .add_plugins((RenderingPlugin, SnakePlugin, UiPlugin))
        .run()
}
