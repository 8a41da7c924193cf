//! Game constants for snake rules, colors, timing, and scene layout.

use bevy::prelude::*;
use std::time::Duration;

// Rules
pub const SNAKE_START_LENGTH: usize = 3;
pub const FOOD_REWARD: u32 = 10;
pub const MAX_FOOD_ATTEMPTS: usize = 100;

// Timing
pub const START_DELAY: Duration = Duration::from_millis(1000);
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(100);

// Colors
pub const SNAKE_HEAD_COLOR: Color = Color::srgb(1.0, 0.341, 0.133); // #FF5722
pub const SNAKE_BODY_COLOR: Color = Color::srgb(1.0, 0.596, 0.0); // #FF9800
pub const FOOD_COLOR: Color = Color::srgb(0.957, 0.263, 0.212); // #F44336
pub const GROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 1.0);
pub const ARENA_BORDER_COLOR: Color = Color::srgba(0.3, 0.8, 1.0, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.04, 0.04, 0.04, 1.0);

// Entities float half a cell above the ground plane
pub const ENTITY_HEIGHT: f32 = 0.5;
