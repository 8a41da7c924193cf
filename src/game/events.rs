//! Game events (messages).

use bevy::prelude::*;

use super::Collision;

/// Message triggered whenever the score changes, including the reset to zero.
#[derive(Message)]
pub struct ScoreChanged {
    pub score: u32,
}

/// Message triggered when the snake hits a wall or itself.
#[derive(Message)]
pub struct GameOverEvent {
    pub score: u32,
    pub cause: Collision,
}

/// Message triggered once the game-over state had time to render and the
/// player should be asked to restart.
#[derive(Message)]
pub struct RestartPrompt;
