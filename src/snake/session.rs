//! A single game: the state machine plus the renderer handles that mirror it.

use bevy::log::info;
use rand::Rng;
use std::collections::VecDeque;

use crate::game::{Direction, EntityKind, GameState, SNAKE_START_LENGTH, TickOutcome};
use crate::rendering::Renderer;

/// Owns the [`GameState`] and the handle bookkeeping for its visuals.
/// `segments[i]` is always the handle drawn for `state.snake()[i]`.
pub struct GameSession<H> {
    grid_size: u32,
    state: GameState,
    segments: VecDeque<H>,
    food: Option<H>,
}

impl<H: Copy> GameSession<H> {
    pub fn new(grid_size: u32) -> Self {
        GameSession {
            grid_size,
            state: GameState::new(grid_size, SNAKE_START_LENGTH),
            segments: VecDeque::new(),
            food: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Reset the board, draw the starting snake and place the first food.
    pub fn start<R, G>(&mut self, renderer: &mut R, rng: &mut G)
    where
        R: Renderer<Handle = H>,
        G: Rng,
    {
        self.state.reset(self.grid_size, SNAKE_START_LENGTH);

        self.segments = self
            .state
            .snake()
            .iter()
            .enumerate()
            .map(|(i, &cell)| renderer.create_entity(segment_kind(i), cell))
            .collect();

        self.respawn_food(renderer, rng);
    }

    /// Forward a direction request to the state.
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.state.set_pending_direction(direction)
    }

    /// Advance one tick and mirror the result into the renderer.
    pub fn tick<R, G>(&mut self, renderer: &mut R, rng: &mut G) -> TickOutcome
    where
        R: Renderer<Handle = H>,
        G: Rng,
    {
        let outcome = self.state.tick();

        if let TickOutcome::Moved {
            head,
            vacated,
            ate_food,
            ..
        } = outcome
        {
            if let Some(&previous_head) = self.segments.front() {
                renderer.update_color(previous_head, EntityKind::SnakeBody);
            }
            self.segments
                .push_front(renderer.create_entity(EntityKind::SnakeHead, head));

            if vacated.is_some()
                && let Some(tail) = self.segments.pop_back()
            {
                renderer.remove_entity(tail);
            }

            if ate_food {
                self.respawn_food(renderer, rng);
            }
        }

        outcome
    }

    /// Remove every entity this session drew.
    pub fn clear<R>(&mut self, renderer: &mut R)
    where
        R: Renderer<Handle = H>,
    {
        for segment in self.segments.drain(..) {
            renderer.remove_entity(segment);
        }
        if let Some(food) = self.food.take() {
            renderer.remove_entity(food);
        }
    }

    /// Clear the board and start over.
    pub fn restart<R, G>(&mut self, renderer: &mut R, rng: &mut G)
    where
        R: Renderer<Handle = H>,
        G: Rng,
    {
        self.clear(renderer);
        self.start(renderer, rng);
        info!("Game restarted.");
    }

    fn respawn_food<R, G>(&mut self, renderer: &mut R, rng: &mut G)
    where
        R: Renderer<Handle = H>,
        G: Rng,
    {
        if let Some(food) = self.food.take() {
            renderer.remove_entity(food);
        }
        self.food = self
            .state
            .spawn_food(rng)
            .map(|cell| renderer.create_entity(EntityKind::Food, cell));
    }
}

fn segment_kind(index: usize) -> EntityKind {
    if index == 0 {
        EntityKind::SnakeHead
    } else {
        EntityKind::SnakeBody
    }
}
