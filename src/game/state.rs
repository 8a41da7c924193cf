//! The snake state machine: movement, collisions, growth and food placement.
//!
//! Nothing in here knows about the scene. [`GameState::tick`] reports what
//! changed and the caller mirrors it into a renderer.

use bevy::log::{debug, warn};
use rand::Rng;
use std::collections::VecDeque;

use super::{Cell, Direction, FOOD_REWARD, MAX_FOOD_ATTEMPTS};

/// Why the snake died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over, nothing moved.
    Idle,
    /// The snake advanced one cell.
    Moved {
        head: Cell,
        previous_head: Cell,
        /// Tail cell given up this tick, `None` when the snake grew.
        vacated: Option<Cell>,
        ate_food: bool,
    },
    /// The snake hit something and the game is now over.
    Collided(Collision),
}

#[derive(Debug, Clone)]
pub struct GameState {
    half_extent: i32,
    snake: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
    food: Option<Cell>,
    score: u32,
    game_over: bool,
}

impl GameState {
    /// Create a freshly reset state.
    pub fn new(grid_size: u32, start_length: usize) -> Self {
        let mut state = GameState {
            half_extent: 0,
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            score: 0,
            game_over: false,
        };
        state.reset(grid_size, start_length);
        state
    }

    /// Lay the snake out horizontally with its head at the origin, facing right.
    /// Food is cleared; call [`GameState::spawn_food`] afterwards.
    pub fn reset(&mut self, grid_size: u32, start_length: usize) {
        self.half_extent = (grid_size / 2) as i32;
        self.snake = (0..start_length as i32).map(|i| Cell::new(-i, 0)).collect();
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.food = None;
        self.score = 0;
        self.game_over = false;

        debug!(
            "Game state reset: {} segments, grid bounds ±{}",
            self.snake.len(),
            self.half_extent
        );
    }

    /// Request a direction for the next tick. A request that reverses the
    /// current direction is ignored; otherwise it replaces any earlier request.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Advance the snake by one cell.
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        self.direction = self.pending_direction;

        let previous_head = self.head();
        let head = previous_head + self.direction;

        if !head.within(self.half_extent) {
            debug!(
                "Wall collision at ({}, {}). Grid bounds: ±{}",
                head.x, head.y, self.half_extent
            );
            return self.collide(Collision::Wall);
        }

        let grows = self.food == Some(head);
        // The tail moves out of the way this tick unless the snake grows.
        let checked = if grows {
            self.snake.len()
        } else {
            self.snake.len() - 1
        };
        if let Some(index) = self.snake.iter().take(checked).position(|&c| c == head) {
            debug!(
                "Self collision at ({}, {}) with segment {}",
                head.x, head.y, index
            );
            return self.collide(Collision::Body);
        }

        self.snake.push_front(head);

        let vacated = if grows {
            self.score += FOOD_REWARD;
            self.food = None;
            debug!("Food eaten at ({}, {}). Score: {}", head.x, head.y, self.score);
            None
        } else {
            self.snake.pop_back()
        };

        TickOutcome::Moved {
            head,
            previous_head,
            vacated,
            ate_food: grows,
        }
    }

    fn collide(&mut self, collision: Collision) -> TickOutcome {
        self.game_over = true;
        TickOutcome::Collided(collision)
    }

    /// Place food on a random free cell. Gives up after a bounded number of
    /// draws and leaves the board without food.
    pub fn spawn_food<R: Rng>(&mut self, rng: &mut R) -> Option<Cell> {
        let half = self.half_extent;

        for _ in 0..MAX_FOOD_ATTEMPTS {
            let cell = Cell::new(rng.random_range(-half..=half), rng.random_range(-half..=half));
            if !self.snake.contains(&cell) {
                self.food = Some(cell);
                debug!("Food spawned at ({}, {}).", cell.x, cell.y);
                return Some(cell);
            }
        }

        self.food = None;
        warn!(
            "Could not find valid food position after {} attempts!",
            MAX_FOOD_ATTEMPTS
        );
        None
    }

    pub fn head(&self) -> Cell {
        // The snake is never empty: reset lays out at least one cell and
        // ticks push before they pop.
        self.snake.front().copied().unwrap_or(Cell::ORIGIN)
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn half_extent(&self) -> i32 {
        self.half_extent
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, snake: &[Cell], direction: Direction, food: Option<Cell>) {
        self.snake = snake.iter().copied().collect();
        self.direction = direction;
        self.pending_direction = direction;
        self.food = food;
    }
}
