//! Grid primitives and ECS components for the snake game.

use bevy::prelude::*;
use std::ops::Add;

/// A cell on the grid, relative to the arena center.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Whether both coordinates lie within `±half_extent`.
    pub fn within(&self, half_extent: i32) -> bool {
        self.x.abs() <= half_extent && self.y.abs() <= half_extent
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Direction enum for snake movement.
///
/// `Up` decreases `y` and `Down` increases it, matching the scene where grid
/// `y` runs along world `z` towards the camera.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step `(dx, dy)` on the grid.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// What a scene entity depicts. The scene adapter also stores it on the entity.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityKind {
    SnakeHead,
    SnakeBody,
    Food,
}

/// Component for food pulsing animation.
#[derive(Component)]
pub struct FoodPulse {
    pub timer: Timer,
}

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the camera looking at the arena.
#[derive(Component)]
pub struct ArenaCamera;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_cell_step() {
        assert_eq!(Cell::ORIGIN + Direction::Right, Cell::new(1, 0));
        assert_eq!(Cell::ORIGIN + Direction::Left, Cell::new(-1, 0));
        assert_eq!(Cell::ORIGIN + Direction::Up, Cell::new(0, -1));
        assert_eq!(Cell::ORIGIN + Direction::Down, Cell::new(0, 1));
    }

    #[test]
    fn test_within_bounds() {
        assert!(Cell::new(9, -9).within(9));
        assert!(!Cell::new(10, 0).within(9));
        assert!(!Cell::new(0, -10).within(9));
    }
}
