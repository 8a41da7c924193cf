//! Keyboard to direction translation.

use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

use crate::game::Direction;

/// Map a key to a direction. Arrow keys and WASD are recognized.
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Up),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Down),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
        _ => None,
    }
}

/// Directions requested by fresh key presses, in the order they arrived.
/// Releases and auto-repeat are skipped.
pub fn requested_directions<'a>(
    events: impl IntoIterator<Item = &'a KeyboardInput>,
) -> impl Iterator<Item = Direction> {
    events
        .into_iter()
        .filter(|event| event.state == ButtonState::Pressed && !event.repeat)
        .filter_map(|event| direction_for_key(event.key_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::{Key, NativeKey};

    fn key_event(key_code: KeyCode, state: ButtonState) -> KeyboardInput {
        KeyboardInput {
            key_code,
            logical_key: Key::Unidentified(NativeKey::Unidentified),
            state,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        }
    }

    #[test]
    fn test_arrows_and_wasd() {
        assert_eq!(direction_for_key(KeyCode::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::KeyW), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::ArrowDown), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::KeyS), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::ArrowLeft), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::KeyA), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::ArrowRight), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::KeyD), Some(Direction::Right));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(direction_for_key(KeyCode::Space), None);
        assert_eq!(direction_for_key(KeyCode::Escape), None);
        assert_eq!(direction_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_requested_directions_keep_press_order() {
        let events = [
            key_event(KeyCode::ArrowUp, ButtonState::Pressed),
            key_event(KeyCode::Space, ButtonState::Pressed),
            key_event(KeyCode::ArrowUp, ButtonState::Released),
            key_event(KeyCode::ArrowDown, ButtonState::Pressed),
        ];

        let requested: Vec<Direction> = requested_directions(&events).collect();
        assert_eq!(requested, vec![Direction::Up, Direction::Down]);

        let reversed = [
            key_event(KeyCode::KeyS, ButtonState::Pressed),
            key_event(KeyCode::KeyW, ButtonState::Pressed),
        ];
        let requested: Vec<Direction> = requested_directions(&reversed).collect();
        assert_eq!(requested, vec![Direction::Down, Direction::Up]);
    }

    #[test]
    fn test_key_repeat_ignored() {
        let mut held = key_event(KeyCode::KeyA, ButtonState::Pressed);
        held.repeat = true;

        assert_eq!(requested_directions([&held]).count(), 0);
    }
}
