//! Snake plugin - owns the running game session and drives it from the
//! move clock and keyboard input.

mod session;

pub use session::GameSession;

use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::game::{
    GameOverEvent, GameRng, Lifecycle, MoveTimer, RestartPrompt, ScoreChanged, TickOutcome,
    Transition,
};
use crate::input::requested_directions;
use crate::rendering::{SceneAssets, SceneRenderer};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(ActiveGame(GameSession::new(config.grid_size)))
            .insert_resource(Lifecycle::new(config.restart_delay))
            .insert_resource(MoveTimer::new(config.move_interval))
            .insert_resource(GameRng::new(config.seed))
            .add_message::<ScoreChanged>()
            .add_message::<GameOverEvent>()
            .add_message::<RestartPrompt>()
            .add_systems(PostStartup, start_first_game)
            .add_systems(
                Update,
                (
                    advance_lifecycle,
                    steer_from_keyboard.run_if(accepts_input),
                    advance_snake.run_if(is_running),
                )
                    .chain(),
            );
    }
}

/// The one game shown in the scene, with entity handles for its visuals.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveGame(pub GameSession<Entity>);

fn is_running(lifecycle: Res<Lifecycle>) -> bool {
    lifecycle.is_running()
}

fn accepts_input(lifecycle: Res<Lifecycle>) -> bool {
    lifecycle.accepts_input()
}

/// Draws the starting snake once the scene assets exist.
fn start_first_game(
    mut commands: Commands,
    assets: Res<SceneAssets>,
    mut game: ResMut<ActiveGame>,
    mut rng: ResMut<GameRng>,
    mut score_writer: MessageWriter<ScoreChanged>,
) {
    let mut renderer = SceneRenderer::new(&mut commands, &assets);
    game.start(&mut renderer, &mut rng.0);
    score_writer.write(ScoreChanged { score: 0 });
    info!("Snake created with {} segments.", game.state().snake().len());
}

/// System to count down the timed lifecycle phases.
fn advance_lifecycle(
    time: Res<Time>,
    mut lifecycle: ResMut<Lifecycle>,
    mut move_timer: ResMut<MoveTimer>,
    mut prompt_writer: MessageWriter<RestartPrompt>,
) {
    match lifecycle.advance(time.delta()) {
        Some(Transition::BeginMovement) => {
            move_timer.rearm();
            debug!("Game movement started.");
        }
        Some(Transition::PromptRestart) => {
            prompt_writer.write(RestartPrompt);
        }
        None => {}
    }
}

/// System to forward direction keys to the pending direction, in press order.
fn steer_from_keyboard(
    mut keyboard_events: MessageReader<KeyboardInput>,
    mut game: ResMut<ActiveGame>,
) {
    for direction in requested_directions(keyboard_events.read()) {
        if !game.steer(direction) {
            debug!(
                "Ignored reversal to {:?} while heading {:?}",
                direction,
                game.state().direction()
            );
        }
    }
}

/// System to advance the snake when the move clock fires. Runs at most one
/// tick per frame, however many intervals elapsed.
#[allow(clippy::too_many_arguments)]
fn advance_snake(
    mut commands: Commands,
    time: Res<Time>,
    assets: Res<SceneAssets>,
    mut move_timer: ResMut<MoveTimer>,
    mut lifecycle: ResMut<Lifecycle>,
    mut game: ResMut<ActiveGame>,
    mut rng: ResMut<GameRng>,
    mut score_writer: MessageWriter<ScoreChanged>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    move_timer.timer.tick(time.delta());
    if !move_timer.timer.just_finished() {
        return;
    }

    let mut renderer = SceneRenderer::new(&mut commands, &assets);
    match game.tick(&mut renderer, &mut rng.0) {
        TickOutcome::Moved { ate_food: true, .. } => {
            score_writer.write(ScoreChanged {
                score: game.state().score(),
            });
        }
        TickOutcome::Collided(cause) => {
            let score = game.state().score();
            info!("Game over! Score: {} ({:?} collision)", score, cause);
            lifecycle.game_over();
            game_over_writer.write(GameOverEvent { score, cause });
        }
        TickOutcome::Moved { .. } | TickOutcome::Idle => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, START_DELAY};
    use bevy::input::ButtonState;
    use bevy::input::InputPlugin;
    use bevy::input::keyboard::{Key, NativeKey};
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .insert_resource(GameConfig {
                move_interval: INTERVAL,
                seed: Some(11),
                ..default()
            })
            .insert_resource(SceneAssets {
                cube: Handle::default(),
                sphere: Handle::default(),
                head_material: Handle::default(),
                body_material: Handle::default(),
                food_material: Handle::default(),
                cell_size: 1.0,
            })
            .add_plugins(SnakePlugin);

        // Long frames must reach the systems unclamped.
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_max_delta(Duration::from_secs(10));
        app
    }

    fn step(app: &mut App, delta: Duration) {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(delta));
        app.update();
    }

    fn head(app: &App) -> Cell {
        app.world().resource::<ActiveGame>().state().head()
    }

    /// Run startup, then wait out the start delay.
    fn running_app() -> App {
        let mut app = test_app();
        step(&mut app, Duration::ZERO);
        step(&mut app, START_DELAY);
        assert!(app.world().resource::<Lifecycle>().is_running());
        app
    }

    fn press(app: &mut App, key_code: KeyCode) {
        app.world_mut().write_message(KeyboardInput {
            key_code,
            logical_key: Key::Unidentified(NativeKey::Unidentified),
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn test_snake_waits_for_start_delay() {
        let mut app = test_app();
        step(&mut app, Duration::ZERO);
        assert_eq!(head(&app), Cell::ORIGIN);

        step(&mut app, START_DELAY / 2);
        assert!(!app.world().resource::<Lifecycle>().is_running());
        assert_eq!(head(&app), Cell::ORIGIN);
    }

    #[test]
    fn test_long_frame_runs_a_single_tick() {
        let mut app = running_app();
        let before = head(&app);

        step(&mut app, INTERVAL * 3);

        let timer = &app.world().resource::<MoveTimer>().timer;
        assert_eq!(timer.times_finished_this_tick(), 3);
        assert_eq!(head(&app), before + Direction::Right);
    }

    #[test]
    fn test_short_frames_accumulate_into_a_tick() {
        let mut app = running_app();
        let before = head(&app);

        step(&mut app, INTERVAL / 2);
        assert_eq!(head(&app), before);
        step(&mut app, INTERVAL / 2);
        assert_eq!(head(&app), before + Direction::Right);
    }

    #[test]
    fn test_last_key_in_a_frame_wins() {
        let mut app = running_app();
        let before = head(&app);

        press(&mut app, KeyCode::ArrowUp);
        press(&mut app, KeyCode::ArrowDown);
        step(&mut app, INTERVAL);

        let state = app.world().resource::<ActiveGame>().state();
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(head(&app), before + Direction::Down);
    }
}
