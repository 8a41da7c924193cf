//! UI plugin - score display, game over prompt, restart and teardown.

use bevy::prelude::*;

use crate::game::{GameOverUI, GameRng, Lifecycle, RestartPrompt, ScoreChanged, ScoreText};
use crate::rendering::{SceneAssets, SceneRenderer};
use crate::snake::ActiveGame;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_score_text).add_systems(
            Update,
            (
                spawn_game_over_screen,
                acknowledge_restart,
                update_score_text,
                teardown_game,
            )
                .chain(),
        );
    }
}

/// Score text in the top-left corner.
fn setup_score_text(mut commands: Commands) {
    commands.spawn((
        Text::from("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));
}

/// System to spawn the game over prompt once the lifecycle asks for it.
fn spawn_game_over_screen(
    mut commands: Commands,
    mut prompt_reader: MessageReader<RestartPrompt>,
    game: Res<ActiveGame>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if prompt_reader.read().last().is_none() || !game_over_ui.is_empty() {
        return;
    }

    let score = game.state().score();
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("GAME OVER"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 0.3, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from(format!("Your score was {}.", score)),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from("Press SPACE or ENTER to restart"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
            ));
        });
}

/// System to restart the game once the player confirms the prompt.
#[allow(clippy::too_many_arguments)]
fn acknowledge_restart(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    assets: Res<SceneAssets>,
    mut lifecycle: ResMut<Lifecycle>,
    mut game: ResMut<ActiveGame>,
    mut rng: ResMut<GameRng>,
    mut score_writer: MessageWriter<ScoreChanged>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if !keyboard_input.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
        return;
    }
    if !lifecycle.acknowledge() {
        return;
    }

    for entity in game_over_ui.iter() {
        commands.entity(entity).despawn();
    }

    let mut renderer = SceneRenderer::new(&mut commands, &assets);
    game.restart(&mut renderer, &mut rng.0);
    score_writer.write(ScoreChanged { score: 0 });
}

/// System to update the score display. A missing display is reported once.
fn update_score_text(
    mut score_reader: MessageReader<ScoreChanged>,
    mut query: Query<&mut Text, With<ScoreText>>,
    mut warned: Local<bool>,
) {
    let Some(changed) = score_reader.read().last() else {
        return;
    };

    match query.single_mut() {
        Ok(mut text) => *text = Text::from(format!("Score: {}", changed.score)),
        Err(_) if !*warned => {
            warn!("Score element not found!");
            *warned = true;
        }
        Err(_) => {}
    }
}

/// System to tear the game down on Escape: stop the clock and input, remove
/// every game entity, then exit.
fn teardown_game(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    assets: Res<SceneAssets>,
    mut lifecycle: ResMut<Lifecycle>,
    mut game: ResMut<ActiveGame>,
    mut exit_writer: MessageWriter<AppExit>,
) {
    if !keyboard_input.just_pressed(KeyCode::Escape) || !lifecycle.accepts_input() {
        return;
    }

    lifecycle.stop();
    let mut renderer = SceneRenderer::new(&mut commands, &assets);
    game.clear(&mut renderer);
    info!("Game torn down.");
    exit_writer.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<ScoreChanged>()
            .add_systems(Update, update_score_text);
        app
    }

    fn score_texts(app: &mut App) -> Vec<String> {
        let mut query = app.world_mut().query_filtered::<&Text, With<ScoreText>>();
        query
            .iter(app.world())
            .map(|text| text.0.clone())
            .collect()
    }

    #[test]
    fn test_score_text_follows_score() {
        let mut app = score_app();
        app.world_mut().spawn((Text::from("Score: 0"), ScoreText));

        app.world_mut().write_message(ScoreChanged { score: 10 });
        app.world_mut().write_message(ScoreChanged { score: 20 });
        app.update();

        assert_eq!(score_texts(&mut app), vec!["Score: 20".to_string()]);
    }

    #[test]
    fn test_missing_score_text_does_not_stop_the_game() {
        let mut app = score_app();

        for score in [10, 20, 30] {
            app.world_mut().write_message(ScoreChanged { score });
            app.update();
        }
        assert!(score_texts(&mut app).is_empty());

        // A display that shows up later is still kept current.
        app.world_mut().spawn((Text::from("Score: 0"), ScoreText));
        app.world_mut().write_message(ScoreChanged { score: 40 });
        app.update();
        assert_eq!(score_texts(&mut app), vec!["Score: 40".to_string()]);
    }
}
