//! Rendering plugin - scene setup, the renderer adapter, visual effects, and camera.

mod renderer;
mod scene;

pub use renderer::Renderer;
pub use scene::{SceneAssets, SceneRenderer};

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::config::GameConfig;
use crate::game::{
    ARENA_BORDER_COLOR, ArenaCamera, CameraShake, Collision, EntityKind, FoodPulse,
    GROUND_COLOR, GameOverEvent,
};

/// Radians of orbit per pixel of mouse drag.
const ORBIT_SENSITIVITY: f32 = 0.005;

/// How far the food sphere grows and shrinks around its resting size.
const FOOD_PULSE_AMPLITUDE: f32 = 0.15;

/// Plugin for the 3D scene and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ShapePlugin::default())
            .init_resource::<CameraShake>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    pulse_food,
                    report_missing_camera,
                    orbit_camera.run_if(|config: Res<GameConfig>| !config.fixed_camera),
                    trigger_camera_shake_on_game_over,
                    camera_shake_system,
                )
                    .chain(),
            );
    }
}

/// Initial setup system - shared assets, camera, light, ground, arena border.
fn setup_scene(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let extent = config.arena_extent();

    commands.insert_resource(SceneAssets::new(&config, &mut meshes, &mut materials));

    // Fixed camera above the near edge of the board, looking at its center
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, extent * 1.1, extent * 0.75).looking_at(Vec3::ZERO, Vec3::Y),
        ArenaCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(extent * 0.3, extent, extent * 0.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ground plane covering the grid
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(extent, extent))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));

    // Arena border outline, laid flat just above the ground
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: ARENA_BORDER_COLOR,
            hollow: true,
            thickness: config.cell_size * 0.1,
            transform: Transform::from_xyz(0.0, 0.01, 0.0)
                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ..ShapeConfig::default_3d()
        },
        Vec2::splat(extent + config.cell_size * 0.2),
    ));

    info!(
        "Scene ready: {}x{} grid, cell size {}",
        config.grid_size, config.grid_size, config.cell_size
    );
}

/// Scale of a pulsing food sphere `fraction` of the way through its cycle.
fn pulse_scale(fraction: f32) -> f32 {
    1.0 + FOOD_PULSE_AMPLITUDE * (fraction * TAU).sin()
}

/// Breathe the food sphere in and out.
fn pulse_food(
    time: Res<Time>,
    mut entities: Query<(&EntityKind, &mut FoodPulse, &mut Transform)>,
) {
    for (kind, mut pulse, mut transform) in &mut entities {
        if *kind != EntityKind::Food {
            continue;
        }
        pulse.timer.tick(time.delta());
        transform.scale = Vec3::splat(pulse_scale(pulse.timer.fraction()));
    }
}

/// Warn once if the arena camera is gone. Camera systems skip quietly after that.
fn report_missing_camera(cameras: Query<(), With<ArenaCamera>>, mut warned: Local<bool>) {
    if !*warned && cameras.is_empty() {
        warn!("Camera not found, camera effects disabled");
        *warned = true;
    }
}

/// System to orbit the camera around the board while the left button is held.
fn orbit_camera(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut cameras: Query<&mut Transform, With<ArenaCamera>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };

    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    let yaw = Quat::from_rotation_y(-mouse_motion.delta.x * ORBIT_SENSITIVITY);
    transform.rotate_around(Vec3::ZERO, yaw);
    transform.look_at(Vec3::ZERO, Vec3::Y);
}

/// System to trigger camera shake on game over.
fn trigger_camera_shake_on_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut camera_shake: ResMut<CameraShake>,
    config: Res<GameConfig>,
) {
    for event in game_over_reader.read() {
        let strength = match event.cause {
            Collision::Wall => 0.3,
            Collision::Body => 0.2,
        };
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        camera_shake.intensity = strength * config.cell_size;
        debug!(
            "Shaking camera after {:?} collision, final score {}",
            event.cause, event.score
        );
    }
}

/// System to jitter the camera while a shake is active. Only the jitter is
/// added and removed, so the resting pose (including any orbit) is kept.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<ArenaCamera>>,
) {
    if camera_shake.timer.is_finished() && camera_shake.offset == Vec3::ZERO {
        return;
    }
    camera_shake.timer.tick(time.delta());

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    camera_transform.translation -= camera_shake.offset;

    camera_shake.offset = if camera_shake.timer.is_finished() {
        Vec3::ZERO
    } else {
        let reach = camera_shake.intensity * (1.0 - camera_shake.timer.fraction());
        let mut rng = rand::rng();
        Vec3::new(
            rng.random_range(-0.5_f32..0.5) * reach,
            0.0,
            rng.random_range(-0.5_f32..0.5) * reach,
        )
    };
    camera_transform.translation += camera_shake.offset;
}
