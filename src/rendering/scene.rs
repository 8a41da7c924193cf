//! Bevy implementation of [`Renderer`]: cubes for the snake, a sphere for food.

use bevy::prelude::*;

use super::Renderer;
use crate::config::GameConfig;
use crate::game::{
    Cell, ENTITY_HEIGHT, EntityKind, FOOD_COLOR, FoodPulse, SNAKE_BODY_COLOR, SNAKE_HEAD_COLOR,
};

/// Meshes and materials shared by every game entity.
#[derive(Resource)]
pub struct SceneAssets {
    pub cube: Handle<Mesh>,
    pub sphere: Handle<Mesh>,
    pub head_material: Handle<StandardMaterial>,
    pub body_material: Handle<StandardMaterial>,
    pub food_material: Handle<StandardMaterial>,
    pub cell_size: f32,
}

impl SceneAssets {
    pub fn new(
        config: &GameConfig,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        SceneAssets {
            cube: meshes.add(Cuboid::from_length(config.cell_size)),
            sphere: meshes.add(Sphere::new(config.cell_size / 2.0)),
            head_material: materials.add(StandardMaterial {
                base_color: SNAKE_HEAD_COLOR,
                ..default()
            }),
            body_material: materials.add(StandardMaterial {
                base_color: SNAKE_BODY_COLOR,
                ..default()
            }),
            food_material: materials.add(StandardMaterial {
                base_color: FOOD_COLOR,
                ..default()
            }),
            cell_size: config.cell_size,
        }
    }

    fn mesh(&self, kind: EntityKind) -> Handle<Mesh> {
        match kind {
            EntityKind::SnakeHead | EntityKind::SnakeBody => self.cube.clone(),
            EntityKind::Food => self.sphere.clone(),
        }
    }

    fn material(&self, kind: EntityKind) -> Handle<StandardMaterial> {
        match kind {
            EntityKind::SnakeHead => self.head_material.clone(),
            EntityKind::SnakeBody => self.body_material.clone(),
            EntityKind::Food => self.food_material.clone(),
        }
    }

    /// Grid `(x, y)` lies on the ground plane as world `(x, _, y)`.
    pub fn translation(&self, cell: Cell) -> Vec3 {
        Vec3::new(cell.x as f32, ENTITY_HEIGHT, cell.y as f32) * self.cell_size
    }
}

/// Issues entity commands for one system run.
pub struct SceneRenderer<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    assets: &'a SceneAssets,
}

impl<'a, 'w, 's> SceneRenderer<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, assets: &'a SceneAssets) -> Self {
        SceneRenderer { commands, assets }
    }
}

impl Renderer for SceneRenderer<'_, '_, '_> {
    type Handle = Entity;

    fn create_entity(&mut self, kind: EntityKind, cell: Cell) -> Entity {
        let mut entity = self.commands.spawn((
            Mesh3d(self.assets.mesh(kind)),
            MeshMaterial3d(self.assets.material(kind)),
            Transform::from_translation(self.assets.translation(cell)),
            kind,
        ));

        if kind == EntityKind::Food {
            entity.insert(FoodPulse {
                timer: Timer::from_seconds(0.8, TimerMode::Repeating),
            });
        }

        entity.id()
    }

    fn update_color(&mut self, handle: Entity, kind: EntityKind) {
        if let Ok(mut entity) = self.commands.get_entity(handle) {
            entity.insert((MeshMaterial3d(self.assets.material(kind)), kind));
        }
    }

    fn remove_entity(&mut self, handle: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(handle) {
            entity.despawn();
        }
    }
}
