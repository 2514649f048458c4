//! Demo уровень: камера, платформы (Rapier Fixed), игрок
//!
//! Единицы — метры: Rapier с pixels_per_meter = 1, камера масштабирует 48 px/m.

use std::path::Path;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use sensei_simulation::physics::collider_groups;
use sensei_simulation::{
    log_error, log_info, log_warning, spawn_character, CharacterBlueprint, Facing, LayerMask, LocomotionConfig,
    Player, GROUND_LAYER,
};

use crate::diagnostics::Selected;
use crate::presentation::JumpStretch;

/// Путь от корня crate, а не от текущей директории
const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sensei.ron");
const PIXELS_PER_METER: f32 = 48.0;

/// Слой тела персонажа (не земля)
const CHARACTER_LAYER: u32 = 0;

#[derive(Component)]
pub struct MainCamera;

/// Конфиг из RON, при ошибке — defaults
fn load_config() -> LocomotionConfig {
    match LocomotionConfig::load(Path::new(CONFIG_PATH)) {
        Ok(config) => {
            log_info(&format!("Loaded locomotion config from {}", CONFIG_PATH));
            config
        }
        Err(err) => {
            log_warning(&format!("{}: {} (using defaults)", CONFIG_PATH, err));
            LocomotionConfig::default()
        }
    }
}

fn spawn_platform(commands: &mut Commands, center: Vec2, half_extents: Vec2) {
    commands.spawn((
        Sprite::from_color(Color::srgb(0.3, 0.45, 0.3), half_extents * 2.0),
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Fixed,
        Collider::cuboid(half_extents.x, half_extents.y),
        collider_groups(LayerMask::layer(GROUND_LAYER)),
    ));
}

fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_METER,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 3.0, 999.0),
        MainCamera,
    ));

    // Пол + несколько уступов
    spawn_platform(&mut commands, Vec2::new(0.0, -0.5), Vec2::new(30.0, 0.5));
    spawn_platform(&mut commands, Vec2::new(-6.0, 2.0), Vec2::new(2.0, 0.25));
    spawn_platform(&mut commands, Vec2::new(0.0, 4.0), Vec2::new(1.5, 0.25));
    spawn_platform(&mut commands, Vec2::new(6.0, 2.5), Vec2::new(2.5, 0.25));

    let blueprint = CharacterBlueprint::new(load_config(), Vec2::new(0.0, 1.0)).facing(Facing::Right);
    let half_size = blueprint.extents.half_size;

    match spawn_character(&mut commands, blueprint) {
        Ok(player) => {
            commands.entity(player).insert((
                Sprite::from_color(Color::WHITE, half_size * 2.0),
                RigidBody::Dynamic,
                Collider::cuboid(half_size.x, half_size.y),
                // Flip через scale.x не должен менять коллайдер
                ColliderScale::Absolute(Vect::ONE),
                LockedAxes::ROTATION_LOCKED,
                Friction::coefficient(0.0),
                Velocity::zero(),
                collider_groups(LayerMask::layer(CHARACTER_LAYER)),
                Player,
                Selected,
                JumpStretch::default(),
            ));
        }
        Err(err) => log_error(&format!("Player wiring failed: {}", err)),
    }
}

/// Камера следует за игроком по X, мягко по Y
fn follow_player(
    time: Res<Time>,
    player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let (Ok(player), Ok(mut camera)) = (player.single(), camera.single_mut()) else {
        return;
    };

    let target = Vec2::new(player.translation.x, player.translation.y.max(3.0));
    let current = camera.translation.truncate();
    let blend = (time.delta_secs() * 5.0).min(1.0);
    let next = current.lerp(target, blend);
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(PostUpdate, follow_player.before(TransformSystem::TransformPropagate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_loads() {
        let config = LocomotionConfig::load(Path::new(CONFIG_PATH)).unwrap();
        assert_eq!(config, LocomotionConfig::default());
    }
}
