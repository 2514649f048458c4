//! Headless physics host (без Rapier)
//!
//! Минимум, чтобы контроллер жил в тестах и headless runner:
//! - gravity по `Gravity2d`
//! - интеграция velocity → Transform
//! - посадка на верхнюю грань GroundCollider
//!
//! Детерминизм: только FixedUpdate, delta из `Time<Fixed>`.

use bevy::prelude::*;

use crate::locomotion::systems::headless_physics_step;
use crate::locomotion::{BodyExtents, GroundCollider, LocomotionSet, PhysicsBody2d};

/// Глобальная гравитация (units/s²)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Gravity2d(pub Vec2);

impl Default for Gravity2d {
    fn default() -> Self {
        Self(Vec2::new(0.0, -9.81))
    }
}

/// Gravity → velocity (всегда: на земле скорость обнулит посадка)
pub fn apply_gravity(
    gravity: Res<Gravity2d>,
    time: Res<Time<Fixed>>,
    mut bodies: Query<&mut PhysicsBody2d>,
) {
    let delta = time.delta_secs();

    for mut body in bodies.iter_mut() {
        let scale = body.gravity_scale;
        body.velocity += gravity.0 * scale * delta;
    }
}

/// velocity → Transform (position += velocity * dt)
pub fn integrate_velocity(time: Res<Time<Fixed>>, mut bodies: Query<(&PhysicsBody2d, &mut Transform)>) {
    let delta = time.delta_secs();

    for (body, mut transform) in bodies.iter_mut() {
        transform.translation += (body.velocity * delta).extend(0.0);
    }
}

/// Посадка: тело, падающее в верхнюю половину коллайдера, ставится на его грань
pub fn resolve_ground_contacts(
    mut bodies: Query<(&mut PhysicsBody2d, &mut Transform, &BodyExtents), Without<GroundCollider>>,
    colliders: Query<(&Transform, &GroundCollider)>,
) {
    for (mut body, mut transform, extents) in bodies.iter_mut() {
        if body.velocity.y > 0.0 {
            continue;
        }

        let position = transform.translation.truncate();
        let bottom = position.y - extents.half_size.y;

        for (ground_transform, collider) in colliders.iter() {
            let center = ground_transform.translation.truncate();
            let top = center.y + collider.half_extents.y;

            let overlaps_x = (position.x - center.x).abs() < collider.half_extents.x + extents.half_size.x;
            if overlaps_x && bottom < top && bottom >= center.y {
                transform.translation.y = top + extents.half_size.y;
                body.velocity.y = 0.0;
                break;
            }
        }
    }
}

/// Headless physics plugin: physics step контроллера + gravity/integration/contacts
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Gravity2d>();

        app.add_systems(
            FixedUpdate,
            (
                headless_physics_step.in_set(LocomotionSet::PhysicsStep),
                (apply_gravity, integrate_velocity, resolve_ground_contacts)
                    .chain()
                    .in_set(LocomotionSet::Integrate),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::LayerMask;

    #[test]
    fn test_gravity_logic() {
        let gravity = Gravity2d::default();
        let mut body = PhysicsBody2d::default();
        let delta = 1.0 / 50.0;

        body.velocity += gravity.0 * body.gravity_scale * delta;

        // После 1/50 sec: velocity.y = -9.81 / 50 ≈ -0.196
        assert!(body.velocity.y < -0.19);
        assert!(body.velocity.y > -0.20);
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let mut app = App::new();
        app.add_systems(Update, resolve_ground_contacts);

        app.world_mut().spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            GroundCollider {
                half_extents: Vec2::new(10.0, 0.5),
                layers: LayerMask::default(),
            },
        ));
        let falling = app
            .world_mut()
            .spawn((
                Transform::from_xyz(1.0, 0.45, 0.0),
                PhysicsBody2d {
                    velocity: Vec2::new(2.0, -3.0),
                    ..default()
                },
                BodyExtents::default(),
            ))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(falling).unwrap();
        let body = app.world().get::<PhysicsBody2d>(falling).unwrap();
        assert_eq!(transform.translation.y, 0.5);
        assert_eq!(body.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_rising_body_passes_through() {
        let mut app = App::new();
        app.add_systems(Update, resolve_ground_contacts);

        app.world_mut().spawn((
            Transform::from_xyz(0.0, 0.0, 0.0),
            GroundCollider {
                half_extents: Vec2::new(2.0, 0.5),
                layers: LayerMask::default(),
            },
        ));
        let rising = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 0.8, 0.0),
                PhysicsBody2d {
                    velocity: Vec2::new(0.0, 4.0),
                    ..default()
                },
                BodyExtents::default(),
            ))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(rising).unwrap();
        assert_eq!(transform.translation.y, 0.8);
    }
}
