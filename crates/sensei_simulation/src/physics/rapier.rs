//! Rapier 2D как physics host
//!
//! Архитектура:
//! - Rapier владеет интеграцией, гравитацией и коллизиями
//! - PhysicsBody2d — наша копия velocity, которую пишет контроллер
//! - Ground check: `intersect_shape` шаром радиуса sensor, до первого пересечения
//!
//! Порядок за кадр:
//! FixedUpdate: Velocity → PhysicsBody2d → physics step → Velocity, потом Rapier step.
//! Update: jump input пишет PhysicsBody2d → сразу Velocity (до следующего Rapier step).

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::locomotion::systems::{step_controllers, StepItem};
use crate::locomotion::{GroundQuery, LayerMask, LocomotionSet, PhysicsBody2d};

/// LayerMask → Rapier collision group (биты совпадают)
pub fn layer_group(mask: LayerMask) -> Group {
    Group::from_bits_truncate(mask.bits())
}

/// Группы коллайдера, который лежит на слоях `layers` и видит всех
pub fn collider_groups(layers: LayerMask) -> CollisionGroups {
    CollisionGroups::new(layer_group(layers), Group::ALL)
}

impl GroundQuery for RapierContext<'_> {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        let shape = Collider::ball(radius);
        let filter = QueryFilter::new()
            .exclude_sensors()
            .groups(CollisionGroups::new(Group::ALL, layer_group(mask)));

        let mut found = false;
        self.intersect_shape(center, 0.0, shape.raw.as_ref(), filter, |_| {
            found = true;
            false
        });
        found
    }
}

/// Rapier Velocity → PhysicsBody2d (gravity и коллизии уже применены)
pub fn sync_velocity_from_rapier(mut bodies: Query<(&mut PhysicsBody2d, &Velocity)>) {
    for (mut body, rapier_velocity) in bodies.iter_mut() {
        body.velocity = rapier_velocity.linvel;
    }
}

/// PhysicsBody2d → Rapier Velocity
pub fn sync_velocity_to_rapier(mut bodies: Query<(&PhysicsBody2d, &mut Velocity)>) {
    for (body, mut rapier_velocity) in bodies.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// Physics step контроллеров против Rapier query pipeline
pub fn rapier_physics_step(
    time: Res<Time<Fixed>>,
    rapier: ReadRapierContext,
    mut controllers: Query<StepItem>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };
    step_controllers(time.delta_secs(), &context, &mut controllers);
}

/// Plugin: локомоция поверх Rapier
///
/// Сам `RapierPhysicsPlugin` добавляет host (клиент), вместе с `.in_fixed_schedule()`.
pub struct RapierLocomotionPlugin;

impl Plugin for RapierLocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                sync_velocity_from_rapier.before(LocomotionSet::PhysicsStep),
                rapier_physics_step.in_set(LocomotionSet::PhysicsStep),
                sync_velocity_to_rapier.in_set(LocomotionSet::Integrate),
            ),
        );

        // Jump применяется в Update — Rapier должен увидеть его до своего шага
        app.add_systems(Update, sync_velocity_to_rapier.after(LocomotionSet::Input));
    }
}
