//! ECS системы: input → frame update, physics step, wiring audit

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::collaborators::{check_collaborators, GroundQuery};
use super::components::{AnimatorParameters, GroundCollider, GroundSensor, LocomotionController, PhysicsBody2d};
use super::config::LayerMask;
use super::controller::Locomotion;
use super::events::{JumpInput, MoveInput};
use crate::logger;

/// Данные персонажа, нужные physics step
pub type StepItem = (
    &'static mut LocomotionController,
    &'static mut PhysicsBody2d,
    &'static mut AnimatorParameters,
    &'static Transform,
    Option<&'static GroundSensor>,
);

/// Physics step для всех контроллеров против произвольного ground query
///
/// Общая часть headless и Rapier вариантов системы.
pub fn step_controllers<G>(dt: f32, ground: &G, controllers: &mut Query<StepItem>)
where
    G: GroundQuery + ?Sized,
{
    for (mut controller, mut body, mut animator, transform, sensor) in controllers.iter_mut() {
        let sensor_position = sensor.map(|s| s.world_position(transform));
        controller.on_physics_step(dt, sensor_position, ground, &mut *body, &mut *animator);
    }
}

/// Статические коллайдеры земли как GroundQuery (headless physics)
#[derive(SystemParam)]
pub struct GroundColliders<'w, 's> {
    colliders: Query<'w, 's, (&'static Transform, &'static GroundCollider)>,
}

impl GroundQuery for GroundColliders<'_, '_> {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        self.colliders.iter().any(|(transform, collider)| {
            collider.layers.intersects(mask)
                && collider.overlaps_circle(transform.translation.truncate(), center, radius)
        })
    }
}

/// Fixed-rate шаг против headless коллайдеров
pub fn headless_physics_step(
    time: Res<Time<Fixed>>,
    ground: GroundColliders,
    mut controllers: Query<StepItem>,
) {
    step_controllers(time.delta_secs(), &ground, &mut controllers);
}

/// Move events → LocomotionState
pub fn handle_move_input(
    mut move_events: EventReader<MoveInput>,
    mut controllers: Query<&mut LocomotionController>,
) {
    for event in move_events.read() {
        let Ok(mut controller) = controllers.get_mut(event.entity) else {
            continue;
        };
        controller.on_move_input(event.value);
    }
}

/// Jump events → impulse (если на земле по последнему physics step)
pub fn handle_jump_input(
    mut jump_events: EventReader<JumpInput>,
    mut controllers: Query<(&mut LocomotionController, &mut PhysicsBody2d, &mut AnimatorParameters)>,
) {
    for event in jump_events.read() {
        let Ok((mut controller, mut body, mut animator)) = controllers.get_mut(event.entity) else {
            continue;
        };
        controller.on_jump_input(&mut *body, &mut *animator);
    }
}

/// Render-rate update: flip спрайта по знаку input
pub fn locomotion_frame_update(mut controllers: Query<(Entity, &mut LocomotionController, &mut Transform)>) {
    for (entity, mut controller, mut transform) in controllers.iter_mut() {
        if let Some(facing) = controller.on_frame_update(&mut *transform) {
            logger::log(&format!("Entity {:?}: facing {:?}", entity, facing));
        }
    }
}

/// Проверка wiring для контроллеров, добавленных вручную (не через spawn_character)
///
/// Без collaborators контроллер снимается: ошибка логируется один раз,
/// дальше entity просто не участвует в локомоции.
pub fn audit_new_controllers(
    mut commands: Commands,
    added: Query<
        (Entity, Has<PhysicsBody2d>, Has<AnimatorParameters>, Has<GroundSensor>),
        Added<LocomotionController>,
    >,
) {
    for (entity, has_body, has_animator, has_sensor) in added.iter() {
        if let Err(err) = check_collaborators(has_body, has_animator, has_sensor) {
            logger::log_error(&format!(
                "Entity {:?}: locomotion disabled, {}",
                entity, err
            ));
            commands.entity(entity).remove::<LocomotionController>();
        }
    }
}
