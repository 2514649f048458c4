//! ECS компоненты локомоции
//!
//! Компоненты сами реализуют collaborator traits: host ECS владеет данными,
//! контроллер получает `&mut` на время системы.

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::collaborators::{AnimationSink, RigidBody2d};
use super::config::LayerMask;
use super::controller::CharacterLocomotion;

/// Контроллер персонажа (единственный владелец LocomotionState)
#[derive(Component, Debug, Clone, Default, Deref, DerefMut, Reflect)]
#[reflect(Component)]
pub struct LocomotionController(pub CharacterLocomotion);

/// Rigid body 2D: скорость + масса
///
/// Headless физика интегрирует его сама, в клиенте он синхронизируется с Rapier.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody2d {
    pub velocity: Vec2,
    pub mass: f32,
    /// Множитель глобальной гравитации (0 — без гравитации)
    pub gravity_scale: f32,
}

impl Default for PhysicsBody2d {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass: 1.0,
            gravity_scale: 1.0,
        }
    }
}

impl RigidBody2d for PhysicsBody2d {
    fn linear_velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        // Тело без массы импульс не двигает (как kinematic)
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }
}

/// Параметры animation state machine (bool/float/trigger)
///
/// Presentation layer читает значения и забирает triggers через `take_triggers`.
/// BTreeMap — детерминированный порядок для snapshots.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimatorParameters {
    bools: BTreeMap<String, bool>,
    floats: BTreeMap<String, f32>,
    pending_triggers: Vec<String>,
}

impl AnimatorParameters {
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Сколько раз trigger сработал с последнего `take_triggers`
    pub fn trigger_count(&self, name: &str) -> usize {
        self.pending_triggers.iter().filter(|t| t.as_str() == name).count()
    }

    pub fn take_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_triggers)
    }
}

impl AnimationSink for AnimatorParameters {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_trigger(&mut self, name: &str) {
        self.pending_triggers.push(name.to_string());
    }
}

/// Ground sensor — точка у ног персонажа (offset от его Transform)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundSensor {
    pub offset: Vec2,
}

impl GroundSensor {
    pub fn world_position(&self, transform: &Transform) -> Vec2 {
        transform.translation.truncate() + self.offset
    }
}

/// Статический AABB коллайдер земли (headless physics)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundCollider {
    pub half_extents: Vec2,
    pub layers: LayerMask,
}

impl GroundCollider {
    /// Пересечение круга с AABB, центрированным в `center`. Касание считается.
    pub fn overlaps_circle(&self, center: Vec2, circle_center: Vec2, radius: f32) -> bool {
        let min = center - self.half_extents;
        let max = center + self.half_extents;
        let closest = circle_center.clamp(min, max);
        circle_center.distance_squared(closest) <= radius * radius
    }
}

/// Половинные размеры тела персонажа (для посадки на землю в headless физике)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyExtents {
    pub half_size: Vec2,
}

impl Default for BodyExtents {
    fn default() -> Self {
        Self {
            half_size: Vec2::new(0.4, 0.5),
        }
    }
}

/// Marker: персонаж, которым управляет игрок
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::state::params;

    #[test]
    fn test_impulse_respects_mass() {
        let mut body = PhysicsBody2d {
            mass: 2.0,
            ..default()
        };
        body.apply_impulse(Vec2::new(0.0, 12.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 6.0));

        let mut massless = PhysicsBody2d {
            mass: 0.0,
            ..default()
        };
        massless.apply_impulse(Vec2::Y);
        assert_eq!(massless.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_animator_triggers_drain() {
        let mut animator = AnimatorParameters::default();
        animator.set_trigger(params::JUMP_TRIGGER);
        animator.set_bool(params::IS_GROUNDED, true);

        assert_eq!(animator.trigger_count(params::JUMP_TRIGGER), 1);
        assert_eq!(animator.take_triggers(), vec![params::JUMP_TRIGGER.to_string()]);
        assert_eq!(animator.trigger_count(params::JUMP_TRIGGER), 0);
        assert_eq!(animator.get_bool(params::IS_GROUNDED), Some(true));
        assert_eq!(animator.get_float(params::Y_VELOCITY), None);
    }

    #[test]
    fn test_ground_collider_circle_overlap() {
        let collider = GroundCollider {
            half_extents: Vec2::new(5.0, 0.5),
            layers: LayerMask::default(),
        };
        let center = Vec2::ZERO;

        // Касание верхней грани
        assert!(collider.overlaps_circle(center, Vec2::new(0.0, 0.7), 0.2));
        assert!(!collider.overlaps_circle(center, Vec2::new(0.0, 0.75), 0.2));
        // Угол: расстояние до (5, 0.5) > радиуса
        assert!(!collider.overlaps_circle(center, Vec2::new(5.2, 0.7), 0.2));
        // Центр внутри
        assert!(collider.overlaps_circle(center, Vec2::new(1.0, 0.0), 0.01));
    }

    #[test]
    fn test_sensor_world_position() {
        let sensor = GroundSensor { offset: Vec2::new(0.0, -0.5) };
        let transform = Transform::from_xyz(3.0, 2.0, 0.0);
        assert_eq!(sensor.world_position(&transform), Vec2::new(3.0, 1.5));
    }
}
