//! Spawn helpers: персонаж (с проверкой wiring) и статическая земля

use bevy::prelude::*;

use super::collaborators::{check_collaborators, Collaborator, LocomotionError};
use super::components::{AnimatorParameters, BodyExtents, GroundCollider, GroundSensor, LocomotionController, PhysicsBody2d};
use super::config::{LayerMask, LocomotionConfig};
use super::controller::CharacterLocomotion;
use super::state::Facing;

/// Всё, что нужно для спавна персонажа
///
/// Collaborators — `Option`: host может собрать blueprint частично, а
/// `spawn_character` откажется спавнить неполный.
#[derive(Debug, Clone)]
pub struct CharacterBlueprint {
    pub config: LocomotionConfig,
    pub position: Vec2,
    /// Authored ориентация (знак scale.x)
    pub facing: Facing,
    pub extents: BodyExtents,
    pub body: Option<PhysicsBody2d>,
    pub animator: Option<AnimatorParameters>,
    pub sensor: Option<GroundSensor>,
}

impl CharacterBlueprint {
    /// Полный blueprint: sensor у ног, тело массой 1
    pub fn new(config: LocomotionConfig, position: Vec2) -> Self {
        let extents = BodyExtents::default();
        Self {
            config,
            position,
            facing: Facing::Right,
            extents,
            body: Some(PhysicsBody2d::default()),
            animator: Some(AnimatorParameters::default()),
            sensor: Some(GroundSensor {
                offset: Vec2::new(0.0, -extents.half_size.y),
            }),
        }
    }

    pub fn facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn validate(&self) -> Result<(), LocomotionError> {
        check_collaborators(self.body.is_some(), self.animator.is_some(), self.sensor.is_some())
    }
}

/// Spawn персонажа. Ошибка wiring возвращается ДО появления entity.
pub fn spawn_character(commands: &mut Commands, blueprint: CharacterBlueprint) -> Result<Entity, LocomotionError> {
    blueprint.validate()?;

    let body = blueprint
        .body
        .ok_or(LocomotionError::MissingCollaborator(Collaborator::RigidBody))?;
    let animator = blueprint
        .animator
        .ok_or(LocomotionError::MissingCollaborator(Collaborator::Animator))?;
    let sensor = blueprint.sensor.ok_or(LocomotionError::InvalidGroundSensor)?;

    let transform = Transform::from_translation(blueprint.position.extend(0.0))
        .with_scale(Vec3::new(blueprint.facing.sign(), 1.0, 1.0));

    let entity = commands
        .spawn((
            transform,
            LocomotionController(CharacterLocomotion::new(blueprint.config)),
            body,
            animator,
            sensor,
            blueprint.extents,
        ))
        .id();

    Ok(entity)
}

/// Spawn статической платформы (AABB) на слоях `layers`
pub fn spawn_ground(commands: &mut Commands, center: Vec2, half_extents: Vec2, layers: LayerMask) -> Entity {
    commands
        .spawn((
            Transform::from_translation(center.extend(0.0)),
            GroundCollider { half_extents, layers },
        ))
        .id()
}
