//! Контракты host collaborators
//!
//! Контроллер не владеет ни физикой, ни animator: host даёт их по ссылке
//! на время одного вызова. Всё, что нужно от движка, — эти четыре trait'а.

use bevy::prelude::*;

use super::config::LayerMask;

/// Rigid body, которым управляет контроллер
pub trait RigidBody2d {
    fn linear_velocity(&self) -> Vec2;
    fn set_linear_velocity(&mut self, velocity: Vec2);
    /// Мгновенный импульс (Δv = impulse / mass), применяется сразу
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Пространственный запрос физического мира
pub trait GroundQuery {
    /// Пересекает ли круг (center, radius) хоть один коллайдер из `mask`
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool;
}

/// Приёмник параметров animation state machine
pub trait AnimationSink {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_trigger(&mut self, name: &str);
}

/// Горизонтальный scale спрайта (знак = facing)
pub trait SpriteOrientation {
    fn horizontal_scale(&self) -> f32;
    fn set_horizontal_scale(&mut self, scale: f32);
}

impl SpriteOrientation for Transform {
    fn horizontal_scale(&self) -> f32 {
        self.scale.x
    }

    fn set_horizontal_scale(&mut self, scale: f32) {
        self.scale.x = scale;
    }
}

/// Геометрия ground sensor для diagnostics layer (read-only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCircle {
    pub center: Vec2,
    pub radius: f32,
}

/// Какой collaborator не подключён
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    RigidBody,
    Animator,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collaborator::RigidBody => "rigid body",
            Collaborator::Animator => "animator",
        }
    }
}

/// Ошибки wiring контроллера (проверяются до входа в simulation loop)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocomotionError {
    MissingCollaborator(Collaborator),
    InvalidGroundSensor,
}

impl std::fmt::Display for LocomotionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCollaborator(which) => {
                write!(f, "required {} is missing", which.as_str())
            }
            Self::InvalidGroundSensor => write!(f, "ground sensor reference is not assigned"),
        }
    }
}

impl std::error::Error for LocomotionError {}

/// Проверка wiring: rigid body → animator → ground sensor (первая ошибка выигрывает)
pub fn check_collaborators(
    has_body: bool,
    has_animator: bool,
    has_sensor: bool,
) -> Result<(), LocomotionError> {
    if !has_body {
        return Err(LocomotionError::MissingCollaborator(Collaborator::RigidBody));
    }
    if !has_animator {
        return Err(LocomotionError::MissingCollaborator(Collaborator::Animator));
    }
    if !has_sensor {
        return Err(LocomotionError::InvalidGroundSensor);
    }
    Ok(())
}
