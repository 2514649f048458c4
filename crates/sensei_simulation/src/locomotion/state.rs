//! Явное состояние локомоции: LocomotionState, Facing, AnimationParams

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Порог горизонтального input, выше которого персонаж считается бегущим (строго >)
pub const RUN_INPUT_THRESHOLD: f32 = 0.01;

/// Имена параметров animator (контракт с animation host)
pub mod params {
    pub const IS_RUNNING: &str = "isRunning";
    pub const Y_VELOCITY: &str = "yVelocity";
    pub const IS_GROUNDED: &str = "isGrounded";
    pub const JUMP_TRIGGER: &str = "Jump";
}

/// Состояние, которое контроллер переносит между шагами
///
/// Больше ничего не переживает кадр: velocity принадлежит rigid body, facing — scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct LocomotionState {
    /// Последний Move input (x — горизонталь, y — не используется для движения)
    pub move_input: Vec2,
    /// Результат ground query текущего шага
    pub is_grounded: bool,
}

impl LocomotionState {
    pub fn move_input_x(&self) -> f32 {
        self.move_input.x
    }

    pub fn is_running(&self) -> bool {
        self.move_input.x.abs() > RUN_INPUT_THRESHOLD
    }

    /// Целевая горизонтальная скорость для текущего input
    pub fn horizontal_velocity(&self, walk_speed: f32) -> f32 {
        self.move_input.x * walk_speed
    }

    pub fn animation_params(&self, y_velocity: f32) -> AnimationParams {
        AnimationParams {
            is_running: self.is_running(),
            y_velocity,
            is_grounded: self.is_grounded,
        }
    }
}

/// Снимок параметров, публикуемых в animator после physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub is_running: bool,
    pub y_velocity: f32,
    pub is_grounded: bool,
}

/// Ориентация спрайта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    /// Facing из знака горизонтального scale. Нулевой scale не даёт ориентации.
    pub fn from_scale(scale_x: f32) -> Option<Self> {
        if scale_x > 0.0 {
            Some(Facing::Right)
        } else if scale_x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Куда input просит смотреть. Ровно ноль — без мнения (держим текущий facing).
    pub fn from_input(input_x: f32) -> Option<Self> {
        if input_x > 0.0 {
            Some(Facing::Right)
        } else if input_x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}
