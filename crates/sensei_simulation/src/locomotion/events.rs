//! Input events (actions `Move` и `Jump`)

use bevy::prelude::*;

/// Event: новое значение action `Move` (continuous 2-axis)
///
/// Генерируется:
/// - клиентом (клавиатура) при смене значения оси
/// - RandomInputBot (headless)
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveInput {
    pub entity: Entity,
    pub value: Vec2,
}

/// Event: нажатие action `Jump` (edge-triggered, один раз на нажатие)
#[derive(Event, Debug, Clone, Copy)]
pub struct JumpInput {
    pub entity: Entity,
}
