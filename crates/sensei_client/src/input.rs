//! Keyboard → actions `Move` / `Jump`
//!
//! Move шлётся только при смене значения оси (как callback input layer),
//! Jump (Space/W/Up) — на just_pressed (edge-triggered).

use bevy::prelude::*;
use sensei_simulation::{JumpInput, LocomotionSet, MoveInput, Player};

/// Раскладка клавиш для двух actions
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            up: vec![KeyCode::ArrowUp],
            down: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            jump: vec![KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp],
        }
    }
}

fn axis(keys: &ButtonInput<KeyCode>, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
    let neg = keys.any_pressed(negative.iter().copied());
    let pos = keys.any_pressed(positive.iter().copied());
    match (neg, pos) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Клавиатура → MoveInput/JumpInput для всех Player entities
fn keyboard_actions(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    players: Query<Entity, With<Player>>,
    mut last_move: Local<Vec2>,
    mut move_events: EventWriter<MoveInput>,
    mut jump_events: EventWriter<JumpInput>,
) {
    let value = Vec2::new(
        axis(&keys, &bindings.left, &bindings.right),
        axis(&keys, &bindings.down, &bindings.up),
    );
    let jump_pressed = keys.any_just_pressed(bindings.jump.iter().copied());

    let move_changed = value != *last_move;
    *last_move = value;

    for entity in players.iter() {
        if move_changed {
            move_events.write(MoveInput { entity, value });
        }
        if jump_pressed {
            jump_events.write(JumpInput { entity });
        }
    }
}

pub struct KeyboardInputPlugin;

impl Plugin for KeyboardInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .add_systems(Update, keyboard_actions.before(LocomotionSet::Input));
    }
}
