//! RandomInputBot — seeded генератор input для headless прогонов
//!
//! Бот ведёт себя как игрок за клавиатурой: держит направление несколько
//! кадров, иногда меняет его, иногда жмёт прыжок. Случайность только из
//! `DeterministicRng`, поэтому прогон с тем же seed повторяется.

use bevy::prelude::*;
use rand::Rng;

use crate::locomotion::{JumpInput, LocomotionSet, MoveInput};
use crate::DeterministicRng;

/// Бот, управляющий персонажем через Move/Jump events
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RandomInputBot {
    /// Вероятность сменить направление за кадр
    pub turn_chance: f64,
    /// Вероятность нажать Jump за кадр
    pub jump_chance: f64,
    /// Текущее направление (-1, 0, 1)
    pub direction: f32,
}

impl Default for RandomInputBot {
    fn default() -> Self {
        Self {
            turn_chance: 0.05,
            jump_chance: 0.02,
            direction: 0.0,
        }
    }
}

/// Система бота: пишет MoveInput только при смене направления (как input layer)
pub fn drive_bots(
    mut rng: ResMut<DeterministicRng>,
    mut bots: Query<(Entity, &mut RandomInputBot)>,
    mut move_events: EventWriter<MoveInput>,
    mut jump_events: EventWriter<JumpInput>,
) {
    for (entity, mut bot) in bots.iter_mut() {
        if rng.rng.gen_bool(bot.turn_chance) {
            let direction = [-1.0, 0.0, 1.0][rng.rng.gen_range(0..3)];
            if direction != bot.direction {
                bot.direction = direction;
                move_events.write(MoveInput {
                    entity,
                    value: Vec2::new(direction, 0.0),
                });
            }
        }

        if rng.rng.gen_bool(bot.jump_chance) {
            jump_events.write(JumpInput { entity });
        }
    }
}

pub struct BotPlugin;

impl Plugin for BotPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RandomInputBot>()
            .add_systems(Update, drive_bots.before(LocomotionSet::Input));
    }
}
