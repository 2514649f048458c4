//! Animator parameters → sprite (вместо animation state machine)
//!
//! - grounded + isRunning → оранжевый
//! - grounded idle → белый
//! - в воздухе: yVelocity > 0 → голубой, иначе синий
//! - trigger Jump → короткий stretch спрайта

use bevy::prelude::*;
use sensei_simulation::{params, AnimatorParameters, BodyExtents};

/// Длительность stretch после Jump trigger (sec)
const JUMP_STRETCH_TIME: f32 = 0.15;

/// Таймер stretch эффекта прыжка
#[derive(Component, Debug, Default)]
pub struct JumpStretch {
    pub remaining: f32,
}

fn state_color(animator: &AnimatorParameters) -> Color {
    let grounded = animator.get_bool(params::IS_GROUNDED).unwrap_or(false);
    let running = animator.get_bool(params::IS_RUNNING).unwrap_or(false);
    let y_velocity = animator.get_float(params::Y_VELOCITY).unwrap_or(0.0);

    match (grounded, running) {
        (true, true) => Color::srgb(1.0, 0.6, 0.2),
        (true, false) => Color::srgb(0.95, 0.95, 0.95),
        (false, _) if y_velocity > 0.0 => Color::srgb(0.5, 0.8, 1.0),
        (false, _) => Color::srgb(0.2, 0.3, 0.9),
    }
}

fn animate_sprites(
    time: Res<Time>,
    mut query: Query<(&mut AnimatorParameters, &mut Sprite, &mut JumpStretch, &BodyExtents)>,
) {
    let delta = time.delta_secs();

    for (mut animator, mut sprite, mut stretch, extents) in query.iter_mut() {
        let jumped = animator
            .take_triggers()
            .iter()
            .any(|trigger| trigger == params::JUMP_TRIGGER);
        if jumped {
            stretch.remaining = JUMP_STRETCH_TIME;
        }
        stretch.remaining = (stretch.remaining - delta).max(0.0);

        let size = extents.half_size * 2.0;
        sprite.custom_size = Some(if stretch.remaining > 0.0 {
            Vec2::new(size.x * 0.8, size.y * 1.25)
        } else {
            size
        });
        sprite.color = state_color(&animator);
    }
}

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, animate_sprites);
    }
}
