use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use sensei_simulation::{init_logger, LocomotionPlugin, RapierLocomotionPlugin, FIXED_STEP};

mod diagnostics;
mod input;
mod level;
mod presentation;

use diagnostics::DiagnosticsPlugin;
use input::KeyboardInputPlugin;
use level::LevelPlugin;
use presentation::PresentationPlugin;

fn main() {
    init_logger();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sensei - 2D Platformer".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_duration(FIXED_STEP))
        // Physics host (Rapier шагает в fixed schedule, после нашего physics step)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        // Locomotion (input/facing) + physics step поверх Rapier
        .add_plugins((LocomotionPlugin, RapierLocomotionPlugin))
        // Keyboard → Move/Jump events
        .add_plugins(KeyboardInputPlugin)
        // Animator params → sprite
        .add_plugins(PresentationPlugin)
        // Ground sensor gizmos (F1)
        .add_plugins(DiagnosticsPlugin)
        // Scene
        .add_plugins(LevelPlugin)
        .run();
}
