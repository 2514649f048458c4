//! Locomotion domain — контроллер 2D платформера
//!
//! Содержит:
//! - CharacterLocomotion (engine-agnostic ядро, trait `Locomotion`)
//! - collaborator traits (RigidBody2d, GroundQuery, AnimationSink, SpriteOrientation)
//! - ECS компоненты и системы (Bevy host)
//! - LocomotionConfig (RON)
//!
//! Physics step сюда НЕ входит: его регистрирует physics host
//! (`HeadlessPhysicsPlugin` или `RapierLocomotionPlugin`).

use bevy::prelude::*;

pub mod collaborators;
pub mod components;
pub mod config;
pub mod controller;
pub mod events;
pub mod spawn;
pub mod state;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod controller_tests;

pub use collaborators::{
    check_collaborators, AnimationSink, Collaborator, GroundQuery, LocomotionError, RigidBody2d, SensorCircle,
    SpriteOrientation,
};
pub use components::{
    AnimatorParameters, BodyExtents, GroundCollider, GroundSensor, LocomotionController, PhysicsBody2d, Player,
};
pub use config::{ConfigError, LayerMask, LocomotionConfig, GROUND_LAYER};
pub use controller::{CharacterLocomotion, Locomotion};
pub use events::{JumpInput, MoveInput};
pub use spawn::{spawn_character, spawn_ground, CharacterBlueprint};
pub use state::{params, AnimationParams, Facing, LocomotionState, RUN_INPUT_THRESHOLD};

/// Порядок систем локомоции
///
/// Update: Input → FrameUpdate. FixedUpdate: PhysicsStep → Integrate.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Input callbacks (Move/Jump events)
    Input,
    /// Facing flip (render rate)
    FrameUpdate,
    /// Ground check + velocity + animator (fixed rate)
    PhysicsStep,
    /// Host physics после шага контроллера (gravity, integration, contacts)
    Integrate,
}

/// Locomotion Plugin
///
/// Регистрирует events, input/frame системы и audit wiring.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveInput>()
            .add_event::<JumpInput>()
            .register_type::<LocomotionController>()
            .register_type::<PhysicsBody2d>()
            .register_type::<GroundSensor>()
            .register_type::<GroundCollider>()
            .register_type::<BodyExtents>();

        app.configure_sets(Update, (LocomotionSet::Input, LocomotionSet::FrameUpdate).chain());
        app.configure_sets(FixedUpdate, (LocomotionSet::PhysicsStep, LocomotionSet::Integrate).chain());

        // Wiring audit до fixed loop (PreUpdate идёт раньше RunFixedMainLoop)
        app.add_systems(PreUpdate, systems::audit_new_controllers);

        app.add_systems(
            Update,
            (
                (systems::handle_move_input, systems::handle_jump_input)
                    .chain()
                    .in_set(LocomotionSet::Input),
                systems::locomotion_frame_update.in_set(LocomotionSet::FrameUpdate),
            ),
        );
    }
}
