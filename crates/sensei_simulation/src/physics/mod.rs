//! Physics host module
//!
//! Два host'а для одного и того же physics step контроллера:
//! - headless: свои AABB коллайдеры, gravity и интеграция (тесты, runner)
//! - rapier: `bevy_rapier2d` (клиент)

pub mod headless;
pub mod rapier;

// Re-export основных типов
pub use headless::{Gravity2d, HeadlessPhysicsPlugin};
pub use rapier::{collider_groups, layer_group, RapierLocomotionPlugin};
