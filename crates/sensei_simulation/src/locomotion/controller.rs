//! CharacterLocomotion — engine-agnostic контроллер 2D платформера
//!
//! Порядок вызовов за кадр (host loop):
//! 1. `on_move_input` / `on_jump_input` — input callbacks (до update кадра)
//! 2. `on_physics_step` — 0..N раз, fixed timestep
//! 3. `on_frame_update` — один раз за кадр
//!
//! Все collaborators приходят параметрами: контроллер хранит только config и
//! `LocomotionState`.

use bevy::prelude::*;

use super::collaborators::{AnimationSink, GroundQuery, RigidBody2d, SensorCircle, SpriteOrientation};
use super::config::LocomotionConfig;
use super::state::{params, Facing, LocomotionState};
use crate::logger;

/// Явный интерфейс локомоции для host loop
pub trait Locomotion {
    /// Сохраняет последний Move input. Без валидации.
    fn on_move_input(&mut self, value: Vec2);

    /// Jump (edge-triggered). Возвращает true если прыжок применён.
    fn on_jump_input<B, A>(&mut self, body: &mut B, animator: &mut A) -> bool
    where
        B: RigidBody2d + ?Sized,
        A: AnimationSink + ?Sized;

    /// Fixed-rate шаг: ground query → horizontal velocity → animator params
    fn on_physics_step<G, B, A>(
        &mut self,
        dt: f32,
        sensor: Option<Vec2>,
        ground: &G,
        body: &mut B,
        animator: &mut A,
    ) where
        G: GroundQuery + ?Sized,
        B: RigidBody2d + ?Sized,
        A: AnimationSink + ?Sized;

    /// Render-rate update: flip facing. Возвращает новый facing если был flip.
    fn on_frame_update<O>(&mut self, orientation: &mut O) -> Option<Facing>
    where
        O: SpriteOrientation + ?Sized;
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct CharacterLocomotion {
    config: LocomotionConfig,
    state: LocomotionState,
    /// Warning про потерянный sensor уже был (логируем один раз)
    sensor_lost_reported: bool,
}

impl CharacterLocomotion {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            state: LocomotionState::default(),
            sensor_lost_reported: false,
        }
    }

    /// Продолжить с сохранённого состояния (tests, host hand-off)
    pub fn with_state(config: LocomotionConfig, state: LocomotionState) -> Self {
        Self {
            state,
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    /// Круг ground sensor для diagnostics renderer
    pub fn ground_sensor_geometry(&self, sensor: Vec2) -> SensorCircle {
        SensorCircle {
            center: sensor,
            radius: self.config.ground_check_radius,
        }
    }

    fn refresh_ground_contact<G>(&mut self, sensor: Option<Vec2>, ground: &G)
    where
        G: GroundQuery + ?Sized,
    {
        match sensor {
            Some(center) => {
                self.sensor_lost_reported = false;
                self.state.is_grounded = ground.overlap_circle(
                    center,
                    self.config.ground_check_radius,
                    self.config.ground_layer_mask,
                );
            }
            None => {
                // Без sensor нет контакта: stale true дал бы прыжок из воздуха
                if !self.sensor_lost_reported {
                    logger::log_warning("Ground sensor lost: treating character as airborne");
                    self.sensor_lost_reported = true;
                }
                self.state.is_grounded = false;
            }
        }
    }

    fn publish_animation<A>(&self, y_velocity: f32, animator: &mut A)
    where
        A: AnimationSink + ?Sized,
    {
        let anim = self.state.animation_params(y_velocity);
        animator.set_bool(params::IS_RUNNING, anim.is_running);
        animator.set_float(params::Y_VELOCITY, anim.y_velocity);
        animator.set_bool(params::IS_GROUNDED, anim.is_grounded);
    }
}

impl Locomotion for CharacterLocomotion {
    fn on_move_input(&mut self, value: Vec2) {
        self.state.move_input = value;
    }

    fn on_jump_input<B, A>(&mut self, body: &mut B, animator: &mut A) -> bool
    where
        B: RigidBody2d + ?Sized,
        A: AnimationSink + ?Sized,
    {
        // В воздухе — молча игнорируем (ни очереди, ни coyote time)
        if !self.state.is_grounded {
            return false;
        }

        let velocity = body.linear_velocity();
        body.set_linear_velocity(Vec2::new(velocity.x, 0.0));
        body.apply_impulse(Vec2::Y * self.config.jump_force);
        animator.set_trigger(params::JUMP_TRIGGER);

        logger::log(&format!(
            "Jump: impulse {:.1}, velocity.y = {:.2}",
            self.config.jump_force,
            body.linear_velocity().y
        ));
        true
    }

    fn on_physics_step<G, B, A>(
        &mut self,
        _dt: f32,
        sensor: Option<Vec2>,
        ground: &G,
        body: &mut B,
        animator: &mut A,
    ) where
        G: GroundQuery + ?Sized,
        B: RigidBody2d + ?Sized,
        A: AnimationSink + ?Sized,
    {
        // 1. Ground check
        self.refresh_ground_contact(sensor, ground);

        // 2. Horizontal velocity (Y остаётся за gravity/impulse)
        let velocity = body.linear_velocity();
        body.set_linear_velocity(Vec2::new(
            self.state.horizontal_velocity(self.config.walk_speed),
            velocity.y,
        ));

        // 3. Animator
        self.publish_animation(velocity.y, animator);
    }

    fn on_frame_update<O>(&mut self, orientation: &mut O) -> Option<Facing>
    where
        O: SpriteOrientation + ?Sized,
    {
        let scale = orientation.horizontal_scale();
        let current = Facing::from_scale(scale)?;
        let wanted = Facing::from_input(self.state.move_input_x())?;

        if wanted == current {
            return None;
        }

        orientation.set_horizontal_scale(-scale);
        Some(current.flipped())
    }
}
