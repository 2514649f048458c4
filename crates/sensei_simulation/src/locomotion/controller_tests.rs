//! Tests for CharacterLocomotion (mock collaborators, без ECS).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::locomotion::collaborators::{AnimationSink, GroundQuery, RigidBody2d, SpriteOrientation};
    use crate::locomotion::config::{LayerMask, LocomotionConfig};
    use crate::locomotion::controller::{CharacterLocomotion, Locomotion};
    use crate::locomotion::state::{params, Facing, LocomotionState};

    const DT: f32 = 1.0 / 50.0;

    struct MockBody {
        velocity: Vec2,
        mass: f32,
    }

    impl MockBody {
        fn at_rest() -> Self {
            Self { velocity: Vec2::ZERO, mass: 1.0 }
        }
    }

    impl RigidBody2d for MockBody {
        fn linear_velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_linear_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }

        fn apply_impulse(&mut self, impulse: Vec2) {
            self.velocity += impulse / self.mass;
        }
    }

    #[derive(Default)]
    struct RecordingAnimator {
        bools: Vec<(String, bool)>,
        floats: Vec<(String, f32)>,
        triggers: Vec<String>,
    }

    impl RecordingAnimator {
        fn last_bool(&self, name: &str) -> Option<bool> {
            self.bools.iter().rev().find(|(n, _)| n == name).map(|(_, v)| *v)
        }

        fn last_float(&self, name: &str) -> Option<f32> {
            self.floats.iter().rev().find(|(n, _)| n == name).map(|(_, v)| *v)
        }
    }

    impl AnimationSink for RecordingAnimator {
        fn set_bool(&mut self, name: &str, value: bool) {
            self.bools.push((name.to_string(), value));
        }

        fn set_float(&mut self, name: &str, value: f32) {
            self.floats.push((name.to_string(), value));
        }

        fn set_trigger(&mut self, name: &str) {
            self.triggers.push(name.to_string());
        }
    }

    /// Земля — горизонтальная полоса y <= top на слое `layers`
    struct FlatGround {
        top: f32,
        layers: LayerMask,
    }

    impl GroundQuery for FlatGround {
        fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
            mask.intersects(self.layers) && center.y - radius <= self.top
        }
    }

    struct Scale(f32);

    impl SpriteOrientation for Scale {
        fn horizontal_scale(&self) -> f32 {
            self.0
        }

        fn set_horizontal_scale(&mut self, scale: f32) {
            self.0 = scale;
        }
    }

    fn ground() -> FlatGround {
        FlatGround { top: 0.0, layers: LayerMask::default() }
    }

    const ON_GROUND: Option<Vec2> = Some(Vec2::new(0.0, 0.1));
    const IN_AIR: Option<Vec2> = Some(Vec2::new(0.0, 5.0));

    fn grounded_controller(config: LocomotionConfig) -> CharacterLocomotion {
        CharacterLocomotion::with_state(
            config,
            LocomotionState { move_input: Vec2::ZERO, is_grounded: true },
        )
    }

    #[test]
    fn test_grounded_jump_sets_vertical_velocity_to_jump_force() {
        let mut controller = grounded_controller(LocomotionConfig::default());
        let mut body = MockBody::at_rest();
        let mut animator = RecordingAnimator::default();

        assert!(controller.on_jump_input(&mut body, &mut animator));

        assert_eq!(body.velocity.y, 12.0);
        assert_eq!(animator.triggers, vec![params::JUMP_TRIGGER.to_string()]);
    }

    #[test]
    fn test_jump_zeroes_falling_velocity_before_impulse() {
        let mut controller = grounded_controller(LocomotionConfig::default());
        let mut body = MockBody { velocity: Vec2::new(3.0, -7.5), mass: 1.0 };
        let mut animator = RecordingAnimator::default();

        controller.on_jump_input(&mut body, &mut animator);

        // Падение не съедает прыжок, горизонталь не трогаем
        assert_eq!(body.velocity, Vec2::new(3.0, 12.0));
    }

    #[test]
    fn test_airborne_jump_is_silent_noop() {
        let mut controller = CharacterLocomotion::new(LocomotionConfig::default());
        let mut body = MockBody { velocity: Vec2::new(1.0, -2.0), mass: 1.0 };
        let mut animator = RecordingAnimator::default();

        assert!(!controller.on_jump_input(&mut body, &mut animator));

        assert_eq!(body.velocity, Vec2::new(1.0, -2.0));
        assert!(animator.triggers.is_empty());
        assert!(animator.bools.is_empty());
    }

    #[test]
    fn test_jump_uses_flag_from_latest_step() {
        let mut controller = grounded_controller(LocomotionConfig::default());
        let mut body = MockBody::at_rest();
        let mut animator = RecordingAnimator::default();

        // Шаг в воздухе сбрасывает флаг — прыжок после него игнорируется
        controller.on_physics_step(DT, IN_AIR, &ground(), &mut body, &mut animator);
        assert!(!controller.is_grounded());
        assert!(!controller.on_jump_input(&mut body, &mut animator));

        controller.on_physics_step(DT, ON_GROUND, &ground(), &mut body, &mut animator);
        assert!(controller.on_jump_input(&mut body, &mut animator));
    }

    #[test]
    fn test_physics_step_sets_horizontal_and_keeps_vertical() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = LocomotionConfig::default();
        let mut controller = CharacterLocomotion::new(config);
        let mut animator = RecordingAnimator::default();

        for _ in 0..500 {
            let input = Vec2::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.0..1.0));
            let vy = rng.gen_range(-30.0..30.0);
            let mut body = MockBody { velocity: Vec2::new(rng.gen_range(-20.0..20.0), vy), mass: 1.0 };
            let sensor = if rng.gen_bool(0.5) { ON_GROUND } else { IN_AIR };

            controller.on_move_input(input);
            controller.on_physics_step(DT, sensor, &ground(), &mut body, &mut animator);

            assert_eq!(body.velocity.x, input.x * config.walk_speed);
            assert_eq!(body.velocity.y, vy);
            assert_eq!(animator.last_float(params::Y_VELOCITY), Some(vy));
            assert_eq!(animator.last_bool(params::IS_RUNNING), Some(input.x.abs() > 0.01));
            assert_eq!(animator.last_bool(params::IS_GROUNDED), Some(sensor == ON_GROUND));
        }
    }

    #[test]
    fn test_is_running_boundary() {
        let mut controller = CharacterLocomotion::new(LocomotionConfig::default());
        let mut body = MockBody::at_rest();
        let mut animator = RecordingAnimator::default();

        controller.on_move_input(Vec2::new(0.01, 0.0));
        controller.on_physics_step(DT, ON_GROUND, &ground(), &mut body, &mut animator);
        assert_eq!(animator.last_bool(params::IS_RUNNING), Some(false));

        controller.on_move_input(Vec2::new(-0.02, 0.0));
        controller.on_physics_step(DT, ON_GROUND, &ground(), &mut body, &mut animator);
        assert_eq!(animator.last_bool(params::IS_RUNNING), Some(true));
    }

    #[test]
    fn test_ground_query_respects_layer_mask() {
        let config = LocomotionConfig {
            ground_layer_mask: LayerMask::layer(7),
            ..default()
        };
        let mut controller = CharacterLocomotion::new(config);
        let mut body = MockBody::at_rest();
        let mut animator = RecordingAnimator::default();

        // Земля на слое 3, а персонаж ищет слой 7
        controller.on_physics_step(DT, ON_GROUND, &ground(), &mut body, &mut animator);
        assert!(!controller.is_grounded());
    }

    #[test]
    fn test_lost_sensor_means_airborne() {
        let mut controller = grounded_controller(LocomotionConfig::default());
        let mut body = MockBody::at_rest();
        let mut animator = RecordingAnimator::default();

        controller.on_physics_step(DT, None, &ground(), &mut body, &mut animator);

        assert!(!controller.is_grounded());
        assert!(!controller.on_jump_input(&mut body, &mut animator));
    }

    #[test]
    fn test_walk_ten_steps_holds_walk_speed_and_faces_right() {
        let mut controller = grounded_controller(LocomotionConfig::default());
        let mut body = MockBody::at_rest();
        let mut animator = RecordingAnimator::default();
        let mut scale = Scale(1.0);

        controller.on_move_input(Vec2::new(1.0, 0.0));
        for _ in 0..10 {
            controller.on_physics_step(DT, ON_GROUND, &ground(), &mut body, &mut animator);
            assert_eq!(body.velocity.x, 8.0);
            assert_eq!(controller.on_frame_update(&mut scale), None);
        }
        assert_eq!(Facing::from_scale(scale.0), Some(Facing::Right));
    }

    #[test]
    fn test_facing_flips_once_per_sign_change() {
        let mut controller = CharacterLocomotion::new(LocomotionConfig::default());
        let mut scale = Scale(1.5);

        controller.on_move_input(Vec2::new(-1.0, 0.0));
        assert_eq!(controller.on_frame_update(&mut scale), Some(Facing::Left));
        assert_eq!(scale.0, -1.5);
        // Тот же input на следующем кадре — без flip
        assert_eq!(controller.on_frame_update(&mut scale), None);
        assert_eq!(scale.0, -1.5);

        controller.on_move_input(Vec2::new(0.3, 0.0));
        assert_eq!(controller.on_frame_update(&mut scale), Some(Facing::Right));
        assert_eq!(scale.0, 1.5);
    }

    #[test]
    fn test_zero_input_holds_facing() {
        let mut controller = CharacterLocomotion::new(LocomotionConfig::default());
        let mut scale = Scale(-1.0);

        controller.on_move_input(Vec2::ZERO);
        for _ in 0..5 {
            assert_eq!(controller.on_frame_update(&mut scale), None);
        }
        assert_eq!(scale.0, -1.0);
    }

    #[test]
    fn test_facing_never_flips_on_zero_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut controller = CharacterLocomotion::new(LocomotionConfig::default());
        let mut scale = Scale(1.0);
        let mut previous_sign = 1.0f32;

        for _ in 0..300 {
            // Треть кадров — ровно ноль
            let x = match rng.gen_range(0..3) {
                0 => 0.0,
                1 => rng.gen_range(0.001..1.0),
                _ => -rng.gen_range(0.001..1.0),
            };
            controller.on_move_input(Vec2::new(x, 0.0));
            let flipped = controller.on_frame_update(&mut scale);

            let expected_flip = x != 0.0 && x.signum() != previous_sign;
            assert_eq!(flipped.is_some(), expected_flip, "x = {}", x);
            previous_sign = scale.0.signum();
        }
    }

    #[test]
    fn test_sensor_geometry_uses_configured_radius() {
        let controller = CharacterLocomotion::new(LocomotionConfig {
            ground_check_radius: 0.35,
            ..default()
        });
        let circle = controller.ground_sensor_geometry(Vec2::new(2.0, -1.0));
        assert_eq!(circle.center, Vec2::new(2.0, -1.0));
        assert_eq!(circle.radius, 0.35);
    }
}
