//! Headless симуляция Sensei
//!
//! Бот бегает и прыгает по плоскому уровню, runner печатает состояние персонажа.

use bevy::prelude::*;
use sensei_simulation::{
    create_headless_app, init_logger, log_error, log_info, spawn_character, spawn_ground, CharacterBlueprint, LayerMask,
    LocomotionConfig, LocomotionController, PhysicsBody2d, RandomInputBot, SimulationPlugin,
};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);
    init_logger();
    log_info(&format!("Starting Sensei headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let character = {
        let mut commands = app.world_mut().commands();
        spawn_ground(
            &mut commands,
            Vec2::new(0.0, -0.5),
            Vec2::new(200.0, 0.5),
            LayerMask::default(),
        );
        let blueprint = CharacterBlueprint::new(LocomotionConfig::default(), Vec2::new(0.0, 0.5));
        let spawned = spawn_character(&mut commands, blueprint);
        if let Ok(entity) = spawned {
            commands.entity(entity).insert(RandomInputBot::default());
        }
        spawned
    };
    app.world_mut().flush();

    let character = match character {
        Ok(entity) => entity,
        Err(err) => {
            log_error(&format!("Cannot wire character: {}", err));
            std::process::exit(1);
        }
    };

    if let Some(controller) = app.world().get::<LocomotionController>(character) {
        let config = controller.config();
        log_info(&format!(
            "Character config: walk_speed {:.1}, jump_force {:.1}, ground_check_radius {:.2}",
            config.walk_speed, config.jump_force, config.ground_check_radius
        ));
    }

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let (Some(transform), Some(body), Some(controller)) = (
                world.get::<Transform>(character),
                world.get::<PhysicsBody2d>(character),
                world.get::<LocomotionController>(character),
            ) else {
                continue;
            };
            let state = controller.state();
            log_info(&format!(
                "Tick {}: pos ({:.2}, {:.2}) vel ({:.2}, {:.2}) input {:.0} grounded={}",
                tick,
                transform.translation.x,
                transform.translation.y,
                body.velocity.x,
                body.velocity.y,
                state.move_input_x(),
                state.is_grounded
            ));
        }
    }

    log_info("Simulation complete!");
}
