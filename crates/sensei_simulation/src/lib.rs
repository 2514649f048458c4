//! Sensei Simulation Core
//!
//! Контроллер персонажа 2D платформера + Bevy ECS host.
//!
//! HYBRID ARCHITECTURE:
//! - `CharacterLocomotion` = gameplay правила (input → velocity/animator/facing)
//! - host = физика, анимация, рендер (headless physics или Rapier + клиент)

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod bot;
pub mod locomotion;
pub mod logger;
pub mod physics;

// Re-export базовых типов для удобства
pub use bot::{BotPlugin, RandomInputBot};
pub use locomotion::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
    LOGGER_LEVEL,
};
pub use physics::{Gravity2d, HeadlessPhysicsPlugin, RapierLocomotionPlugin};

/// Fixed timestep physics (50Hz, 20ms)
pub const FIXED_STEP: Duration = Duration::from_millis(20);

/// Главный plugin headless симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 50Hz для physics step
            .insert_resource(Time::<Fixed>::from_duration(FIXED_STEP))
            .add_plugins((LocomotionPlugin, HeadlessPhysicsPlugin, BotPlugin));

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт ровно на `FIXED_STEP` за `App::update`: один кадр = один physics step
/// (первый update только инициализирует часы).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(FIXED_STEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FIXED_STEP));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
