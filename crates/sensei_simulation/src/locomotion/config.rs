//! Author-time настройки локомоции: LocomotionConfig, LayerMask
//!
//! Конфиг задаётся один раз при спавне (RON файл или код) и дальше не меняется.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Bitmask слоёв физики (32 слоя)
///
/// Ground query фильтрует коллайдеры по пересечению масок.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Маска из одного слоя (0..32). Слои вне диапазона дают пустую маску.
    pub fn layer(index: u32) -> Self {
        Self(1u32.checked_shl(index).unwrap_or(0))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn with(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, index: u32) -> bool {
        self.intersects(Self::layer(index))
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::layer(GROUND_LAYER)
    }
}

/// Слой земли по умолчанию
pub const GROUND_LAYER: u32 = 3;

/// Параметры движения персонажа
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Горизонтальная скорость при полном отклонении стика (units/s)
    pub walk_speed: f32,
    /// Величина вертикального импульса прыжка
    pub jump_force: f32,
    /// Радиус круга ground sensor
    pub ground_check_radius: f32,
    /// Какие слои считаются землёй
    pub ground_layer_mask: LayerMask,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 8.0,
            jump_force: 12.0,
            ground_check_radius: 0.2,
            ground_layer_mask: LayerMask::default(),
        }
    }
}

impl LocomotionConfig {
    /// Проверка значений: всё конечное и неотрицательное
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("walk_speed", self.walk_speed)?;
        check_non_negative("jump_force", self.jump_force)?;
        check_non_negative("ground_check_radius", self.ground_check_radius)?;
        Ok(())
    }

    /// Парсинг + валидация из RON строки
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: LocomotionConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузка из RON файла
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite, got {}", value),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0, got {}", value),
        });
    }
    Ok(())
}

/// Ошибки загрузки конфига
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Ron(ron::Error),
    Parse(ron::error::SpannedError),
    Invalid { field: &'static str, reason: String },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(err: ron::Error) -> Self {
        Self::Ron(err)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Ron(e) => write!(f, "RON serialization error: {}", e),
            Self::Parse(e) => write!(f, "RON parse error: {}", e),
            Self::Invalid { field, reason } => write!(f, "invalid `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Ron(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}
