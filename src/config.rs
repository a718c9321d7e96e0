//! Runtime configuration
//!
//! Loaded from TOML. Every field has a default, so a file only needs the
//! values it changes.

use crate::constants::{core, explosion};
use crate::world::core::BlockRegistry;
use crate::world::data_types::{WorldBorder, WorldData};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Explosion ray and drop tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    /// Samples per edge of the direction cube
    pub shell_resolution: u32,
    pub step_length: f64,
    pub step_decay: f32,
    pub jitter_min: f32,
    pub jitter_range: f32,
    pub drop_stack_cap: u32,
    /// One in N destroyed cells catches fire
    pub fire_chance: u32,
}

impl ExplosionTuning {
    /// Check the limits every explosion relies on to terminate
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };

        if self.shell_resolution < 2 {
            return invalid("explosion.shell_resolution", "needs at least 2 samples per edge".to_string());
        }
        if !(self.step_length > 0.0 && self.step_length.is_finite()) {
            return invalid("explosion.step_length", format!("{} is not a positive length", self.step_length));
        }
        if !(self.step_decay > 0.0 && self.step_decay.is_finite()) {
            return invalid("explosion.step_decay", "rays would never stop".to_string());
        }
        if !(self.jitter_min >= 0.0 && self.jitter_range >= 0.0) || !(self.jitter_min + self.jitter_range).is_finite() {
            return invalid("explosion.jitter", "jitter must be finite and non-negative".to_string());
        }
        if self.drop_stack_cap == 0 {
            return invalid("explosion.drop_stack_cap", "cannot be 0".to_string());
        }
        if self.fire_chance == 0 {
            return invalid("explosion.fire_chance", "cannot be 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            shell_resolution: explosion::SHELL_RESOLUTION,
            step_length: explosion::STEP_LENGTH,
            step_decay: explosion::STEP_DECAY,
            jitter_min: explosion::JITTER_MIN,
            jitter_range: explosion::JITTER_RANGE,
            drop_stack_cap: explosion::DROP_STACK_CAP,
            fire_chance: explosion::FIRE_CHANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    pub chunk_size: u32,
    pub min_build_height: i32,
    pub max_build_height: i32,
    pub world_border: Option<WorldBorder>,
    pub explosion: ExplosionTuning,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            chunk_size: core::CHUNK_SIZE,
            min_build_height: core::MIN_BUILD_HEIGHT,
            max_build_height: core::MAX_BUILD_HEIGHT,
            world_border: None,
            explosion: ExplosionTuning::default(),
        }
    }
}

impl SpatialConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };

        if self.chunk_size == 0 || self.chunk_size > 256 {
            return invalid("chunk_size", format!("{} is outside 1..=256", self.chunk_size));
        }
        if self.min_build_height >= self.max_build_height {
            return invalid(
                "build height",
                format!("{} must be below {}", self.min_build_height, self.max_build_height),
            );
        }
        if let Some(border) = &self.world_border {
            if !(border.min_x < border.max_x && border.min_z < border.max_z) {
                return invalid("world_border", "border has no area".to_string());
            }
        }

        self.explosion.validate()?;

        log::info!("[SpatialConfig] Configuration validated successfully");
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("SpatialConfig: failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("SpatialConfig: invalid configuration in {}", path.display()))?;
        log::info!("[SpatialConfig::load] Loaded {}", path.display());
        Ok(config)
    }

    /// Empty world laid out according to this configuration
    pub fn build_world(&self, registry: BlockRegistry) -> WorldData {
        let mut world = WorldData::with_registry(self.chunk_size, registry);
        world.min_y = self.min_build_height;
        world.max_y = self.max_build_height;
        world.border = self.world_border;
        world
    }
}
