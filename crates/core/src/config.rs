//! Tunable generation and run parameters, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 100;
pub const DEFAULT_TILE_SIZE: u32 = 32;
pub const DEFAULT_WALL_THRESHOLD: f64 = 0.45;
pub const DEFAULT_NOISE_SCALE: f64 = 10.0;
pub const DEFAULT_SMOOTHING_ITERATIONS: u32 = 5;
pub const DEFAULT_MIN_ROOM_SIZE: usize = 20;
/// Pixel coordinates are `i32`, so the map's longest side in pixels must fit.
pub const MAX_PIXEL_EXTENT: u64 = i32::MAX as u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DungeonConfig {
    pub width: usize,
    pub height: usize,
    pub tile_size: u32,
    /// Noise values above this become walls before smoothing.
    pub wall_threshold: f64,
    /// Divisor applied to tile coordinates before sampling noise.
    pub noise_scale: f64,
    pub smoothing_iterations: u32,
    /// Regions must be strictly larger than this to count as rooms.
    pub min_room_size: usize,
    /// `None` retries until a playable dungeon appears.
    pub max_attempts: Option<u32>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            noise_scale: DEFAULT_NOISE_SCALE,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            max_attempts: None,
        }
    }
}

impl DungeonConfig {
    pub fn with_size(width: usize, height: usize, tile_size: u32) -> Self {
        Self { width, height, tile_size, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::DimensionsTooSmall { width: self.width, height: self.height });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        let longest_side = u64::try_from(self.width.max(self.height)).unwrap_or(u64::MAX);
        if longest_side.saturating_mul(u64::from(self.tile_size)) > MAX_PIXEL_EXTENT {
            return Err(ConfigError::PixelExtentTooLarge {
                width: self.width,
                height: self.height,
                tile_size: self.tile_size,
            });
        }
        if !(self.wall_threshold > -1.0 && self.wall_threshold < 1.0) {
            return Err(ConfigError::WallThresholdOutOfRange(self.wall_threshold));
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(ConfigError::InvalidNoiseScale(self.noise_scale));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub max_levels: u32,
    pub base_enemy_count: u32,
    pub item_count: u32,
    pub difficulty_step: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { max_levels: 5, base_enemy_count: 10, item_count: 5, difficulty_step: 0.2 }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if !self.difficulty_step.is_finite() || self.difficulty_step < 0.0 {
            return Err(ConfigError::InvalidDifficultyStep(self.difficulty_step));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub dungeon: DungeonConfig,
    pub run: RunConfig,
}

impl GameConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dungeon.validate()?;
        self.run.validate()
    }
}
