//! Error types surfaced by configuration loading and dungeon generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("dungeon must be at least 3x3 tiles, got {width}x{height}")]
    DimensionsTooSmall { width: usize, height: usize },
    #[error("tile size must be positive")]
    ZeroTileSize,
    #[error("{width}x{height} tiles of {tile_size}px overflow pixel coordinates")]
    PixelExtentTooLarge { width: usize, height: usize, tile_size: u32 },
    #[error("wall threshold {0} must lie strictly between -1 and 1")]
    WallThresholdOutOfRange(f64),
    #[error("noise scale {0} must be a positive finite number")]
    InvalidNoiseScale(f64),
    #[error("max_levels must be at least 1")]
    NoLevels,
    #[error("difficulty step {0} must be finite and non-negative")]
    InvalidDifficultyStep(f32),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid dungeon configuration")]
    InvalidConfig(#[from] ConfigError),
    #[error("no dungeon with at least one room after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}
