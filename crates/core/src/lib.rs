pub mod config;
pub mod error;
pub mod logging;
pub mod mapgen;
pub mod types;
pub mod world;

pub use config::{DungeonConfig, GameConfig, RunConfig};
pub use error::{ConfigError, GenerationError};
pub use mapgen::{DungeonGenerator, GeneratedDungeon, Grid, generate_dungeon};
pub use types::*;
pub use world::{Run, RunEvent};
