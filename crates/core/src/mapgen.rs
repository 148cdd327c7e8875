//! Procedural cave generation split into pipeline stages.

pub mod automaton;
pub mod grid;
pub mod model;
pub mod noise_field;
pub mod regions;
pub mod rooms;
pub mod spawns;
pub mod validate;

mod generator;
pub(crate) mod seed;

pub use generator::DungeonGenerator;
pub use grid::Grid;
pub use model::{EnemySpec, GeneratedDungeon, ItemSpec};
pub use regions::{Region, TunnelOrientation};
pub use rooms::Room;
pub use seed::rng_from_seed;
pub use validate::Violation;

use crate::config::DungeonConfig;
use crate::error::GenerationError;

/// Generates one dungeon with default tuning at the given size.
pub fn generate_dungeon(
    width: usize,
    height: usize,
    tile_size: u32,
    seed: u64,
) -> Result<GeneratedDungeon, GenerationError> {
    DungeonGenerator::new(DungeonConfig::with_size(width, height, tile_size), seed)?.generate()
}
