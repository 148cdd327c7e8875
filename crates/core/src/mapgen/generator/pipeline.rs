//! One pass through the generation stages: noise, smoothing, border, connection, rooms.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::DungeonConfig;

use super::super::automaton::smooth;
use super::super::grid::enforce_border;
use super::super::model::GeneratedDungeon;
use super::super::noise_field::noise_field;
use super::super::regions::connect_regions;
use super::super::rooms::{find_placement, locate_rooms};
use super::super::seed::noise_seed;

/// `None` when the connected grid contains no room.
pub(super) fn build_dungeon(
    config: &DungeonConfig,
    rng: &mut ChaCha8Rng,
    attempt: u32,
) -> Option<GeneratedDungeon> {
    let seed = noise_seed(rng);
    let raw =
        noise_field(config.width, config.height, seed, config.wall_threshold, config.noise_scale);
    let mut grid = smooth(raw, config.smoothing_iterations);
    enforce_border(&mut grid);

    let report = connect_regions(&mut grid, rng);
    let rooms = locate_rooms(&grid, config.min_room_size);
    debug!(
        attempt,
        noise_seed = seed,
        regions = report.initial_regions,
        tunnels = report.tunnels,
        rooms = rooms.len(),
        "generation attempt finished"
    );

    let start_tile = find_placement(&grid, rooms.first()?, rng)?;
    let exit_tile = find_placement(&grid, rooms.last()?, rng)?;

    Some(GeneratedDungeon {
        grid,
        rooms,
        start_tile,
        exit_tile,
        tile_size: config.tile_size,
        attempts: attempt,
    })
}
