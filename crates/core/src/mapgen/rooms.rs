//! Room extraction and wall-insulated placement points.

use rand_chacha::ChaCha8Rng;

use crate::types::Pos;

use super::grid::Grid;
use super::regions::{Region, find_regions};
use super::seed::choose;

/// A floor region large enough to host spawns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    region: Region,
}

impl Room {
    pub fn cells(&self) -> &[Pos] {
        self.region.cells()
    }

    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.region.contains(pos)
    }
}

/// Regions with strictly more than `min_size` cells, in scan order.
pub fn locate_rooms(grid: &Grid, min_size: usize) -> Vec<Room> {
    find_regions(grid)
        .into_iter()
        .filter(|region| region.len() > min_size)
        .map(|region| Room { region })
        .collect()
}

/// Random room cell whose four neighbors are floor, else the room's first cell.
pub fn find_placement(grid: &Grid, room: &Room, rng: &mut ChaCha8Rng) -> Option<Pos> {
    let insulated: Vec<Pos> =
        room.cells().iter().copied().filter(|&pos| grid.is_insulated(pos)).collect();
    if let Some(&pos) = choose(rng, &insulated) {
        return Some(pos);
    }
    room.region.first()
}
