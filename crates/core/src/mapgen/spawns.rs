//! Enemy and item spawn selection across located rooms.

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::types::{EnemyKind, ItemKind, Pos};

use super::model::{EnemySpec, ItemSpec};
use super::rooms::Room;
use super::seed::choose;

pub const ENEMY_PLACEMENT_ATTEMPTS: usize = 50;
/// Enemies must land strictly farther than 5 tiles from the player.
pub const MIN_PLAYER_DISTANCE_SQUARED: i64 = 25;

/// Up to `count` enemies, each in a random room and away from `player_tile`.
/// Slots that exhaust their attempts are dropped.
pub fn spawn_enemies(
    rng: &mut ChaCha8Rng,
    rooms: &[Room],
    count: usize,
    player_tile: Pos,
    tile_size: u32,
) -> Vec<EnemySpec> {
    let mut spawns = Vec::with_capacity(count);
    for slot in 0..count {
        let Some(room) = choose(rng, rooms) else {
            break;
        };
        let placed = (0..ENEMY_PLACEMENT_ATTEMPTS)
            .filter_map(|_| choose(rng, room.cells()).copied())
            .find(|pos| pos.squared_distance(player_tile) > MIN_PLAYER_DISTANCE_SQUARED);
        let Some(pos) = placed else {
            trace!(slot, "enemy slot skipped, no cell far enough from player");
            continue;
        };
        let kind = choose(rng, &EnemyKind::ALL).copied().unwrap_or(EnemyKind::Slime);
        spawns.push(EnemySpec { kind, pos, size: tile_size });
    }
    spawns
}

/// Exactly `count` items when any room exists; no distance constraint.
pub fn spawn_items(
    rng: &mut ChaCha8Rng,
    rooms: &[Room],
    count: usize,
    tile_size: u32,
) -> Vec<ItemSpec> {
    let mut spawns = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(pos) = choose(rng, rooms).and_then(|room| choose(rng, room.cells())).copied()
        else {
            break;
        };
        let kind = choose(rng, &ItemKind::ALL).copied().unwrap_or(ItemKind::Health);
        spawns.push(ItemSpec { kind, pos, size: tile_size / 2 });
    }
    spawns
}
