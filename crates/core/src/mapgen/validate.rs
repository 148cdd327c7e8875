//! Structural checks over a finished dungeon and its spawns, used by the
//! command-line sweeps.

use thiserror::Error;

use crate::types::Pos;

use super::grid::Grid;
use super::model::{EnemySpec, GeneratedDungeon, ItemSpec};
use super::regions::find_regions;
use super::spawns::MIN_PLAYER_DISTANCE_SQUARED;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("border cell {0:?} is floor")]
    OpenBorder(Pos),
    #[error("floor is split into {0} regions")]
    Disconnected(usize),
    #[error("no room larger than the minimum size")]
    NoRooms,
    #[error("room {index} has {size} cells, needs more than {min_size}")]
    RoomTooSmall { index: usize, size: usize, min_size: usize },
    #[error("{role} tile {pos:?} is not floor")]
    PlacementOnWall { role: &'static str, pos: Pos },
    #[error("{role} tile {pos:?} lies outside every room")]
    OutsideRooms { role: &'static str, pos: Pos },
    #[error("enemy at {0:?} is within five tiles of the player")]
    EnemyTooClose(Pos),
}

/// Every structural problem with `dungeon`; empty when it is playable.
pub fn dungeon_violations(dungeon: &GeneratedDungeon, min_room_size: usize) -> Vec<Violation> {
    let grid = &dungeon.grid;
    let mut violations: Vec<Violation> =
        open_border_cells(grid).map(Violation::OpenBorder).collect();

    let regions = find_regions(grid).len();
    if regions > 1 {
        violations.push(Violation::Disconnected(regions));
    }
    if dungeon.rooms.is_empty() {
        violations.push(Violation::NoRooms);
    }
    for (index, room) in dungeon.rooms.iter().enumerate() {
        if room.len() <= min_room_size {
            let size = room.len();
            violations.push(Violation::RoomTooSmall { index, size, min_size: min_room_size });
        }
    }

    for (role, pos) in [("start", dungeon.start_tile), ("exit", dungeon.exit_tile)] {
        check_placement(dungeon, role, pos, &mut violations);
    }
    violations
}

pub fn spawn_violations(
    dungeon: &GeneratedDungeon,
    player_tile: Pos,
    enemies: &[EnemySpec],
    items: &[ItemSpec],
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for enemy in enemies {
        check_placement(dungeon, "enemy", enemy.pos, &mut violations);
        if enemy.pos.squared_distance(player_tile) <= MIN_PLAYER_DISTANCE_SQUARED {
            violations.push(Violation::EnemyTooClose(enemy.pos));
        }
    }
    for item in items {
        check_placement(dungeon, "item", item.pos, &mut violations);
    }
    violations
}

fn check_placement(
    dungeon: &GeneratedDungeon,
    role: &'static str,
    pos: Pos,
    violations: &mut Vec<Violation>,
) {
    if !dungeon.grid.is_floor(pos) {
        violations.push(Violation::PlacementOnWall { role, pos });
    }
    if !dungeon.rooms.iter().any(|room| room.contains(pos)) {
        violations.push(Violation::OutsideRooms { role, pos });
    }
}

fn open_border_cells(grid: &Grid) -> impl Iterator<Item = Pos> + '_ {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    grid.positions()
        .filter(move |pos| pos.y == 0 || pos.x == 0 || pos.y == height - 1 || pos.x == width - 1)
        .filter(|&pos| grid.is_floor(pos))
}
