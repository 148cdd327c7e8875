//! Public data models for generated dungeons, enemy spawns, and item spawns.

use crate::types::{EnemyKind, ItemKind, Pos};

use super::grid::Grid;
use super::rooms::Room;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpec {
    pub kind: EnemyKind,
    pub pos: Pos,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub pos: Pos,
    pub size: u32,
}

/// Finished dungeon, read-only once handed to gameplay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub start_tile: Pos,
    pub exit_tile: Pos,
    pub tile_size: u32,
    /// Generation attempts consumed, including the successful one.
    pub attempts: u32,
}

impl GeneratedDungeon {
    pub fn start_pixel(&self) -> (i32, i32) {
        self.start_tile.to_pixel(self.tile_size)
    }

    pub fn exit_pixel(&self) -> (i32, i32) {
        self.exit_tile.to_pixel(self.tile_size)
    }

    pub fn tile_codes(&self) -> Vec<Vec<u8>> {
        self.grid.tile_codes()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        bytes.extend(self.tile_size.to_le_bytes());
        bytes.extend(self.grid.cells().iter().map(|tile| tile.code()));
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.len() as u32).to_le_bytes());
        }
        bytes.extend(self.start_tile.y.to_le_bytes());
        bytes.extend(self.start_tile.x.to_le_bytes());
        bytes.extend(self.exit_tile.y.to_le_bytes());
        bytes.extend(self.exit_tile.x.to_le_bytes());
        bytes
    }
}
