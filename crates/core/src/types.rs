use std::f32::consts::{FRAC_PI_2, PI};

use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn squared_distance(self, other: Pos) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// Top-left pixel corner of this tile. Saturates instead of wrapping.
    pub fn to_pixel(self, tile_size: u32) -> (i32, i32) {
        let tile_size = i32::try_from(tile_size).unwrap_or(i32::MAX);
        (self.x.saturating_mul(tile_size), self.y.saturating_mul(tile_size))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    /// Rendering code: 0 is reserved for unused cells, 1 is wall, 2 is floor.
    pub fn code(self) -> u8 {
        match self {
            Tile::Wall => 1,
            Tile::Floor => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    Slime,
    Ghost,
    Spider,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Slime, EnemyKind::Ghost, EnemyKind::Spider];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Health,
    Speed,
    Damage,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Health, ItemKind::Speed, ItemKind::Damage];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    pub fn unit(self) -> (f32, f32) {
        match self {
            Direction::Right => (1.0, 0.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Up => (0.0, -1.0),
        }
    }

    /// Facing angle in radians, screen coordinates (y grows downward).
    pub fn angle(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Down => FRAC_PI_2,
            Direction::Left => PI,
            Direction::Up => -FRAC_PI_2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_codes_match_render_contract() {
        assert_eq!(Tile::Wall.code(), 1);
        assert_eq!(Tile::Floor.code(), 2);
    }

    #[test]
    fn pixel_position_is_tile_times_size() {
        assert_eq!(Pos { y: 3, x: 7 }.to_pixel(32), (224, 96));
    }

    #[test]
    fn oversized_tiles_saturate_instead_of_wrapping() {
        assert_eq!(Pos { y: 2, x: 1 }.to_pixel(u32::MAX), (i32::MAX, i32::MAX));
        assert_eq!(Pos { y: 0, x: 3 }.to_pixel(1 << 30), (i32::MAX, 0));
    }

    #[test]
    fn squared_distance_is_symmetric() {
        let a = Pos { y: 1, x: 2 };
        let b = Pos { y: 4, x: 6 };
        assert_eq!(a.squared_distance(b), 25);
        assert_eq!(b.squared_distance(a), 25);
    }
}
