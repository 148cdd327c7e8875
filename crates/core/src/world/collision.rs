//! Pixel-space rectangles and their collision against wall tiles.

use crate::mapgen::Grid;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_tile(pos: Pos, tile_size: u32) -> Self {
        let (x, y) = pos.to_pixel(tile_size);
        let size = tile_size as f32;
        Self::new(x as f32, y as f32, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Edge contact does not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

pub fn tile_at_pixel(x: f32, y: f32, tile_size: u32) -> Pos {
    let size = tile_size as f32;
    Pos { y: (y / size).floor() as i32, x: (x / size).floor() as i32 }
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// True when `rect` overlaps any wall tile it spans. The tile span is clamped
/// to the grid, so only the bordering walls stop an entity leaving the map.
pub fn overlaps_wall(grid: &Grid, rect: &Rect, tile_size: u32) -> bool {
    if grid.width() == 0 || grid.height() == 0 {
        return false;
    }
    let top_left = tile_at_pixel(rect.x, rect.y, tile_size);
    let bottom_right = tile_at_pixel(rect.right(), rect.bottom(), tile_size);
    let max_x = grid.width() as i32 - 1;
    let max_y = grid.height() as i32 - 1;

    for y in top_left.y.max(0)..=bottom_right.y.min(max_y) {
        for x in top_left.x.max(0)..=bottom_right.x.min(max_x) {
            let pos = Pos { y, x };
            if grid.is_wall(x, y) && rect.overlaps(&Rect::from_tile(pos, tile_size)) {
                return true;
            }
        }
    }
    false
}

/// Moves `rect` by `(dx, dy)` unless the destination overlaps a wall, in
/// which case the original rect comes back. Returns whether the move was blocked.
pub fn try_move(
    grid: &Grid,
    rect: &mut Rect,
    dx: f32,
    dy: f32,
    tile_size: u32,
    ignores_walls: bool,
) -> bool {
    let moved = rect.translated(dx, dy);
    if !ignores_walls && overlaps_wall(grid, &moved, tile_size) {
        return true;
    }
    *rect = moved;
    false
}
