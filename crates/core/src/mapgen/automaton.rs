//! Cellular-automaton smoothing that turns raw noise into cave shapes.

use crate::types::{Pos, Tile};

use super::grid::Grid;

const WALL_SURVIVAL_MIN: usize = 4;
const FLOOR_TO_WALL_MIN: usize = 5;

/// Walls in the clipped 3x3 window centered on `pos`, the cell itself included.
pub fn window_wall_count(grid: &Grid, pos: Pos) -> usize {
    let mut count = 0;
    for y in (pos.y - 1).max(0)..=(pos.y + 1).min(grid.height() as i32 - 1) {
        for x in (pos.x - 1).max(0)..=(pos.x + 1).min(grid.width() as i32 - 1) {
            if grid.tile(Pos { y, x }) == Tile::Wall {
                count += 1;
            }
        }
    }
    count
}

pub fn next_tile(current: Tile, window_walls: usize) -> Tile {
    let threshold = match current {
        Tile::Wall => WALL_SURVIVAL_MIN,
        Tile::Floor => FLOOR_TO_WALL_MIN,
    };
    if window_walls >= threshold { Tile::Wall } else { Tile::Floor }
}

/// One simultaneous update; reads only `grid`, writes a fresh grid.
pub fn smooth_once(grid: &Grid) -> Grid {
    let mut next = Grid::filled(grid.width(), grid.height(), Tile::Floor);
    for pos in grid.positions() {
        next.set(pos, next_tile(grid.tile(pos), window_wall_count(grid, pos)));
    }
    next
}

pub fn smooth(mut grid: Grid, iterations: u32) -> Grid {
    for _ in 0..iterations {
        grid = smooth_once(&grid);
    }
    grid
}
