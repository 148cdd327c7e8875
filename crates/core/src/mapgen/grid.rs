//! Tile grid storage plus the coordinate helpers shared by every pipeline stage.

use crate::types::{Pos, Tile};

pub(crate) const CARDINALS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Row-major wall/floor grid. Out-of-bounds reads count as walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self { width, height, cells: vec![tile; width * height] }
    }

    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            debug_assert_eq!(row.len(), width, "rows must share a width");
            let tiles = row.bytes().map(|byte| if byte == b'#' { Tile::Wall } else { Tile::Floor });
            cells.extend(tiles);
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile(Pos { y, x }) == Tile::Wall
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Floor
    }

    pub fn set(&mut self, pos: Pos, tile: Tile) {
        debug_assert!(self.in_bounds(pos), "{pos:?} outside {}x{}", self.width, self.height);
        let index = self.index(pos);
        self.cells[index] = tile;
    }

    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|&&tile| tile == Tile::Floor).count()
    }

    /// Rows of render codes (1 = wall, 2 = floor).
    pub fn tile_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|tile| tile.code()).collect())
            .collect()
    }

    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|tile| match tile {
                Tile::Wall => '#',
                Tile::Floor => '.',
            }));
            out.push('\n');
        }
        out
    }

    /// True when every orthogonal neighbor of `pos` is floor.
    pub fn is_insulated(&self, pos: Pos) -> bool {
        CARDINALS.iter().all(|&(dx, dy)| self.is_floor(Pos { y: pos.y + dy, x: pos.x + dx }))
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Overwrites the outer ring with walls.
pub fn enforce_border(grid: &mut Grid) {
    let (width, height) = (grid.width as i32, grid.height as i32);
    for x in 0..width {
        grid.set(Pos { y: 0, x }, Tile::Wall);
        grid.set(Pos { y: height - 1, x }, Tile::Wall);
    }
    for y in 0..height {
        grid.set(Pos { y, x: 0 }, Tile::Wall);
        grid.set(Pos { y, x: width - 1 }, Tile::Wall);
    }
}

pub fn border_is_wall(grid: &Grid) -> bool {
    let (width, height) = (grid.width as i32, grid.height as i32);
    grid.positions()
        .filter(|pos| pos.y == 0 || pos.x == 0 || pos.y == height - 1 || pos.x == width - 1)
        .all(|pos| grid.tile(pos) == Tile::Wall)
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_walls() {
        let grid = Grid::filled(4, 3, Tile::Floor);
        assert!(grid.is_wall(-1, 0));
        assert!(grid.is_wall(0, 3));
        assert!(grid.is_wall(4, 1));
        assert!(!grid.is_wall(3, 2));
    }

    #[test]
    fn border_pass_walls_the_perimeter_only() {
        let mut grid = Grid::filled(5, 4, Tile::Floor);
        enforce_border(&mut grid);
        assert!(border_is_wall(&grid));
        assert_eq!(grid.floor_count(), 3 * 2);
        assert!(grid.is_floor(Pos { y: 1, x: 1 }));
    }

    #[test]
    fn border_pass_is_idempotent() {
        let mut once = Grid::from_rows(&["..#..", ".....", "#...#", "....."]);
        enforce_border(&mut once);
        let mut twice = once.clone();
        enforce_border(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn tile_codes_follow_row_major_layout() {
        let grid = Grid::from_rows(&["#.", ".#"]);
        assert_eq!(grid.tile_codes(), vec![vec![1, 2], vec![2, 1]]);
    }

    #[test]
    fn insulated_requires_all_four_floor_neighbors() {
        let grid = Grid::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
        assert!(grid.is_insulated(Pos { y: 2, x: 2 }));
        assert!(!grid.is_insulated(Pos { y: 1, x: 2 }));
    }

    #[test]
    fn ascii_round_trips_through_from_rows() {
        let rows = ["###", "#.#", "###"];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.to_ascii(), "###\n#.#\n###\n");
    }
}
