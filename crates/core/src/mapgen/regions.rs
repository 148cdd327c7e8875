//! Flood-fill region discovery and tunnel carving between disjoint floor regions.

use std::cmp::Reverse;
use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::types::{Pos, Tile};

use super::grid::{CARDINALS, Grid, manhattan};
use super::seed::coin_flip;

/// Maximal 4-connected set of floor cells, in breadth-first discovery order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    cells: Vec<Pos>,
}

impl Region {
    pub fn new(cells: Vec<Pos>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flood-fill seed cell: the first cell of this region in row-major scan order.
    pub fn first(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TunnelOrientation {
    /// Along the start row first, then along the target column.
    HorizontalFirst,
    /// Along the start column first, then along the target row.
    VerticalFirst,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectionReport {
    pub initial_regions: usize,
    pub passes: u32,
    pub tunnels: usize,
}

/// Breadth-first fill from `start` with an explicit queue. Cells are marked
/// visited when enqueued so each one is queued once.
pub fn flood_fill(grid: &Grid, start: Pos, visited: &mut [bool]) -> Region {
    let width = grid.width();
    let index = |pos: Pos| (pos.y as usize) * width + (pos.x as usize);

    let mut cells = Vec::new();
    if !grid.is_floor(start) || visited[index(start)] {
        return Region::new(cells);
    }

    let mut open = VecDeque::from([start]);
    visited[index(start)] = true;
    while let Some(pos) = open.pop_front() {
        cells.push(pos);
        for (dx, dy) in CARDINALS {
            let next = Pos { y: pos.y + dy, x: pos.x + dx };
            if grid.is_floor(next) && !visited[index(next)] {
                visited[index(next)] = true;
                open.push_back(next);
            }
        }
    }
    Region::new(cells)
}

/// All floor regions in row-major order of their first cell.
pub fn find_regions(grid: &Grid) -> Vec<Region> {
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut regions = Vec::new();
    for pos in grid.positions() {
        let region = flood_fill(grid, pos, &mut visited);
        if !region.is_empty() {
            regions.push(region);
        }
    }
    regions
}

pub fn is_connected(grid: &Grid) -> bool {
    find_regions(grid).len() <= 1
}

/// Manhattan-closest pair across two regions. Brute force over all pairs;
/// the first pair found at the minimum distance wins.
pub fn closest_pair(from: &Region, to: &Region) -> Option<(Pos, Pos)> {
    let mut best: Option<(Pos, Pos)> = None;
    let mut best_distance = u32::MAX;
    for &a in from.cells() {
        for &b in to.cells() {
            let distance = manhattan(a, b);
            if distance < best_distance {
                best_distance = distance;
                best = Some((a, b));
                if distance <= 1 {
                    return best;
                }
            }
        }
    }
    best
}

/// Sets every cell on the L-shaped path between `from` and `to` to floor.
/// Returns the path cells in carving order, corner included once.
pub fn carve_tunnel(
    grid: &mut Grid,
    from: Pos,
    to: Pos,
    orientation: TunnelOrientation,
) -> Vec<Pos> {
    let mut path = Vec::new();
    match orientation {
        TunnelOrientation::HorizontalFirst => {
            carve_horizontal(grid, from.x, to.x, from.y, &mut path);
            carve_vertical(grid, from.y, to.y, to.x, &mut path);
        }
        TunnelOrientation::VerticalFirst => {
            carve_vertical(grid, from.y, to.y, from.x, &mut path);
            carve_horizontal(grid, from.x, to.x, to.y, &mut path);
        }
    }
    path
}

fn carve_horizontal(grid: &mut Grid, x1: i32, x2: i32, y: i32, path: &mut Vec<Pos>) {
    for x in x1.min(x2)..=x1.max(x2) {
        carve(grid, Pos { y, x }, path);
    }
}

fn carve_vertical(grid: &mut Grid, y1: i32, y2: i32, x: i32, path: &mut Vec<Pos>) {
    for y in y1.min(y2)..=y1.max(y2) {
        carve(grid, Pos { y, x }, path);
    }
}

fn carve(grid: &mut Grid, pos: Pos, path: &mut Vec<Pos>) {
    grid.set(pos, Tile::Floor);
    if !path.contains(&pos) {
        path.push(pos);
    }
}

/// Joins every floor region to the largest one until a single region remains.
///
/// Each pass tunnels every secondary region straight into the pass's main
/// region, so the region count strictly drops between passes. The re-check
/// after each pass guards the invariant instead of assuming it.
pub fn connect_regions(grid: &mut Grid, rng: &mut ChaCha8Rng) -> ConnectionReport {
    let mut report = ConnectionReport::default();
    loop {
        let mut regions = find_regions(grid);
        if report.passes == 0 {
            report.initial_regions = regions.len();
        }
        if regions.len() <= 1 {
            break;
        }

        regions.sort_by_key(|region| Reverse(region.len()));
        report.passes += 1;
        debug!(pass = report.passes, regions = regions.len(), "connecting floor regions");

        let (main, others) = regions.split_at(1);
        let main = &main[0];
        for other in others {
            let Some((from, to)) = closest_pair(main, other) else {
                continue;
            };
            let orientation = if coin_flip(rng) {
                TunnelOrientation::HorizontalFirst
            } else {
                TunnelOrientation::VerticalFirst
            };
            let carved = carve_tunnel(grid, from, to, orientation);
            trace!(?from, ?to, ?orientation, cells = carved.len(), "carved tunnel");
            report.tunnels += 1;
        }
    }
    report
}
