//! Initial wall/floor grid sampled from coherent Perlin noise.

use noise::{NoiseFn, Perlin};

use crate::types::{Pos, Tile};

use super::grid::Grid;

/// Cell (x, y) becomes a wall when noise at `(x / scale, y / scale)` exceeds
/// `wall_threshold`. Larger scales give smoother, larger features.
pub fn noise_field(
    width: usize,
    height: usize,
    noise_seed: u32,
    wall_threshold: f64,
    scale: f64,
) -> Grid {
    let perlin = Perlin::new(noise_seed);
    let mut grid = Grid::filled(width, height, Tile::Floor);
    for y in 0..height {
        for x in 0..width {
            let sample = perlin.get([x as f64 / scale, y as f64 / scale]);
            if sample > wall_threshold {
                grid.set(Pos { y: y as i32, x: x as i32 }, Tile::Wall);
            }
        }
    }
    grid
}
