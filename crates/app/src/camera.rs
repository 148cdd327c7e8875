//! Viewport offset that follows the player without showing space past the map edge.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    /// Centers on `target`, then clamps so the view stays inside a
    /// `world_width` x `world_height` map. Maps smaller than the viewport pin to the origin.
    pub fn follow(
        target: (f32, f32),
        viewport: (f32, f32),
        world_width: f32,
        world_height: f32,
    ) -> Self {
        let (viewport_width, viewport_height) = viewport;
        Self {
            x: clamp_axis(target.0 - viewport_width / 2.0, world_width - viewport_width),
            y: clamp_axis(target.1 - viewport_height / 2.0, world_height - viewport_height),
            viewport_width,
            viewport_height,
        }
    }

    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    /// Tile columns and rows intersecting the view, clipped to the grid.
    pub fn visible_tiles(
        &self,
        tile_size: u32,
        grid_width: usize,
        grid_height: usize,
    ) -> (Range<usize>, Range<usize>) {
        let size = tile_size.max(1) as f32;
        let span = |offset: f32, extent: f32, limit: usize| {
            let first = (offset / size).floor().max(0.0) as usize;
            let last = ((offset + extent) / size).ceil().max(0.0) as usize;
            first.min(limit)..last.min(limit)
        };
        (
            span(self.x, self.viewport_width, grid_width),
            span(self.y, self.viewport_height, grid_height),
        )
    }
}

fn clamp_axis(desired: f32, max_offset: f32) -> f32 {
    desired.min(max_offset).max(0.0)
}
