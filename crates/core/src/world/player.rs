//! Player stats, movement against the grid, and the melee attack cone.

use std::f32::consts::{FRAC_PI_3, PI, TAU};

use crate::mapgen::Grid;
use crate::types::{Direction, ItemKind, Pos};

use super::collision::{Rect, distance, tile_at_pixel, try_move};

pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_ATTACK_POWER: i32 = 20;
pub const ATTACK_COOLDOWN_SECS: f32 = 0.3;
pub const INVULNERABLE_SECS: f32 = 1.0;
/// Half-angle of the attack cone around the facing direction.
pub const ATTACK_HALF_ANGLE: f32 = FRAC_PI_3;

/// One frame of directional intent; axes are expected in `-1.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    pub dx: f32,
    pub dy: f32,
    pub attack: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub attack_power: i32,
    pub attack_range: f32,
    pub facing: Direction,
    pub score: u32,
    pub inventory: Vec<ItemKind>,
    attack_timer: f32,
    invulnerable_timer: f32,
}

impl Player {
    pub fn new(pixel: (i32, i32), size: u32) -> Self {
        let size = size as f32;
        Self {
            rect: Rect::new(pixel.0 as f32, pixel.1 as f32, size, size),
            size,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            attack_power: PLAYER_ATTACK_POWER,
            attack_range: size * 1.5,
            facing: Direction::Right,
            score: 0,
            inventory: Vec::new(),
            attack_timer: 0.0,
            invulnerable_timer: 0.0,
        }
    }

    pub fn place_at(&mut self, pixel: (i32, i32)) {
        self.rect.x = pixel.0 as f32;
        self.rect.y = pixel.1 as f32;
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect.center()
    }

    pub fn tile(&self, tile_size: u32) -> Pos {
        let (cx, cy) = self.center();
        tile_at_pixel(cx, cy, tile_size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    /// Applies movement and timers for one frame. Returns true when an
    /// attack fires this frame.
    pub fn update(&mut self, dt: f32, input: PlayerInput, grid: &Grid, tile_size: u32) -> bool {
        if input.dx < 0.0 {
            self.facing = Direction::Left;
        }
        if input.dx > 0.0 {
            self.facing = Direction::Right;
        }
        if input.dy < 0.0 {
            self.facing = Direction::Up;
        }
        if input.dy > 0.0 {
            self.facing = Direction::Down;
        }

        let (dx, dy) = (input.dx * self.speed * dt, input.dy * self.speed * dt);
        if dx != 0.0 || dy != 0.0 {
            try_move(grid, &mut self.rect, dx, dy, tile_size, false);
        }

        self.attack_timer -= dt;
        let attacked = self.attack_timer <= 0.0 && input.attack;
        if attacked {
            self.attack_timer = ATTACK_COOLDOWN_SECS;
        }

        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer -= dt;
        }
        attacked
    }

    /// Whether a target centered at `target` sits inside the attack cone.
    pub fn can_hit(&self, target: (f32, f32)) -> bool {
        let origin = self.center();
        if distance(origin, target) > self.attack_range {
            return false;
        }
        let angle_to_target = (target.1 - origin.1).atan2(target.0 - origin.0);
        let mut diff = (angle_to_target - self.facing.angle()).abs();
        if diff > PI {
            diff = TAU - diff;
        }
        diff <= ATTACK_HALF_ANGLE
    }

    /// Returns whether the hit landed; hits during invulnerability are ignored.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.health -= amount;
        self.invulnerable_timer = INVULNERABLE_SECS;
        true
    }
}
