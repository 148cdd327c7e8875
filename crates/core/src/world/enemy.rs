//! Enemy stat tables, the distance-driven behavior state, and grid-aware movement.

use rand_chacha::ChaCha8Rng;

use crate::mapgen::seed::{choose, random_range_f32};
use crate::mapgen::{EnemySpec, Grid};
use crate::types::{Direction, EnemyKind};

use super::collision::{Rect, distance, try_move};

const IDLE_SPEED_FACTOR: f32 = 0.5;
const IDLE_TURN_MIN_SECS: f32 = 1.0;
const IDLE_TURN_MAX_SECS: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    /// Multiples of the enemy's size.
    pub attack_range: f32,
    pub detection_range: f32,
    pub ignores_walls: bool,
}

impl EnemyKind {
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Slime => EnemyStats {
                speed: 80.0,
                health: 30,
                damage: 10,
                attack_range: 1.0,
                detection_range: 5.0,
                ignores_walls: false,
            },
            EnemyKind::Ghost => EnemyStats {
                speed: 120.0,
                health: 20,
                damage: 15,
                attack_range: 1.5,
                detection_range: 7.0,
                ignores_walls: true,
            },
            EnemyKind::Spider => EnemyStats {
                speed: 150.0,
                health: 15,
                damage: 20,
                attack_range: 1.0,
                detection_range: 6.0,
                ignores_walls: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Chase,
    Attack,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub health: i32,
    pub direction: Direction,
    pub state: EnemyState,
    move_timer: f32,
}

impl Enemy {
    pub fn from_spec(spec: &EnemySpec, facing: Direction) -> Self {
        let (x, y) = spec.pos.to_pixel(spec.size);
        let size = spec.size as f32;
        Self {
            kind: spec.kind,
            rect: Rect::new(x as f32, y as f32, size, size),
            health: spec.kind.stats().health,
            direction: facing,
            state: EnemyState::Idle,
            move_timer: 0.0,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect.center()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn state_for_distance(&self, distance_to_player: f32) -> EnemyState {
        let stats = self.kind.stats();
        if distance_to_player <= stats.attack_range * self.rect.w {
            EnemyState::Attack
        } else if distance_to_player <= stats.detection_range * self.rect.w {
            EnemyState::Chase
        } else {
            EnemyState::Idle
        }
    }

    /// Advances one frame. Returns the damage to apply to the player when attacking.
    pub fn update(
        &mut self,
        dt: f32,
        grid: &Grid,
        tile_size: u32,
        player_center: (f32, f32),
        rng: &mut ChaCha8Rng,
    ) -> Option<i32> {
        let stats = self.kind.stats();
        let center = self.center();
        self.state = self.state_for_distance(distance(center, player_center));

        let (dx, dy) = match self.state {
            EnemyState::Idle => {
                self.move_timer -= dt;
                if self.move_timer <= 0.0 {
                    self.direction = random_direction(rng, self.direction);
                    self.move_timer =
                        random_range_f32(rng, IDLE_TURN_MIN_SECS, IDLE_TURN_MAX_SECS);
                }
                let (ux, uy) = self.direction.unit();
                let step = stats.speed * dt * IDLE_SPEED_FACTOR;
                (ux * step, uy * step)
            }
            EnemyState::Chase => {
                let (mut vx, mut vy) = (player_center.0 - center.0, player_center.1 - center.1);
                let length = vx.hypot(vy);
                if length > 0.0 {
                    vx /= length;
                    vy /= length;
                }
                self.direction = if vx.abs() > vy.abs() {
                    if vx > 0.0 { Direction::Right } else { Direction::Left }
                } else if vy > 0.0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
                (vx * stats.speed * dt, vy * stats.speed * dt)
            }
            EnemyState::Attack => return Some(stats.damage),
        };

        if try_move(grid, &mut self.rect, dx, dy, tile_size, stats.ignores_walls) {
            self.direction = random_direction(rng, self.direction);
        }
        None
    }
}

fn random_direction(rng: &mut ChaCha8Rng, fallback: Direction) -> Direction {
    choose(rng, &Direction::ALL).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::rng_from_seed;
    use crate::types::Pos;

    fn corridor() -> Grid {
        Grid::from_rows(&["##########", "#........#", "#........#", "##########"])
    }

    fn enemy(kind: EnemyKind, pos: Pos) -> Enemy {
        Enemy::from_spec(&EnemySpec { kind, pos, size: 32 }, Direction::Right)
    }

    #[test]
    fn stat_table_matches_roster() {
        assert_eq!(EnemyKind::Slime.stats().health, 30);
        assert_eq!(EnemyKind::Ghost.stats().damage, 15);
        assert_eq!(EnemyKind::Spider.stats().speed, 150.0);
        assert!(EnemyKind::Ghost.stats().ignores_walls);
        assert!(!EnemyKind::Spider.stats().ignores_walls);
    }

    #[test]
    fn state_follows_distance_bands() {
        let slime = enemy(EnemyKind::Slime, Pos { y: 1, x: 1 });
        assert_eq!(slime.state_for_distance(32.0), EnemyState::Attack);
        assert_eq!(slime.state_for_distance(100.0), EnemyState::Chase);
        assert_eq!(slime.state_for_distance(161.0), EnemyState::Idle);
    }

    #[test]
    fn attacking_enemy_reports_damage_and_holds_position() {
        let grid = corridor();
        let mut spider = enemy(EnemyKind::Spider, Pos { y: 1, x: 2 });
        let before = spider.rect;
        let mut rng = rng_from_seed(1);
        let target = (spider.center().0 + 10.0, spider.center().1);
        let damage = spider.update(0.016, &grid, 32, target, &mut rng);
        assert_eq!(damage, Some(20));
        assert_eq!(spider.rect, before);
    }

    #[test]
    fn chasing_enemy_closes_distance() {
        let grid = corridor();
        let mut slime = enemy(EnemyKind::Slime, Pos { y: 1, x: 2 });
        let target = (slime.center().0 + 100.0, slime.center().1);
        let before = distance(slime.center(), target);
        let mut rng = rng_from_seed(2);
        assert_eq!(slime.update(0.1, &grid, 32, target, &mut rng), None);
        assert_eq!(slime.state, EnemyState::Chase);
        assert!(distance(slime.center(), target) < before);
        assert_eq!(slime.direction, Direction::Right);
    }

    #[test]
    fn walled_enemy_cannot_chase_through_walls() {
        let grid = corridor();
        let mut slime = enemy(EnemyKind::Slime, Pos { y: 1, x: 1 });
        let target = (slime.center().0, slime.center().1 - 100.0);
        let before = slime.rect;
        let mut rng = rng_from_seed(3);
        slime.update(0.1, &grid, 32, target, &mut rng);
        assert_eq!(slime.rect, before);
    }

    #[test]
    fn ghost_drifts_through_walls() {
        let grid = corridor();
        let mut ghost = enemy(EnemyKind::Ghost, Pos { y: 1, x: 1 });
        let target = (ghost.center().0, ghost.center().1 - 150.0);
        let mut rng = rng_from_seed(4);
        ghost.update(0.1, &grid, 32, target, &mut rng);
        assert!(ghost.rect.y < 32.0);
    }
}
