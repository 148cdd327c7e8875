//! Top-level dungeon generation with the regenerate-until-playable loop.

mod pipeline;

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::DungeonConfig;
use crate::error::{ConfigError, GenerationError};
use crate::types::Pos;

use super::model::{EnemySpec, GeneratedDungeon, ItemSpec};
use super::seed::rng_from_seed;
use super::spawns;

/// Owns the configuration and the random stream for a run. Every call to
/// [`DungeonGenerator::generate`] draws a fresh noise seed, so consecutive
/// dungeons differ while the run as a whole replays from its seed.
pub struct DungeonGenerator {
    config: DungeonConfig,
    rng: ChaCha8Rng,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng: rng_from_seed(seed) })
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn generate(&mut self) -> Result<GeneratedDungeon, GenerationError> {
        let mut attempt = 0_u32;
        loop {
            if let Some(limit) = self.config.max_attempts
                && attempt >= limit
            {
                return Err(GenerationError::AttemptsExhausted { attempts: attempt });
            }
            attempt += 1;

            if let Some(dungeon) = pipeline::build_dungeon(&self.config, &mut self.rng, attempt) {
                return Ok(dungeon);
            }
            debug!(attempt, "no rooms found, regenerating with a fresh seed");
        }
    }

    pub fn spawn_enemies(
        &mut self,
        dungeon: &GeneratedDungeon,
        count: usize,
        player_tile: Pos,
    ) -> Vec<EnemySpec> {
        spawns::spawn_enemies(&mut self.rng, &dungeon.rooms, count, player_tile, dungeon.tile_size)
    }

    pub fn spawn_items(&mut self, dungeon: &GeneratedDungeon, count: usize) -> Vec<ItemSpec> {
        spawns::spawn_items(&mut self.rng, &dungeon.rooms, count, dungeon.tile_size)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use xxhash_rust::xxh3::xxh3_64;

    use super::*;
    use crate::mapgen::grid::border_is_wall;
    use crate::mapgen::regions::is_connected;

    fn small_config() -> DungeonConfig {
        DungeonConfig::with_size(40, 30, 16)
    }

    #[test]
    fn same_seed_produces_byte_identical_dungeons() {
        let a = DungeonGenerator::new(small_config(), 123_456).expect("valid").generate();
        let b = DungeonGenerator::new(small_config(), 123_456).expect("valid").generate();
        let (a, b) = (a.expect("playable"), b.expect("playable"));
        assert_eq!(xxh3_64(&a.canonical_bytes()), xxh3_64(&b.canonical_bytes()));
    }

    #[test]
    fn consecutive_generations_draw_fresh_noise() {
        let mut generator = DungeonGenerator::new(small_config(), 99).expect("valid");
        let first = generator.generate().expect("playable");
        let second = generator.generate().expect("playable");
        assert_ne!(first.canonical_bytes(), second.canonical_bytes());
    }

    #[test]
    fn start_and_exit_sit_on_floor_inside_rooms() {
        let mut generator = DungeonGenerator::new(small_config(), 7).expect("valid");
        let dungeon = generator.generate().expect("playable");

        assert!(dungeon.grid.is_floor(dungeon.start_tile));
        assert!(dungeon.grid.is_floor(dungeon.exit_tile));
        assert!(dungeon.rooms[0].contains(dungeon.start_tile));
        assert!(dungeon.rooms[dungeon.rooms.len() - 1].contains(dungeon.exit_tile));

        let (start_x, start_y) = dungeon.start_pixel();
        assert_eq!(start_x, dungeon.start_tile.x * 16);
        assert_eq!(start_y, dungeon.start_tile.y * 16);
        let (exit_x, exit_y) = dungeon.exit_pixel();
        assert_eq!(exit_x, dungeon.exit_tile.x * 16);
        assert_eq!(exit_y, dungeon.exit_tile.y * 16);
    }

    #[test]
    fn roomless_maps_hit_attempt_cap() {
        let base = small_config();
        let config = DungeonConfig {
            min_room_size: base.width * base.height,
            max_attempts: Some(3),
            ..base
        };
        let mut generator = DungeonGenerator::new(config, 1).expect("valid");
        let err = generator.generate().expect_err("no region can exceed the whole grid");
        assert!(matches!(err, GenerationError::AttemptsExhausted { attempts: 3 }));
    }

    #[test]
    fn zero_attempt_cap_fails_immediately() {
        let config = DungeonConfig { max_attempts: Some(0), ..small_config() };
        let mut generator = DungeonGenerator::new(config, 1).expect("valid");
        assert!(matches!(
            generator.generate(),
            Err(GenerationError::AttemptsExhausted { attempts: 0 })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = DungeonConfig { width: 2, ..small_config() };
        assert!(DungeonGenerator::new(config, 1).is_err());
    }

    #[test]
    fn spawned_enemies_avoid_the_start_tile() {
        let mut generator = DungeonGenerator::new(small_config(), 4_242).expect("valid");
        let dungeon = generator.generate().expect("playable");
        let enemies = generator.spawn_enemies(&dungeon, 10, dungeon.start_tile);
        assert!(enemies.len() <= 10);
        for enemy in &enemies {
            assert!(enemy.pos.squared_distance(dungeon.start_tile) > 25);
            assert!(dungeon.grid.is_floor(enemy.pos));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn generated_dungeons_are_walled_connected_and_roomed(seed in any::<u64>()) {
            let mut generator = DungeonGenerator::new(small_config(), seed).expect("valid");
            let dungeon = generator.generate().expect("unbounded retries always succeed");

            prop_assert!(border_is_wall(&dungeon.grid), "seed={seed} left an open border");
            prop_assert!(is_connected(&dungeon.grid), "seed={seed} left isolated floor");
            prop_assert!(!dungeon.rooms.is_empty(), "seed={seed} returned without rooms");
            prop_assert!(dungeon.grid.is_floor(dungeon.start_tile));
            prop_assert!(dungeon.grid.is_floor(dungeon.exit_tile));
        }
    }
}
