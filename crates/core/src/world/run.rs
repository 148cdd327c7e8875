//! One playthrough: the current level, its entities, and level progression.

use std::hash::Hasher;
use std::mem;

use slotmap::SlotMap;
use tracing::{debug, info};
use xxhash_rust::xxh3::Xxh3;

use crate::config::GameConfig;
use crate::error::GenerationError;
use crate::mapgen::seed::choose;
use crate::mapgen::{DungeonGenerator, GeneratedDungeon};
use crate::types::{Direction, EnemyId, EnemyKind, ItemId, ItemKind, RunOutcome};

use super::collision::{Rect, distance};
use super::enemy::Enemy;
use super::item::Item;
use super::player::{Player, PlayerInput};

pub const KILL_SCORE: u32 = 10;
pub const STARTING_DIFFICULTY: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunEvent {
    LevelEntered { level: u32, difficulty: f32 },
    EnemyKilled { kind: EnemyKind },
    ItemCollected { kind: ItemKind },
    PlayerHit { damage: i32, health: i32 },
    Finished(RunOutcome),
}

/// Enemies placed on a level at `difficulty`, before distance rejection.
pub fn enemy_target(base: u32, difficulty: f32) -> usize {
    (base as f32 * difficulty).floor() as usize
}

pub struct Run {
    config: GameConfig,
    generator: DungeonGenerator,
    dungeon: GeneratedDungeon,
    player: Player,
    enemies: SlotMap<EnemyId, Enemy>,
    items: SlotMap<ItemId, Item>,
    level: u32,
    difficulty: f32,
    outcome: Option<RunOutcome>,
    events: Vec<RunEvent>,
}

impl Run {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GenerationError> {
        config.validate()?;
        let mut generator = DungeonGenerator::new(config.dungeon.clone(), seed)?;
        let dungeon = generator.generate()?;
        let player = Player::new(dungeon.start_pixel(), dungeon.tile_size);
        let mut run = Self {
            config,
            generator,
            dungeon,
            player,
            enemies: SlotMap::with_key(),
            items: SlotMap::with_key(),
            level: 1,
            difficulty: STARTING_DIFFICULTY,
            outcome: None,
            events: Vec::new(),
        };
        run.populate();
        Ok(run)
    }

    /// Starts over at level one on a fresh dungeon, continuing the random stream.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.dungeon = self.generator.generate()?;
        self.player = Player::new(self.dungeon.start_pixel(), self.dungeon.tile_size);
        self.level = 1;
        self.difficulty = STARTING_DIFFICULTY;
        self.outcome = None;
        self.populate();
        Ok(())
    }

    /// Advances one frame. Does nothing once the run has an outcome.
    pub fn update(&mut self, dt: f32, input: PlayerInput) -> Result<(), GenerationError> {
        if self.outcome.is_some() {
            return Ok(());
        }
        if !self.player.is_alive() {
            self.finish(RunOutcome::Defeat);
            return Ok(());
        }
        let tile_size = self.dungeon.tile_size;

        if self.player.update(dt, input, &self.dungeon.grid, tile_size) {
            strike_enemies(&self.player, &mut self.enemies);
        }

        for kind in collect_items(&mut self.player, &mut self.items) {
            self.events.push(RunEvent::ItemCollected { kind });
        }

        if self.reached_exit() {
            return self.advance_level();
        }

        let player_center = self.player.center();
        let rng = self.generator.rng_mut();
        for enemy in self.enemies.values_mut().filter(|enemy| !enemy.is_dead()) {
            let Some(damage) =
                enemy.update(dt, &self.dungeon.grid, tile_size, player_center, rng)
            else {
                continue;
            };
            if self.player.take_damage(damage) {
                self.events.push(RunEvent::PlayerHit { damage, health: self.player.health });
            }
        }

        for kind in remove_dead(&mut self.enemies) {
            self.player.score += KILL_SCORE;
            self.events.push(RunEvent::EnemyKilled { kind });
        }

        if !self.player.is_alive() {
            self.finish(RunOutcome::Defeat);
        }
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dungeon(&self) -> &GeneratedDungeon {
        &self.dungeon
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn exit_rect(&self) -> Rect {
        Rect::from_tile(self.dungeon.exit_tile, self.dungeon.tile_size)
    }

    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        mem::take(&mut self.events)
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(&self.dungeon.canonical_bytes());
        hasher.write_u32(self.level);
        hasher.write_u32(self.difficulty.to_bits());
        hasher.write_u32(self.player.rect.x.to_bits());
        hasher.write_u32(self.player.rect.y.to_bits());
        hasher.write_i32(self.player.health);
        hasher.write_u32(self.player.score);
        for enemy in self.enemies.values() {
            hasher.write_u8(enemy.kind as u8);
            hasher.write_u32(enemy.rect.x.to_bits());
            hasher.write_u32(enemy.rect.y.to_bits());
            hasher.write_i32(enemy.health);
        }
        for item in self.items.values() {
            hasher.write_u8(item.kind as u8);
            hasher.write_u32(item.rect.x.to_bits());
            hasher.write_u32(item.rect.y.to_bits());
        }
        hasher.finish()
    }

    fn reached_exit(&self) -> bool {
        let tile_size = self.dungeon.tile_size as f32;
        distance(self.player.center(), self.exit_rect().center()) < tile_size
    }

    fn advance_level(&mut self) -> Result<(), GenerationError> {
        self.level += 1;
        self.difficulty += self.config.run.difficulty_step;
        if self.level > self.config.run.max_levels {
            self.finish(RunOutcome::Victory);
            return Ok(());
        }

        self.dungeon = self.generator.generate()?;
        self.player.place_at(self.dungeon.start_pixel());
        self.populate();
        Ok(())
    }

    fn populate(&mut self) {
        self.enemies.clear();
        self.items.clear();

        let player_tile = self.dungeon.start_tile;
        let enemy_count = enemy_target(self.config.run.base_enemy_count, self.difficulty);
        let enemy_specs = self.generator.spawn_enemies(&self.dungeon, enemy_count, player_tile);
        for spec in &enemy_specs {
            let rng = self.generator.rng_mut();
            let facing = choose(rng, &Direction::ALL).copied().unwrap_or(Direction::Right);
            self.enemies.insert(Enemy::from_spec(spec, facing));
        }

        let item_specs =
            self.generator.spawn_items(&self.dungeon, self.config.run.item_count as usize);
        for spec in &item_specs {
            self.items.insert(Item::from_spec(spec, self.dungeon.tile_size));
        }

        if enemy_specs.len() < enemy_count {
            debug!(requested = enemy_count, placed = enemy_specs.len(), "enemy slots dropped");
        }
        info!(
            level = self.level,
            difficulty = self.difficulty,
            enemies = self.enemies.len(),
            items = self.items.len(),
            attempts = self.dungeon.attempts,
            "entered level"
        );
        self.events.push(RunEvent::LevelEntered { level: self.level, difficulty: self.difficulty });
    }

    fn finish(&mut self, outcome: RunOutcome) {
        info!(?outcome, level = self.level, score = self.player.score, "run finished");
        self.outcome = Some(outcome);
        self.events.push(RunEvent::Finished(outcome));
    }
}

/// Damages every living enemy inside the player's attack cone.
pub fn strike_enemies(player: &Player, enemies: &mut SlotMap<EnemyId, Enemy>) -> usize {
    let mut hits = 0;
    for enemy in enemies.values_mut() {
        if !enemy.is_dead() && player.can_hit(enemy.center()) {
            enemy.take_damage(player.attack_power);
            hits += 1;
        }
    }
    hits
}

/// Applies and removes every item the player overlaps.
pub fn collect_items(player: &mut Player, items: &mut SlotMap<ItemId, Item>) -> Vec<ItemKind> {
    let mut collected = Vec::new();
    items.retain(|_, item| {
        if player.rect.overlaps(&item.rect) && item.collect(player) {
            collected.push(item.kind);
            return false;
        }
        true
    });
    collected
}

fn remove_dead(enemies: &mut SlotMap<EnemyId, Enemy>) -> Vec<EnemyKind> {
    let mut killed = Vec::new();
    enemies.retain(|_, enemy| {
        if enemy.is_dead() {
            killed.push(enemy.kind);
            return false;
        }
        true
    });
    killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DungeonConfig, RunConfig};
    use crate::mapgen::EnemySpec;
    use crate::mapgen::ItemSpec;
    use crate::types::Pos;

    fn small_config() -> GameConfig {
        GameConfig { dungeon: DungeonConfig::with_size(40, 30, 16), run: RunConfig::default() }
    }

    fn step_onto_exit(run: &mut Run) {
        let exit = run.dungeon().exit_pixel();
        run.player_mut().place_at(exit);
        run.update(0.0, PlayerInput::default()).expect("regenerates");
    }

    #[test]
    fn enemy_target_scales_with_difficulty() {
        assert_eq!(enemy_target(10, 1.0), 10);
        assert_eq!(enemy_target(10, 1.0 + 0.2), 12);
        assert_eq!(enemy_target(10, 1.0 + 0.2 + 0.2), 14);
        assert_eq!(enemy_target(7, 1.5), 10);
    }

    #[test]
    fn new_run_starts_on_level_one_at_the_start_tile() {
        let run = Run::new(small_config(), 5).expect("playable");
        assert_eq!(run.level(), 1);
        assert_eq!(run.difficulty(), STARTING_DIFFICULTY);
        assert_eq!(run.outcome(), None);
        assert_eq!(run.player().tile(16), run.dungeon().start_tile);
        assert!(run.enemies().count() <= 10);
        assert_eq!(run.items().count(), 5);
        for enemy in run.enemies() {
            let tile = Pos { y: (enemy.rect.y / 16.0) as i32, x: (enemy.rect.x / 16.0) as i32 };
            assert!(tile.squared_distance(run.dungeon().start_tile) > 25);
        }
    }

    #[test]
    fn reaching_the_exit_advances_level_and_difficulty() {
        let mut run = Run::new(small_config(), 11).expect("playable");
        let first_layout = run.dungeon().canonical_bytes();
        run.drain_events();

        step_onto_exit(&mut run);

        assert_eq!(run.level(), 2);
        assert!((run.difficulty() - 1.2).abs() < 1e-6);
        assert_ne!(run.dungeon().canonical_bytes(), first_layout);
        assert_eq!(run.player().tile(16), run.dungeon().start_tile);
        assert!(run.enemies().count() <= 12);
        assert!(
            run.drain_events()
                .iter()
                .any(|event| matches!(event, RunEvent::LevelEntered { level: 2, .. }))
        );
    }

    #[test]
    fn clearing_the_last_level_is_victory() {
        let mut config = small_config();
        config.run.max_levels = 2;
        let mut run = Run::new(config, 3).expect("playable");

        step_onto_exit(&mut run);
        assert_eq!(run.outcome(), None);
        step_onto_exit(&mut run);
        assert_eq!(run.outcome(), Some(RunOutcome::Victory));

        let frozen = run.snapshot_hash();
        run.update(1.0, PlayerInput { dx: 1.0, ..Default::default() }).expect("no-op");
        assert_eq!(run.snapshot_hash(), frozen);
    }

    #[test]
    fn zero_health_is_defeat() {
        let mut run = Run::new(small_config(), 8).expect("playable");
        run.player_mut().health = 0;
        run.update(0.016, PlayerInput::default()).expect("no generation");
        assert_eq!(run.outcome(), Some(RunOutcome::Defeat));
        assert!(run.drain_events().contains(&RunEvent::Finished(RunOutcome::Defeat)));
    }

    #[test]
    fn restart_resets_progress() {
        let mut run = Run::new(small_config(), 21).expect("playable");
        step_onto_exit(&mut run);
        run.player_mut().score = 120;
        run.restart().expect("playable");
        assert_eq!(run.level(), 1);
        assert_eq!(run.player().score, 0);
        assert_eq!(run.outcome(), None);
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let inputs = [
            PlayerInput { dx: 1.0, ..Default::default() },
            PlayerInput { dy: 1.0, attack: true, ..Default::default() },
            PlayerInput { dx: -1.0, dy: -1.0, attack: false },
        ];
        let play = || {
            let mut run = Run::new(small_config(), 77).expect("playable");
            for frame in 0..120 {
                run.update(1.0 / 60.0, inputs[frame % inputs.len()]).expect("playable");
            }
            run.snapshot_hash()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn strikes_hit_only_enemies_in_the_cone() {
        let player = Player::new((64, 64), 32);
        let mut enemies = SlotMap::with_key();
        let spec = |x| EnemySpec { kind: EnemyKind::Spider, pos: Pos { y: 2, x }, size: 32 };
        let ahead = enemies.insert(Enemy::from_spec(&spec(3), Direction::Left));
        let behind = enemies.insert(Enemy::from_spec(&spec(1), Direction::Left));

        assert_eq!(strike_enemies(&player, &mut enemies), 1);
        assert!(enemies[ahead].is_dead());
        assert_eq!(enemies[behind].health, EnemyKind::Spider.stats().health);

        assert_eq!(remove_dead(&mut enemies), vec![EnemyKind::Spider]);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn overlapping_items_are_collected_and_removed() {
        let mut player = Player::new((64, 64), 32);
        let mut items = SlotMap::with_key();
        let spec = |x| ItemSpec { kind: ItemKind::Damage, pos: Pos { y: 2, x }, size: 16 };
        items.insert(Item::from_spec(&spec(2), 32));
        items.insert(Item::from_spec(&spec(6), 32));

        assert_eq!(collect_items(&mut player, &mut items), vec![ItemKind::Damage]);
        assert_eq!(items.len(), 1);
        assert_eq!(player.attack_power, 30);
        assert_eq!(player.score, 50);
    }
}
