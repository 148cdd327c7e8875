use anyhow::{Result, bail};
use clap::Parser;
use delve_core::logging::init_tracing;
use delve_core::mapgen::validate::{dungeon_violations, spawn_violations};
use delve_core::world::PlayerInput;
use delve_core::world::collision::tile_at_pixel;
use delve_core::{DungeonConfig, DungeonGenerator, GameConfig, Run};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    iterations: u32,
    #[arg(long, default_value_t = 40)]
    width: usize,
    #[arg(long, default_value_t = 40)]
    height: usize,
    /// Frames of random play simulated per iteration
    #[arg(long, default_value_t = 300)]
    frames: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn main() -> Result<()> {
    init_tracing("warn");
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} iterations of {}x{}...",
        args.seed, args.iterations, args.width, args.height
    );
    let dungeon_config =
        DungeonConfig { width: args.width, height: args.height, ..Default::default() };
    let min_room_size = dungeon_config.min_room_size;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failures = 0;

    for iteration in 0..args.iterations {
        let case_seed = rng.next_u64();
        let mut generator = DungeonGenerator::new(dungeon_config.clone(), case_seed)?;
        let dungeon = generator.generate()?;
        let enemies = generator.spawn_enemies(&dungeon, 10, dungeon.start_tile);
        let items = generator.spawn_items(&dungeon, 5);

        let mut violations: Vec<String> = dungeon_violations(&dungeon, min_room_size)
            .into_iter()
            .chain(spawn_violations(&dungeon, dungeon.start_tile, &enemies, &items))
            .map(|violation| violation.to_string())
            .collect();
        violations.extend(simulate_play(&dungeon_config, case_seed, args.frames, &mut rng)?);

        if !violations.is_empty() {
            failures += 1;
            println!("Iteration {iteration} (seed {case_seed}) failed:");
            for violation in &violations {
                println!("  {violation}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} iterations violated invariants", args.iterations);
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}

/// Drives a run with random inputs and checks that entities stay out of walls.
fn simulate_play(
    dungeon_config: &DungeonConfig,
    seed: u64,
    frames: u32,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<String>> {
    let config = GameConfig { dungeon: dungeon_config.clone(), ..Default::default() };
    let mut run = Run::new(config, seed)?;
    let axes = [-1.0, 0.0, 1.0];
    let mut violations = Vec::new();

    for frame in 0..frames {
        if run.outcome().is_some() {
            break;
        }
        let input = PlayerInput {
            dx: choose(rng, &axes),
            dy: choose(rng, &axes),
            attack: choose(rng, &[true, false, false]),
        };
        run.update(1.0 / 60.0, input)?;

        let tile_size = run.dungeon().tile_size;
        let player = run.player();
        if player.health > player.max_health {
            violations.push(format!("frame {frame}: health {} above max", player.health));
        }
        if !run.dungeon().grid.is_floor(player.tile(tile_size)) {
            violations.push(format!("frame {frame}: player inside a wall"));
        }
        for enemy in run.enemies().filter(|enemy| !enemy.kind.stats().ignores_walls) {
            let (cx, cy) = enemy.center();
            let tile = tile_at_pixel(cx, cy, tile_size);
            if !run.dungeon().grid.is_floor(tile) {
                violations.push(format!("frame {frame}: {:?} inside a wall", enemy.kind));
            }
        }
    }
    Ok(violations)
}
