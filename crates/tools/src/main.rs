use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use delve_core::logging::init_tracing;
use delve_core::mapgen::validate::dungeon_violations;
use delve_core::{DungeonGenerator, GameConfig, GeneratedDungeon};
use serde::Serialize;
use tracing::warn;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Parser)]
#[command(author, version, about = "Generate cave dungeons and print a summary", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Overrides the configured width in tiles
    #[arg(long)]
    width: Option<usize>,
    /// Overrides the configured height in tiles
    #[arg(long)]
    height: Option<usize>,
    /// TOML file with `[dungeon]` and `[run]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Dungeons to generate from the same random stream
    #[arg(short, long, default_value_t = 1)]
    runs: u32,
    /// Print each map as ASCII with `S` at the start and `E` at the exit
    #[arg(long)]
    ascii: bool,
    /// Print summaries as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    run: u32,
    width: usize,
    height: usize,
    attempts: u32,
    room_sizes: Vec<usize>,
    floor_cells: usize,
    start: [i32; 2],
    exit: [i32; 2],
    fingerprint: String,
    violations: Vec<String>,
}

impl Summary {
    fn new(run: u32, dungeon: &GeneratedDungeon, min_room_size: usize) -> Self {
        Self {
            run,
            width: dungeon.grid.width(),
            height: dungeon.grid.height(),
            attempts: dungeon.attempts,
            room_sizes: dungeon.rooms.iter().map(|room| room.len()).collect(),
            floor_cells: dungeon.grid.floor_count(),
            start: [dungeon.start_tile.y, dungeon.start_tile.x],
            exit: [dungeon.exit_tile.y, dungeon.exit_tile.x],
            fingerprint: format!("0x{:016x}", xxh3_64(&dungeon.canonical_bytes())),
            violations: dungeon_violations(dungeon, min_room_size)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    init_tracing("warn");
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.dungeon.width = width;
    }
    if let Some(height) = args.height {
        config.dungeon.height = height;
    }
    let min_room_size = config.dungeon.min_room_size;

    let mut generator = DungeonGenerator::new(config.dungeon, args.seed)
        .context("Invalid dungeon configuration")?;

    let mut failures = 0;
    for run in 1..=args.runs {
        let dungeon = generator.generate().with_context(|| format!("Run {run} failed"))?;
        let summary = Summary::new(run, &dungeon, min_room_size);

        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            print_summary(&summary);
        }
        if args.ascii {
            println!("{}", render_ascii(&dungeon));
        }
        for violation in &summary.violations {
            warn!(run, "{violation}");
        }
        if !summary.violations.is_empty() {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {} dungeons violated generation invariants", args.runs);
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!(
        "Run {}: {}x{} after {} attempt(s), {} floor cells",
        summary.run, summary.width, summary.height, summary.attempts, summary.floor_cells
    );
    println!("  Rooms: {} {:?}", summary.room_sizes.len(), summary.room_sizes);
    println!("  Start: {:?}  Exit: {:?}", summary.start, summary.exit);
    println!("  Fingerprint: {}", summary.fingerprint);
}

fn render_ascii(dungeon: &GeneratedDungeon) -> String {
    let row_len = dungeon.grid.width() + 1;
    let mut bytes = dungeon.grid.to_ascii().into_bytes();
    for (pos, glyph) in [(dungeon.start_tile, b'S'), (dungeon.exit_tile, b'E')] {
        let index = pos.y as usize * row_len + pos.x as usize;
        if let Some(cell) = bytes.get_mut(index) {
            *cell = glyph;
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
