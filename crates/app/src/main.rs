mod frame_input;
mod game_layout;
mod ui_render;
mod window_config;

use std::env;

use anyhow::{Context, Result, anyhow};
use delve_app::app_loop::AppState;
use delve_app::last_run_file::LastRunFile;
use delve_app::seed::{SeedChoice, generate_runtime_seed, parse_launch_args};
use delve_app::settings::{default_config_path, load_config};
use delve_core::Run;
use delve_core::logging::{DEFAULT_FILTER, init_tracing};
use macroquad::prelude::{get_frame_time, next_frame, screen_height, screen_width};
use taffy::TaffyTree;
use tracing::{error, info, warn};

use crate::frame_input::capture_frame_input;
use crate::game_layout::{compute_frame_layout, setup_layout};
use crate::window_config::build_window_conf;

#[macroquad::main(build_window_conf)]
async fn main() {
    init_tracing(DEFAULT_FILTER);
    if let Err(err) = run_app().await {
        error!("{err:#}");
    }
}

async fn run_app() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let launch = parse_launch_args(&args, generate_runtime_seed()).map_err(|err| anyhow!(err))?;
    let run_seed = launch.seed.value();
    match launch.seed {
        SeedChoice::Cli(seed) => info!(seed, "using seed from command line"),
        SeedChoice::Generated(seed) => info!(seed, "generated run seed"),
    }

    let config_path = launch.config_path.or_else(default_config_path);
    let config = load_config(config_path.as_deref()).context("loading game config")?;
    let mut run = Run::new(config, run_seed).context("generating the first level")?;

    let last_run_path = LastRunFile::get_default_path();
    let mut last_run = last_run_path.as_deref().and_then(|path| LastRunFile::load(path).ok());

    let mut app = AppState::new();
    let mut taffy = TaffyTree::new();
    let nodes = setup_layout(&mut taffy).context("building the screen layout")?;

    loop {
        let input = capture_frame_input();
        app.tick(&mut run, &input.keys_pressed, &input.keys_down, get_frame_time())
            .context("advancing the run")?;

        if app.finished_run.take().is_some()
            && let Some(record) = LastRunFile::from_run(&run, run_seed)
        {
            info!(
                level = record.level,
                score = record.score,
                reason = %record.reason_code,
                "run recorded"
            );
            if let Some(path) = last_run_path.as_deref()
                && let Err(err) = record.write_atomic(path)
            {
                warn!(path = %path.display(), "failed to save last run: {err}");
            }
            last_run = Some(record);
        }
        if app.quit_requested {
            break;
        }

        let layout = compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height())
            .context("computing the screen layout")?;
        ui_render::draw_frame(&run, &app, run_seed, last_run.as_ref(), &layout);
        next_frame().await;
    }
    Ok(())
}
