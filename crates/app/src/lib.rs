pub mod app_loop;
pub mod camera;
pub mod last_run_file;
pub mod seed;
pub mod settings;
pub mod sprites;
pub mod ui_text;

use delve_core::RunOutcome;

pub const APP_NAME: &str = "Delve";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

pub fn reason_code(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Victory => "WIN_ALL_LEVELS",
        RunOutcome::Defeat => "DMG_HP_ZERO",
    }
}
