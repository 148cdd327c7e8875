//! Summary of the most recent finished run, shown on the main menu.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use delve_core::Run;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{APP_NAME, format_snapshot_hash, reason_code};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LastRunFile {
    pub format_version: u32,
    pub run_seed: u64,
    pub level: u32,
    pub score: u32,
    pub reason_code: String,
    pub snapshot_hash_hex: String,
}

impl LastRunFile {
    /// `None` while the run is still in progress.
    pub fn from_run(run: &Run, run_seed: u64) -> Option<Self> {
        let outcome = run.outcome()?;
        Some(Self {
            format_version: FORMAT_VERSION,
            run_seed,
            level: run.level().min(run.config().run.max_levels),
            score: run.player().score,
            reason_code: reason_code(outcome).to_string(),
            snapshot_hash_hex: format_snapshot_hash(run.snapshot_hash()),
        })
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("last_run.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use delve_core::world::PlayerInput;
    use delve_core::{DungeonConfig, GameConfig, RunConfig};
    use tempfile::tempdir;

    use super::*;

    fn finished_run() -> Run {
        let config = GameConfig {
            dungeon: DungeonConfig::with_size(30, 30, 16),
            run: RunConfig { max_levels: 1, ..RunConfig::default() },
        };
        let mut run = Run::new(config, 9).expect("playable");
        let exit = run.dungeon().exit_pixel();
        run.player_mut().place_at(exit);
        run.update(0.0, PlayerInput::default()).expect("no regeneration on the last level");
        run
    }

    #[test]
    fn unfinished_runs_are_not_recorded() {
        let config =
            GameConfig { dungeon: DungeonConfig::with_size(30, 30, 16), ..Default::default() };
        let run = Run::new(config, 9).expect("playable");
        assert_eq!(LastRunFile::from_run(&run, 9), None);
    }

    #[test]
    fn victory_is_recorded_at_the_final_level() {
        let record = LastRunFile::from_run(&finished_run(), 9).expect("finished");
        assert_eq!(record.reason_code, "WIN_ALL_LEVELS");
        assert_eq!(record.level, 1);
        assert_eq!(record.snapshot_hash_hex.len(), 18);
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("last_run.json");
        let record = LastRunFile::from_run(&finished_run(), 9).expect("finished");

        record.write_atomic(&path).expect("write");
        assert_eq!(LastRunFile::load(&path).expect("load"), record);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_invalid_data() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("last_run.json");
        fs::write(&path, "{not json").expect("write");
        let err = LastRunFile::load(&path).expect_err("corrupt");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
