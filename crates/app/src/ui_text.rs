//! Text for the HUD, the event log, and the menu screens.

use delve_core::{Run, RunEvent};

use crate::app_loop::AppMode;
use crate::last_run_file::LastRunFile;
use crate::{format_seed, format_snapshot_hash};

pub fn hud_lines(run: &Run) -> Vec<String> {
    let player = run.player();
    let mut lines = vec![
        format!("HP {}/{}", player.health.max(0), player.max_health),
        format!("Level {}/{}", run.level(), run.config().run.max_levels),
        format!("Score {}", player.score),
        format!("Enemies {}", run.enemies().count()),
    ];
    if !player.inventory.is_empty() {
        let names: Vec<String> = player.inventory.iter().map(|kind| format!("{kind:?}")).collect();
        lines.push(format!("Items: {}", names.join(", ")));
    }
    lines
}

pub fn event_line(event: &RunEvent) -> String {
    match event {
        RunEvent::LevelEntered { level, difficulty } => {
            format!("Entered level {level} (difficulty x{difficulty:.1})")
        }
        RunEvent::EnemyKilled { kind } => format!("Defeated a {kind:?}"),
        RunEvent::ItemCollected { kind } => format!("Picked up {kind:?}"),
        RunEvent::PlayerHit { damage, health } => format!("Hit for {damage}, {health} HP left"),
        RunEvent::Finished(outcome) => format!("Run over: {outcome:?}"),
    }
}

/// Centered lines for every screen except gameplay.
pub fn screen_lines(
    mode: AppMode,
    run: &Run,
    run_seed: u64,
    last_run: Option<&LastRunFile>,
) -> Vec<String> {
    match mode {
        AppMode::MainMenu => {
            let mut lines = vec![
                "DELVE".to_string(),
                "Enter: play   Esc: quit".to_string(),
                "Move: WASD/arrows   Attack: Space".to_string(),
                format!("Seed {}", format_seed(run_seed)),
            ];
            if let Some(last) = last_run {
                lines.push(format!(
                    "Last run: {} on level {}, score {}",
                    last.reason_code, last.level, last.score
                ));
            }
            lines
        }
        AppMode::GameOver | AppMode::Victory => {
            let title = if mode == AppMode::Victory { "VICTORY" } else { "GAME OVER" };
            vec![
                title.to_string(),
                format!("Score {}", run.player().score),
                format!("Level {}", run.level().min(run.config().run.max_levels)),
                format!("Snapshot {}", format_snapshot_hash(run.snapshot_hash())),
                "Enter: play again   Esc: menu".to_string(),
            ]
        }
        AppMode::Playing => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use delve_core::{DungeonConfig, EnemyKind, GameConfig, ItemKind, RunOutcome};

    use super::*;

    fn run() -> Run {
        let config =
            GameConfig { dungeon: DungeonConfig::with_size(30, 30, 16), ..Default::default() };
        Run::new(config, 4).expect("playable")
    }

    #[test]
    fn hud_shows_health_level_and_score() {
        let mut run = run();
        run.player_mut().health = -5;
        let lines = hud_lines(&run);
        assert_eq!(lines[0], "HP 0/100");
        assert_eq!(lines[1], "Level 1/5");
        assert_eq!(lines[2], "Score 0");
    }

    #[test]
    fn hud_lists_collected_items() {
        let mut run = run();
        run.player_mut().inventory = vec![ItemKind::Speed, ItemKind::Health];
        let lines = hud_lines(&run);
        assert_eq!(lines.last().map(String::as_str), Some("Items: Speed, Health"));
    }

    #[test]
    fn event_lines_read_naturally() {
        assert_eq!(
            event_line(&RunEvent::LevelEntered { level: 2, difficulty: 1.2 }),
            "Entered level 2 (difficulty x1.2)"
        );
        let killed = RunEvent::EnemyKilled { kind: EnemyKind::Ghost };
        assert_eq!(event_line(&killed), "Defeated a Ghost");
        assert_eq!(event_line(&RunEvent::Finished(RunOutcome::Defeat)), "Run over: Defeat");
    }

    #[test]
    fn main_menu_mentions_last_run_when_known() {
        let run = run();
        let last = LastRunFile {
            format_version: 1,
            run_seed: 1,
            level: 3,
            score: 140,
            reason_code: "DMG_HP_ZERO".to_string(),
            snapshot_hash_hex: format_snapshot_hash(0),
        };
        let lines = screen_lines(AppMode::MainMenu, &run, 77, Some(&last));
        assert!(lines.contains(&"Seed 77".to_string()));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Last run: DMG_HP_ZERO on level 3, score 140")
        );
        assert!(screen_lines(AppMode::Playing, &run, 77, None).is_empty());
    }

    #[test]
    fn end_screens_have_titles() {
        let run = run();
        assert_eq!(screen_lines(AppMode::Victory, &run, 1, None)[0], "VICTORY");
        assert_eq!(screen_lines(AppMode::GameOver, &run, 1, None)[0], "GAME OVER");
    }
}
