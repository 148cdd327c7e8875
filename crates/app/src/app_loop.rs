use std::collections::VecDeque;

use delve_core::world::PlayerInput;
use delve_core::{GenerationError, Run, RunEvent, RunOutcome};
use macroquad::prelude::KeyCode;
use tracing::info;

/// Events kept for the HUD log.
pub const RECENT_EVENT_LIMIT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    MainMenu,
    Playing,
    GameOver,
    Victory,
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    pub quit_requested: bool,
    /// Set on the frame a run ends, cleared once the caller has persisted it.
    pub finished_run: Option<RunOutcome>,
    pub recent_events: VecDeque<RunEvent>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one frame. `keys_pressed` holds keys that went down this
    /// frame, `keys_down` every key currently held.
    pub fn tick(
        &mut self,
        run: &mut Run,
        keys_pressed: &[KeyCode],
        keys_down: &[KeyCode],
        dt: f32,
    ) -> Result<(), GenerationError> {
        match self.mode {
            AppMode::MainMenu => {
                if keys_pressed.contains(&KeyCode::Enter) {
                    if run.outcome().is_some() {
                        self.restart(run)?;
                    }
                    self.mode = AppMode::Playing;
                } else if keys_pressed.contains(&KeyCode::Escape) {
                    self.quit_requested = true;
                }
            }
            AppMode::Playing => {
                if keys_pressed.contains(&KeyCode::Escape) {
                    self.mode = AppMode::MainMenu;
                    return Ok(());
                }
                run.update(dt, player_input(keys_down))?;
                self.record_events(run.drain_events());
                if let Some(outcome) = run.outcome() {
                    self.finished_run = Some(outcome);
                    self.mode = match outcome {
                        RunOutcome::Victory => AppMode::Victory,
                        RunOutcome::Defeat => AppMode::GameOver,
                    };
                }
            }
            AppMode::GameOver | AppMode::Victory => {
                if keys_pressed.contains(&KeyCode::Enter) {
                    self.restart(run)?;
                    self.mode = AppMode::Playing;
                } else if keys_pressed.contains(&KeyCode::Escape) {
                    self.restart(run)?;
                    self.mode = AppMode::MainMenu;
                }
            }
        }
        Ok(())
    }

    fn restart(&mut self, run: &mut Run) -> Result<(), GenerationError> {
        info!(previous = ?self.mode, "restarting run");
        run.restart()?;
        self.recent_events.clear();
        self.record_events(run.drain_events());
        Ok(())
    }

    fn record_events(&mut self, events: Vec<RunEvent>) {
        for event in events {
            if self.recent_events.len() == RECENT_EVENT_LIMIT {
                self.recent_events.pop_front();
            }
            self.recent_events.push_back(event);
        }
    }
}

/// Arrow keys or WASD move, Space attacks.
pub fn player_input(keys_down: &[KeyCode]) -> PlayerInput {
    let held = |keys: [KeyCode; 2]| keys.iter().any(|key| keys_down.contains(key));
    let axis = |negative: bool, positive: bool| f32::from(i8::from(positive) - i8::from(negative));
    PlayerInput {
        dx: axis(held([KeyCode::Left, KeyCode::A]), held([KeyCode::Right, KeyCode::D])),
        dy: axis(held([KeyCode::Up, KeyCode::W]), held([KeyCode::Down, KeyCode::S])),
        attack: keys_down.contains(&KeyCode::Space),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel_out() {
        let input = player_input(&[KeyCode::A, KeyCode::Right, KeyCode::S]);
        assert_eq!(input.dx, 0.0);
        assert_eq!(input.dy, 1.0);
        assert!(!input.attack);
    }

    #[test]
    fn arrows_and_space_map_to_movement_and_attack() {
        let input = player_input(&[KeyCode::Left, KeyCode::Up, KeyCode::Space]);
        assert_eq!(input, PlayerInput { dx: -1.0, dy: -1.0, attack: true });
    }

    #[test]
    fn event_log_keeps_only_recent_entries() {
        let mut app = AppState::new();
        let events = (1..=10).map(|level| RunEvent::LevelEntered { level, difficulty: 1.0 });
        app.record_events(events.collect());
        assert_eq!(app.recent_events.len(), RECENT_EVENT_LIMIT);
        assert_eq!(
            app.recent_events.front(),
            Some(&RunEvent::LevelEntered { level: 5, difficulty: 1.0 })
        );
    }
}
