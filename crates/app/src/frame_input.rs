//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const MENU_KEYS: [KeyCode; 2] = [KeyCode::Enter, KeyCode::Escape];

const HELD_KEYS: [KeyCode; 9] = [
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::A,
    KeyCode::D,
    KeyCode::W,
    KeyCode::S,
    KeyCode::Space,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub keys_down: Vec<KeyCode>,
}

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = MENU_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect();
    let keys_down = HELD_KEYS.into_iter().filter(|&key| is_key_down(key)).collect();
    FrameInput { keys_pressed, keys_down }
}
