//! Keyboard and pointer input collection for one rendered frame.

use crate::game_layout::{FrameLayout, button_at, control_buttons};
use arena_app::app_loop::FrameKeys;
use arena_app::key_map::ARENA_KEYS;
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_pressed, is_key_released, is_mouse_button_pressed,
    mouse_position,
};

/// Keys that only drive the shell (class menu), never the arena.
const SHELL_KEYS: [KeyCode; 4] = [KeyCode::Key1, KeyCode::Key2, KeyCode::C, KeyCode::Escape];

pub fn capture_frame_input(layout: &FrameLayout) -> FrameKeys {
    let mut frame = FrameKeys::default();

    for key in ARENA_KEYS.into_iter().chain([KeyCode::KpEnter]).chain(SHELL_KEYS) {
        if is_key_pressed(key) {
            frame.pressed.push(key);
        }
        if is_key_released(key) {
            frame.released.push(key);
        }
    }

    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        if let Some(button) = button_at(&control_buttons(layout.controls), x, y) {
            frame.buttons.push(button);
        }
    }

    frame
}
