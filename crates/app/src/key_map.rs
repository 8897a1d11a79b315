//! Translation from window key codes to arena keys.

use arena::Key;
use macroquad::prelude::KeyCode;

/// Every window key the arena reacts to, in capture order.
pub const ARENA_KEYS: [KeyCode; 12] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Space,
    KeyCode::F,
    KeyCode::E,
    KeyCode::Enter,
];

pub fn arena_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::W => Key::W,
        KeyCode::A => Key::A,
        KeyCode::S => Key::S,
        KeyCode::D => Key::D,
        KeyCode::Space => Key::Space,
        KeyCode::F => Key::F,
        KeyCode::E => Key::E,
        KeyCode::Enter | KeyCode::KpEnter => Key::Enter,
        _ => return None,
    };
    Some(key)
}
