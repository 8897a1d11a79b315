use crate::key_map::arena_key;
use arena::{Button, Checkpoint, Game, HeroClass, InputEvent};
use macroquad::prelude::KeyCode;

/// Longest slice of simulated time one frame may consume. Longer stalls
/// (window drags, breakpoints) are dropped instead of replayed.
pub const MAX_FRAME_MS: u64 = 100;

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    ChoosingClass,
    Playing,
}

/// Everything the window reported for one frame.
#[derive(Debug, Default)]
pub struct FrameKeys {
    pub pressed: Vec<KeyCode>,
    pub released: Vec<KeyCode>,
    pub buttons: Vec<Button>,
    /// Set while a text field owns keyboard focus.
    pub typing: bool,
}

impl FrameKeys {
    pub fn pressed(keys: &[KeyCode]) -> Self {
        Self { pressed: keys.to_vec(), ..Self::default() }
    }
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    saved_revision: u64,
}

impl AppState {
    /// Runs that already picked a class go straight to play.
    pub fn new(game: &Game) -> Self {
        let mode = match game.progress().hero_class() {
            Some(_) => AppMode::Playing,
            None => AppMode::ChoosingClass,
        };
        Self { mode, saved_revision: game.progress().revision() }
    }

    /// Process input and advance the clock for a single frame. Returns the
    /// checkpoint to persist when progress changed during the frame.
    pub fn tick(&mut self, game: &mut Game, frame: &FrameKeys, dt_ms: u64) -> Option<Checkpoint> {
        match self.mode {
            AppMode::ChoosingClass => self.choose_class(game, &frame.pressed),
            AppMode::Playing => {
                if frame.pressed.contains(&KeyCode::C) && !frame.typing {
                    game.release_held_keys();
                    self.mode = AppMode::ChoosingClass;
                } else {
                    forward_input(game, frame);
                    game.advance(dt_ms.min(MAX_FRAME_MS));
                }
            }
        }
        self.take_dirty_checkpoint(game)
    }

    fn choose_class(&mut self, game: &mut Game, keys_pressed: &[KeyCode]) {
        let class = if keys_pressed.contains(&KeyCode::Key1) {
            Some(HeroClass::Mage)
        } else if keys_pressed.contains(&KeyCode::Key2) {
            Some(HeroClass::Swordsman)
        } else {
            None
        };

        if let Some(class) = class {
            game.choose_hero_class(class);
            self.mode = AppMode::Playing;
        } else if keys_pressed.contains(&KeyCode::Escape) && game.progress().hero_class().is_some()
        {
            self.mode = AppMode::Playing;
        }
    }

    fn take_dirty_checkpoint(&mut self, game: &Game) -> Option<Checkpoint> {
        let revision = game.progress().revision();
        if revision == self.saved_revision {
            return None;
        }
        self.saved_revision = revision;
        Some(game.checkpoint())
    }
}

fn forward_input(game: &mut Game, frame: &FrameKeys) {
    let tag = |event: InputEvent| if frame.typing { event.typed() } else { event };
    for key in frame.released.iter().filter_map(|&code| arena_key(code)) {
        game.handle_input(tag(InputEvent::key_up(key)));
    }
    for key in frame.pressed.iter().filter_map(|&code| arena_key(code)) {
        game.handle_input(tag(InputEvent::key_down(key)));
    }
    for &button in &frame.buttons {
        game.handle_input(InputEvent::press(button));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena::ContentPack;

    #[test]
    fn fresh_run_starts_on_class_choice() {
        let content = ContentPack::default();
        let game = Game::new(1, &content);
        assert_eq!(AppState::new(&game).mode, AppMode::ChoosingClass);
    }

    #[test]
    fn clock_does_not_run_while_choosing() {
        let content = ContentPack::default();
        let mut game = Game::new(1, &content);
        let mut app = AppState::new(&game);
        app.tick(&mut game, &FrameKeys::default(), 50);
        assert_eq!(game.clock_ms(), 0);
    }

    #[test]
    fn long_frames_are_capped() {
        let content = ContentPack::default();
        let mut game = Game::new(1, &content);
        let mut app = AppState::new(&game);
        app.tick(&mut game, &FrameKeys::pressed(&[KeyCode::Key2]), 16);
        app.tick(&mut game, &FrameKeys::default(), 5_000);
        assert_eq!(game.clock_ms(), MAX_FRAME_MS);
    }
}
