//! Shared fixtures for the `game` test suites.

use super::*;
use crate::content::{EnemyTemplate, SPAWN_POINT, Zone};

/// Room 0 with the given enemies and zones, default doors, calm enemies and
/// no portfolio entries.
pub(super) fn arena_content(enemies: Vec<EnemyTemplate>, zones: Vec<Zone>) -> ContentPack {
    let base = ContentPack::build_default();
    let mut layout = base.room(RoomId::ForestGate).clone();
    layout.enemies = enemies;
    layout.zones = zones;
    layout.behavior = RoomBehavior { aggression: 0.0, jitter: 0.0 };
    base.with_room(layout).without_portfolio()
}

pub(super) fn template(x: f32, y: f32, variant: EnemyVariant) -> EnemyTemplate {
    EnemyTemplate { pos: Pos::new(x, y), variant }
}

pub(super) fn zone(id: &'static str, x: f32, y: f32, radius: f32, kind: ZoneKind) -> Zone {
    Zone { id, pos: Pos::new(x, y), radius, kind }
}

pub(super) fn swordsman_game(content: &ContentPack) -> Game {
    let mut game = Game::new(7, content);
    game.choose_hero_class(HeroClass::Swordsman);
    game
}

pub(super) fn place_player(game: &mut Game, pos: Pos, facing: Facing) {
    game.session.player.pos = pos;
    game.session.player.facing = facing;
}

pub(super) fn set_player_health(game: &mut Game, hp: u32) {
    game.progress.restore_player_health(hp);
}

pub(super) fn press(game: &mut Game, key: Key) -> ActionOutcome {
    game.handle_input(InputEvent::key_down(key))
}

pub(super) fn count_events(game: &Game, matches: impl Fn(&LogEvent) -> bool) -> usize {
    game.log().iter().filter(|event| matches(event)).count()
}

pub(super) fn spawn() -> Pos {
    SPAWN_POINT
}
