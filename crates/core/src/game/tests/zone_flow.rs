//! Periodic hazard and heal ticks.

use super::support::*;
use crate::checkpoint::{Checkpoint, HudStats};

fn zoned_game(kind: ZoneKind) -> Game {
    let content = arena_content(Vec::new(), vec![zone("pad", 50.0, 50.0, 6.0, kind)]);
    let mut game = swordsman_game(&content);
    place_player(&mut game, Pos::new(52.0, 50.0), Facing::Right);
    game
}

#[test]
fn hazard_damages_every_zone_tick() {
    let mut game = zoned_game(ZoneKind::Hazard);
    game.advance(499);
    assert_eq!(game.progress().player_health(), 100);
    game.advance(1);
    assert_eq!(game.progress().player_health(), 96);
    game.advance(1_000);
    assert_eq!(game.progress().player_health(), 88);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::ZoneTick { zone: "pad", .. })), 3);
}

#[test]
fn heal_restores_up_to_max() {
    let mut game = zoned_game(ZoneKind::Heal);
    set_player_health(&mut game, 95);
    game.advance(500);
    assert_eq!(game.progress().player_health(), 98);
    game.advance(1_000);
    assert_eq!(game.progress().player_health(), 100);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::ZoneTick { .. })), 2);
}

#[test]
fn boost_zone_has_no_health_effect() {
    let mut game = zoned_game(ZoneKind::Boost);
    set_player_health(&mut game, 50);
    game.advance(2_000);
    assert_eq!(game.progress().player_health(), 50);
}

#[test]
fn leaving_the_zone_stops_the_effect() {
    let mut game = zoned_game(ZoneKind::Hazard);
    game.advance(500);
    place_player(&mut game, Pos::new(70.0, 50.0), Facing::Right);
    game.advance(2_000);
    assert_eq!(game.progress().player_health(), 96);
}

#[test]
fn hazard_to_zero_triggers_respawn() {
    let mut game = zoned_game(ZoneKind::Hazard);
    set_player_health(&mut game, 4);
    game.advance(500);
    assert_eq!(game.progress().player_health(), 70);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRespawned { .. })), 1);
    game.advance(600);
    assert_eq!(game.player().pos, spawn());
}

#[test]
fn portfolio_card_pauses_zone_effects() {
    let content = ContentPack::build_default();
    let defeated = [EnemyId::new(RoomId::ForestGate, 0), EnemyId::new(RoomId::ForestGate, 1)];
    let checkpoint = Checkpoint {
        defeated_enemies: defeated.into_iter().collect(),
        hud_stats: HudStats { hp: 50, xp: 0, coins: 0 },
        ..Checkpoint::default()
    };
    let mut game = Game::from_checkpoint(5, &content, &checkpoint);
    let spring = content.room(RoomId::ForestGate).zones[0];
    assert_eq!(spring.kind, ZoneKind::Heal);
    place_player(&mut game, spring.pos, Facing::Right);
    assert!(game.is_frozen());

    game.advance(1_000);
    assert_eq!(game.progress().player_health(), 50);

    press(&mut game, Key::Enter);
    game.advance(500);
    assert_eq!(game.progress().player_health(), 53);
}
