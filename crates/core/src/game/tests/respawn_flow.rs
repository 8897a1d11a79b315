//! Enemy strikes, the respawn lock and the delayed reposition.

use super::support::*;

/// Skeleton (6) and slime (4) parked next to the player: one strike tick deals 10.
fn flanked_game() -> Game {
    let content = arena_content(
        vec![
            template(32.0, 66.0, EnemyVariant::Skeleton),
            template(30.0, 70.0, EnemyVariant::Slime),
        ],
        Vec::new(),
    );
    let mut game = swordsman_game(&content);
    place_player(&mut game, Pos::new(30.0, 66.0), Facing::Right);
    game
}

#[test]
fn stacked_strikes_land_as_one_hit() {
    let mut game = flanked_game();
    game.advance(120);

    assert_eq!(game.progress().player_health(), 90);
    assert_eq!(
        count_events(&game, |e| matches!(e, LogEvent::PlayerStruck { damage: 10, strikers: 2 })),
        1
    );
    assert!(game.visuals().hit_flash);
    game.advance(180);
    assert!(!game.visuals().hit_flash);
}

#[test]
fn lethal_strike_respawns_once_then_repositions() {
    let mut game = flanked_game();
    set_player_health(&mut game, 3);

    game.advance(120);

    assert_eq!(game.progress().player_health(), 70);
    assert!(game.session().is_respawning());
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRespawned { .. })), 1);
    assert_eq!(game.progress().notification(), Some("Defeated. Respawned."));
    assert_eq!(game.player().pos, Pos::new(30.0, 66.0));

    game.advance(599);
    assert_eq!(game.player().pos, Pos::new(30.0, 66.0));
    game.advance(1);

    assert_eq!(game.player().pos, spawn());
    assert!(!game.session().is_respawning());
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRespawned { .. })), 1);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRepositioned { .. })), 1);
}

#[test]
fn respawn_lock_blocks_a_second_trigger_until_released() {
    let mut game = flanked_game();
    set_player_health(&mut game, 3);
    game.advance(120);

    game.progress.damage_player(500);
    game.check_respawn();
    assert_eq!(game.progress().player_health(), 0);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRespawned { .. })), 1);

    game.advance(600);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRespawned { .. })), 2);
    assert_eq!(game.progress().player_health(), 70);
    assert!(game.session().is_respawning());
}

#[test]
fn enemies_out_of_range_never_strike() {
    let content = arena_content(vec![template(80.0, 20.0, EnemyVariant::Bot)], Vec::new());
    let mut game = swordsman_game(&content);
    game.advance(5_000);
    assert_eq!(game.progress().player_health(), 100);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerStruck { .. })), 0);
}

#[test]
fn strike_cooldown_is_per_enemy() {
    let content = arena_content(vec![template(14.0, 66.0, EnemyVariant::Slime)], Vec::new());
    let mut game = swordsman_game(&content);

    game.advance(1_000);
    // Strikes at 120 and 1080 are 960ms apart; the one at 1080 is not reached yet.
    assert_eq!(game.progress().player_health(), 96);
    game.advance(80);
    assert_eq!(game.progress().player_health(), 92);
}
