//! Room clear detection, door gating, room transitions and the portfolio card.

use std::collections::BTreeSet;

use super::support::*;
use crate::checkpoint::Checkpoint;
use crate::content::keys::{DOOR_NEXT, DOOR_PREV};

fn lone_slime_game() -> Game {
    let content = arena_content(vec![template(50.0, 20.0, EnemyVariant::Slime)], Vec::new());
    swordsman_game(&content)
}

fn checkpoint_with(room: RoomId, defeated: &[EnemyId]) -> Checkpoint {
    Checkpoint {
        current_room: room,
        defeated_enemies: defeated.iter().copied().collect::<BTreeSet<_>>(),
        ..Checkpoint::default()
    }
}

#[test]
fn gated_door_rejects_while_an_enemy_lives() {
    let mut game = lone_slime_game();
    place_player(&mut game, Pos::new(88.0, 50.0), Facing::Right);
    assert_eq!(game.nearest_door().map(|door| door.id), Some(DOOR_NEXT));

    let outcome = press(&mut game, Key::E);

    assert_eq!(outcome, ActionOutcome::Door(DoorOutcome::Locked));
    assert_eq!(game.room(), RoomId::ForestGate);
    assert_eq!(game.progress().current_room(), RoomId::ForestGate);
    assert_eq!(game.progress().notification(), Some("Defeat all enemies."));
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::DoorRejected { .. })), 1);
}

#[test]
fn cleared_room_door_enters_the_next_room_at_spawn() {
    let mut game = lone_slime_game();
    place_player(&mut game, Pos::new(40.0, 20.0), Facing::Right);
    press(&mut game, Key::Space);
    assert!(game.is_room_cleared());

    place_player(&mut game, Pos::new(86.0, 48.0), Facing::Right);
    let outcome = press(&mut game, Key::Enter);

    assert_eq!(outcome, ActionOutcome::Door(DoorOutcome::Entered(RoomId::IronBastion)));
    assert_eq!(game.room(), RoomId::IronBastion);
    assert_eq!(game.progress().current_room(), RoomId::IronBastion);
    assert_eq!(game.player().pos, spawn());
    assert_eq!(game.player().facing, Facing::Right);
    assert_eq!(game.alive_enemy_count(), 3);
}

#[test]
fn leaving_a_room_drops_its_pending_timers() {
    let mut game = lone_slime_game();
    place_player(&mut game, Pos::new(40.0, 20.0), Facing::Right);
    press(&mut game, Key::Space);
    assert!(game.session().scheduler().due_at(TaskKind::SlashReset).is_some());

    game.use_door(DOOR_NEXT).expect("door exists");

    assert_eq!(game.session().scheduler().due_at(TaskKind::SlashReset), None);
    assert_eq!(game.session().scheduler().due_at(TaskKind::AttackPoseReset), None);
    assert!(!game.player().attacking);
    assert!(!game.visuals().slash);
}

#[test]
fn ungated_door_is_always_usable() {
    let content = ContentPack::build_default();
    let mut game = Game::from_checkpoint(1, &content, &checkpoint_with(RoomId::IronBastion, &[]));
    assert!(!game.is_room_cleared());

    let outcome = game.use_door(DOOR_PREV).expect("door exists");
    assert_eq!(outcome, DoorOutcome::Entered(RoomId::ForestGate));
    assert_eq!(game.room(), RoomId::ForestGate);
}

#[test]
fn unknown_door_is_an_error() {
    let mut game = lone_slime_game();
    assert_eq!(game.use_door("door-up"), Err(GameError::UnknownDoor("door-up".to_string())));
    assert_eq!(game.use_door(DOOR_PREV), Err(GameError::UnknownDoor(DOOR_PREV.to_string())));
}

#[test]
fn interact_without_nearby_door_does_nothing() {
    let mut game = lone_slime_game();
    assert_eq!(press(&mut game, Key::E), ActionOutcome::Door(DoorOutcome::NoDoorInRange));
    assert_eq!(game.room(), RoomId::ForestGate);
}

#[test]
fn restored_defeats_reconstruct_dead_enemies() {
    let content = ContentPack::build_default();
    let first = EnemyId::new(RoomId::ForestGate, 0);
    let game = Game::from_checkpoint(1, &content, &checkpoint_with(RoomId::ForestGate, &[first]));

    let enemy = &game.enemies()[0];
    assert_eq!(enemy.id, first);
    assert!(!enemy.is_alive());
    assert_eq!(enemy.health.current(), 0);
    assert!(game.enemies()[1].is_alive());
    assert!(!game.is_room_cleared());
    assert_eq!(game.progress().notification(), Some("Checkpoint loaded."));
}

#[test]
fn restoring_the_last_defeat_clears_the_room_on_entry() {
    let content = ContentPack::build_default();
    let defeated = [EnemyId::new(RoomId::ForestGate, 0), EnemyId::new(RoomId::ForestGate, 1)];
    let game = Game::from_checkpoint(1, &content, &checkpoint_with(RoomId::ForestGate, &defeated));

    assert!(game.is_room_cleared());
    assert!(game.progress().cleared_rooms().contains(&RoomId::ForestGate));
    assert_eq!(game.progress().xp(), 2);
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::RoomCleared { .. })), 1);
}

#[test]
fn portfolio_card_freezes_the_arena_until_confirmed() {
    let content = ContentPack::build_default();
    let defeated = [EnemyId::new(RoomId::ForestGate, 0), EnemyId::new(RoomId::ForestGate, 1)];
    let checkpoint = checkpoint_with(RoomId::ForestGate, &defeated);
    let mut game = Game::from_checkpoint(1, &content, &checkpoint);
    assert_eq!(game.portfolio_card().map(|entry| entry.location), Some("Forest Gate"));

    assert_eq!(press(&mut game, Key::D), ActionOutcome::Ignored);
    assert_eq!(press(&mut game, Key::F), ActionOutcome::Ignored);
    assert_eq!(
        game.handle_input(InputEvent::press(Button::Step(Direction::Right))),
        ActionOutcome::Ignored
    );
    assert_eq!(game.use_door(DOOR_NEXT), Ok(DoorOutcome::Frozen));
    game.advance(500);
    assert_eq!(game.player().pos, spawn());

    assert_eq!(press(&mut game, Key::Space), ActionOutcome::PortfolioDismissed);
    assert!(game.portfolio_card().is_none());
    assert!(game.progress().shown_portfolio_rooms().contains(&RoomId::ForestGate));

    game.use_door(DOOR_NEXT).expect("door exists");
    game.use_door(DOOR_PREV).expect("door exists");
    assert_eq!(game.room(), RoomId::ForestGate);
    assert!(game.portfolio_card().is_none());
}

#[test]
fn dismiss_button_only_acts_while_card_is_showing() {
    let mut game = lone_slime_game();
    assert_eq!(
        game.handle_input(InputEvent::press(Button::DismissPortfolio)),
        ActionOutcome::Ignored
    );
    assert!(game.progress().shown_portfolio_rooms().is_empty());
}

#[test]
fn final_room_is_cleared_without_a_recorded_clear() {
    let content = ContentPack::build_default().without_portfolio();
    let game = Game::from_checkpoint(1, &content, &checkpoint_with(RoomId::PortalNexus, &[]));

    assert!(game.is_room_cleared());
    assert!(game.enemies().is_empty());
    assert!(!game.progress().cleared_rooms().contains(&RoomId::PortalNexus));
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::RoomCleared { .. })), 0);
}

#[test]
fn restoring_an_empty_health_bar_respawns_even_in_a_quiet_room() {
    let content = ContentPack::build_default().without_portfolio();
    let mut checkpoint = checkpoint_with(RoomId::PortalNexus, &[]);
    checkpoint.hud_stats.hp = 0;
    let mut game = Game::from_checkpoint(1, &content, &checkpoint);

    assert!(game.session().is_respawning());
    assert_eq!(game.progress().player_health(), game.tuning().respawn_health);
    assert_eq!(game.progress().notification(), Some("Defeated. Respawned."));
    assert_eq!(count_events(&game, |e| matches!(e, LogEvent::PlayerRespawned { .. })), 1);

    game.advance(game.tuning().respawn_delay_ms);
    assert!(!game.session().is_respawning());
    assert_eq!(game.player().pos, spawn());
}

#[test]
fn class_choice_logs_the_notification_it_raises() {
    let content = ContentPack::build_default();
    let game = swordsman_game(&content);

    assert_eq!(game.progress().notification(), Some("Swordsman ready."));
    let logged: Vec<&str> = game
        .log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::Notified { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(logged, ["Swordsman ready."]);
}
