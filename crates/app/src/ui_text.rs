//! Text for the status bar, HUD, event log, and overlays.

use arena::{
    Game, LogEvent, PortfolioEntry, ProgressStore, RoomId, ZoneKind, content::class_stats,
};
use arena_app::app_loop::AppMode;
use arena_app::format_snapshot_hash;

pub fn status_text(mode: &AppMode, game: &Game) -> String {
    if matches!(mode, AppMode::ChoosingClass) {
        return "Choose your hero: 1 = Mage, 2 = Swordsman".to_string();
    }
    if let Some(text) = game.progress().notification() {
        return text.to_string();
    }
    if game.session().is_respawning() {
        return "Respawning...".to_string();
    }
    if game.portfolio_card().is_some() {
        return "Enter, E or Space to continue".to_string();
    }
    match game.nearest_door() {
        Some(door) => format!("E to use {}", door.id),
        None => "Arrows/WASD move, Space/F attack, C class".to_string(),
    }
}

pub fn hud_lines(game: &Game, run_seed: u64) -> Vec<String> {
    let progress = game.progress();
    let class = class_stats(progress.active_class());
    vec![
        game.room().title().to_string(),
        format!("Class: {}", class.label),
        format!("HP: {}/{}", progress.player_health(), progress.health().max()),
        format!("XP: {}  Coins: {}", progress.xp(), progress.coins()),
        format!("Enemies left: {}", game.alive_enemy_count()),
        format!("Cleared: {}/{}", progress.cleared_rooms().len(), RoomId::ALL.len() - 1),
        format!("Seed: {run_seed}"),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
    ]
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::RoomEntered { room } => format!("Entered {}", room.title()),
        LogEvent::AttackSwung { target: None, .. } => "Swing misses".to_string(),
        LogEvent::AttackSwung { target: Some(enemy), .. } => format!("Swing at {enemy}"),
        LogEvent::EnemyHit { enemy, damage, remaining } => {
            format!("{enemy} takes {damage} ({remaining} left)")
        }
        LogEvent::EnemyDefeated { enemy } => format!("{enemy} defeated"),
        LogEvent::PlayerStruck { damage, strikers: 1 } => format!("Struck for {damage}"),
        LogEvent::PlayerStruck { damage, strikers } => {
            format!("Struck by {strikers} for {damage}")
        }
        LogEvent::ZoneTick { zone, kind: ZoneKind::Hazard, amount } => {
            format!("{zone} burns for {amount}")
        }
        LogEvent::ZoneTick { zone, kind, amount } => format!("{zone} {kind:?} +{amount}"),
        LogEvent::PlayerRespawned { room } => format!("Respawned in {}", room.title()),
        LogEvent::PlayerRepositioned { .. } => "Back at the spawn point".to_string(),
        LogEvent::RoomCleared { room } => format!("{} cleared", room.title()),
        LogEvent::DoorRejected { door } => format!("{door} is sealed"),
        LogEvent::DoorUsed { door, target } => format!("{door} to {}", target.title()),
        LogEvent::PortfolioDismissed { room } => format!("Closed the {} card", room.title()),
        LogEvent::HeroChosen { class } => format!("Hero: {}", class_stats(*class).label),
        LogEvent::Notified { text } => text.clone(),
    }
}

/// Title, location and summary first, then highlights and the stack line.
pub fn portfolio_card_lines(entry: &PortfolioEntry) -> Vec<String> {
    let mut lines = vec![entry.title.to_string(), entry.location.to_string(), String::new()];
    lines.push(entry.summary.to_string());
    lines.push(String::new());
    lines.extend(entry.highlights.iter().map(|highlight| format!("- {highlight}")));
    lines.push(String::new());
    lines.push(format!("Stack: {}", entry.stack.join(", ")));
    lines
}
