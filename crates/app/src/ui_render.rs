//! Rendering for the arena frame: primitive shapes only, no sprites.

use crate::game_layout::{ArenaView, FrameLayout, PanelRect, control_buttons};
use crate::ui_text::{event_log_line, hud_lines, portfolio_card_lines, status_text};
use arena::{
    Button, Direction, DoorNode, EnemyVariant, Facing, Game, ZoneKind, content::class_stats,
};
use arena_app::app_loop::{AppMode, AppState};
use macroquad::prelude::*;

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const FLOOR_COLOR: Color = Color { r: 0.08, g: 0.1, b: 0.09, a: 1.0 };
const HIT_FLASH_COLOR: Color = Color { r: 0.9, g: 0.1, b: 0.1, a: 0.25 };
const SHADE_COLOR: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.7 };
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_STEP: f32 = 20.0;
const FONT_SIZE: f32 = 18.0;
const PLAYER_RADIUS: f32 = 2.6;
const ENEMY_RADIUS: f32 = 2.2;
const DOOR_HALF: f32 = 3.0;

pub fn draw_frame(game: &Game, app_state: &AppState, run_seed: u64, layout: &FrameLayout) {
    draw_status_bar(game, app_state, layout.status);
    draw_arena(game, layout.arena);
    draw_text_panel(&hud_lines(game, run_seed), layout.hud, WHITE);
    draw_event_log(game, layout.event_log);
    draw_controls(layout.controls);

    match app_state.mode {
        AppMode::ChoosingClass => draw_class_menu(layout.arena.square),
        AppMode::Playing => {
            if let Some(entry) = game.portfolio_card() {
                draw_overlay(&portfolio_card_lines(entry), layout.arena.square);
            }
        }
    }
}

fn draw_status_bar(game: &Game, app_state: &AppState, panel: PanelRect) {
    draw_rectangle_lines(panel.x, panel.y, panel.width, panel.height, 1.0, BORDER_COLOR);
    draw_text(
        &status_text(&app_state.mode, game),
        panel.x + PANEL_PAD_X,
        panel.y + PANEL_PAD_Y,
        20.0,
        YELLOW,
    );
}

fn draw_arena(game: &Game, view: ArenaView) {
    let square = view.square;
    draw_rectangle(square.x, square.y, square.width, square.height, FLOOR_COLOR);
    let walkable = view.walkable();
    draw_rectangle_lines(
        walkable.x,
        walkable.y,
        walkable.width,
        walkable.height,
        2.0,
        BORDER_COLOR,
    );

    let layout = game.room_layout();
    for zone in &layout.zones {
        let (x, y) = view.to_screen(zone.pos);
        draw_circle(x, y, view.scale(zone.radius), zone_color(zone.kind));
    }

    let highlighted = game.nearest_door().map(|door| door.id);
    let cleared = game.is_room_cleared();
    for door in &layout.doors {
        let (x, y) = view.to_screen(door.pos);
        let half = view.scale(DOOR_HALF);
        let color = door_color(door, cleared, highlighted == Some(door.id));
        draw_rectangle(x - half, y - half * 2.0, half * 2.0, half * 4.0, color);
    }

    for enemy in game.enemies().iter().filter(|enemy| enemy.is_alive()) {
        let (x, y) = view.to_screen(enemy.pos);
        let radius = view.scale(ENEMY_RADIUS);
        draw_circle(x, y, radius, enemy_color(enemy.variant));
        let fraction = health_fraction(enemy.health.current(), enemy.health.max());
        draw_rectangle(x - radius, y - radius * 1.8, radius * 2.0, 3.0, DARKGRAY);
        draw_rectangle(x - radius, y - radius * 1.8, radius * 2.0 * fraction, 3.0, GREEN);
    }

    draw_player(game, view);

    if game.visuals().hit_flash {
        draw_rectangle(square.x, square.y, square.width, square.height, HIT_FLASH_COLOR);
    }
}

fn draw_player(game: &Game, view: ArenaView) {
    let player = game.player();
    let (x, y) = view.to_screen(player.pos);
    let radius = view.scale(PLAYER_RADIUS);
    let color = if game.session().is_respawning() { GRAY } else { SKYBLUE };
    draw_circle(x, y, radius, color);
    let nose = facing_offset(player.facing, radius);
    draw_circle(x + nose, y, radius * 0.35, WHITE);

    if game.visuals().slash {
        let tuning = game.tuning();
        let reach = player.pos.offset(player.facing.sign() * tuning.strike_offset, 0.0);
        let (sx, sy) = view.to_screen(reach);
        let range = view.scale(class_stats(game.progress().active_class()).attack_range);
        draw_line(x, y, sx, sy, 3.0, ORANGE);
        draw_circle_lines(sx, sy, range, 1.5, ORANGE);
    }
}

fn draw_event_log(game: &Game, panel: PanelRect) {
    let lines: Vec<String> = game.log().iter().map(event_log_line).collect();
    let visible = tail_lines_for_panel(&lines, panel.height, LINE_STEP, PANEL_PAD_Y);
    draw_text_panel(&visible, panel, LIGHTGRAY);
}

fn draw_text_panel(lines: &[String], panel: PanelRect, color: Color) {
    draw_rectangle_lines(panel.x, panel.y, panel.width, panel.height, 1.0, BORDER_COLOR);
    let mut text_y = panel.y + PANEL_PAD_Y;
    for line in lines {
        draw_text(line, panel.x + PANEL_PAD_X, text_y, FONT_SIZE, color);
        text_y += LINE_STEP;
    }
}

fn draw_controls(panel: PanelRect) {
    for (button, rect) in control_buttons(panel) {
        draw_rectangle(rect.x, rect.y, rect.width, rect.height, BORDER_COLOR);
        draw_rectangle_lines(rect.x, rect.y, rect.width, rect.height, 1.0, LIGHTGRAY);
        let label = button_label(button);
        let size = measure_text(label, None, 18, 1.0);
        draw_text(
            label,
            rect.x + (rect.width - size.width) / 2.0,
            rect.y + (rect.height + size.height) / 2.0,
            18.0,
            WHITE,
        );
    }
}

fn draw_class_menu(area: PanelRect) {
    let lines: Vec<String> = [
        "Choose your hero",
        "",
        "1  Mage: long reach, light hits",
        "2  Swordsman: short reach, heavy hits",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect();
    draw_overlay(&lines, area);
}

fn draw_overlay(lines: &[String], area: PanelRect) {
    draw_rectangle(area.x, area.y, area.width, area.height, SHADE_COLOR);
    let card = PanelRect {
        x: area.x + area.width * 0.1,
        y: area.y + area.height * 0.15,
        width: area.width * 0.8,
        height: area.height * 0.7,
    };
    draw_rectangle(card.x, card.y, card.width, card.height, FLOOR_COLOR);
    draw_text_panel(lines, card, WHITE);
}

pub(crate) fn zone_color(kind: ZoneKind) -> Color {
    match kind {
        ZoneKind::Hazard => Color { r: 0.8, g: 0.2, b: 0.1, a: 0.35 },
        ZoneKind::Heal => Color { r: 0.2, g: 0.8, b: 0.3, a: 0.35 },
        ZoneKind::Boost => Color { r: 0.2, g: 0.5, b: 0.9, a: 0.35 },
    }
}

pub(crate) fn enemy_color(variant: EnemyVariant) -> Color {
    match variant {
        EnemyVariant::Slime => LIME,
        EnemyVariant::Skeleton => BEIGE,
        EnemyVariant::Bot => VIOLET,
    }
}

/// Sealed doors are dim until the room is cleared; the door in reach glows.
pub(crate) fn door_color(door: &DoorNode, room_cleared: bool, in_reach: bool) -> Color {
    if door.locked_by_clear && !room_cleared {
        DARKBROWN
    } else if in_reach {
        GOLD
    } else {
        BROWN
    }
}

pub(crate) fn health_fraction(current: u32, max: u32) -> f32 {
    if max == 0 { 0.0 } else { (current as f32 / max as f32).clamp(0.0, 1.0) }
}

fn facing_offset(facing: Facing, radius: f32) -> f32 {
    facing.sign() * radius * 0.6
}

pub(crate) fn button_label(button: Button) -> &'static str {
    match button {
        Button::Step(Direction::Up) => "Up",
        Button::Step(Direction::Down) => "Down",
        Button::Step(Direction::Left) => "Left",
        Button::Step(Direction::Right) => "Right",
        Button::Attack => "Hit",
        Button::Door => "Door",
        Button::DismissPortfolio => "OK",
    }
}

/// Keeps the newest lines that fit, oldest first.
pub(crate) fn tail_lines_for_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }
    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    let skip = lines.len().saturating_sub(max_lines);
    lines[skip..].to_vec()
}
