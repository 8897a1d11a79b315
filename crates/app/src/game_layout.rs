//! Layout model for the arena view and its side panels.

use arena::{ARENA_MAX, ARENA_MIN, Button, Direction, Pos};
use taffy::TaffyResult;
use taffy::TaffyTree;
use taffy::prelude::*;

/// Logical arena extent; positions are percentages of this square.
const ARENA_SPAN: f32 = 100.0;
const BUTTON_GAP: f32 = 8.0;
const BUTTON_MAX: f32 = 64.0;

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    arena: NodeId,
    side_col: NodeId,
    hud: NodeId,
    event_log: NodeId,
    controls: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

pub struct FrameLayout {
    pub status: PanelRect,
    pub arena: ArenaView,
    pub hud: PanelRect,
    pub event_log: PanelRect,
    pub controls: PanelRect,
}

/// The largest square inside the arena panel, centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaView {
    pub square: PanelRect,
}

impl ArenaView {
    pub fn fit(panel: PanelRect) -> Self {
        let side = panel.width.min(panel.height).max(0.0);
        let x = panel.x + (panel.width - side) / 2.0;
        let y = panel.y + (panel.height - side) / 2.0;
        Self { square: PanelRect { x, y, width: side, height: side } }
    }

    pub fn to_screen(&self, pos: Pos) -> (f32, f32) {
        (
            self.square.x + pos.x / ARENA_SPAN * self.square.width,
            self.square.y + pos.y / ARENA_SPAN * self.square.height,
        )
    }

    /// Converts an arena distance (radius, range) to pixels.
    pub fn scale(&self, units: f32) -> f32 {
        units / ARENA_SPAN * self.square.width
    }

    /// The walkable band inside the border.
    pub fn walkable(&self) -> PanelRect {
        let (x, y) = self.to_screen(Pos::new(ARENA_MIN, ARENA_MIN));
        let side = self.scale(ARENA_MAX - ARENA_MIN);
        PanelRect { x, y, width: side, height: side }
    }
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> TaffyResult<LayoutNodes> {
    let status = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(40.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(12.0) },
        ..Default::default()
    })?;
    let arena = taffy.new_leaf(Style { flex_grow: 2.0, ..Default::default() })?;
    let hud = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(170.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(12.0) },
        ..Default::default()
    })?;
    let event_log = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let side_col = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 1.0,
            margin: taffy::Rect { left: length(20.0), right: zero(), top: zero(), bottom: zero() },
            ..Default::default()
        },
        &[hud, event_log],
    )?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: auto() },
            flex_grow: 1.0,
            ..Default::default()
        },
        &[arena, side_col],
    )?;
    let controls = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(80.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: length(12.0), bottom: zero() },
        ..Default::default()
    })?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect {
                left: length(20.0),
                right: length(20.0),
                top: length(20.0),
                bottom: length(20.0),
            },
            ..Default::default()
        },
        &[status, main_row, controls],
    )?;
    Ok(LayoutNodes { root, status, main_row, arena, side_col, hud, event_log, controls })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> TaffyResult<FrameLayout> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_main = taffy.layout(nodes.main_row)?;
    let l_side = taffy.layout(nodes.side_col)?;

    Ok(FrameLayout {
        status: panel_rect(taffy.layout(nodes.status)?, &[l_root]),
        arena: ArenaView::fit(panel_rect(taffy.layout(nodes.arena)?, &[l_root, l_main])),
        hud: panel_rect(taffy.layout(nodes.hud)?, &[l_root, l_main, l_side]),
        event_log: panel_rect(taffy.layout(nodes.event_log)?, &[l_root, l_main, l_side]),
        controls: panel_rect(taffy.layout(nodes.controls)?, &[l_root]),
    })
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

/// On-screen buttons, left to right: the four step buttons, then attack,
/// door and dismiss.
pub fn control_buttons(panel: PanelRect) -> Vec<(Button, PanelRect)> {
    let buttons = [
        Button::Step(Direction::Left),
        Button::Step(Direction::Up),
        Button::Step(Direction::Down),
        Button::Step(Direction::Right),
        Button::Attack,
        Button::Door,
        Button::DismissPortfolio,
    ];
    let side = (panel.height - 2.0 * BUTTON_GAP).clamp(0.0, BUTTON_MAX);
    let y = panel.y + (panel.height - side) / 2.0;
    let mut x = panel.x + BUTTON_GAP;

    buttons
        .into_iter()
        .enumerate()
        .map(|(index, button)| {
            // Wider gap between the step pad and the action buttons.
            if index == 4 {
                x += side;
            }
            let rect = PanelRect { x, y, width: side, height: side };
            x += side + BUTTON_GAP;
            (button, rect)
        })
        .collect()
}

pub fn button_at(buttons: &[(Button, PanelRect)], x: f32, y: f32) -> Option<Button> {
    buttons.iter().find(|(_, rect)| rect.contains(x, y)).map(|(button, _)| *button)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed(width: f32, height: f32) -> FrameLayout {
        let mut taffy = TaffyTree::new();
        let nodes = setup_layout(&mut taffy).expect("layout nodes");
        compute_frame_layout(&mut taffy, &nodes, width, height).expect("frame layout")
    }

    #[test]
    fn arena_is_a_square_inside_the_window() {
        let layout = computed(1000.0, 750.0);
        let square = layout.arena.square;
        assert_eq!(square.width, square.height);
        assert!(square.width > 0.0);
        assert!(square.x >= 0.0 && square.x + square.width <= 1000.0);
        assert!(square.y + square.height <= layout.controls.y);
    }

    #[test]
    fn side_panels_sit_right_of_the_arena() {
        let layout = computed(1000.0, 750.0);
        assert!(layout.hud.x >= layout.arena.square.x + layout.arena.square.width);
        assert!(layout.event_log.y > layout.hud.y);
    }

    #[test]
    fn arena_coordinates_map_onto_the_square() {
        let view =
            ArenaView::fit(PanelRect { x: 10.0, y: 20.0, width: 400.0, height: 200.0 });
        assert_eq!(view.square, PanelRect { x: 110.0, y: 20.0, width: 200.0, height: 200.0 });
        assert_eq!(view.to_screen(Pos::new(50.0, 50.0)), (210.0, 120.0));
        assert_eq!(view.scale(10.0), 20.0);
    }

    #[test]
    fn buttons_do_not_overlap_and_hit_test() {
        let panel = PanelRect { x: 0.0, y: 0.0, width: 900.0, height: 80.0 };
        let buttons = control_buttons(panel);
        assert_eq!(buttons.len(), 7);
        for pair in buttons.windows(2) {
            assert!(pair[0].1.x + pair[0].1.width < pair[1].1.x);
        }
        let (attack, rect) = buttons[4];
        assert_eq!(attack, Button::Attack);
        let hit = button_at(&buttons, rect.x + 1.0, rect.y + 1.0);
        assert_eq!(hit, Some(Button::Attack));
        assert_eq!(button_at(&buttons, 899.0, 1.0), None);
    }
}
