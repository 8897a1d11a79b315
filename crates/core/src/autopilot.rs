//! Scripted player used by the headless tools and long-running tests.
//!
//! Each call looks at the current game and returns the input events a player
//! would send this frame: dismiss any card, chase the nearest living enemy and
//! swing at it, then walk to the next door once the room is clear.

use crate::content::keys;
use crate::game::Game;
use crate::types::{Button, Direction, Facing, InputEvent, Key, Pos, RoomId};

const ATTACK_SLACK_X: f32 = 8.0;
const ALIGN_SLACK_Y: f32 = 1.0;
const DOOR_SLACK: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Goal {
    Enemy(Pos),
    Door(Pos),
    Idle,
}

/// True once the run reached the final room.
pub fn is_finished(game: &Game) -> bool {
    game.room() == RoomId::PortalNexus && game.portfolio_card().is_none()
}

pub fn next_inputs(game: &Game) -> Vec<InputEvent> {
    if game.portfolio_card().is_some() {
        return vec![InputEvent::key_down(Key::Enter)];
    }

    let player = game.player();
    let goal = choose_goal(game, player.pos);
    let (slack_x, slack_y) = match goal {
        Goal::Enemy(_) => (ATTACK_SLACK_X, ALIGN_SLACK_Y),
        Goal::Door(_) => (DOOR_SLACK, DOOR_SLACK),
        Goal::Idle => (f32::INFINITY, f32::INFINITY),
    };
    let target = match goal {
        Goal::Enemy(pos) | Goal::Door(pos) => pos,
        Goal::Idle => player.pos,
    };

    let mut events: Vec<InputEvent> = [
        (target.x < player.pos.x - slack_x, Key::A),
        (target.x > player.pos.x + slack_x, Key::D),
        (target.y < player.pos.y - slack_y, Key::W),
        (target.y > player.pos.y + slack_y, Key::S),
    ]
    .into_iter()
    .map(|(hold, key)| if hold { InputEvent::key_down(key) } else { InputEvent::key_up(key) })
    .collect();

    match goal {
        Goal::Enemy(pos) => {
            let wanted = if pos.x >= player.pos.x { Facing::Right } else { Facing::Left };
            if wanted != player.facing {
                let turn = match wanted {
                    Facing::Left => Direction::Left,
                    Facing::Right => Direction::Right,
                };
                events.push(InputEvent::press(Button::Step(turn)));
            }
            events.push(InputEvent::key_down(Key::F));
        }
        Goal::Door(pos) => {
            if pos.distance(player.pos) <= game.tuning().interact_radius - 1.0 {
                events.push(InputEvent::key_down(Key::E));
            }
        }
        Goal::Idle => {}
    }
    events
}

fn choose_goal(game: &Game, player: Pos) -> Goal {
    if !game.is_room_cleared() {
        let nearest = game
            .enemies()
            .iter()
            .filter(|enemy| enemy.is_alive())
            .min_by(|a, b| a.pos.distance(player).total_cmp(&b.pos.distance(player)));
        if let Some(enemy) = nearest {
            return Goal::Enemy(enemy.pos);
        }
    }
    match game.room_layout().door(keys::DOOR_NEXT) {
        Some(door) => Goal::Door(door.pos),
        None => Goal::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::Checkpoint;
    use crate::content::ContentPack;
    use crate::types::{EnemyId, HeroClass, InputAction};

    fn drive(game: &mut Game, frames: usize) {
        for _ in 0..frames {
            if is_finished(game) {
                break;
            }
            for event in next_inputs(game) {
                game.handle_input(event);
            }
            game.advance(48);
        }
    }

    #[test]
    fn autopilot_clears_the_first_room() {
        let content = ContentPack::build_default();
        let mut game = Game::new(5, &content);
        game.choose_hero_class(HeroClass::Swordsman);
        drive(&mut game, 600);
        assert!(game.progress().to_checkpoint().cleared_rooms.contains(&RoomId::ForestGate));
    }

    #[test]
    fn autopilot_dismisses_the_portfolio_card() {
        let content = ContentPack::build_default();
        let mut checkpoint = room_zero_defeated();
        checkpoint.hero_class = Some(HeroClass::Mage);
        let game = Game::from_checkpoint(5, &content, &checkpoint);
        assert!(game.portfolio_card().is_some());
        let inputs = next_inputs(&game);
        assert_eq!(inputs, vec![InputEvent::key_down(Key::Enter)]);
    }

    #[test]
    fn idle_in_final_room_releases_every_key() {
        let content = ContentPack::build_default().without_portfolio();
        let mut checkpoint = Checkpoint::default();
        checkpoint.current_room = RoomId::PortalNexus;
        let game = Game::from_checkpoint(5, &content, &checkpoint);
        assert!(is_finished(&game));
        let inputs = next_inputs(&game);
        assert!(inputs.iter().all(|event| matches!(event.action, InputAction::KeyUp(_))));
    }

    fn room_zero_defeated() -> Checkpoint {
        let mut checkpoint = Checkpoint::default();
        checkpoint.defeated_enemies.extend([
            EnemyId::new(RoomId::ForestGate, 0),
            EnemyId::new(RoomId::ForestGate, 1),
        ]);
        checkpoint
    }
}
