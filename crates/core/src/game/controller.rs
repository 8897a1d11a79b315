//! Input handling: held movement keys, one-shot step buttons, attack and door intents.

use super::*;

impl Game {
    pub fn handle_input(&mut self, event: InputEvent) -> ActionOutcome {
        if event.from_text_entry {
            return ActionOutcome::Ignored;
        }
        match event.action {
            InputAction::KeyDown(key) => self.key_down(key),
            InputAction::KeyUp(key) => {
                if self.session.held.remove(&key) {
                    ActionOutcome::Released
                } else {
                    ActionOutcome::Ignored
                }
            }
            InputAction::Press(button) => self.press(button),
        }
    }

    /// Lets go of every held movement key, for when the window stops
    /// delivering key-up events to the arena.
    pub fn release_held_keys(&mut self) {
        self.session.held.clear();
    }

    fn key_down(&mut self, key: Key) -> ActionOutcome {
        if self.is_frozen() {
            if key.is_confirm() && self.dismiss_portfolio() {
                return ActionOutcome::PortfolioDismissed;
            }
            return ActionOutcome::Ignored;
        }
        if key.movement().is_some() {
            self.session.held.insert(key);
            return ActionOutcome::Held;
        }
        if key.is_attack() {
            return ActionOutcome::Attack(self.attack());
        }
        if key.is_interact() {
            return ActionOutcome::Door(self.use_nearest_door());
        }
        ActionOutcome::Ignored
    }

    fn press(&mut self, button: Button) -> ActionOutcome {
        match button {
            Button::Step(direction) => {
                if self.is_frozen() {
                    return ActionOutcome::Ignored;
                }
                let (dx, dy) = direction.delta();
                self.move_player(dx, dy, self.tuning.step);
                ActionOutcome::Stepped
            }
            Button::Attack => ActionOutcome::Attack(self.attack()),
            Button::Door => ActionOutcome::Door(self.use_nearest_door()),
            Button::DismissPortfolio => {
                if self.dismiss_portfolio() {
                    ActionOutcome::PortfolioDismissed
                } else {
                    ActionOutcome::Ignored
                }
            }
        }
    }

    /// Combined direction of every held movement key; opposite keys cancel.
    pub fn held_direction(&self) -> (f32, f32) {
        let mut up = false;
        let mut down = false;
        let mut left = false;
        let mut right = false;
        for direction in self.session.held.iter().filter_map(|key| key.movement()) {
            match direction {
                Direction::Up => up = true,
                Direction::Down => down = true,
                Direction::Left => left = true,
                Direction::Right => right = true,
            }
        }
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        (axis(left, right), axis(up, down))
    }

    pub(super) fn movement_tick(&mut self) {
        if self.is_frozen() {
            self.session.player.moving = false;
            return;
        }
        let (dx, dy) = self.held_direction();
        if dx == 0.0 && dy == 0.0 {
            self.session.player.moving = false;
            return;
        }
        self.session.player.moving = true;
        let zone = zone_at(self.room_layout(), self.session.player.pos);
        let step = self.tuning.step * speed_multiplier(zone, self.tuning.boost_multiplier);
        self.move_player(dx, dy, step);
    }

    fn move_player(&mut self, dx: f32, dy: f32, step: f32) {
        let player = &mut self.session.player;
        player.pos = player.pos.offset(dx * step, dy * step).clamped();
        if dx < 0.0 {
            player.facing = Facing::Left;
        } else if dx > 0.0 {
            player.facing = Facing::Right;
        }
    }

    /// Accepts an attack if the class cooldown has elapsed since the last accepted one.
    pub(super) fn attack(&mut self) -> AttackOutcome {
        if self.is_frozen() {
            return AttackOutcome::Frozen;
        }
        let class = class_stats(self.progress.active_class());
        let now = self.clock_ms;
        if let Some(last) = self.session.last_attack_ms {
            let elapsed = now.saturating_sub(last);
            if elapsed < class.cooldown_ms {
                return AttackOutcome::OnCooldown { remaining_ms: class.cooldown_ms - elapsed };
            }
        }
        self.session.last_attack_ms = Some(now);
        self.session.player.attacking = true;
        self.session.visuals.slash = true;
        self.session.scheduler.once(TaskKind::AttackPoseReset, now + self.tuning.attack_pose_ms);
        self.session.scheduler.once(TaskKind::SlashReset, now + self.tuning.slash_ms);
        self.resolve_attack()
    }
}
