//! Resolves an accepted attack into at most one enemy hit.

use super::*;

/// Where the swing lands: a fixed distance ahead of the player along its facing.
pub fn strike_point(player: &PlayerState, offset: f32) -> Pos {
    player.pos.offset(player.facing.sign() * offset, 0.0)
}

/// Nearest living enemy within `range` of `point`. Equal distances keep the earlier enemy.
pub fn select_target(enemies: &[Enemy], point: Pos, range: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.is_alive() {
            continue;
        }
        let distance = enemy.pos.distance(point);
        if distance > range {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

impl Game {
    pub(super) fn resolve_attack(&mut self) -> AttackOutcome {
        let class = class_stats(self.progress.active_class());
        let point = strike_point(&self.session.player, self.tuning.strike_offset);
        let facing = self.session.player.facing;

        let Some(index) = select_target(&self.session.enemies, point, class.attack_range) else {
            self.log.push(LogEvent::AttackSwung { facing, target: None });
            return AttackOutcome::Swung { target: None, defeated: false };
        };

        let enemy = &mut self.session.enemies[index];
        let id = enemy.id;
        let change = enemy.health.apply_damage(class.damage);
        let remaining = enemy.health.current();
        self.log.push(LogEvent::AttackSwung { facing, target: Some(id) });
        self.log.push(LogEvent::EnemyHit { enemy: id, damage: class.damage, remaining });

        let defeated = change == HealthChange::Defeated;
        if defeated {
            self.log.push(LogEvent::EnemyDefeated { enemy: id });
            log::debug!("{id} defeated");
            self.progress.register_enemy_defeat(id);
            self.notify("Enemy defeated.");
            self.check_room_clear();
        }
        AttackOutcome::Swung { target: Some(id), defeated }
    }
}
