//! Enemy movement (soft pursuit with jitter) and enemy melee strikes.

use super::*;

/// Uniform sample in `[0, 1)`.
fn unit(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u64() >> 40) as f32 / (1u64 << 24) as f32
}

/// One AI step for a single enemy. Inside `chase_proximity` the pull toward
/// the player is scaled by the room's aggression, outside it by the idle drift.
pub fn drift_toward(
    enemy: Pos,
    player: Pos,
    behavior: RoomBehavior,
    tuning: &Tuning,
    rng: &mut ChaCha8Rng,
) -> Pos {
    let to_x = player.x - enemy.x;
    let to_y = player.y - enemy.y;
    let factor = if enemy.distance(player) < tuning.chase_proximity {
        behavior.aggression
    } else {
        tuning.idle_drift
    };
    let jitter_x = (unit(rng) - 0.5) * behavior.jitter;
    let jitter_y = (unit(rng) - 0.5) * behavior.jitter;
    let pull = tuning.integration_fraction * factor;
    enemy.offset(to_x * pull + jitter_x, to_y * pull + jitter_y).clamped()
}

/// Sums the damage of every living enemy in strike range whose cooldown has
/// elapsed, stamping each one that strikes. Returns `(total, strikers)`.
pub fn collect_strikes(enemies: &mut [Enemy], player: Pos, now_ms: u64) -> (u32, u8) {
    let mut total = 0u32;
    let mut strikers = 0u8;
    for enemy in enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
        let stats = variant_stats(enemy.variant);
        if enemy.pos.distance(player) > stats.strike_range {
            continue;
        }
        let ready = enemy
            .last_strike_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= stats.strike_cooldown_ms);
        if !ready {
            continue;
        }
        enemy.last_strike_ms = Some(now_ms);
        total = total.saturating_add(stats.damage);
        strikers = strikers.saturating_add(1);
    }
    (total, strikers)
}

impl Game {
    pub(super) fn enemy_ai_tick(&mut self) {
        if self.is_frozen() {
            return;
        }
        let behavior = self.room_layout().behavior;
        let player = self.session.player.pos;
        let session = &mut self.session;
        for enemy in session.enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            enemy.pos = drift_toward(enemy.pos, player, behavior, &self.tuning, &mut session.rng);
        }
    }

    pub(super) fn enemy_strike_tick(&mut self) {
        if self.is_frozen() {
            return;
        }
        let player = self.session.player.pos;
        let (damage, strikers) = collect_strikes(&mut self.session.enemies, player, self.clock_ms);
        if damage == 0 {
            return;
        }
        self.progress.damage_player(damage);
        self.session.visuals.hit_flash = true;
        let reset_at = self.clock_ms + self.tuning.hit_flash_ms;
        self.session.scheduler.once(TaskKind::HitFlashReset, reset_at);
        self.log.push(LogEvent::PlayerStruck { damage, strikers });
        self.check_respawn();
    }
}
