//! Room-scoped state and the room-level rules: clear detection, door gating,
//! the portfolio card, zone effects and the player respawn cycle.

use std::collections::BTreeSet;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub pos: Pos,
    pub facing: Facing,
    pub attacking: bool,
    pub moving: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub variant: EnemyVariant,
    pub pos: Pos,
    pub health: Health,
    pub(super) last_strike_ms: Option<u64>,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visuals {
    pub slash: bool,
    pub hit_flash: bool,
}

/// One visit to one room. Rebuilt from the room layout on every entry.
pub struct RoomSession {
    pub(super) room: RoomId,
    pub(super) spawn: Pos,
    pub(super) player: PlayerState,
    pub(super) enemies: Vec<Enemy>,
    pub(super) scheduler: Scheduler,
    pub(super) rng: ChaCha8Rng,
    pub(super) held: BTreeSet<Key>,
    pub(super) last_attack_ms: Option<u64>,
    pub(super) respawn_locked: bool,
    pub(super) visuals: Visuals,
}

impl RoomSession {
    pub fn start(
        layout: &RoomLayout,
        defeated: &BTreeSet<EnemyId>,
        tuning: &Tuning,
        now_ms: u64,
        seed: u64,
    ) -> Self {
        let enemies = layout
            .enemies
            .iter()
            .enumerate()
            .map(|(slot, template)| {
                let id = EnemyId::new(layout.id, slot as u8);
                let max = variant_stats(template.variant).max_health;
                let health =
                    if defeated.contains(&id) { Health::defeated(max) } else { Health::full(max) };
                Enemy {
                    id,
                    variant: template.variant,
                    pos: template.pos.clamped(),
                    health,
                    last_strike_ms: None,
                }
            })
            .collect();

        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Movement, now_ms, tuning.movement_tick_ms);
        scheduler.every(TaskKind::EnemyAi, now_ms, tuning.enemy_ai_tick_ms);
        scheduler.every(TaskKind::EnemyStrike, now_ms, tuning.enemy_strike_tick_ms);
        scheduler.every(TaskKind::ZoneEffect, now_ms, tuning.zone_tick_ms);

        Self {
            room: layout.id,
            spawn: layout.spawn.clamped(),
            player: PlayerState {
                pos: layout.spawn.clamped(),
                facing: Facing::Right,
                attacking: false,
                moving: false,
            },
            enemies,
            scheduler,
            rng: ChaCha8Rng::seed_from_u64(seed),
            held: BTreeSet::new(),
            last_attack_ms: None,
            respawn_locked: false,
            visuals: Visuals::default(),
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn_locked
    }
}

impl Game {
    /// Cleared when the room has no enemies, every enemy is down, or the
    /// clear was already recorded.
    pub fn is_room_cleared(&self) -> bool {
        let room = self.session.room;
        self.room_layout().enemies.is_empty()
            || self.progress.cleared_rooms().contains(&room)
            || self.session.enemies.iter().all(|enemy| !enemy.is_alive())
    }

    /// Records the first clear of a room that had enemies. Later calls are no-ops.
    pub(super) fn check_room_clear(&mut self) {
        let room = self.session.room;
        if self.session.enemies.is_empty() || self.session.enemies.iter().any(Enemy::is_alive) {
            return;
        }
        if self.progress.mark_room_cleared(room) {
            log::info!("room {room} cleared");
            self.log.push(LogEvent::RoomCleared { room });
            self.notify("Location cleared.");
        }
    }

    /// Uses a door by id regardless of distance, the way clicking it does.
    pub fn use_door(&mut self, door_id: &str) -> Result<DoorOutcome, GameError> {
        let door = self
            .room_layout()
            .door(door_id)
            .copied()
            .ok_or_else(|| GameError::UnknownDoor(door_id.to_string()))?;
        Ok(self.open_door(door))
    }

    pub(super) fn use_nearest_door(&mut self) -> DoorOutcome {
        if self.is_frozen() {
            return DoorOutcome::Frozen;
        }
        match self.nearest_door().copied() {
            Some(door) => self.open_door(door),
            None => DoorOutcome::NoDoorInRange,
        }
    }

    fn open_door(&mut self, door: DoorNode) -> DoorOutcome {
        if self.is_frozen() {
            return DoorOutcome::Frozen;
        }
        if door.locked_by_clear && !self.is_room_cleared() {
            self.log.push(LogEvent::DoorRejected { door: door.id });
            self.notify("Defeat all enemies.");
            return DoorOutcome::Locked;
        }
        self.progress.set_room(door.target);
        self.log.push(LogEvent::DoorUsed { door: door.id, target: door.target });
        self.enter_room(door.target);
        DoorOutcome::Entered(door.target)
    }

    pub(super) fn dismiss_portfolio(&mut self) -> bool {
        if !self.is_frozen() {
            return false;
        }
        let room = self.session.room;
        self.progress.mark_portfolio_shown(room);
        self.log.push(LogEvent::PortfolioDismissed { room });
        true
    }

    pub(super) fn zone_tick(&mut self) {
        if self.is_frozen() {
            return;
        }
        let Some(zone) = zone_at(self.room_layout(), self.session.player.pos).copied() else {
            return;
        };
        let (change, amount) = match zone.kind {
            ZoneKind::Hazard => {
                (self.progress.damage_player(self.tuning.hazard_damage), self.tuning.hazard_damage)
            }
            ZoneKind::Heal => {
                (self.progress.heal_player(self.tuning.heal_amount), self.tuning.heal_amount)
            }
            ZoneKind::Boost => return,
        };
        if change != HealthChange::Unchanged {
            self.log.push(LogEvent::ZoneTick { zone: zone.id, kind: zone.kind, amount });
        }
        self.check_respawn();
    }

    /// Starts the respawn cycle when the player is down and no cycle is running.
    pub(super) fn check_respawn(&mut self) {
        if self.progress.player_health() > 0 || self.session.respawn_locked {
            return;
        }
        self.session.respawn_locked = true;
        self.notify("Defeated. Respawned.");
        self.progress.restore_player_health(self.tuning.respawn_health);
        let room = self.session.room;
        self.log.push(LogEvent::PlayerRespawned { room });
        log::info!("player respawned in room {room}");
        self.session
            .scheduler
            .once(TaskKind::RespawnReposition, self.clock_ms + self.tuning.respawn_delay_ms);
    }

    pub(super) fn finish_respawn(&mut self) {
        let spawn = self.session.spawn;
        self.session.player.pos = spawn;
        self.session.respawn_locked = false;
        self.log.push(LogEvent::PlayerRepositioned { pos: spawn });
        // Damage taken while locked may have emptied the bar again.
        self.check_respawn();
    }
}
