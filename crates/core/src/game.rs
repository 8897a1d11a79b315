use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::checkpoint::Checkpoint;
use crate::combatant::{Health, HealthChange};
use crate::content::{
    ContentPack, DoorNode, PortfolioEntry, RoomBehavior, RoomLayout, class_stats, variant_stats,
};
use crate::progress::{Progress, ProgressStore};
use crate::tuning::Tuning;
use crate::types::*;
use crate::zones::{nearest_door, speed_multiplier, zone_at};

mod behavior;
mod controller;
mod hash;
mod resolver;
pub mod scheduler;
mod session;
#[cfg(test)]
mod test_support;

pub use scheduler::{Scheduler, TaskKind};
pub use session::{Enemy, PlayerState, RoomSession, Visuals};

pub struct Game {
    seed: u64,
    clock_ms: u64,
    rng: ChaCha8Rng,
    content: ContentPack,
    tuning: Tuning,
    progress: Progress,
    session: RoomSession,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(seed: u64, content: &ContentPack) -> Self {
        Self::with_progress(seed, content, Tuning::default(), None)
    }

    pub fn with_tuning(seed: u64, content: &ContentPack, tuning: Tuning) -> Self {
        Self::with_progress(seed, content, tuning, None)
    }

    /// Resumes a run from a stored checkpoint, entering its current room.
    pub fn from_checkpoint(seed: u64, content: &ContentPack, checkpoint: &Checkpoint) -> Self {
        Self::with_progress(seed, content, Tuning::default(), Some(checkpoint))
    }

    pub fn with_progress(
        seed: u64,
        content: &ContentPack,
        tuning: Tuning,
        checkpoint: Option<&Checkpoint>,
    ) -> Self {
        let progress = match checkpoint {
            Some(checkpoint) => Progress::from_checkpoint(checkpoint, &tuning),
            None => Progress::new(&tuning),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let room = progress.current_room();
        let session = RoomSession::start(
            content.room(room),
            progress.defeated_enemies(),
            &tuning,
            0,
            rng.next_u64(),
        );
        let mut game = Self {
            seed,
            clock_ms: 0,
            rng,
            content: content.clone(),
            tuning,
            progress,
            session,
            log: Vec::new(),
        };
        game.log.push(LogEvent::RoomEntered { room });
        log::info!("run started in room {room} (seed {seed})");
        if checkpoint.is_some() {
            game.notify("Checkpoint loaded.");
        }
        game.check_room_clear();
        game.check_respawn();
        game
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn room(&self) -> RoomId {
        self.session.room
    }

    pub fn room_layout(&self) -> &RoomLayout {
        self.content.room(self.session.room)
    }

    pub fn session(&self) -> &RoomSession {
        &self.session
    }

    pub fn player(&self) -> &PlayerState {
        &self.session.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.session.enemies
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.session.enemies.iter().filter(|enemy| enemy.is_alive()).count()
    }

    pub fn visuals(&self) -> Visuals {
        self.session.visuals
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.progress.to_checkpoint()
    }

    /// Door the interact key would use right now, for highlighting.
    pub fn nearest_door(&self) -> Option<&DoorNode> {
        nearest_door(self.room_layout(), self.session.player.pos, self.tuning.interact_radius)
    }

    /// Portfolio card currently blocking the arena, if any.
    pub fn portfolio_card(&self) -> Option<&PortfolioEntry> {
        let room = self.session.room;
        let entry = self.content.portfolio_for(room)?;
        let shown = self.progress.shown_portfolio_rooms().contains(&room);
        (self.is_room_cleared() && !shown).then_some(entry)
    }

    pub fn is_frozen(&self) -> bool {
        self.portfolio_card().is_some()
    }

    /// Starts a fresh run with the chosen class.
    pub fn choose_hero_class(&mut self, class: HeroClass) {
        self.progress.choose_hero_class(class);
        self.log.push(LogEvent::HeroChosen { class });
        if let Some(text) = self.progress.notification() {
            self.log.push(LogEvent::Notified { text: text.to_string() });
        }
        self.enter_room(RoomId::default());
    }

    /// Runs every timer due within the next `dt_ms` of session time.
    pub fn advance(&mut self, dt_ms: u64) -> AdvanceResult {
        let start_len = self.log.len();
        let target = self.clock_ms.saturating_add(dt_ms);
        while let Some((at, kind)) = self.session.scheduler.pop_due(target) {
            self.clock_ms = at;
            self.progress.advance_clock(at);
            self.run_task(kind);
        }
        self.clock_ms = target;
        self.progress.advance_clock(target);
        AdvanceResult {
            simulated_ms: dt_ms,
            room: self.session.room,
            new_events: self.log.len() - start_len,
        }
    }

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::Movement => self.movement_tick(),
            TaskKind::EnemyAi => self.enemy_ai_tick(),
            TaskKind::EnemyStrike => self.enemy_strike_tick(),
            TaskKind::ZoneEffect => self.zone_tick(),
            TaskKind::AttackPoseReset => self.session.player.attacking = false,
            TaskKind::SlashReset => self.session.visuals.slash = false,
            TaskKind::HitFlashReset => self.session.visuals.hit_flash = false,
            TaskKind::RespawnReposition => self.finish_respawn(),
        }
    }

    /// Replaces the active session. The old session's timers go with it.
    fn enter_room(&mut self, room: RoomId) {
        let seed = self.rng.next_u64();
        self.session = RoomSession::start(
            self.content.room(room),
            self.progress.defeated_enemies(),
            &self.tuning,
            self.clock_ms,
            seed,
        );
        self.log.push(LogEvent::RoomEntered { room });
        log::info!("entered {}", room.title());
        self.check_room_clear();
        self.check_respawn();
    }

    fn notify(&mut self, text: &str) {
        self.progress.set_notification(text);
        self.log.push(LogEvent::Notified { text: text.to_string() });
    }
}
