//! Cross-room run progress: HUD numbers, defeat/clear/portfolio records,
//! the active room and the transient notification line.
//!
//! Room sessions only talk to this state through [`ProgressStore`]. Every
//! mutation that changes persisted data bumps [`Progress::revision`], which
//! the shell uses to decide when to write a checkpoint.

use std::collections::BTreeSet;

use crate::combatant::{Health, HealthChange};
use crate::content::class_stats;
use crate::tuning::{Reward, Tuning};
use crate::types::{EnemyId, HeroClass, RoomId};

/// Read/write contract between a room session and the run progress it reports into.
pub trait ProgressStore {
    fn player_health(&self) -> u32;
    fn damage_player(&mut self, amount: u32) -> HealthChange;
    fn heal_player(&mut self, amount: u32) -> HealthChange;
    fn restore_player_health(&mut self, amount: u32) -> HealthChange;

    fn defeated_enemies(&self) -> &BTreeSet<EnemyId>;
    /// Records a defeat and grants its reward. Returns `false` if already recorded.
    fn register_enemy_defeat(&mut self, id: EnemyId) -> bool;

    fn cleared_rooms(&self) -> &BTreeSet<RoomId>;
    /// Records a clear and grants the clear bonus. Returns `false` if already recorded.
    fn mark_room_cleared(&mut self, room: RoomId) -> bool;

    fn shown_portfolio_rooms(&self) -> &BTreeSet<RoomId>;
    fn mark_portfolio_shown(&mut self, room: RoomId) -> bool;

    fn set_room(&mut self, room: RoomId);
    fn set_notification(&mut self, text: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub raised_at_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    pub(crate) current_room: RoomId,
    pub(crate) hero_class: Option<HeroClass>,
    pub(crate) health: Health,
    pub(crate) xp: u32,
    pub(crate) coins: u32,
    pub(crate) defeated: BTreeSet<EnemyId>,
    pub(crate) cleared: BTreeSet<RoomId>,
    pub(crate) shown_portfolio: BTreeSet<RoomId>,
    notification: Option<Notification>,
    clock_ms: u64,
    revision: u64,
    defeat_reward: Reward,
    clear_reward: Reward,
    notification_ms: u64,
}

impl Progress {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            current_room: RoomId::default(),
            hero_class: None,
            health: Health::full(tuning.player_max_health),
            xp: 0,
            coins: 0,
            defeated: BTreeSet::new(),
            cleared: BTreeSet::new(),
            shown_portfolio: BTreeSet::new(),
            notification: None,
            clock_ms: 0,
            revision: 0,
            defeat_reward: tuning.defeat_reward,
            clear_reward: tuning.clear_reward,
            notification_ms: tuning.notification_ms,
        }
    }

    pub fn current_room(&self) -> RoomId {
        self.current_room
    }

    pub fn hero_class(&self) -> Option<HeroClass> {
        self.hero_class
    }

    /// Class used for combat; an unselected class fights as a swordsman.
    pub fn active_class(&self) -> HeroClass {
        self.hero_class.unwrap_or_default()
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_ref().map(|n| n.text.as_str())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Picking a class starts a fresh run in room 0.
    pub fn choose_hero_class(&mut self, class: HeroClass) {
        self.hero_class = Some(class);
        self.current_room = RoomId::default();
        self.defeated.clear();
        self.cleared.clear();
        self.shown_portfolio.clear();
        self.health = Health::full(self.health.max());
        self.xp = 0;
        self.coins = 0;
        self.bump();
        let message = format!("{} ready.", class_stats(class).label);
        self.set_notification(&message);
    }

    /// Moves the notification clock forward and expires a stale message.
    pub fn advance_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
        if let Some(notification) = &self.notification
            && now_ms.saturating_sub(notification.raised_at_ms) >= self.notification_ms
        {
            log::trace!("notification expired: {}", notification.text);
            self.notification = None;
        }
    }

    pub(crate) fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub(crate) fn bump(&mut self) {
        self.revision += 1;
    }

    fn health_changed(&mut self, change: HealthChange) -> HealthChange {
        if change != HealthChange::Unchanged {
            self.bump();
        }
        change
    }
}

impl ProgressStore for Progress {
    fn player_health(&self) -> u32 {
        self.health.current()
    }

    fn damage_player(&mut self, amount: u32) -> HealthChange {
        let change = self.health.apply_damage(amount);
        self.health_changed(change)
    }

    fn heal_player(&mut self, amount: u32) -> HealthChange {
        let change = self.health.apply_heal(amount);
        self.health_changed(change)
    }

    fn restore_player_health(&mut self, amount: u32) -> HealthChange {
        let change = self.health.restore_to(amount);
        self.health_changed(change)
    }

    fn defeated_enemies(&self) -> &BTreeSet<EnemyId> {
        &self.defeated
    }

    fn register_enemy_defeat(&mut self, id: EnemyId) -> bool {
        if !self.defeated.insert(id) {
            return false;
        }
        self.xp = self.xp.saturating_add(self.defeat_reward.xp);
        self.coins = self.coins.saturating_add(self.defeat_reward.coins);
        self.bump();
        true
    }

    fn cleared_rooms(&self) -> &BTreeSet<RoomId> {
        &self.cleared
    }

    fn mark_room_cleared(&mut self, room: RoomId) -> bool {
        if !self.cleared.insert(room) {
            return false;
        }
        self.xp = self.xp.saturating_add(self.clear_reward.xp);
        self.coins = self.coins.saturating_add(self.clear_reward.coins);
        self.bump();
        true
    }

    fn shown_portfolio_rooms(&self) -> &BTreeSet<RoomId> {
        &self.shown_portfolio
    }

    fn mark_portfolio_shown(&mut self, room: RoomId) -> bool {
        if !self.shown_portfolio.insert(room) {
            return false;
        }
        self.bump();
        true
    }

    fn set_room(&mut self, room: RoomId) {
        if self.current_room != room {
            self.current_room = room;
            self.bump();
        }
    }

    fn set_notification(&mut self, text: &str) {
        log::debug!("notify: {text}");
        self.notification =
            Some(Notification { text: text.to_string(), raised_at_ms: self.clock_ms });
    }
}
