//! Health pool shared by the player and every enemy.
//!
//! `current` stays within `0..=max` after every mutation. Reaching zero is the
//! `Defeated` transition; enemies never leave it, the player leaves it only
//! through a respawn `restore_to`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthChange {
    Unchanged,
    Changed,
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(current: u32, max: u32) -> Self {
        Self { current: current.min(max), max }
    }

    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn defeated(max: u32) -> Self {
        Self { current: 0, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn apply_damage(&mut self, amount: u32) -> HealthChange {
        if amount == 0 || self.current == 0 {
            return HealthChange::Unchanged;
        }
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 { HealthChange::Defeated } else { HealthChange::Changed }
    }

    pub fn apply_heal(&mut self, amount: u32) -> HealthChange {
        let healed = self.current.saturating_add(amount).min(self.max);
        if healed == self.current {
            return HealthChange::Unchanged;
        }
        self.current = healed;
        HealthChange::Changed
    }

    /// Hard reset used by respawn; capped at `max`.
    pub fn restore_to(&mut self, amount: u32) -> HealthChange {
        let restored = amount.min(self.max);
        if restored == self.current {
            return HealthChange::Unchanged;
        }
        self.current = restored;
        HealthChange::Changed
    }
}
