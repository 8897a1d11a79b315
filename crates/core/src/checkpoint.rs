//! Serializable snapshot of run progress.
//!
//! Field names follow the stored document (`currentRoom`, `hudStats`, ...).
//! [`Checkpoint::from_json_lenient`] never fails: a broken document or field
//! falls back to the fresh-run value for that field only.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::combatant::Health;
use crate::progress::Progress;
use crate::tuning::Tuning;
use crate::types::{EnemyId, HeroClass, RoomId};

pub const CHECKPOINT_FORMAT_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudStats {
    pub hp: u32,
    pub xp: u32,
    pub coins: u32,
}

impl Default for HudStats {
    fn default() -> Self {
        Self { hp: 100, xp: 0, coins: 0 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub format_version: u32,
    pub current_room: RoomId,
    pub hero_class: Option<HeroClass>,
    pub cleared_rooms: BTreeSet<RoomId>,
    pub defeated_enemies: BTreeSet<EnemyId>,
    pub shown_portfolio_rooms: BTreeSet<RoomId>,
    pub hud_stats: HudStats,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self {
            format_version: CHECKPOINT_FORMAT_VERSION,
            current_room: RoomId::default(),
            hero_class: None,
            cleared_rooms: BTreeSet::new(),
            defeated_enemies: BTreeSet::new(),
            shown_portfolio_rooms: BTreeSet::new(),
            hud_stats: HudStats::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    Malformed(String),
    UnsupportedVersion(u32),
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointError::Malformed(reason) => write!(f, "malformed checkpoint: {reason}"),
            CheckpointError::UnsupportedVersion(version) => {
                write!(f, "unsupported checkpoint format version {version}")
            }
        }
    }
}

impl Error for CheckpointError {}

impl Checkpoint {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("{}"))
    }

    pub fn from_json(raw: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Checkpoint = serde_json::from_str(raw)
            .map_err(|error| CheckpointError::Malformed(error.to_string()))?;
        if checkpoint.format_version != CHECKPOINT_FORMAT_VERSION {
            return Err(CheckpointError::UnsupportedVersion(checkpoint.format_version));
        }
        Ok(checkpoint)
    }

    pub fn from_json_lenient(raw: &str) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) else {
            log::warn!("checkpoint is not a JSON object; starting fresh");
            return Self::default();
        };
        let defaults = Self::default();

        let current_room = fields
            .get("currentRoom")
            .and_then(Value::as_u64)
            .and_then(|index| u8::try_from(index).ok())
            .and_then(RoomId::from_index)
            .unwrap_or(defaults.current_room);
        let hero_class = fields.get("heroClass").and_then(decode::<HeroClass>);
        let hud_stats = fields
            .get("hudStats")
            .and_then(Value::as_object)
            .map(|hud| HudStats {
                hp: hud.get("hp").and_then(decode_health).unwrap_or(defaults.hud_stats.hp),
                xp: hud.get("xp").and_then(decode_count).unwrap_or(defaults.hud_stats.xp),
                coins: hud.get("coins").and_then(decode_count).unwrap_or(defaults.hud_stats.coins),
            })
            .unwrap_or(defaults.hud_stats);

        Self {
            format_version: CHECKPOINT_FORMAT_VERSION,
            current_room,
            hero_class,
            cleared_rooms: decode_set(fields.get("clearedRooms")),
            defeated_enemies: decode_set(fields.get("defeatedEnemies")),
            shown_portfolio_rooms: decode_set(fields.get("shownPortfolioRooms")),
            hud_stats,
        }
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

/// Non-negative counter; fractional values truncate, negatives clamp to zero.
fn decode_count(value: &Value) -> Option<u32> {
    let number = value.as_f64().filter(|n| n.is_finite())?;
    Some(number.clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Health has no meaningful negative reading, so a negative value counts as
/// malformed rather than as an empty bar.
fn decode_health(value: &Value) -> Option<u32> {
    value.as_f64().filter(|n| *n >= 0.0)?;
    decode_count(value)
}

/// Keeps every element that decodes and drops the rest.
fn decode_set<T: DeserializeOwned + Ord>(value: Option<&Value>) -> BTreeSet<T> {
    let Some(Value::Array(items)) = value else {
        return BTreeSet::new();
    };
    let set: BTreeSet<T> = items.iter().filter_map(decode::<T>).collect();
    if set.len() < items.len() {
        log::warn!("checkpoint: dropped {} unreadable entries", items.len() - set.len());
    }
    set
}

impl Progress {
    pub fn from_checkpoint(checkpoint: &Checkpoint, tuning: &Tuning) -> Self {
        let mut progress = Progress::new(tuning);
        progress.current_room = checkpoint.current_room;
        progress.hero_class = checkpoint.hero_class;
        progress.health = Health::new(checkpoint.hud_stats.hp, tuning.player_max_health);
        progress.xp = checkpoint.hud_stats.xp;
        progress.coins = checkpoint.hud_stats.coins;
        progress.defeated = checkpoint.defeated_enemies.clone();
        progress.cleared = checkpoint.cleared_rooms.clone();
        progress.shown_portfolio = checkpoint.shown_portfolio_rooms.clone();
        progress
    }

    pub fn to_checkpoint(&self) -> Checkpoint {
        Checkpoint {
            format_version: CHECKPOINT_FORMAT_VERSION,
            current_room: self.current_room,
            hero_class: self.hero_class,
            cleared_rooms: self.cleared.clone(),
            defeated_enemies: self.defeated.clone(),
            shown_portfolio_rooms: self.shown_portfolio.clone(),
            hud_stats: HudStats { hp: self.health.current(), xp: self.xp, coins: self.coins },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_uses_camel_case_field_names() {
        let mut checkpoint = Checkpoint::default();
        checkpoint.defeated_enemies.insert(EnemyId::new(RoomId::IronBastion, 2));
        checkpoint.hero_class = Some(HeroClass::Mage);
        let json = checkpoint.to_json();
        for key in ["currentRoom", "heroClass", "clearedRooms", "defeatedEnemies", "hudStats"] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
        assert!(json.contains("\"room-1-enemy-3\""));
        assert!(json.contains("\"mage\""));
    }

    #[test]
    fn strict_decode_round_trips() {
        let mut checkpoint = Checkpoint::default();
        checkpoint.current_room = RoomId::ShadowKeep;
        checkpoint.cleared_rooms.extend([RoomId::ForestGate, RoomId::IronBastion]);
        checkpoint.hud_stats = HudStats { hp: 42, xp: 9, coins: 7 };
        let decoded = Checkpoint::from_json(&checkpoint.to_json()).expect("decode");
        assert_eq!(decoded, checkpoint);
    }

    #[test]
    fn strict_decode_rejects_unknown_version() {
        let json = Checkpoint::default()
            .to_json()
            .replace("\"formatVersion\": 1", "\"formatVersion\": 7");
        assert_eq!(Checkpoint::from_json(&json), Err(CheckpointError::UnsupportedVersion(7)));
    }

    #[test]
    fn lenient_decode_of_garbage_is_fresh_run() {
        for raw in ["", "not json", "[1,2]", "null", "42"] {
            assert_eq!(Checkpoint::from_json_lenient(raw), Checkpoint::default(), "input {raw:?}");
        }
    }

    #[test]
    fn lenient_decode_recovers_per_field() {
        let raw = r#"{
            "currentRoom": 9,
            "heroClass": "paladin",
            "clearedRooms": [0, "x", 2, 14],
            "defeatedEnemies": ["room-0-enemy-1", "bogus", 3],
            "shownPortfolioRooms": "nope",
            "hudStats": { "hp": -5, "xp": 12.7, "coins": "many" }
        }"#;
        let checkpoint = Checkpoint::from_json_lenient(raw);
        assert_eq!(checkpoint.current_room, RoomId::ForestGate);
        assert_eq!(checkpoint.hero_class, None);
        assert_eq!(
            checkpoint.cleared_rooms,
            BTreeSet::from([RoomId::ForestGate, RoomId::EmberMine])
        );
        assert_eq!(
            checkpoint.defeated_enemies,
            BTreeSet::from([EnemyId::new(RoomId::ForestGate, 0)])
        );
        assert!(checkpoint.shown_portfolio_rooms.is_empty());
        assert_eq!(checkpoint.hud_stats, HudStats { hp: 100, xp: 12, coins: 0 });
    }

    #[test]
    fn lenient_decode_keeps_an_empty_health_bar() {
        let checkpoint = Checkpoint::from_json_lenient(r#"{"hudStats": {"hp": 0, "xp": 3}}"#);
        assert_eq!(checkpoint.hud_stats, HudStats { hp: 0, xp: 3, coins: 0 });
    }

    #[test]
    fn lenient_decode_without_hud_uses_defaults() {
        let checkpoint = Checkpoint::from_json_lenient(r#"{"currentRoom": 4}"#);
        assert_eq!(checkpoint.current_room, RoomId::CrystalLabyrinth);
        assert_eq!(checkpoint.hud_stats, HudStats::default());
    }

    #[test]
    fn progress_round_trips_through_checkpoint() {
        let tuning = Tuning::default();
        let mut checkpoint = Checkpoint::default();
        checkpoint.current_room = RoomId::EmberMine;
        checkpoint.hero_class = Some(HeroClass::Swordsman);
        checkpoint.defeated_enemies.insert(EnemyId::new(RoomId::ForestGate, 0));
        checkpoint.shown_portfolio_rooms.insert(RoomId::ForestGate);
        checkpoint.hud_stats = HudStats { hp: 55, xp: 3, coins: 4 };

        let progress = Progress::from_checkpoint(&checkpoint, &tuning);
        assert_eq!(progress.to_checkpoint(), checkpoint);
    }

    #[test]
    fn stored_health_above_max_is_clamped() {
        let mut checkpoint = Checkpoint::default();
        checkpoint.hud_stats.hp = 900;
        let progress = Progress::from_checkpoint(&checkpoint, &Tuning::default());
        assert_eq!(progress.health().current(), 100);
    }
}
