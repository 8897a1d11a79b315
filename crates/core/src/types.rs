use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lower bound of the walkable arena on both axes.
pub const ARENA_MIN: f32 = 5.0;
/// Upper bound of the walkable arena on both axes.
pub const ARENA_MAX: f32 = 95.0;

/// Clamp one coordinate into the walkable band. NaN collapses to the lower bound.
pub fn clamp_coord(value: f32) -> f32 {
    if value.is_nan() {
        return ARENA_MIN;
    }
    value.clamp(ARENA_MIN, ARENA_MAX)
}

/// Point in the normalized 0..100 arena plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Pos) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn clamped(self) -> Self {
        Self { x: clamp_coord(self.x), y: clamp_coord(self.y) }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidRoomId(pub u8);

impl fmt::Display for InvalidRoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room id {} is outside 0..=5", self.0)
    }
}

/// The six rooms of the run, in traversal order. Serialized as the room ordinal.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoomId {
    #[default]
    ForestGate,
    IronBastion,
    EmberMine,
    ShadowKeep,
    CrystalLabyrinth,
    PortalNexus,
}

impl RoomId {
    pub const ALL: [RoomId; 6] = [
        RoomId::ForestGate,
        RoomId::IronBastion,
        RoomId::EmberMine,
        RoomId::ShadowKeep,
        RoomId::CrystalLabyrinth,
        RoomId::PortalNexus,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            RoomId::ForestGate => "Room 0: Forest Gate",
            RoomId::IronBastion => "Room 1: Iron Bastion",
            RoomId::EmberMine => "Room 2: Ember Mine",
            RoomId::ShadowKeep => "Room 3: Shadow Keep",
            RoomId::CrystalLabyrinth => "Room 4: Crystal Labyrinth",
            RoomId::PortalNexus => "Room 5: Portal Nexus",
        }
    }
}

impl TryFrom<u8> for RoomId {
    type Error = InvalidRoomId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(InvalidRoomId(value))
    }
}

impl From<RoomId> for u8 {
    fn from(room: RoomId) -> Self {
        room.index()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyVariant {
    Slime,
    Skeleton,
    Bot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Hazard,
    Heal,
    Boost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroClass {
    Mage,
    #[default]
    Swordsman,
}

/// Single-step direction used by the on-screen movement buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Keyboard keys the arena reacts to; everything else arrives as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Space,
    F,
    E,
    Enter,
    Other,
}

impl Key {
    pub fn movement(self) -> Option<Direction> {
        match self {
            Key::ArrowUp | Key::W => Some(Direction::Up),
            Key::ArrowDown | Key::S => Some(Direction::Down),
            Key::ArrowLeft | Key::A => Some(Direction::Left),
            Key::ArrowRight | Key::D => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_attack(self) -> bool {
        matches!(self, Key::Space | Key::F)
    }

    pub fn is_interact(self) -> bool {
        matches!(self, Key::E | Key::Enter)
    }

    /// Keys that dismiss the portfolio card.
    pub fn is_confirm(self) -> bool {
        matches!(self, Key::Enter | Key::E | Key::Space)
    }
}

/// On-screen controls. They perform the same actions as their keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Step(Direction),
    Attack,
    Door,
    DismissPortfolio,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    KeyDown(Key),
    KeyUp(Key),
    Press(Button),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub action: InputAction,
    /// Set when focus sits in a text-entry widget; such events never reach the arena.
    pub from_text_entry: bool,
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        Self { action: InputAction::KeyDown(key), from_text_entry: false }
    }

    pub fn key_up(key: Key) -> Self {
        Self { action: InputAction::KeyUp(key), from_text_entry: false }
    }

    pub fn press(button: Button) -> Self {
        Self { action: InputAction::Press(button), from_text_entry: false }
    }

    pub fn typed(self) -> Self {
        Self { from_text_entry: true, ..self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidEnemyId(pub String);

impl fmt::Display for InvalidEnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed enemy id {:?}", self.0)
    }
}

/// Stable enemy identity, `room-{room}-enemy-{n}` with a 1-based `n`.
/// This string is the key recorded in the defeated set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnemyId {
    pub room: RoomId,
    pub slot: u8,
}

impl EnemyId {
    pub fn new(room: RoomId, slot: u8) -> Self {
        Self { room, slot }
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room-{}-enemy-{}", self.room.index(), u16::from(self.slot) + 1)
    }
}

impl FromStr for EnemyId {
    type Err = InvalidEnemyId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidEnemyId(s.to_string());
        let rest = s.strip_prefix("room-").ok_or_else(invalid)?;
        let (room, ordinal) = rest.split_once("-enemy-").ok_or_else(invalid)?;
        let room = room.parse::<u8>().ok().and_then(RoomId::from_index).ok_or_else(invalid)?;
        let ordinal = ordinal.parse::<u16>().map_err(|_| invalid())?;
        if ordinal == 0 || ordinal > 256 {
            return Err(invalid());
        }
        let id = Self { room, slot: (ordinal - 1) as u8 };
        // Only the canonical spelling names an enemy: no signs, no leading zeros.
        if id.to_string() != s {
            return Err(invalid());
        }
        Ok(id)
    }
}

impl TryFrom<String> for EnemyId {
    type Error = InvalidEnemyId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EnemyId> for String {
    fn from(id: EnemyId) -> Self {
        id.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    RoomEntered { room: RoomId },
    AttackSwung { facing: Facing, target: Option<EnemyId> },
    EnemyHit { enemy: EnemyId, damage: u32, remaining: u32 },
    EnemyDefeated { enemy: EnemyId },
    PlayerStruck { damage: u32, strikers: u8 },
    ZoneTick { zone: &'static str, kind: ZoneKind, amount: u32 },
    PlayerRespawned { room: RoomId },
    PlayerRepositioned { pos: Pos },
    RoomCleared { room: RoomId },
    DoorRejected { door: &'static str },
    DoorUsed { door: &'static str, target: RoomId },
    PortfolioDismissed { room: RoomId },
    HeroChosen { class: HeroClass },
    Notified { text: String },
}

/// Result of an attack intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Swung { target: Option<EnemyId>, defeated: bool },
    OnCooldown { remaining_ms: u64 },
    Frozen,
}

/// Result of a door-interact intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorOutcome {
    Entered(RoomId),
    Locked,
    NoDoorInRange,
    Frozen,
}

/// What a single input event ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Ignored,
    Held,
    Released,
    Stepped,
    Attack(AttackOutcome),
    Door(DoorOutcome),
    PortfolioDismissed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ms: u64,
    pub room: RoomId,
    pub new_events: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    UnknownDoor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_id_uses_one_based_ordinal() {
        let id = EnemyId::new(RoomId::EmberMine, 0);
        assert_eq!(id.to_string(), "room-2-enemy-1");
        assert_eq!("room-2-enemy-1".parse::<EnemyId>(), Ok(id));
    }

    #[test]
    fn enemy_id_rejects_malformed_strings() {
        for raw in ["", "room-9-enemy-1", "room-1-enemy-0", "room-1-boss-1", "room-x-enemy-2"] {
            assert!(raw.parse::<EnemyId>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn enemy_id_rejects_non_canonical_spellings() {
        for raw in ["room-01-enemy-1", "room-1-enemy-+1", "room-+1-enemy-01", "room-0-enemy-007"] {
            assert!(raw.parse::<EnemyId>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn room_id_serializes_as_ordinal() {
        let json = serde_json::to_string(&RoomId::ShadowKeep).expect("serialize");
        assert_eq!(json, "3");
        assert!(serde_json::from_str::<RoomId>("6").is_err());
    }

    #[test]
    fn confirm_keys_overlap_attack_and_interact() {
        assert!(Key::Space.is_confirm() && Key::Space.is_attack());
        assert!(Key::E.is_confirm() && Key::E.is_interact());
        assert!(!Key::F.is_confirm());
        assert_eq!(Key::W.movement(), Key::ArrowUp.movement());
        assert_eq!(Key::Enter.movement(), None);
    }

    #[test]
    fn clamp_coord_bounds_and_nan() {
        assert_eq!(clamp_coord(-40.0), ARENA_MIN);
        assert_eq!(clamp_coord(400.0), ARENA_MAX);
        assert_eq!(clamp_coord(50.5), 50.5);
        assert_eq!(clamp_coord(f32::NAN), ARENA_MIN);
    }
}
