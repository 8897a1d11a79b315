use crate::types::{EnemyVariant, HeroClass, Pos, RoomId, ZoneKind};

pub mod keys {
    pub const DOOR_NEXT: &str = "door-next";
    pub const DOOR_PREV: &str = "door-prev";
}

pub const SPAWN_POINT: Pos = Pos::new(12.0, 66.0);

pub struct VariantStats {
    pub max_health: u32,
    pub damage: u32,
    pub strike_range: f32,
    pub strike_cooldown_ms: u64,
}

pub fn variant_stats(variant: EnemyVariant) -> VariantStats {
    match variant {
        EnemyVariant::Slime => VariantStats {
            max_health: 2,
            damage: 4,
            strike_range: 7.0,
            strike_cooldown_ms: 900,
        },
        EnemyVariant::Skeleton => VariantStats {
            max_health: 4,
            damage: 6,
            strike_range: 8.0,
            strike_cooldown_ms: 1100,
        },
        EnemyVariant::Bot => VariantStats {
            max_health: 6,
            damage: 8,
            strike_range: 9.0,
            strike_cooldown_ms: 1300,
        },
    }
}

pub struct ClassStats {
    pub label: &'static str,
    pub damage: u32,
    pub attack_range: f32,
    pub cooldown_ms: u64,
}

pub fn class_stats(class: HeroClass) -> ClassStats {
    match class {
        HeroClass::Mage => {
            ClassStats { label: "Mage", damage: 1, attack_range: 24.0, cooldown_ms: 280 }
        }
        HeroClass::Swordsman => {
            ClassStats { label: "Swordsman", damage: 2, attack_range: 15.0, cooldown_ms: 190 }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyTemplate {
    pub pos: Pos,
    pub variant: EnemyVariant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorNode {
    pub id: &'static str,
    pub pos: Pos,
    pub target: RoomId,
    pub locked_by_clear: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub id: &'static str,
    pub pos: Pos,
    pub radius: f32,
    pub kind: ZoneKind,
}

impl Zone {
    pub fn contains(&self, pos: Pos) -> bool {
        self.pos.distance(pos) <= self.radius
    }
}

/// How eagerly a room's enemies close in. `aggression` scales the chase pull
/// inside the proximity threshold; `jitter` is the full width of the random
/// wobble added per AI tick on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomBehavior {
    pub aggression: f32,
    pub jitter: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomLayout {
    pub id: RoomId,
    pub spawn: Pos,
    pub enemies: Vec<EnemyTemplate>,
    pub doors: Vec<DoorNode>,
    pub zones: Vec<Zone>,
    pub behavior: RoomBehavior,
}

impl RoomLayout {
    pub fn door(&self, id: &str) -> Option<&DoorNode> {
        self.doors.iter().find(|door| door.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortfolioEntry {
    pub room: RoomId,
    pub location: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub highlights: &'static [&'static str],
    pub stack: &'static [&'static str],
}

/// Immutable room catalogue, loaded once per run.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentPack {
    rooms: [RoomLayout; 6],
    portfolio: Vec<PortfolioEntry>,
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self { rooms: RoomId::ALL.map(default_room), portfolio: default_portfolio() }
    }

    pub fn room(&self, id: RoomId) -> &RoomLayout {
        &self.rooms[id.index() as usize]
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomLayout> {
        self.rooms.iter()
    }

    pub fn portfolio_for(&self, room: RoomId) -> Option<&PortfolioEntry> {
        self.portfolio.iter().find(|entry| entry.room == room)
    }

    /// Replace one room's layout. Used by tests and tools that need a bespoke arena.
    pub fn with_room(mut self, layout: RoomLayout) -> Self {
        let slot = layout.id.index() as usize;
        self.rooms[slot] = layout;
        self
    }

    pub fn without_portfolio(mut self) -> Self {
        self.portfolio.clear();
        self
    }
}

fn enemy(x: f32, y: f32, variant: EnemyVariant) -> EnemyTemplate {
    EnemyTemplate { pos: Pos::new(x, y), variant }
}

fn zone(id: &'static str, x: f32, y: f32, radius: f32, kind: ZoneKind) -> Zone {
    Zone { id, pos: Pos::new(x, y), radius, kind }
}

fn door_next(target: RoomId) -> DoorNode {
    DoorNode { id: keys::DOOR_NEXT, pos: Pos::new(92.0, 50.0), target, locked_by_clear: true }
}

fn door_prev(target: RoomId) -> DoorNode {
    DoorNode { id: keys::DOOR_PREV, pos: Pos::new(8.0, 50.0), target, locked_by_clear: false }
}

fn default_room(id: RoomId) -> RoomLayout {
    use EnemyVariant::{Bot, Skeleton, Slime};
    use ZoneKind::{Boost, Hazard, Heal};

    let (enemies, zones, behavior) = match id {
        RoomId::ForestGate => (
            vec![enemy(45.0, 40.0, Slime), enemy(65.0, 66.0, Skeleton)],
            vec![
                zone("mossy-spring", 22.0, 28.0, 6.0, Heal),
                zone("deer-trail", 50.0, 84.0, 7.0, Boost),
            ],
            RoomBehavior { aggression: 0.6, jitter: 3.0 },
        ),
        RoomId::IronBastion => (
            vec![enemy(42.0, 38.0, Skeleton), enemy(64.0, 58.0, Slime), enemy(77.0, 34.0, Bot)],
            vec![
                zone("spike-plate", 54.0, 76.0, 5.0, Hazard),
                zone("war-shrine", 22.0, 24.0, 5.0, Heal),
            ],
            RoomBehavior { aggression: 0.7, jitter: 3.5 },
        ),
        RoomId::EmberMine => (
            vec![
                enemy(36.0, 62.0, Bot),
                enemy(52.0, 42.0, Skeleton),
                enemy(66.0, 64.0, Slime),
                enemy(82.0, 40.0, Bot),
            ],
            vec![
                zone("lava-vent", 46.0, 80.0, 7.0, Hazard),
                zone("mine-rail", 70.0, 18.0, 6.0, Boost),
            ],
            RoomBehavior { aggression: 0.8, jitter: 4.0 },
        ),
        RoomId::ShadowKeep => (
            vec![
                enemy(40.0, 40.0, Skeleton),
                enemy(58.0, 62.0, Bot),
                enemy(76.0, 38.0, Skeleton),
                enemy(70.0, 70.0, Slime),
            ],
            vec![
                zone("shadow-pool", 50.0, 24.0, 6.0, Hazard),
                zone("ember-hearth", 26.0, 84.0, 5.0, Heal),
            ],
            RoomBehavior { aggression: 0.9, jitter: 4.0 },
        ),
        RoomId::CrystalLabyrinth => (
            vec![
                enemy(40.0, 66.0, Bot),
                enemy(58.0, 42.0, Bot),
                enemy(73.0, 63.0, Skeleton),
                enemy(82.0, 34.0, Slime),
            ],
            vec![
                zone("crystal-lane", 28.0, 44.0, 6.0, Boost),
                zone("shard-field", 64.0, 84.0, 5.0, Hazard),
                zone("clear-well", 86.0, 78.0, 5.0, Heal),
            ],
            RoomBehavior { aggression: 1.0, jitter: 4.5 },
        ),
        RoomId::PortalNexus => (
            Vec::new(),
            vec![zone("portal-light", 50.0, 50.0, 10.0, Heal)],
            RoomBehavior { aggression: 0.0, jitter: 0.0 },
        ),
    };

    let doors = match id.index() {
        0 => vec![door_next(RoomId::IronBastion)],
        5 => vec![door_prev(RoomId::CrystalLabyrinth)],
        index => {
            let prev = RoomId::from_index(index - 1).unwrap_or_default();
            let next = RoomId::from_index(index + 1).unwrap_or(RoomId::PortalNexus);
            vec![door_prev(prev), door_next(next)]
        }
    };

    RoomLayout { id, spawn: SPAWN_POINT, enemies, doors, zones, behavior }
}

fn default_portfolio() -> Vec<PortfolioEntry> {
    vec![
        PortfolioEntry {
            room: RoomId::ForestGate,
            location: "Forest Gate",
            title: "Field Notes Tracker",
            summary: "Offline-first notebook that syncs survey data once a connection returns.",
            highlights: &["Conflict-free merge of edits", "Runs on low-end tablets"],
            stack: &["TypeScript", "IndexedDB", "Service Workers"],
        },
        PortfolioEntry {
            room: RoomId::IronBastion,
            location: "Iron Bastion",
            title: "Access Gateway",
            summary: "Single sign-on front door for a set of internal tools.",
            highlights: &["Role-based routing", "Audit trail for every grant"],
            stack: &["Go", "PostgreSQL", "OIDC"],
        },
        PortfolioEntry {
            room: RoomId::EmberMine,
            location: "Ember Mine",
            title: "Telemetry Pipeline",
            summary: "Ingests device metrics and rolls them up into hourly aggregates.",
            highlights: &["Backpressure-aware consumers", "Replayable partitions"],
            stack: &["Rust", "Kafka", "ClickHouse"],
        },
        PortfolioEntry {
            room: RoomId::ShadowKeep,
            location: "Shadow Keep",
            title: "Release Orchestrator",
            summary: "Staged rollouts with automatic halt on error-rate regressions.",
            highlights: &["Canary analysis", "One-click rollback"],
            stack: &["Python", "Kubernetes", "Prometheus"],
        },
        PortfolioEntry {
            room: RoomId::CrystalLabyrinth,
            location: "Crystal Labyrinth",
            title: "Route Planner",
            summary: "Mobile app that plans multi-stop deliveries around time windows.",
            highlights: &["On-device solver", "Live traffic reroutes"],
            stack: &["Kotlin", "Swift", "GraphQL"],
        },
        PortfolioEntry {
            room: RoomId::PortalNexus,
            location: "Portal Nexus",
            title: "The Exit",
            summary: "Every room behind you is a project that shipped.",
            highlights: &["Thanks for playing"],
            stack: &["Curiosity"],
        },
    ]
}
