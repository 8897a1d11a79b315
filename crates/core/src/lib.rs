pub mod autopilot;
pub mod checkpoint;
pub mod combatant;
pub mod content;
pub mod game;
pub mod progress;
pub mod tuning;
pub mod types;
pub mod zones;

pub use checkpoint::{Checkpoint, CheckpointError, HudStats};
pub use combatant::{Health, HealthChange};
pub use content::{ContentPack, DoorNode, PortfolioEntry, RoomLayout, Zone};
pub use game::{Enemy, Game, PlayerState, Visuals};
pub use progress::{Progress, ProgressStore};
pub use tuning::Tuning;
pub use types::*;
