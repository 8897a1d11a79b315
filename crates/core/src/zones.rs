//! Point queries against a room's static zone and door layout.

use crate::content::{ContentPack, DoorNode, RoomLayout, Zone};
use crate::types::{Pos, RoomId, ZoneKind};

/// First zone in declaration order whose circle contains `pos`.
pub fn zone_at(layout: &RoomLayout, pos: Pos) -> Option<&Zone> {
    layout.zones.iter().find(|zone| zone.contains(pos))
}

/// Closest door to `pos`, if it lies within `radius`. Ties keep the earlier door.
pub fn nearest_door(layout: &RoomLayout, pos: Pos, radius: f32) -> Option<&DoorNode> {
    let mut chosen: Option<(&DoorNode, f32)> = None;
    for door in &layout.doors {
        let distance = door.pos.distance(pos);
        if chosen.is_none_or(|(_, best)| distance < best) {
            chosen = Some((door, distance));
        }
    }
    chosen.filter(|(_, distance)| *distance <= radius).map(|(door, _)| door)
}

pub fn speed_multiplier(zone: Option<&Zone>, boost: f32) -> f32 {
    match zone.map(|zone| zone.kind) {
        Some(ZoneKind::Boost) => boost,
        Some(ZoneKind::Hazard | ZoneKind::Heal) | None => 1.0,
    }
}

impl ContentPack {
    pub fn zone_at(&self, room: RoomId, pos: Pos) -> Option<&Zone> {
        zone_at(self.room(room), pos)
    }
}
