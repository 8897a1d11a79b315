//! Stable snapshot hashing for determinism and checkpoint round-trip checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.clock_ms);

        let progress = &self.progress;
        hasher.write_u8(progress.current_room().index());
        hasher.write_u8(match progress.hero_class() {
            None => 0,
            Some(HeroClass::Mage) => 1,
            Some(HeroClass::Swordsman) => 2,
        });
        hasher.write_u32(progress.health().current());
        hasher.write_u32(progress.xp());
        hasher.write_u32(progress.coins());
        for id in progress.defeated_enemies() {
            hasher.write_u8(id.room.index());
            hasher.write_u8(id.slot);
        }
        hasher.write_u8(0xff);
        for room in progress.cleared_rooms() {
            hasher.write_u8(room.index());
        }
        hasher.write_u8(0xff);
        for room in progress.shown_portfolio_rooms() {
            hasher.write_u8(room.index());
        }
        hasher.write_u8(0xff);

        let session = &self.session;
        hasher.write_u8(session.room.index());
        write_pos(&mut hasher, session.player.pos);
        hasher.write_u8(match session.player.facing {
            Facing::Left => 0,
            Facing::Right => 1,
        });
        hasher.write_u8(u8::from(session.respawn_locked));
        hasher.write_u64(session.last_attack_ms.unwrap_or(u64::MAX));
        for enemy in &session.enemies {
            write_pos(&mut hasher, enemy.pos);
            hasher.write_u32(enemy.health.current());
            hasher.write_u64(enemy.last_strike_ms.unwrap_or(u64::MAX));
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_u32(pos.x.to_bits());
    hasher.write_u32(pos.y.to_bits());
}
