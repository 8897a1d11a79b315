pub mod app_loop;
pub mod checkpoint_file;
pub mod key_map;
pub mod seed;

pub const APP_NAME: &str = "Arena";

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}
