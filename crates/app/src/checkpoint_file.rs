//! On-disk checkpoint document. Reads are lenient, writes are atomic.

use arena::Checkpoint;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CHECKPOINT_ENV_VAR: &str = "ARENA_CHECKPOINT";
const FILE_NAME: &str = "checkpoint.json";

pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "Arena").map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push(FILE_NAME);
        path
    })
}

/// The environment override, when set and non-empty, replaces the default location.
pub fn resolve_path(env_value: Option<&str>) -> Option<PathBuf> {
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Some(PathBuf::from(value)),
        None => default_path(),
    }
}

pub fn write_atomic(checkpoint: &Checkpoint, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, checkpoint.to_json())?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Reads the document leniently. Only I/O failures are errors; bad content
/// degrades field by field.
pub fn load(path: &Path) -> io::Result<Checkpoint> {
    let content = fs::read_to_string(path)?;
    Ok(Checkpoint::from_json_lenient(&content))
}

/// `None` when there is nothing usable on disk and the run starts fresh.
pub fn load_if_present(path: &Path) -> Option<Checkpoint> {
    match load(path) {
        Ok(checkpoint) => Some(checkpoint),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            log::warn!("could not read checkpoint {}: {err}", path.display());
            None
        }
    }
}
