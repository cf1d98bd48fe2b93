//! Writing the document back to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use config_tree::ConfigTree;
use tracing::{info, instrument};

use crate::errors::StationResult;

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Writes `tree` to `path`, creating parent directories as needed.
#[instrument(skip(tree))]
pub fn save(tree: &ConfigTree, path: &Path) -> StationResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    tree.write_to(path)?;
    info!(path = ?path, "Saved configuration file");
    Ok(())
}

/// Moves any existing file at `path` aside, then writes `tree` there.
///
/// The backup is named `<path>.<YYYYmmddHHMMSS>`, with a `-N` suffix added
/// when a backup with that name already exists. Returns the backup path if
/// one was made.
#[instrument(skip(tree))]
pub fn save_with_backup(tree: &ConfigTree, path: &Path) -> StationResult<Option<PathBuf>> {
    let backup = if path.exists() {
        let backup = backup_path(path, &Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string());
        fs::rename(path, &backup)?;
        info!(backup = ?backup, "Saved old configuration file");
        Some(backup)
    } else {
        None
    };

    save(tree, path)?;
    Ok(backup)
}

/// The first unused backup name for `path` with the given timestamp.
pub fn backup_path(path: &Path, timestamp: &str) -> PathBuf {
    let base = format!("{}.{}", path.display(), timestamp);
    let mut candidate = PathBuf::from(&base);
    let mut n = 1;
    while candidate.exists() {
        candidate = PathBuf::from(format!("{base}-{n}"));
        n += 1;
    }
    candidate
}
