//! Copying bundled skins into the station's skin directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use config_tree::{ConfigTree, Interpolation};
use tracing::{debug, error, info, instrument, warn};
use walkdir::WalkDir;

use crate::errors::{StationError, StationResult};
use crate::reconcile::STD_REPORT;
use crate::roots::DEFAULT_SKIN_ROOT;

#[cfg(test)]
#[path = "skins_tests.rs"]
mod tests;

/// Copies every skin under `resources` that is missing from
/// `WEEWX_ROOT/SKIN_ROOT`. Returns the names of the skins copied.
///
/// Skins already present are left untouched.
#[instrument(skip(tree))]
pub fn copy_skins(tree: &ConfigTree, resources: Option<&Path>) -> StationResult<Vec<String>> {
    if !tree.contains(STD_REPORT) {
        debug!("No [StdReport] section, skipping skins");
        return Ok(Vec::new());
    }
    let Some(resources) = resources else {
        debug!("No skin resource directory configured, skipping skins");
        return Ok(Vec::new());
    };
    let Some(weewx_root) = tree.scalar_at(&[], "WEEWX_ROOT", Interpolation::Resolve)? else {
        warn!("WEEWX_ROOT is not set, skipping skins");
        return Ok(Vec::new());
    };
    let skin_root = tree
        .scalar_at(&[STD_REPORT], "SKIN_ROOT", Interpolation::Resolve)?
        .unwrap_or_else(|| DEFAULT_SKIN_ROOT.to_string());

    let skin_dir = Path::new(&weewx_root).join(skin_root);
    fs::create_dir_all(&skin_dir)?;

    let existing = skin_names(&skin_dir)?;
    let available = skin_names(resources)?;

    let mut copied = Vec::new();
    for skin in available.difference(&existing) {
        copy_tree(&resources.join(skin), &skin_dir.join(skin))?;
        info!(skin = %skin, destination = ?skin_dir, "Copied skin");
        copied.push(skin.clone());
    }
    Ok(copied)
}

fn skin_names(dir: &Path) -> StationResult<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.insert(entry.file_name().to_string_lossy().to_string());
        }
    }
    Ok(names)
}

fn copy_tree(src: &Path, dest: &Path) -> StationResult<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            error!("Failed to read directory entry: {}", e);
            StationError::FileSystem {
                operation: "read directory entry".to_string(),
                reason: e.to_string(),
            }
        })?;

        let relative = entry.path().strip_prefix(src).map_err(|e| {
            error!("Failed to get relative path: {}", e);
            StationError::FileSystem {
                operation: "get relative path".to_string(),
                reason: e.to_string(),
            }
        })?;
        let target: PathBuf = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
