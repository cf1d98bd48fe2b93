//! Root directory options.

use config_tree::{ConfigTree, Interpolation};
use tracing::{debug, instrument, warn};

use crate::errors::StationResult;
use crate::reconcile::STD_REPORT;

#[cfg(test)]
#[path = "roots_tests.rs"]
mod tests;

pub const DEFAULT_SKIN_ROOT: &str = "skins";
pub const DEFAULT_HTML_ROOT: &str = "public_html";
/// Stored as written; resolved against `WEEWX_ROOT` only when read.
pub const DEFAULT_SQLITE_ROOT: &str = "%(WEEWX_ROOT)s/archive";

const SQLITE_PATH: [&str; 2] = ["DatabaseTypes", "SQLite"];

/// Overrides for the four root directories. `None` keeps what is there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootPaths {
    pub weewx_root: Option<String>,
    pub skin_root: Option<String>,
    pub html_root: Option<String>,
    pub sqlite_root: Option<String>,
}

/// Applies root directory overrides and fills in missing defaults.
///
/// Existing values are never replaced by a default.
#[instrument(skip(tree))]
pub fn config_roots(tree: &mut ConfigTree, roots: &RootPaths) -> StationResult<()> {
    if let Some(weewx_root) = &roots.weewx_root {
        tree.root_mut().set("WEEWX_ROOT", weewx_root);
    }

    if let Some(report) = tree.section_mut(STD_REPORT) {
        for (key, explicit, default) in [
            ("SKIN_ROOT", &roots.skin_root, DEFAULT_SKIN_ROOT),
            ("HTML_ROOT", &roots.html_root, DEFAULT_HTML_ROOT),
        ] {
            match explicit {
                Some(value) => {
                    report.set(key, value);
                }
                None if !report.contains(key) => {
                    report.set(key, default);
                }
                None => {}
            }
        }
    }

    if let Some(sqlite) = tree.path_mut(&SQLITE_PATH) {
        match &roots.sqlite_root {
            Some(value) => {
                sqlite.set("SQLITE_ROOT", value);
            }
            None if !sqlite.contains("SQLITE_ROOT") => {
                sqlite.set("SQLITE_ROOT", DEFAULT_SQLITE_ROOT);
            }
            None => {}
        }

        match tree.scalar_at(&SQLITE_PATH, "SQLITE_ROOT", Interpolation::Resolve) {
            Ok(resolved) => debug!(sqlite_root = ?resolved, "Resolved SQLITE_ROOT"),
            Err(e) => warn!(error = %e, "SQLITE_ROOT cannot be resolved"),
        }
    }
    Ok(())
}
