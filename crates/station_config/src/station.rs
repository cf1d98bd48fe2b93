//! Creating and reconfiguring a station configuration file.

use std::path::{Path, PathBuf};

use config_tree::ConfigTree;
use tracing::{info, instrument};

use crate::driver::config_driver;
use crate::drivers::DriverRegistry;
use crate::errors::{StationError, StationResult};
use crate::persist::{save, save_with_backup};
use crate::prompt::Prompter;
use crate::reconcile::{config_altitude, config_latlon, config_location, config_units, UnitSystem};
use crate::registry::config_registry;
use crate::roots::{config_roots, RootPaths};
use crate::skins::copy_skins;

#[cfg(test)]
#[path = "station_tests.rs"]
mod tests;

/// Where the configuration file lives when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/weewx/weewx.conf";

/// The configuration file a new station starts from.
pub const TEMPLATE: &str = include_str!("../resources/weewx.conf");

/// Values supplied explicitly for one create or reconfigure run.
///
/// `None` means "not given": the value is asked for, or the existing one is
/// kept when `no_prompt` is set.
#[derive(Debug, Clone, Default)]
pub struct StationArgs {
    pub driver: Option<String>,
    pub location: Option<String>,
    /// `"<value>, <unit>"`
    pub altitude: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub register: Option<bool>,
    pub station_url: Option<String>,
    pub unit_system: Option<UnitSystem>,
    pub roots: RootPaths,
    pub no_prompt: bool,
}

/// What a create or reconfigure run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationOutcome {
    pub config_path: PathBuf,
    pub backup_path: Option<PathBuf>,
    pub copied_skins: Vec<String>,
}

/// Runs every reconciler over `tree`, in order.
///
/// On error the tree may be partially updated and should not be saved.
#[instrument(skip(tree, registry, prompter))]
pub fn config_config(
    tree: &mut ConfigTree,
    args: &StationArgs,
    registry: &DriverRegistry,
    prompter: &mut dyn Prompter,
    resources: Option<&Path>,
) -> StationResult<Vec<String>> {
    let no_prompt = args.no_prompt;
    config_location(tree, args.location.as_deref(), no_prompt, prompter)?;
    config_altitude(tree, args.altitude.as_deref(), no_prompt, prompter)?;
    config_latlon(
        tree,
        args.latitude.as_deref(),
        args.longitude.as_deref(),
        no_prompt,
        prompter,
    )?;
    config_registry(
        tree,
        args.register,
        args.station_url.as_deref(),
        no_prompt,
        prompter,
    )?;
    config_units(tree, args.unit_system, no_prompt, prompter)?;
    config_driver(tree, args.driver.as_deref(), no_prompt, prompter, registry)?;
    config_roots(tree, &args.roots)?;
    copy_skins(tree, resources)
}

pub fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Parses the bundled template.
pub fn template() -> StationResult<ConfigTree> {
    Ok(ConfigTree::parse(TEMPLATE)?)
}

/// Writes a brand new configuration file built from the template.
///
/// Fails if a file already exists at the path. Unless given, `WEEWX_ROOT`
/// is set to the directory holding the file. No backup is made.
pub fn create_station(
    config_path: Option<&Path>,
    args: &StationArgs,
    registry: &DriverRegistry,
    prompter: &mut dyn Prompter,
    resources: Option<&Path>,
) -> StationResult<StationOutcome> {
    let config_path = resolve_config_path(config_path);
    if config_path.exists() {
        return Err(StationError::PreconditionViolated(format!(
            "Config file {} already exists",
            config_path.display()
        )));
    }

    let mut args = args.clone();
    if args.roots.weewx_root.is_none() {
        let weewx_root = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        args.roots.weewx_root = Some(weewx_root);
    }

    let mut tree = template()?;
    let copied_skins = config_config(&mut tree, &args, registry, prompter, resources)?;
    save(&tree, &config_path)?;
    info!(path = ?config_path, "Created configuration file");

    Ok(StationOutcome {
        config_path,
        backup_path: None,
        copied_skins,
    })
}

/// Reconciles an existing configuration file in place.
///
/// Fails if there is no file at the path. The previous file is kept as a
/// timestamped backup.
pub fn reconfigure_station(
    config_path: Option<&Path>,
    args: &StationArgs,
    registry: &DriverRegistry,
    prompter: &mut dyn Prompter,
    resources: Option<&Path>,
) -> StationResult<StationOutcome> {
    let config_path = resolve_config_path(config_path);
    if !config_path.exists() {
        return Err(StationError::PreconditionViolated(format!(
            "The configuration file {} does not exist",
            config_path.display()
        )));
    }

    let mut tree = ConfigTree::load(&config_path)?;
    let copied_skins = config_config(&mut tree, args, registry, prompter, resources)?;
    let backup_path = save_with_backup(&tree, &config_path)?;
    info!(path = ?config_path, "Reconfigured configuration file");

    Ok(StationOutcome {
        config_path,
        backup_path,
        copied_skins,
    })
}
