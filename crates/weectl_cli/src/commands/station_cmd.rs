//! Station configuration commands for the weectl CLI.
//!
//! # Examples
//!
//! ```bash
//! # Create a new configuration file, answering the questions interactively
//! weectl station create
//!
//! # Switch an existing station to a Vantage without any questions
//! weectl station reconfigure --driver weewx.drivers.vantage --no-prompt
//!
//! # Show the drivers that can be chosen
//! weectl station list-drivers
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use colored::Colorize;
use station_config::{
    create_station, reconfigure_station, resolve_config_path, DriverRegistry, Prompter, RootPaths,
    StationArgs, StationOutcome, UnitSystem,
};
use tracing::{debug, info, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "station_cmd_tests.rs"]
mod tests;

/// Environment variable naming the directory that holds the bundled skins.
pub const RESOURCES_ENV_VAR: &str = "WEECTL_RESOURCES";

/// Subcommands for the station command
#[derive(Subcommand, Debug)]
pub enum StationCommands {
    /// Create a new station configuration file
    Create(StationOptions),

    /// Reconfigure an existing station configuration file
    Reconfigure(StationOptions),

    /// List the drivers that can be installed
    ListDrivers,
}

/// Options shared by `create` and `reconfigure`.
///
/// Anything left out is asked for, or kept as it is when `--no-prompt` is
/// given.
#[derive(Args, Debug, Clone, Default)]
pub struct StationOptions {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Driver to use, e.g. "weewx.drivers.vantage"
    #[arg(long)]
    pub driver: Option<String>,

    /// A description of the station, used as the title of reports
    #[arg(long)]
    pub location: Option<String>,

    /// Altitude with unit, e.g. "700, foot" or "210, meter"
    #[arg(long, allow_hyphen_values = true)]
    pub altitude: Option<String>,

    /// Latitude in decimal degrees, negative for south
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<String>,

    /// Longitude in decimal degrees, negative for west
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<String>,

    /// Include the station in the weewx.com registry
    #[arg(long, value_name = "y|n", value_parser = parse_yes_no)]
    pub register: Option<bool>,

    /// A unique URL for the station, required when registering
    #[arg(long)]
    pub station_url: Option<String>,

    /// Unit system for reports
    #[arg(long, value_name = "us|metricwx|metric", value_parser = parse_unit_system)]
    pub units: Option<UnitSystem>,

    /// Root directory of the station's data
    #[arg(long)]
    pub weewx_root: Option<String>,

    /// Directory holding the skins, relative to WEEWX_ROOT
    #[arg(long)]
    pub skin_root: Option<String>,

    /// Directory for generated reports, relative to WEEWX_ROOT
    #[arg(long)]
    pub html_root: Option<String>,

    /// Directory holding SQLite databases, relative to WEEWX_ROOT
    #[arg(long)]
    pub sqlite_root: Option<String>,

    /// Do not ask any questions; keep existing values for anything not given
    #[arg(long)]
    pub no_prompt: bool,
}

impl StationOptions {
    /// Converts the command line options into reconciler arguments.
    pub fn to_station_args(&self) -> Result<StationArgs, Error> {
        if self.register == Some(false) && self.station_url.is_some() {
            return Err(Error::InvalidArguments(
                "--station-url is only used together with --register y".to_string(),
            ));
        }

        Ok(StationArgs {
            driver: self.driver.clone(),
            location: self.location.clone(),
            altitude: self.altitude.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            register: self.register,
            station_url: self.station_url.clone(),
            unit_system: self.units,
            roots: RootPaths {
                weewx_root: self.weewx_root.clone(),
                skin_root: self.skin_root.clone(),
                html_root: self.html_root.clone(),
                sqlite_root: self.sqlite_root.clone(),
            },
            no_prompt: self.no_prompt,
        })
    }
}

/// Parses the answer to a yes/no option.
pub fn parse_yes_no(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        _ => Err(format!("invalid value `{s}`: expected 'y' or 'n'")),
    }
}

pub fn parse_unit_system(s: &str) -> Result<UnitSystem, String> {
    s.parse::<UnitSystem>().map_err(|e| e.to_string())
}

/// The skin resource directory, if one is configured.
pub fn resources_dir() -> Option<PathBuf> {
    std::env::var_os(RESOURCES_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Execute the station command
#[instrument(skip(prompter))]
pub fn execute(
    cmd: StationCommands,
    prompter: &mut dyn Prompter,
    resources: Option<&Path>,
) -> Result<(), Error> {
    let registry = DriverRegistry::builtin();
    match cmd {
        StationCommands::Create(options) => {
            create(&options, &registry, prompter, resources).map(|_| ())
        }
        StationCommands::Reconfigure(options) => {
            reconfigure(&options, &registry, prompter, resources).map(|_| ())
        }
        StationCommands::ListDrivers => {
            list_drivers(&registry);
            Ok(())
        }
    }
}

/// Create a new configuration file
#[instrument(skip(registry, prompter))]
pub fn create(
    options: &StationOptions,
    registry: &DriverRegistry,
    prompter: &mut dyn Prompter,
    resources: Option<&Path>,
) -> Result<StationOutcome, Error> {
    let args = options.to_station_args()?;
    if options.config.is_none() {
        println!(
            "The configuration file will be created at {}.",
            resolve_config_path(None).display().to_string().bold()
        );
    }
    debug!(message = "Creating configuration", path = ?options.config);

    let outcome = create_station(options.config.as_deref(), &args, registry, prompter, resources)?;
    info!(message = "Configuration created", path = ?outcome.config_path);
    report(&outcome);
    Ok(outcome)
}

/// Reconfigure an existing configuration file
#[instrument(skip(registry, prompter))]
pub fn reconfigure(
    options: &StationOptions,
    registry: &DriverRegistry,
    prompter: &mut dyn Prompter,
    resources: Option<&Path>,
) -> Result<StationOutcome, Error> {
    let args = options.to_station_args()?;
    println!(
        "The configuration file {} will be used.",
        resolve_config_path(options.config.as_deref())
            .display()
            .to_string()
            .bold()
    );
    debug!(message = "Reconfiguring configuration", path = ?options.config);

    let outcome =
        reconfigure_station(options.config.as_deref(), &args, registry, prompter, resources)?;
    info!(message = "Configuration reconfigured", path = ?outcome.config_path);
    report(&outcome);
    Ok(outcome)
}

fn report(outcome: &StationOutcome) {
    if let Some(backup) = &outcome.backup_path {
        println!("Saved old configuration file as {}", backup.display());
    }
    for skin in &outcome.copied_skins {
        println!("Copied skin {}", skin.green());
    }
    println!(
        "Saved configuration file {}",
        outcome.config_path.display().to_string().bold()
    );
}

/// Print the registered drivers
pub fn list_drivers(registry: &DriverRegistry) {
    println!("{}", "Installed drivers:".bold());
    for info in registry.drivers() {
        println!(
            "  {:<15} {:<28} {}",
            info.display_name(),
            info.module,
            info.version
        );
    }
}
