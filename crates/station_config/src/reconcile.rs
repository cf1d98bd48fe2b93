//! Field reconcilers for the `[Station]` and `[StdReport]` sections.
//!
//! Each reconciler settles one property with [`resolve`] and writes the
//! winner back into the document. A reconciler whose section is missing
//! leaves the document untouched.

use std::fmt;
use std::str::FromStr;

use config_tree::{ConfigTree, Value};
use tracing::{debug, instrument};

use crate::errors::{StationError, StationResult};
use crate::precedence::resolve;
use crate::prompt::{
    parse_in_range, prompt_for_altitude, prompt_with_limits, prompt_with_options, Prompter,
};

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;

pub const STATION: &str = "Station";
pub const STD_REPORT: &str = "StdReport";

pub const DEFAULT_LOCATION: &str = "WeeWX station";
pub const DEFAULT_COORDINATE: &str = "0.0";

/// An altitude as stored in `[Station]`: a number and a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Altitude {
    pub value: String,
    pub unit: String,
}

impl Altitude {
    pub fn to_value(&self) -> Value {
        Value::List(vec![self.value.clone(), self.unit.clone()])
    }
}

impl FromStr for Altitude {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [value, unit] = parts.as_slice() else {
            return Err("You must specify a value and unit. For example: 200, meter".to_string());
        };

        let value = value.trim();
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => {}
            _ => return Err(format!("'{value}' is not a number")),
        }

        let unit = unit.trim().to_lowercase();
        if unit != "foot" && unit != "meter" {
            return Err(format!("Unknown altitude unit {unit}"));
        }

        Ok(Self {
            value: value.to_string(),
            unit,
        })
    }
}

/// The report unit systems offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Us,
    MetricWx,
    Metric,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 3] = [UnitSystem::Us, UnitSystem::MetricWx, UnitSystem::Metric];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Us => "us",
            UnitSystem::MetricWx => "metricwx",
            UnitSystem::Metric => "metric",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            UnitSystem::Us => "ºF, inHg, in, mph",
            UnitSystem::MetricWx => "ºC, mbar, mm, m/s",
            UnitSystem::Metric => "ºC, mbar, cm, km/h",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::ALL
            .into_iter()
            .find(|system| system.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                StationError::invalid("unit_system", format!("Unknown unit system '{s}'"))
            })
    }
}

/// Sets `[Station] location`.
#[instrument(skip(tree, prompter))]
pub fn config_location(
    tree: &mut ConfigTree,
    location: Option<&str>,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
) -> StationResult<()> {
    let Some(station) = tree.section(STATION) else {
        debug!("No [Station] section, skipping location");
        return Ok(());
    };

    let fallback = station
        .value("location")
        .map(Value::to_string)
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    let location = resolve(
        "location",
        location.map(str::to_string),
        no_prompt,
        fallback,
        |default| {
            prompter.say("");
            prompter.say(
                "Give a description of your station. This will be used for the title \
                 of any reports.",
            );
            prompt_with_options(prompter, "Description", Some(default), None)
        },
    )?
    .into_value();

    if let Some(station) = tree.section_mut(STATION) {
        station.set("location", location);
    }
    Ok(())
}

/// Sets `[Station] altitude`.
///
/// An explicit altitude must be `<number>, <unit>` with unit `foot` or
/// `meter`.
#[instrument(skip(tree, prompter))]
pub fn config_altitude(
    tree: &mut ConfigTree,
    altitude: Option<&str>,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
) -> StationResult<()> {
    let Some(station) = tree.section(STATION) else {
        debug!("No [Station] section, skipping altitude");
        return Ok(());
    };

    let fallback = station
        .value("altitude")
        .cloned()
        .unwrap_or_else(|| Value::List(vec!["0".to_string(), "foot".to_string()]));

    let explicit = altitude
        .map(|text| {
            text.parse::<Altitude>()
                .map_err(|reason| StationError::invalid("altitude", reason))
        })
        .transpose()?
        .map(|altitude| altitude.to_value());

    let altitude = resolve("altitude", explicit, no_prompt, fallback, |default| {
        Ok(prompt_for_altitude(prompter, &default.to_string())?.map(|a| a.to_value()))
    })?
    .into_value();

    if let Some(station) = tree.section_mut(STATION) {
        station.set("altitude", altitude);
    }
    Ok(())
}

/// Sets `[Station] latitude` and `longitude`, each resolved on its own.
#[instrument(skip(tree, prompter))]
pub fn config_latlon(
    tree: &mut ConfigTree,
    latitude: Option<&str>,
    longitude: Option<&str>,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
) -> StationResult<()> {
    if !tree.contains(STATION) {
        debug!("No [Station] section, skipping latitude and longitude");
        return Ok(());
    }

    if !no_prompt && latitude.is_none() {
        prompter.say("");
        prompter.say("Specify latitude in decimal degrees, negative for south.");
    }
    config_coordinate(tree, "latitude", latitude, 90.0, no_prompt, prompter)?;

    if !no_prompt && longitude.is_none() {
        prompter.say("Specify longitude in decimal degrees, negative for west.");
    }
    config_coordinate(tree, "longitude", longitude, 180.0, no_prompt, prompter)
}

fn config_coordinate(
    tree: &mut ConfigTree,
    field: &'static str,
    explicit: Option<&str>,
    limit: f64,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
) -> StationResult<()> {
    let fallback = tree
        .section(STATION)
        .and_then(|station| station.value(field))
        .map(Value::to_string)
        .unwrap_or_else(|| DEFAULT_COORDINATE.to_string());

    let explicit = explicit
        .map(|text| {
            parse_in_range(text, -limit, limit)
                .map_err(|reason| StationError::invalid(field, reason))
        })
        .transpose()?;

    let value = resolve(field, explicit, no_prompt, fallback, |default| {
        prompt_with_limits(prompter, field, default, -limit, limit)
    })?
    .into_value();

    // A carried-over value is kept as written but must still be a number.
    if value.trim().parse::<f64>().is_err() {
        return Err(StationError::invalid(field, format!("'{value}' is not a number")));
    }

    if let Some(station) = tree.section_mut(STATION) {
        station.set(field, value);
    }
    Ok(())
}

/// Sets the default report unit system under `[StdReport] [[Defaults]]`.
///
/// A legacy `unit_system` directly under `[StdReport]` is used as the
/// fallback and then removed.
#[instrument(skip(tree, prompter))]
pub fn config_units(
    tree: &mut ConfigTree,
    unit_system: Option<UnitSystem>,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
) -> StationResult<()> {
    let Some(report) = tree.section(STD_REPORT) else {
        debug!("No [StdReport] section, skipping unit system");
        return Ok(());
    };

    let fallback = report
        .scalar("unit_system")
        .or_else(|| {
            report
                .section("Defaults")
                .and_then(|defaults| defaults.scalar("unit_system"))
        })
        .map(str::to_string);

    let unit_system = resolve(
        "unit_system",
        unit_system.map(|system| Some(system.to_string())),
        no_prompt,
        fallback,
        |default| {
            prompter.say("");
            prompter.say("Choose a unit system for your reports. Possible choices are:");
            for system in UnitSystem::ALL {
                prompter.say(&format!("  '{}' ({})", system, system.description()));
            }
            prompter.say("Later, you can modify your choice, or choose a combination of units.");
            let options: Vec<&str> = UnitSystem::ALL.iter().map(UnitSystem::as_str).collect();
            let choice = prompt_with_options(
                prompter,
                "Your choice",
                default.as_deref(),
                Some(options.as_slice()),
            )?;
            Ok(choice.map(Some))
        },
    )?
    .into_value();

    let Some(unit_system) = unit_system else {
        debug!("No unit system known, leaving [StdReport] alone");
        return Ok(());
    };

    if let Some(report) = tree.section_mut(STD_REPORT) {
        report.remove("unit_system");
        report.ensure_section("Defaults").set("unit_system", unit_system);
    }
    Ok(())
}
