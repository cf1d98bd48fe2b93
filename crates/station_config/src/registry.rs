//! Station registry membership and the `station_url` option.

use config_tree::{ConfigTree, Placement, Section};
use tracing::{debug, info, instrument, warn};

use crate::errors::{StationError, StationResult};
use crate::precedence::resolve;
use crate::prompt::{prompt_for_station_url, y_or_n, Prompter};
use crate::reconcile::STATION;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// URLs on this domain are template placeholders, never a real station.
pub const PLACEHOLDER_DOMAIN: &str = "example.com";

const REGISTRY_PATH: [&str; 2] = ["StdRESTful", "StationRegistry"];

/// Interprets the boolean spellings accepted in configuration files.
pub fn to_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" | "none" => Some(false),
        _ => None,
    }
}

/// Decides whether the station is listed in the public registry.
///
/// Registering requires a station URL that is not a placeholder. The flag
/// is always written, creating `[StdRESTful] [[StationRegistry]]` if needed.
#[instrument(skip(tree, prompter))]
pub fn config_registry(
    tree: &mut ConfigTree,
    register: Option<bool>,
    station_url: Option<&str>,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
) -> StationResult<()> {
    let Some(station) = tree.section(STATION) else {
        debug!("No [Station] section, skipping station registry");
        return Ok(());
    };
    let default_url = station.scalar("station_url").map(str::to_string);

    let default_register = match tree
        .path(&REGISTRY_PATH)
        .and_then(|registry| registry.scalar("register_this_station"))
    {
        Some(text) => to_bool(text).unwrap_or_else(|| {
            warn!(
                value = text,
                "Unrecognized register_this_station value, assuming false"
            );
            false
        }),
        None => false,
    };

    let explicit_register = register;
    let register = resolve(
        "register_this_station",
        explicit_register,
        no_prompt,
        default_register,
        |default| {
            prompter.say("");
            prompter.say("You can register your station on weewx.com, where it will be included");
            prompter.say(
                "in a map. If you choose to do so, you will also need a unique URL to identify ",
            );
            prompter.say("your station (such as a website, or a WeatherUnderground link).");
            let shown = if *default { "y" } else { "n" };
            y_or_n(
                prompter,
                &format!("Include station in the station registry [{shown}]? "),
            )
        },
    )?
    .into_value();

    // Whenever registration was settled interactively, the URL is asked for
    // too, with the current one as the default.
    let ask_for_url = !no_prompt && explicit_register.is_none() && register;
    let station_url = resolve(
        "station_url",
        station_url.map(|url| Some(url.to_string())),
        !ask_for_url,
        default_url,
        |default| prompt_for_station_url(prompter, default.as_deref()).map(|url| Some(Some(url))),
    )?
    .into_value();

    if register {
        match station_url.as_deref() {
            None | Some("") => {
                return Err(StationError::PreconditionViolated(
                    "Registering the station requires option 'station_url'.".to_string(),
                ))
            }
            Some(url) if url.contains(PLACEHOLDER_DOMAIN) => {
                return Err(StationError::PreconditionViolated(format!(
                    "Station URL '{url}' is a placeholder. \
                     Registering the station requires a unique URL."
                )))
            }
            Some(_) => {}
        }
    }

    let mut section = tree.root_mut();
    for name in REGISTRY_PATH {
        section = section.ensure_section(name);
    }
    section.set("register_this_station", register);
    info!(register, "Set station registry membership");

    if let (true, Some(url)) = (register, station_url.as_deref()) {
        inject_station_url(tree, url)?;
    }
    Ok(())
}

/// Adds or updates `[Station] station_url`.
///
/// An existing option is updated in place. Otherwise the commented-out
/// example paragraph that mentions `station_url` is removed and the option
/// is added with its own comment, just before `rain_year_start`.
pub fn inject_station_url(tree: &mut ConfigTree, url: &str) -> StationResult<()> {
    let station = tree
        .section_mut(STATION)
        .ok_or_else(|| StationError::PreconditionViolated("No [Station] section".to_string()))?;

    if station.contains("station_url") {
        station.set("station_url", url);
        return Ok(());
    }

    remove_station_url_paragraph(station);

    station.set("station_url", url);
    station.set_comments(
        "station_url",
        vec![
            String::new(),
            "# If you have a website, you may specify an URL. This is required if you".to_string(),
            "# intend to register your station.".to_string(),
        ],
    );
    if station.contains("rain_year_start") {
        station.move_entry("station_url", "rain_year_start", Placement::Before)?;
    }
    debug!(url, "Injected station_url");
    Ok(())
}

/// Deletes the comment paragraph mentioning `station_url`, together with one
/// blank line next to it.
fn remove_station_url_paragraph(station: &mut Section) {
    let keys: Vec<String> = station.keys().map(str::to_string).collect();
    for key in keys {
        let mut lines = station.comments(&key).to_vec();
        let Some(hit) = lines.iter().position(|line| line.contains("station_url")) else {
            continue;
        };

        let mut start = hit;
        while start > 0 && !lines[start - 1].trim().is_empty() {
            start -= 1;
        }
        let mut end = hit + 1;
        while end < lines.len() && !lines[end].trim().is_empty() {
            end += 1;
        }
        if end < lines.len() {
            end += 1;
        } else if start > 0 {
            start -= 1;
        }

        lines.drain(start..end);
        station.set_comments(&key, lines);
        return;
    }
}
