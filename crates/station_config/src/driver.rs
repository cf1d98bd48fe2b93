//! Driver selection and stanza installation.
//!
//! The chosen driver's stanza is rebuilt from whatever the document already
//! holds, passed through the driver's editor, and installed as a top-level
//! section right after `[Station]`.

use config_tree::{ConfigTree, Placement, Section};
use tracing::{debug, info, instrument};

use crate::drivers::{DriverInfo, DriverRegistry};
use crate::errors::{StationError, StationResult};
use crate::precedence::resolve;
use crate::prompt::{prompt_for_driver, Prompter};
use crate::reconcile::STATION;

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;

/// Used when the document does not name a driver.
pub const DEFAULT_DRIVER: &str = "weewx.drivers.simulator";

/// The comment written above every installed stanza.
pub fn major_comment_block() -> Vec<String> {
    vec![String::new(), "#".repeat(78), String::new()]
}

/// The driver the document currently uses, if it names one.
pub fn current_driver(tree: &ConfigTree) -> Option<String> {
    let station_type = tree.section(STATION)?.scalar("station_type")?;
    tree.section(station_type)?
        .scalar("driver")
        .map(str::to_string)
}

/// Chooses a driver and installs its stanza.
#[instrument(skip(tree, prompter, registry))]
pub fn config_driver(
    tree: &mut ConfigTree,
    driver: Option<&str>,
    no_prompt: bool,
    prompter: &mut dyn Prompter,
    registry: &DriverRegistry,
) -> StationResult<()> {
    let fallback = current_driver(tree).unwrap_or_else(|| DEFAULT_DRIVER.to_string());

    let driver = resolve(
        "driver",
        driver.map(str::to_string),
        no_prompt,
        fallback,
        |default| prompt_for_driver(prompter, registry, default),
    )?
    .into_value();

    let info = registry.load(&driver)?;
    info!(
        "Using {} version {} ({})",
        info.display_name(),
        info.version,
        driver
    );

    if let Some(name) = info.name.as_deref() {
        let mut stanza = build_stanza(tree, info, name)?;
        stanza.set("driver", driver.as_str());
        install_stanza(tree, name, stanza)?;

        if !no_prompt {
            if let Some(editor) = &info.editor {
                let existing = tree.section(name).cloned().unwrap_or_default();
                let settings = editor.prompt_for_settings(&existing, prompter)?;
                if let Some(stanza) = tree.section_mut(name) {
                    stanza.merge(settings);
                }
            }
        }
    }

    if let Some(editor) = &info.editor {
        editor.modify_config(tree)?;
    }
    Ok(())
}

/// Produces the stanza to install for `info`, starting from the one already
/// in the document.
pub fn build_stanza(tree: &ConfigTree, info: &DriverInfo, name: &str) -> StationResult<Section> {
    let Some(editor) = &info.editor else {
        return Ok(tree.section(name).cloned().unwrap_or_default());
    };

    let existing = tree
        .section(name)
        .map(|section| ConfigTree::with_section(name, section.clone()).to_string());
    debug!(stanza = name, existing = existing.is_some(), "Transforming driver stanza");

    let text = editor.transform_stanza(existing.as_deref())?;
    let mut parsed = ConfigTree::parse(&text)?;
    parsed
        .root_mut()
        .take_section(name)
        .ok_or_else(|| StationError::InvalidStanza {
            driver: info.module.clone(),
            reason: format!("no [{name}] section in stanza text"),
        })
}

/// Installs `stanza` as top-level section `name` and makes it the station
/// type.
pub fn install_stanza(tree: &mut ConfigTree, name: &str, stanza: Section) -> StationResult<()> {
    let root = tree.root_mut();
    root.insert_section(name, stanza);
    root.set_comments(name, major_comment_block());

    if tree.contains(STATION) {
        tree.reorder_sections(name, STATION, Placement::After)?;
        if let Some(station) = tree.section_mut(STATION) {
            station.set("station_type", name);
        }
    }
    info!(stanza = name, "Installed driver stanza");
    Ok(())
}
