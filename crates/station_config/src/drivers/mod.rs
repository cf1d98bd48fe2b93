//! Driver editors and the registry that resolves them.
//!
//! A driver is identified by its dotted module name (for example
//! `weewx.drivers.vantage`). Its [`DriverInfo`] carries the name of the
//! configuration stanza it owns and, optionally, a [`DriverEditor`] that
//! knows how to produce and adjust that stanza.

use std::collections::BTreeMap;

use config_tree::{ConfigTree, Section};
use tracing::debug;

use crate::errors::{StationError, StationResult};
use crate::prompt::Prompter;

mod simulator;
mod vantage;
mod wmr100;

pub use simulator::SimulatorEditor;
pub use vantage::VantageEditor;
pub use wmr100::Wmr100Editor;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Produces and edits the configuration stanza of one driver.
pub trait DriverEditor {
    /// The stanza for a fresh installation, as raw text including the
    /// `[Name]` header.
    fn default_stanza(&self) -> &str;

    /// Returns the stanza text to install.
    ///
    /// `existing` is the raw text of the stanza already in the document, if
    /// any. The default keeps it unchanged, or starts from
    /// [`DriverEditor::default_stanza`].
    fn transform_stanza(&self, existing: Option<&str>) -> StationResult<String> {
        Ok(existing.unwrap_or(self.default_stanza()).to_string())
    }

    /// Asks the user for driver specific settings.
    ///
    /// The returned section is merged on top of the installed stanza.
    fn prompt_for_settings(
        &self,
        _existing: &Section,
        _prompter: &mut dyn Prompter,
    ) -> StationResult<Section> {
        Ok(Section::new())
    }

    /// Last chance to adjust other parts of the document.
    fn modify_config(&self, _tree: &mut ConfigTree) -> StationResult<()> {
        Ok(())
    }
}

/// Everything known about one driver.
pub struct DriverInfo {
    pub module: String,
    /// Name of the stanza the driver reads its settings from.
    pub name: Option<String>,
    pub version: String,
    pub editor: Option<Box<dyn DriverEditor>>,
}

impl DriverInfo {
    pub fn new(
        module: &str,
        name: Option<&str>,
        version: &str,
        editor: Option<Box<dyn DriverEditor>>,
    ) -> Self {
        Self {
            module: module.to_string(),
            name: name.map(str::to_string),
            version: version.to_string(),
            editor,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.module)
    }
}

impl std::fmt::Debug for DriverInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverInfo")
            .field("module", &self.module)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("has_editor", &self.editor.is_some())
            .finish()
    }
}

/// Drivers keyed by module name, listed in sorted order.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: BTreeMap<String, DriverInfo>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The drivers that ship with this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DriverInfo::new(
            simulator::MODULE,
            Some("Simulator"),
            simulator::VERSION,
            Some(Box::new(SimulatorEditor)),
        ));
        registry.register(DriverInfo::new(
            vantage::MODULE,
            Some("Vantage"),
            vantage::VERSION,
            Some(Box::new(VantageEditor)),
        ));
        registry.register(DriverInfo::new(
            wmr100::MODULE,
            Some("WMR100"),
            wmr100::VERSION,
            Some(Box::new(Wmr100Editor)),
        ));
        registry
    }

    /// Adds a driver, replacing any previous registration of the same module.
    pub fn register(&mut self, info: DriverInfo) {
        debug!(module = %info.module, version = %info.version, "Registering driver");
        self.drivers.insert(info.module.clone(), info);
    }

    /// Resolves a driver by module name.
    pub fn load(&self, module: &str) -> StationResult<&DriverInfo> {
        self.drivers
            .get(module)
            .ok_or_else(|| StationError::DriverNotFound {
                driver: module.to_string(),
            })
    }

    pub fn drivers(&self) -> impl Iterator<Item = &DriverInfo> {
        self.drivers.values()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
