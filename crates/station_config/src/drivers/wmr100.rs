use config_tree::ConfigTree;
use tracing::info;

use super::DriverEditor;
use crate::errors::StationResult;

pub(super) const MODULE: &str = "weewx.drivers.wmr100";
pub(super) const VERSION: &str = "3.5.0";

const STANZA: &str = "\
[WMR100]
    # This section is for the Oregon Scientific WMR100

    # The driver to use
    driver = weewx.drivers.wmr100

    # The station model, e.g., WMR100, WMR100N, WMRS200
    model = WMR100

    # How long a wind record can be used to calculate wind chill (in seconds)
    stale_wind = 300
";

/// The WMR100 has no archive memory, so records are generated in software.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wmr100Editor;

impl DriverEditor for Wmr100Editor {
    fn default_stanza(&self) -> &str {
        STANZA
    }

    fn modify_config(&self, tree: &mut ConfigTree) -> StationResult<()> {
        tree.root_mut()
            .ensure_section("StdArchive")
            .set("record_generation", "software");
        info!("Set [StdArchive] record_generation to software");
        Ok(())
    }
}
