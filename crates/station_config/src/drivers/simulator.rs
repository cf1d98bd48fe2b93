use super::DriverEditor;

pub(super) const MODULE: &str = "weewx.drivers.simulator";
pub(super) const VERSION: &str = "3.3";

const STANZA: &str = "\
[Simulator]
    # This section is for the weewx weather station simulator

    # The time (in seconds) between LOOP packets.
    loop_interval = 2.5

    # The simulator mode can be either 'simulator' or 'generator'.
    # Real-time simulator. Sleep between each LOOP packet.
    mode = simulator
    # Generator.  Emit LOOP packets as fast as possible (useful for testing).
    #mode = generator

    # The start time. Format is YYYY-mm-ddTHH:MM. If not specified, the default
    # is to use the present time.
    #start = 2011-01-01T00:00

    # The driver to use:
    driver = weewx.drivers.simulator
";

/// The software simulator needs no settings beyond its default stanza.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatorEditor;

impl DriverEditor for SimulatorEditor {
    fn default_stanza(&self) -> &str {
        STANZA
    }
}
