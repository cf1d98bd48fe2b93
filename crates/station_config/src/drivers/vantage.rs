use config_tree::Section;

use super::DriverEditor;
use crate::errors::StationResult;
use crate::prompt::{prompt_with_options, Prompter};

pub(super) const MODULE: &str = "weewx.drivers.vantage";
pub(super) const VERSION: &str = "3.6.2";

const STANZA: &str = "\
[Vantage]
    # This section is for the Davis Vantage series of weather stations.

    # Connection type: serial or ethernet
    #  serial (the classic VantagePro)
    #  ethernet (the WeatherLinkIP or Serial-Ethernet bridge)
    type = serial

    # If the connection type is serial, a port must be specified:
    #   Debian, Ubuntu, Redhat, Fedora, and SuSE:
    #     /dev/ttyUSB0 is a common USB port name
    #     /dev/ttyS0   is a common serial port name
    #   BSD:
    #     /dev/cuaU0   is a common serial port name
    port = /dev/ttyUSB0

    # If the connection type is ethernet, an IP Address/hostname is required:
    host = 1.2.3.4

    # How long to wait for a response from the station before giving up (in
    # seconds; must be greater than 2)
    timeout = 4

    # The driver to use:
    driver = weewx.drivers.vantage
";

const DEFAULT_PORT: &str = "/dev/ttyUSB0";
const DEFAULT_HOST: &str = "1.2.3.4";

/// Davis Vantage stations talk over a serial port or the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct VantageEditor;

impl DriverEditor for VantageEditor {
    fn default_stanza(&self) -> &str {
        STANZA
    }

    fn prompt_for_settings(
        &self,
        existing: &Section,
        prompter: &mut dyn Prompter,
    ) -> StationResult<Section> {
        let mut settings = Section::new();

        prompter.say("");
        prompter.say("Specify the hardware interface, either 'serial' or 'ethernet'.");
        prompter.say("If the station is connected by serial, USB, or serial-to-USB");
        prompter.say("adaptor, specify serial.  Specify ethernet for stations with");
        prompter.say("WeatherLinkIP interface.");
        let default_type = existing.scalar("type").unwrap_or("serial");
        let connection = prompt_with_options(
            prompter,
            "type",
            Some(default_type),
            Some(&["serial", "ethernet"][..]),
        )?
        .unwrap_or_else(|| default_type.to_string());

        if connection == "serial" {
            prompter.say("Specify a port for stations with a serial interface, for");
            prompter.say("example /dev/ttyUSB0 or /dev/ttyS0.");
            let default_port = existing.scalar("port").unwrap_or(DEFAULT_PORT);
            let port = prompt_with_options(prompter, "port", Some(default_port), None)?
                .unwrap_or_else(|| default_port.to_string());
            settings.set("port", port);
        } else {
            prompter.say("Specify the IP address (e.g., 192.168.0.10) or hostname");
            prompter.say("(e.g., console or console.example.com) for stations with");
            prompter.say("an ethernet interface.");
            let default_host = existing.scalar("host").unwrap_or(DEFAULT_HOST);
            let host = prompt_with_options(prompter, "host", Some(default_host), None)?
                .unwrap_or_else(|| default_host.to_string());
            settings.set("host", host);
        }
        settings.set("type", connection);
        Ok(settings)
    }
}
