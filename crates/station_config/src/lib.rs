//! Station configuration reconciliation.
//!
//! This crate creates a station configuration file from the bundled template,
//! or brings an existing one up to date, while leaving everything it does not
//! own exactly as the user wrote it.
//!
//! Every configurable property is settled with the same precedence: a value
//! supplied explicitly wins, otherwise the user is asked (unless prompting is
//! disabled), and an empty answer keeps the current or default value. See
//! [`precedence::resolve`].
//!
//! The reconcilers run in a fixed order through [`config_config`]:
//!
//! 1. station location, altitude, latitude and longitude
//! 2. station registry membership and URL
//! 3. report unit system
//! 4. hardware driver and its stanza
//! 5. root directories
//! 6. missing skins
//!
//! Terminal interaction goes through the [`Prompter`] trait and hardware
//! drivers are resolved from a [`DriverRegistry`], so both can be replaced in
//! tests.

pub mod driver;
pub mod drivers;
pub mod errors;
pub mod persist;
pub mod precedence;
pub mod prompt;
pub mod reconcile;
pub mod registry;
pub mod roots;
pub mod skins;
pub mod station;

pub use driver::{config_driver, DEFAULT_DRIVER};
pub use drivers::{DriverEditor, DriverInfo, DriverRegistry};
pub use errors::{StationError, StationResult};
pub use precedence::{resolve, Resolved, ValueSource};
pub use prompt::{Prompter, ScriptedPrompter};
pub use reconcile::{Altitude, UnitSystem};
pub use roots::RootPaths;
pub use station::{
    config_config, create_station, reconfigure_station, resolve_config_path, StationArgs,
    StationOutcome, DEFAULT_CONFIG_PATH,
};
