//! Command modules for the weectl CLI.
//!
//! - `station_cmd`: create, reconfigure and inspect a station configuration

pub mod station_cmd;
