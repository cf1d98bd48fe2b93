//! weectl CLI library exports for testing.
//!
//! This module exposes command implementations so they can be driven with a
//! scripted prompter instead of a terminal.

pub mod commands;
pub mod errors;
pub mod prompter;
