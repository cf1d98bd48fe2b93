//! Ordered, comment-preserving configuration documents.
//!
//! This crate reads and writes the sectioned `key = value` format used by
//! `weewx.conf`. Unlike a serde round trip, it keeps everything a human put in
//! the file: the order of sections and options, the comment block above each
//! entry, inline comments, and `%(NAME)s` interpolation placeholders.
//!
//! ```rust
//! use config_tree::{ConfigTree, Interpolation, Placement};
//!
//! let text = "\
//! WEEWX_ROOT = /home/weewx
//!
//! [Station]
//!     ## A description of the station.
//!     location = My Home Town
//!
//! [DatabaseTypes]
//!     [[SQLite]]
//!         SQLITE_ROOT = %(WEEWX_ROOT)s/archive
//!
//! [Simulator]
//!     driver = weewx.drivers.simulator
//! ";
//! let mut tree = ConfigTree::parse(text)?;
//!
//! let root = tree.scalar_at(&["DatabaseTypes", "SQLite"], "SQLITE_ROOT", Interpolation::Resolve)?;
//! assert_eq!(root.as_deref(), Some("/home/weewx/archive"));
//!
//! tree.reorder_sections("Simulator", "Station", Placement::After)?;
//! let names: Vec<&str> = tree.root().keys().collect();
//! assert_eq!(names, vec!["WEEWX_ROOT", "Station", "Simulator", "DatabaseTypes"]);
//! # Ok::<(), config_tree::TreeError>(())
//! ```

pub mod errors;
pub mod interpolation;
mod parser;
pub mod section;
pub mod tree;
pub mod value;
mod writer;

pub use errors::{TreeError, TreeResult};
pub use interpolation::Interpolation;
pub use section::{Entry, Placement, Section};
pub use tree::{ConfigTree, DEFAULT_INDENT};
pub use value::Value;
