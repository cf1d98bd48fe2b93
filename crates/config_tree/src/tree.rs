//! The whole configuration document.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::errors::{TreeError, TreeResult};
use crate::interpolation::{interpolate, Interpolation};
use crate::parser;
use crate::section::{Placement, Section};
use crate::value::Value;
use crate::writer;

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;

/// Indentation used when a document does not show one of its own.
pub const DEFAULT_INDENT: &str = "    ";

/// An ordered, comment-annotated configuration document.
///
/// The document owns a root [`Section`] plus the comment blocks that sit
/// before the first entry and after the last one. Reads that may contain
/// `%(NAME)s` placeholders take an explicit [`Interpolation`] mode; writes
/// always store text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTree {
    root: Section,
    initial_comment: Vec<String>,
    final_comment: Vec<String>,
    indent: String,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::from_parts(Section::new(), Vec::new(), Vec::new(), DEFAULT_INDENT.to_string())
    }
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        root: Section,
        initial_comment: Vec<String>,
        final_comment: Vec<String>,
        indent: String,
    ) -> Self {
        Self {
            root,
            initial_comment,
            final_comment,
            indent,
        }
    }

    /// Parses a document from text.
    pub fn parse(text: &str) -> TreeResult<Self> {
        parser::parse(text)
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: &Path) -> TreeResult<Self> {
        debug!(path = ?path, "Loading configuration document");
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Builds a document holding a single top-level section.
    ///
    /// This is the raw-text form of a stanza: `ConfigTree::with_section(name,
    /// stanza).to_string()` yields text a driver editor can work on.
    pub fn with_section(name: &str, section: Section) -> Self {
        let mut tree = Self::new();
        tree.root.insert_section(name, section);
        tree
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    pub fn contains(&self, key: &str) -> bool {
        self.root.contains(key)
    }

    /// A top-level section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.root.section(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.root.section_mut(name)
    }

    /// A nested section, e.g. `["StdRESTful", "StationRegistry"]`.
    pub fn path(&self, path: &[&str]) -> Option<&Section> {
        self.root.path(path)
    }

    pub fn path_mut(&mut self, path: &[&str]) -> Option<&mut Section> {
        self.root.path_mut(path)
    }

    pub fn initial_comment(&self) -> &[String] {
        &self.initial_comment
    }

    pub fn final_comment(&self) -> &[String] {
        &self.final_comment
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Reads the value of `key` in the section at `path`.
    ///
    /// With [`Interpolation::Resolve`], placeholders are substituted against
    /// that section and its ancestors; a placeholder that cannot be resolved
    /// is an error.
    pub fn value_at(
        &self,
        path: &[&str],
        key: &str,
        mode: Interpolation,
    ) -> TreeResult<Option<Value>> {
        let Some(value) = self.root.path(path).and_then(|s| s.value(key)) else {
            return Ok(None);
        };
        match mode {
            Interpolation::Raw => Ok(Some(value.clone())),
            Interpolation::Resolve => value
                .try_map(|text| interpolate(&self.root, path, text))
                .map(Some),
        }
    }

    /// Like [`ConfigTree::value_at`], for values that must be a single string.
    pub fn scalar_at(
        &self,
        path: &[&str],
        key: &str,
        mode: Interpolation,
    ) -> TreeResult<Option<String>> {
        Ok(self
            .value_at(path, key, mode)?
            .and_then(|value| value.as_scalar().map(str::to_string)))
    }

    /// Moves top-level section `src` immediately before or after `anchor`.
    ///
    /// The moved section keeps its content and comment block; every other
    /// section keeps its relative order.
    pub fn reorder_sections(
        &mut self,
        src: &str,
        anchor: &str,
        placement: Placement,
    ) -> TreeResult<()> {
        for name in [src, anchor] {
            if self.root.section(name).is_none() {
                return Err(TreeError::SectionNotFound(name.to_string()));
            }
        }
        debug!(section = src, anchor, ?placement, "Reordering sections");
        self.root.move_entry(src, anchor, placement)
    }

    /// Serializes the document, one string per line.
    pub fn to_lines(&self) -> Vec<String> {
        writer::write(self)
    }

    /// Writes the document to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> TreeResult<()> {
        fs::write(path, self.to_string())?;
        debug!(path = ?path, "Wrote configuration document");
        Ok(())
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for ConfigTree {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
