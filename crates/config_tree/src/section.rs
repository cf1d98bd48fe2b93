//! Ordered sections with attached comment metadata.
//!
//! A [`Section`] is the building block of a [`crate::ConfigTree`]: an ordered
//! list of named entries, each either a leaf [`Value`] or a nested section.
//! Comments are kept in side tables keyed by entry name so that they follow
//! their entry wherever it moves.

use std::collections::HashMap;

use crate::errors::{TreeError, TreeResult};
use crate::value::Value;

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;

/// One named entry of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Value(Value),
    Section(Section),
}

/// Where a moved entry lands relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// An ordered mapping of names to values or subsections.
///
/// Insertion order is preserved. Replacing an existing entry keeps its
/// position; new entries are appended. Each entry may carry a block of
/// comment lines written above it and an inline comment written after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, Entry)>,
    comments: HashMap<String, Vec<String>>,
    inline_comments: HashMap<String, String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Returns the leaf value stored under `key`, ignoring subsections.
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.get(key)? {
            Entry::Value(value) => Some(value),
            Entry::Section(_) => None,
        }
    }

    /// Returns the value under `key` if it is a single string.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_scalar)
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        match self.get(key)? {
            Entry::Section(section) => Some(section),
            Entry::Value(_) => None,
        }
    }

    pub fn section_mut(&mut self, key: &str) -> Option<&mut Section> {
        let i = self.position(key)?;
        match &mut self.entries[i].1 {
            Entry::Section(section) => Some(section),
            Entry::Value(_) => None,
        }
    }

    /// Follows a chain of subsection names, e.g. `["DatabaseTypes", "SQLite"]`.
    pub fn path(&self, path: &[&str]) -> Option<&Section> {
        path.iter()
            .try_fold(self, |section, name| section.section(name))
    }

    pub fn path_mut(&mut self, path: &[&str]) -> Option<&mut Section> {
        let mut section = self;
        for name in path {
            section = section.section_mut(name)?;
        }
        Some(section)
    }

    /// Stores a leaf value, returning whatever was there before.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Option<Entry> {
        self.insert(key, Entry::Value(value.into()))
    }

    /// Stores a subsection, returning whatever was there before.
    pub fn insert_section(&mut self, key: &str, section: Section) -> Option<Entry> {
        self.insert(key, Entry::Section(section))
    }

    fn insert(&mut self, key: &str, entry: Entry) -> Option<Entry> {
        match self.position(key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, entry)),
            None => {
                self.entries.push((key.to_string(), entry));
                None
            }
        }
    }

    /// Returns the subsection under `key`, creating an empty one if needed.
    ///
    /// A leaf value stored under the same name is replaced.
    pub fn ensure_section(&mut self, key: &str) -> &mut Section {
        let i = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), Entry::Section(Section::new())));
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[i].1;
        if matches!(entry, Entry::Value(_)) {
            *entry = Entry::Section(Section::new());
        }
        match entry {
            Entry::Section(section) => section,
            Entry::Value(_) => unreachable!("entry was converted to a section above"),
        }
    }

    /// Removes an entry together with its comments.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let i = self.position(key)?;
        self.comments.remove(key);
        self.inline_comments.remove(key);
        Some(self.entries.remove(i).1)
    }

    /// Removes and returns a subsection. Leaf values are left alone.
    pub fn take_section(&mut self, key: &str) -> Option<Section> {
        match self.get(key)? {
            Entry::Section(_) => match self.remove(key)? {
                Entry::Section(section) => Some(section),
                Entry::Value(_) => None,
            },
            Entry::Value(_) => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Leaf values in order.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            Entry::Value(value) => Some((key.as_str(), value)),
            Entry::Section(_) => None,
        })
    }

    /// Subsections in order.
    pub fn subsections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            Entry::Section(section) => Some((key.as_str(), section)),
            Entry::Value(_) => None,
        })
    }

    /// The comment lines written above `key`. Empty if there are none.
    pub fn comments(&self, key: &str) -> &[String] {
        self.comments.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_comments(&mut self, key: &str, lines: Vec<String>) {
        if lines.is_empty() {
            self.comments.remove(key);
        } else {
            self.comments.insert(key.to_string(), lines);
        }
    }

    pub fn inline_comment(&self, key: &str) -> Option<&str> {
        self.inline_comments.get(key).map(String::as_str)
    }

    pub fn set_inline_comment(&mut self, key: &str, comment: Option<String>) {
        match comment {
            Some(comment) => {
                self.inline_comments.insert(key.to_string(), comment);
            }
            None => {
                self.inline_comments.remove(key);
            }
        }
    }

    /// Recursively merges `other` on top of this section.
    ///
    /// Subsections present on both sides are merged; everything else in
    /// `other` replaces or extends what is here. Comments of entries that are
    /// new to this section are carried over.
    pub fn merge(&mut self, other: Section) {
        let Section {
            entries,
            mut comments,
            mut inline_comments,
        } = other;

        for (key, entry) in entries {
            let is_new = !self.contains(&key);
            match entry {
                Entry::Section(incoming) if self.section(&key).is_some() => {
                    if let Some(existing) = self.section_mut(&key) {
                        existing.merge(incoming);
                    }
                }
                entry => {
                    self.insert(&key, entry);
                }
            }
            if is_new {
                if let Some(lines) = comments.remove(&key) {
                    self.set_comments(&key, lines);
                }
                self.set_inline_comment(&key, inline_comments.remove(&key));
            }
        }
    }

    /// Moves entry `src` so that it sits immediately before or after `anchor`.
    ///
    /// The moved entry keeps its value and comments. All other entries keep
    /// their relative order.
    pub fn move_entry(&mut self, src: &str, anchor: &str, placement: Placement) -> TreeResult<()> {
        let from = self
            .position(src)
            .ok_or_else(|| TreeError::SectionNotFound(src.to_string()))?;
        if !self.contains(anchor) {
            return Err(TreeError::SectionNotFound(anchor.to_string()));
        }
        if src == anchor {
            return Ok(());
        }

        let moved = self.entries.remove(from);
        let to = match self.position(anchor) {
            Some(i) => i,
            None => return Err(TreeError::SectionNotFound(anchor.to_string())),
        };
        let to = match placement {
            Placement::Before => to,
            Placement::After => to + 1,
        };
        self.entries.insert(to, moved);
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
