//! `%(NAME)s` placeholder substitution.
//!
//! A placeholder is resolved by looking `NAME` up in the section that holds the
//! value, then in each enclosing section up to the root. At every level a
//! `DEFAULT` subsection is consulted as well. Substituted text is itself
//! interpolated, in the context of the section it was found in.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{TreeError, TreeResult};
use crate::section::Section;

#[cfg(test)]
#[path = "interpolation_tests.rs"]
mod tests;

const MAX_DEPTH: usize = 10;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"%\(([^)]*)\)s").expect("placeholder pattern is valid"))
}

/// How a read treats `%(NAME)s` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Return the stored text untouched.
    Raw,
    /// Substitute placeholders against the section and its ancestors.
    Resolve,
}

/// Returns true if `text` contains at least one placeholder.
pub(crate) fn has_placeholders(text: &str) -> bool {
    placeholder().is_match(text)
}

/// Resolves every placeholder in `text`, a value stored in the section
/// reached by `path` from `root`.
pub(crate) fn interpolate(root: &Section, path: &[&str], text: &str) -> TreeResult<String> {
    resolve(root, path, text, 0)
}

fn resolve(root: &Section, path: &[&str], text: &str, depth: usize) -> TreeResult<String> {
    if !has_placeholders(text) {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for captures in placeholder().captures_iter(text) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if depth >= MAX_DEPTH {
            return Err(TreeError::InterpolationLoop {
                name: name.as_str().to_string(),
            });
        }

        let (found, level) = fetch(root, path, name.as_str()).ok_or_else(|| {
            TreeError::MissingInterpolationKey {
                name: name.as_str().to_string(),
                value: text.to_string(),
            }
        })?;
        let replacement = resolve(root, &path[..level], found, depth + 1)?;

        out.push_str(&text[last..whole.start()]);
        out.push_str(&replacement);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

/// Finds `name` starting at `path` and walking outwards. Returns the stored
/// text and the depth of the section it came from.
fn fetch<'a>(root: &'a Section, path: &[&str], name: &str) -> Option<(&'a str, usize)> {
    (0..=path.len()).rev().find_map(|level| {
        let section = root.path(&path[..level])?;
        section
            .scalar(name)
            .or_else(|| section.section("DEFAULT").and_then(|d| d.scalar(name)))
            .map(|found| (found, level))
    })
}
