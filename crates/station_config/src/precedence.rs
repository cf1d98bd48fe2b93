//! Three-tier value resolution.
//!
//! Every configurable field is settled the same way: a value supplied
//! explicitly wins outright; otherwise, when prompting is allowed, the user
//! is asked and an empty answer falls back; when prompting is not allowed the
//! fallback (the value already in the document, or a documented default) is
//! used unchanged.

use std::fmt::Debug;

use tracing::debug;

use crate::errors::StationResult;

#[cfg(test)]
#[path = "precedence_tests.rs"]
mod tests;

/// Which of the three sources produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Explicit,
    Interactive,
    Fallback,
}

/// A value together with the source that won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Resolves one field.
///
/// `ask` is only invoked when there is no explicit value and prompting is
/// allowed. It receives the fallback so it can show it as the default, and
/// returns `None` when the user accepted that default.
pub fn resolve<T, F>(
    field: &str,
    explicit: Option<T>,
    no_prompt: bool,
    fallback: T,
    ask: F,
) -> StationResult<Resolved<T>>
where
    T: Debug,
    F: FnOnce(&T) -> StationResult<Option<T>>,
{
    let resolved = match explicit {
        Some(value) => Resolved {
            value,
            source: ValueSource::Explicit,
        },
        None if !no_prompt => match ask(&fallback)? {
            Some(value) => Resolved {
                value,
                source: ValueSource::Interactive,
            },
            None => Resolved {
                value: fallback,
                source: ValueSource::Fallback,
            },
        },
        None => Resolved {
            value: fallback,
            source: ValueSource::Fallback,
        },
    };

    debug!(
        field = field,
        source = ?resolved.source,
        value = ?resolved.value,
        "Resolved configuration value"
    );
    Ok(resolved)
}
