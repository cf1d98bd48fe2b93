//! Leaf values stored in a configuration document.

use std::fmt;

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;

/// A leaf value: either a single string or a comma-separated list of strings.
///
/// The document never interprets values beyond this distinction. Numbers and
/// booleans are kept as text so that whatever precision or spelling the user
/// supplied survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    /// Returns the string if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// Returns the items if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Scalar(_) => None,
            Value::List(items) => Some(items),
        }
    }

    /// Applies `f` to every string held by the value, keeping its shape.
    pub fn try_map<E, F>(&self, mut f: F) -> Result<Value, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        Ok(match self {
            Value::Scalar(s) => Value::Scalar(f(s)?),
            Value::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| f(item))
                    .collect::<Result<Vec<_>, E>>()?,
            ),
        })
    }
}

/// Displays lists the way a user would type them, `a, b`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.write_str(s),
            Value::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.clone())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(value.to_string())
    }
}
