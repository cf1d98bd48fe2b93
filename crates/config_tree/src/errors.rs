use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while reading, writing or querying a configuration document.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A line could not be understood.
    ///
    /// Line numbers are 1-based and refer to the text handed to the parser.
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A key or section name appeared twice in the same section.
    #[error("Duplicate {kind} '{name}' at line {line}")]
    Duplicate {
        kind: &'static str,
        name: String,
        line: usize,
    },

    /// A section marker skipped one or more nesting levels.
    #[error("Section '{name}' at line {line} is nested too deeply")]
    Nesting { name: String, line: usize },

    /// A named section required by an operation does not exist.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// A `%(NAME)s` placeholder referenced an option that is not defined in
    /// the section or any of its ancestors.
    #[error("Missing option '{name}' referenced by interpolation in '{value}'")]
    MissingInterpolationKey { name: String, value: String },

    /// Interpolation recursed too deeply, which indicates a cycle.
    #[error("Interpolation loop detected while resolving '{name}'")]
    InterpolationLoop { name: String },

    /// Reading or writing the backing file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for document operations.
pub type TreeResult<T> = Result<T, TreeError>;
