//! Closure error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading composition rules or closure settings
#[derive(Error, Debug)]
pub enum ClosureError {
    /// Reading a rule stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading a rule file failed
    #[error("Failed to read rules file {}: {source}", path.display())]
    RulesFile {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A rule names a relation outside the algebra
    #[error("Unknown relation '{name}' on line {line}")]
    UnknownRelation {
        /// 1-based line number
        line: usize,
        /// Offending token
        name: String,
    },

    /// A rule line does not have exactly three relation names
    #[error("Malformed rule on line {line}: '{text}'")]
    MalformedRule {
        /// 1-based line number
        line: usize,
        /// Line content
        text: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
