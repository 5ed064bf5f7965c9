//! Error types for pipeline operations

use sieve_closure::ClosureError;
use thiserror::Error;

/// Errors that can occur while building or running a pipeline
///
/// Annotator faults and rejected proposals are not errors at this level;
/// they are recorded per document and the run continues.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Closure rules could not be loaded
    #[error("Closure error: {0}")]
    Closure(#[from] ClosureError),

    /// A configured annotator name is not registered
    #[error("Unknown annotator: {0}")]
    UnknownAnnotator(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
