//! Trait definitions for external interactions
//!
//! Annotators are the proposers the arbitration pipeline consults. Concrete
//! implementations live in other crates (sieve-annotators, host programs).

use crate::{Document, TemporalLink};
use thiserror::Error;

/// A proposer of candidate temporal links
///
/// Implementations see the document and the links accepted so far, both
/// read-only. The pipeline, not the annotator, decides what is kept.
pub trait Annotator: Send + Sync {
    /// Stable name, recorded as provenance on every accepted link
    fn name(&self) -> &str;

    /// Propose candidate links for `doc`
    fn propose(
        &self,
        doc: &Document,
        current: &[TemporalLink],
    ) -> Result<Vec<TemporalLink>, AnnotatorFault>;
}

/// An annotator could not produce proposals for a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AnnotatorFault {
    /// Human-readable cause
    pub message: String,
}

impl AnnotatorFault {
    /// Create a fault with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<A: Annotator + ?Sized> Annotator for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn propose(
        &self,
        doc: &Document,
        current: &[TemporalLink],
    ) -> Result<Vec<TemporalLink>, AnnotatorFault> {
        (**self).propose(doc, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_displays_its_message() {
        let fault = AnnotatorFault::new("no dct");
        assert_eq!(fault.to_string(), "no dct");
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(fault);
        assert_eq!(boxed.to_string(), "no dct");
    }
}
