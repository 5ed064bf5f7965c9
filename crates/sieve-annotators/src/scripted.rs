//! Annotator replaying pre-configured proposals

use sieve_domain::{Annotator, AnnotatorFault, Document, TemporalLink};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Deterministic annotator for testing and demos
///
/// Returns fixed proposals without looking at the document, optionally
/// per document name, and can be told to fail on given documents.
///
/// # Examples
///
/// ```
/// use sieve_annotators::ScriptedAnnotator;
/// use sieve_domain::{Annotator, Document, RelationType, TemporalLink, Timex, TimexType};
///
/// let annotator = ScriptedAnnotator::new("rules")
///     .proposing(vec![TemporalLink::new("e1", "e2", RelationType::Before)])
///     .failing_on("broken");
///
/// let dct = Timex::new("t0", 0, 0, TimexType::Date, "2000-01-01");
/// assert_eq!(annotator.propose(&Document::new("ok", dct.clone()), &[]).unwrap().len(), 1);
/// assert!(annotator.propose(&Document::new("broken", dct), &[]).is_err());
/// assert_eq!(annotator.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedAnnotator {
    name: String,
    default_proposals: Vec<TemporalLink>,
    per_document: HashMap<String, Vec<TemporalLink>>,
    failing: HashSet<String>,
    fail_always: bool,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAnnotator {
    /// Create an annotator that proposes nothing
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_proposals: Vec::new(),
            per_document: HashMap::new(),
            failing: HashSet::new(),
            fail_always: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Proposals for every document without a specific script
    pub fn proposing(mut self, links: Vec<TemporalLink>) -> Self {
        self.default_proposals = links;
        self
    }

    /// Proposals for one document
    pub fn proposing_for(mut self, document: impl Into<String>, links: Vec<TemporalLink>) -> Self {
        self.per_document.insert(document.into(), links);
        self
    }

    /// Fail on one document
    pub fn failing_on(mut self, document: impl Into<String>) -> Self {
        self.failing.insert(document.into());
        self
    }

    /// Fail on every document
    pub fn always_failing(mut self) -> Self {
        self.fail_always = true;
        self
    }

    /// Number of times `propose` was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Annotator for ScriptedAnnotator {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose(
        &self,
        doc: &Document,
        _current: &[TemporalLink],
    ) -> Result<Vec<TemporalLink>, AnnotatorFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_always || self.failing.contains(&doc.name) {
            return Err(AnnotatorFault::new(format!(
                "{} scripted to fail on {}",
                self.name, doc.name
            )));
        }

        Ok(self
            .per_document
            .get(&doc.name)
            .unwrap_or(&self.default_proposals)
            .clone())
    }
}
