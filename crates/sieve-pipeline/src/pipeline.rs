//! Arbitration pipeline: runs annotators in priority order over one document

use crate::filter::{filter_candidates, Rejection};
use crate::{AnnotatorRegistry, AnnotatorStats, PipelineConfig, PipelineError};
use sieve_closure::ClosureEngine;
use sieve_domain::{Annotator, Document, TemporalLink};
use sieve_store::LinkStore;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use uuid::Uuid;

/// An annotator that returned an error for a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Annotator '{annotator}' failed: {message}")]
pub struct AnnotatorFailure {
    /// Annotator name
    pub annotator: String,
    /// Reported cause
    pub message: String,
}

/// Where a per-document run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started; the store has not been reset yet
    Idle,
    /// The annotator at this index runs on the next step
    RunningAnnotator(usize),
    /// All annotators have run
    Done,
}

/// Result of running a pipeline over one document
#[derive(Debug, Clone)]
pub struct DocumentRun {
    /// Identifier used to correlate log lines of this run
    pub run_id: Uuid,
    /// Document name
    pub document: String,
    /// Accepted links, direct and derived
    pub store: LinkStore,
    /// Counters, one entry per annotator that ran
    pub stats: Vec<AnnotatorStats>,
    /// Annotators that failed on this document
    pub failures: Vec<AnnotatorFailure>,
}

impl DocumentRun {
    /// Accepted links in insertion order
    pub fn links(&self) -> &[TemporalLink] {
        self.store.links()
    }

    /// Counters for one annotator
    pub fn stats_for(&self, annotator: &str) -> Option<&AnnotatorStats> {
        self.stats.iter().find(|s| s.annotator == annotator)
    }
}

/// Ordered annotators plus an optional closure engine
///
/// Earlier annotators have priority: once a pair is linked, later proposals
/// for that pair are dropped. After each annotator that got at least one
/// proposal accepted, closure adds every link the store now entails.
///
/// # Examples
///
/// ```
/// use sieve_annotators::ScriptedAnnotator;
/// use sieve_closure::ClosureEngine;
/// use sieve_domain::{Document, RelationType, TemporalLink, Timex, TimexType};
/// use sieve_pipeline::ArbitrationPipeline;
///
/// let first = ScriptedAnnotator::new("first").proposing(vec![
///     TemporalLink::new("e1", "e2", RelationType::Before),
///     TemporalLink::new("e2", "e3", RelationType::Before),
/// ]);
/// let pipeline = ArbitrationPipeline::new(
///     vec![Box::new(first)],
///     Some(ClosureEngine::standard().unwrap()),
/// );
///
/// let doc = Document::new("doc", Timex::new("t0", 0, 0, TimexType::Date, "2000-01-01"));
/// let run = pipeline.run(&doc);
/// assert_eq!(run.links().len(), 3);
/// assert_eq!(run.store.derived_count(), 1);
/// ```
pub struct ArbitrationPipeline {
    annotators: Vec<Box<dyn Annotator>>,
    closure: Option<ClosureEngine>,
}

impl ArbitrationPipeline {
    /// Create a pipeline; `closure` of `None` disables closure
    pub fn new(annotators: Vec<Box<dyn Annotator>>, closure: Option<ClosureEngine>) -> Self {
        Self {
            annotators,
            closure,
        }
    }

    /// Assemble a pipeline from configuration and a registry
    pub fn from_config(
        config: &PipelineConfig,
        registry: &AnnotatorRegistry,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        let annotators = registry.build(&config.annotators)?;
        let closure = if config.closure.enabled {
            Some(config.closure.build_engine()?)
        } else {
            None
        };

        tracing::info!(
            annotators = ?config.annotators,
            closure = config.closure.enabled,
            "Pipeline assembled"
        );
        Ok(Self::new(annotators, closure))
    }

    /// Annotator names in priority order
    pub fn annotator_names(&self) -> Vec<&str> {
        self.annotators.iter().map(|a| a.name()).collect()
    }

    /// Whether closure runs after annotators
    pub fn closure_enabled(&self) -> bool {
        self.closure.is_some()
    }

    /// Begin a step-wise run over `doc`
    pub fn start<'a>(&'a self, doc: &'a Document) -> PipelineRun<'a> {
        PipelineRun {
            pipeline: self,
            doc,
            state: PipelineState::Idle,
            run_id: Uuid::now_v7(),
            store: LinkStore::new(),
            stats: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Run every annotator over `doc`
    pub fn run(&self, doc: &Document) -> DocumentRun {
        self.start(doc).finish()
    }
}

impl std::fmt::Debug for ArbitrationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArbitrationPipeline")
            .field("annotators", &self.annotator_names())
            .field("closure", &self.closure_enabled())
            .finish()
    }
}

/// A run over one document that can be advanced one annotator at a time
///
/// Between steps the store holds a valid partial result.
pub struct PipelineRun<'a> {
    pipeline: &'a ArbitrationPipeline,
    doc: &'a Document,
    state: PipelineState,
    run_id: Uuid,
    store: LinkStore,
    stats: Vec<AnnotatorStats>,
    failures: Vec<AnnotatorFailure>,
}

impl<'a> PipelineRun<'a> {
    /// Current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Links accepted so far
    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    /// Counters of annotators that have run
    pub fn stats(&self) -> &[AnnotatorStats] {
        &self.stats
    }

    /// Run identifier
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Advance by one transition and return the new state
    pub fn step(&mut self) -> PipelineState {
        self.state = match self.state {
            PipelineState::Idle => {
                self.store.clear();
                tracing::debug!(
                    run_id = %self.run_id,
                    document = %self.doc.name,
                    "Starting document"
                );
                self.next_after(None)
            }
            PipelineState::RunningAnnotator(i) => {
                self.run_annotator(i);
                self.next_after(Some(i))
            }
            PipelineState::Done => PipelineState::Done,
        };
        self.state
    }

    /// Step until done and hand over the result
    pub fn finish(mut self) -> DocumentRun {
        while self.state != PipelineState::Done {
            self.step();
        }

        tracing::info!(
            run_id = %self.run_id,
            document = %self.doc.name,
            links = self.store.len(),
            derived = self.store.derived_count(),
            failures = self.failures.len(),
            "Document done"
        );

        DocumentRun {
            run_id: self.run_id,
            document: self.doc.name.clone(),
            store: self.store,
            stats: self.stats,
            failures: self.failures,
        }
    }

    fn next_after(&self, current: Option<usize>) -> PipelineState {
        let next = current.map_or(0, |i| i + 1);
        if next < self.pipeline.annotators.len() {
            PipelineState::RunningAnnotator(next)
        } else {
            PipelineState::Done
        }
    }

    fn run_annotator(&mut self, index: usize) {
        let pipeline = self.pipeline;
        let annotator = &pipeline.annotators[index];
        let name = annotator.name().to_string();
        let mut stats = AnnotatorStats::new(name.as_str());

        let proposed = catch_unwind(AssertUnwindSafe(|| {
            annotator.propose(self.doc, self.store.links())
        }));
        let result = match proposed {
            Ok(Ok(candidates)) => Ok(candidates),
            Ok(Err(fault)) => Err(fault.message),
            Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
        };
        let candidates = match result {
            Ok(candidates) => candidates,
            Err(message) => {
                tracing::error!(
                    run_id = %self.run_id,
                    document = %self.doc.name,
                    annotator = %name,
                    error = %message,
                    "Annotator failed; continuing without its proposals"
                );
                stats.failed += 1;
                self.failures.push(AnnotatorFailure {
                    annotator: name,
                    message,
                });
                self.stats.push(stats);
                return;
            }
        };
        stats.proposed = candidates.len();

        let outcome = filter_candidates(candidates, &self.store);
        for (link, reason) in &outcome.rejected {
            stats.record_rejection(reason);
            if matches!(reason, Rejection::PriorClaim { .. }) {
                tracing::debug!(annotator = %name, link = %link, reason = %reason, "Proposal dropped");
            } else {
                tracing::warn!(annotator = %name, link = %link, reason = %reason, "Proposal dropped");
            }
        }

        // Links before this point were closed by earlier annotators
        let settled = self.store.len();
        for mut link in outcome.accepted {
            link.provenance = Some(name.clone());
            link.derived = false;
            if self.store.add(link).is_ok() {
                stats.accepted += 1;
            }
        }

        if stats.accepted > 0 {
            if let Some(engine) = &pipeline.closure {
                let expansion = engine.expand_from(self.store.links(), settled);
                stats.closure_conflicts = expansion.saturation.conflicts;
                for link in expansion.links {
                    if self.store.add(link.with_provenance(name.as_str())).is_ok() {
                        stats.derived += 1;
                    }
                }
            }
        }

        tracing::debug!(
            run_id = %self.run_id,
            annotator = %name,
            proposed = stats.proposed,
            accepted = stats.accepted,
            derived = stats.derived,
            rejected = stats.total_rejected(),
            "Annotator finished"
        );
        self.stats.push(stats);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_annotators::ScriptedAnnotator;
    use sieve_domain::{RelationType, Timex, TimexType};

    fn doc() -> Document {
        Document::new("doc", Timex::new("t0", 0, 0, TimexType::Date, "2000-01-01"))
    }

    #[test]
    fn test_state_machine() {
        let pipeline = ArbitrationPipeline::new(
            vec![
                Box::new(ScriptedAnnotator::new("a")),
                Box::new(ScriptedAnnotator::new("b")),
            ],
            None,
        );
        let doc = doc();
        let mut run = pipeline.start(&doc);

        assert_eq!(run.state(), PipelineState::Idle);
        assert_eq!(run.step(), PipelineState::RunningAnnotator(0));
        assert_eq!(run.step(), PipelineState::RunningAnnotator(1));
        assert_eq!(run.stats().len(), 1);
        assert_eq!(run.step(), PipelineState::Done);
        assert_eq!(run.step(), PipelineState::Done);
        assert_eq!(run.finish().stats.len(), 2);
    }

    #[test]
    fn test_empty_pipeline_is_done_immediately() {
        let pipeline = ArbitrationPipeline::new(Vec::new(), None);
        let doc = doc();
        let mut run = pipeline.start(&doc);
        assert_eq!(run.step(), PipelineState::Done);
    }

    #[test]
    fn test_provenance_and_derived_flag_are_set_by_pipeline() {
        let proposal = TemporalLink::derived("e1", "e2", RelationType::Before).with_provenance("spoofed");
        let pipeline = ArbitrationPipeline::new(
            vec![Box::new(ScriptedAnnotator::new("real").proposing(vec![proposal]))],
            None,
        );
        let run = pipeline.run(&doc());
        let link = &run.links()[0];
        assert_eq!(link.provenance.as_deref(), Some("real"));
        assert!(!link.derived);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("bad index");
        assert_eq!(panic_message(payload.as_ref()), "bad index");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_closure_skipped_without_accepted_proposals() {
        let pipeline = ArbitrationPipeline::new(
            vec![Box::new(ScriptedAnnotator::new("a"))],
            Some(ClosureEngine::standard().unwrap()),
        );
        let run = pipeline.run(&doc());
        assert!(run.links().is_empty());
        assert_eq!(run.stats_for("a").unwrap().derived, 0);
    }
}
