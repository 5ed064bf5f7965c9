//! Per-annotator counters

use crate::filter::Rejection;

/// Counters for one annotator, for one document or merged over many
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatorStats {
    /// Annotator name
    pub annotator: String,

    /// Candidates returned by the annotator
    pub proposed: usize,

    /// Candidates inserted into the store
    pub accepted: usize,

    /// Candidates with an empty endpoint
    pub rejected_invalid: usize,

    /// Candidates repeating a pair earlier in the same batch
    pub rejected_duplicate: usize,

    /// Candidates whose pair was already claimed by an incompatible relation
    pub rejected_conflict: usize,

    /// Candidates whose pair was already claimed by a compatible relation
    pub redundant: usize,

    /// Links added by closure after this annotator
    pub derived: usize,

    /// Closure inferences dropped as contradictions
    pub closure_conflicts: usize,

    /// Times the annotator failed outright
    pub failed: usize,
}

impl AnnotatorStats {
    /// Create zeroed counters
    pub fn new(annotator: impl Into<String>) -> Self {
        Self {
            annotator: annotator.into(),
            ..Self::default()
        }
    }

    /// Count one rejected candidate
    pub fn record_rejection(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::Invalid => self.rejected_invalid += 1,
            Rejection::DuplicateProposal => self.rejected_duplicate += 1,
            Rejection::PriorClaim { compatible: true } => self.redundant += 1,
            Rejection::PriorClaim { compatible: false } => self.rejected_conflict += 1,
        }
    }

    /// All rejected candidates
    pub fn total_rejected(&self) -> usize {
        self.rejected_invalid + self.rejected_duplicate + self.rejected_conflict + self.redundant
    }

    /// Add another set of counters for the same annotator
    pub fn merge(&mut self, other: &AnnotatorStats) {
        self.proposed += other.proposed;
        self.accepted += other.accepted;
        self.rejected_invalid += other.rejected_invalid;
        self.rejected_duplicate += other.rejected_duplicate;
        self.rejected_conflict += other.rejected_conflict;
        self.redundant += other.redundant;
        self.derived += other.derived;
        self.closure_conflicts += other.closure_conflicts;
        self.failed += other.failed;
    }
}

/// Counters merged across documents, in annotator order
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Per-annotator counters in the order annotators first reported
    pub annotators: Vec<AnnotatorStats>,

    /// Documents merged so far
    pub documents: usize,
}

impl PipelineStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the counters of one finished document
    pub fn record_document(&mut self, document: &[AnnotatorStats]) {
        for stats in document {
            match self
                .annotators
                .iter_mut()
                .find(|s| s.annotator == stats.annotator)
            {
                Some(existing) => existing.merge(stats),
                None => self.annotators.push(stats.clone()),
            }
        }
        self.documents += 1;
    }

    /// Counters for one annotator
    pub fn for_annotator(&self, name: &str) -> Option<&AnnotatorStats> {
        self.annotators.iter().find(|s| s.annotator == name)
    }

    /// Get total candidates proposed across all annotators
    pub fn total_proposed(&self) -> usize {
        self.annotators.iter().map(|s| s.proposed).sum()
    }

    /// Get total links accepted directly
    pub fn total_accepted(&self) -> usize {
        self.annotators.iter().map(|s| s.accepted).sum()
    }

    /// Get total links added by closure
    pub fn total_derived(&self) -> usize {
        self.annotators.iter().map(|s| s.derived).sum()
    }

    /// Get total annotator failures
    pub fn total_failed(&self) -> usize {
        self.annotators.iter().map(|s| s.failed).sum()
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        self.annotators.clear();
        self.documents = 0;
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Pipeline Stats Summary".to_string(),
            "======================".to_string(),
            format!("Documents: {}", self.documents),
            String::new(),
        ];

        for s in &self.annotators {
            lines.push(format!("{}:", s.annotator));
            lines.push(format!(
                "  proposed {}, accepted {}, derived {}",
                s.proposed, s.accepted, s.derived
            ));
            lines.push(format!(
                "  rejected: {} invalid, {} duplicate, {} conflicting claim, {} redundant",
                s.rejected_invalid, s.rejected_duplicate, s.rejected_conflict, s.redundant
            ));
            if s.closure_conflicts > 0 || s.failed > 0 {
                lines.push(format!(
                    "  closure conflicts {}, failures {}",
                    s.closure_conflicts, s.failed
                ));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} proposed, {} accepted, {} derived",
            self.total_proposed(),
            self.total_accepted(),
            self.total_derived()
        ));
        lines.join("\n")
    }
}
