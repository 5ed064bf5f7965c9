//! Temporal links - directed relation facts between two endpoints

use crate::endpoint::{EndpointId, EndpointKind, PairKey};
use crate::relation::RelationType;
use std::fmt;

/// Which kinds of entity a link connects
///
/// Always computed from the endpoint ids by [`LinkKind::classify`], never
/// from who created the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Event to event
    EventEvent,

    /// Event to time expression (either order)
    EventTime,

    /// Time expression to time expression
    TimeTime,
}

impl LinkKind {
    /// Classify a link by its two endpoint ids
    pub fn classify(id1: &EndpointId, id2: &EndpointId) -> Self {
        match (id1.kind(), id2.kind()) {
            (EndpointKind::Event, EndpointKind::Event) => LinkKind::EventEvent,
            (EndpointKind::Time, EndpointKind::Time) => LinkKind::TimeTime,
            _ => LinkKind::EventTime,
        }
    }

    /// Short lowercase label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::EventEvent => "event-event",
            LinkKind::EventTime => "event-time",
            LinkKind::TimeTime => "time-time",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed relation fact `id1 relation id2`
///
/// `(a, b, r)` and `(b, a, r.invert())` describe the same fact. Links are
/// immutable once accepted into a store.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalLink {
    /// Left endpoint
    pub id1: EndpointId,

    /// Right endpoint
    pub id2: EndpointId,

    /// Relation read from `id1` to `id2`
    pub relation: RelationType,

    /// Name of the annotator that proposed (or triggered the derivation of) this link
    pub provenance: Option<String>,

    /// True when the link was produced by closure rather than proposed directly
    pub derived: bool,

    /// Optional proposer confidence, carried through untouched
    pub confidence: Option<f64>,
}

impl TemporalLink {
    /// Create a proposed link with no provenance yet
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_domain::{LinkKind, RelationType, TemporalLink};
    ///
    /// let link = TemporalLink::new("e1", "t0", RelationType::Before);
    /// assert_eq!(link.kind(), LinkKind::EventTime);
    /// assert!(!link.derived);
    /// ```
    pub fn new(
        id1: impl Into<EndpointId>,
        id2: impl Into<EndpointId>,
        relation: RelationType,
    ) -> Self {
        Self {
            id1: id1.into(),
            id2: id2.into(),
            relation,
            provenance: None,
            derived: false,
            confidence: None,
        }
    }

    /// Create a link inferred by closure
    pub fn derived(
        id1: impl Into<EndpointId>,
        id2: impl Into<EndpointId>,
        relation: RelationType,
    ) -> Self {
        Self {
            derived: true,
            ..Self::new(id1, id2, relation)
        }
    }

    /// Set the provenance (annotator name)
    pub fn with_provenance(mut self, annotator: impl Into<String>) -> Self {
        self.provenance = Some(annotator.into());
        self
    }

    /// Attach a confidence score
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Canonical unordered pair key
    pub fn pair(&self) -> PairKey {
        PairKey::new(&self.id1, &self.id2)
    }

    /// Link kind derived from the endpoints
    pub fn kind(&self) -> LinkKind {
        LinkKind::classify(&self.id1, &self.id2)
    }

    /// True when both links connect the same unordered pair (relations ignored)
    pub fn covers_same_pair(&self, other: &TemporalLink) -> bool {
        (self.id1 == other.id1 && self.id2 == other.id2)
            || (self.id1 == other.id2 && self.id2 == other.id1)
    }

    /// True when both links state the same fact, in either orientation
    pub fn same_fact(&self, other: &TemporalLink) -> bool {
        self.covers_same_pair(other) && self.relation_from(&other.id1) == Some(other.relation)
    }

    /// Relation read from `from` towards the other endpoint
    ///
    /// Returns `None` if `from` is not an endpoint of this link.
    pub fn relation_from(&self, from: &EndpointId) -> Option<RelationType> {
        if *from == self.id1 {
            Some(self.relation)
        } else if *from == self.id2 {
            Some(self.relation.invert())
        } else {
            None
        }
    }

    /// Relation read from the pair key's `lo` endpoint to its `hi` endpoint
    pub fn ordered_relation(&self) -> RelationType {
        if PairKey::is_forward(&self.id1, &self.id2) {
            self.relation
        } else {
            self.relation.invert()
        }
    }

    /// The same fact with endpoints swapped
    pub fn reversed(&self) -> TemporalLink {
        TemporalLink {
            id1: self.id2.clone(),
            id2: self.id1.clone(),
            relation: self.relation.invert(),
            ..self.clone()
        }
    }

    /// A link is valid when both endpoint ids are present
    pub fn is_valid(&self) -> bool {
        !self.id1.is_empty() && !self.id2.is_empty()
    }
}

impl fmt::Display for TemporalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id1, self.relation, self.id2)
    }
}
