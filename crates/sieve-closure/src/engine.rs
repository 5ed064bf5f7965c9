//! Fixpoint closure and consistency checking

use crate::{CompositionTable, JunctionPattern};
use sieve_domain::{EndpointId, PairKey, RelationType, TemporalLink};
use std::collections::HashMap;

/// How a proposed relation relates to what an index already holds for its pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Pair not yet related
    New,
    /// Pair related by the same or a compatible relation
    Consistent,
    /// Pair related by an incompatible relation
    Conflict {
        /// Stored relation, oriented like the proposal
        existing: RelationType,
    },
}

/// Pair-keyed relation lookup
///
/// Relations are stored oriented from the key's `lo` endpoint to its `hi`
/// endpoint. The first relation indexed for a pair wins.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    seen: HashMap<PairKey, RelationType>,
}

impl RelationIndex {
    /// Index a set of links
    pub fn from_links<'a>(links: impl IntoIterator<Item = &'a TemporalLink>) -> Self {
        let mut index = Self::default();
        for link in links {
            index.insert(link);
        }
        index
    }

    /// Index one link unless its pair is already present
    pub fn insert(&mut self, link: &TemporalLink) {
        self.seen
            .entry(link.pair())
            .or_insert_with(|| link.ordered_relation());
    }

    /// Relation stored for `{a, b}`, read from `a` to `b`
    pub fn relation(&self, a: &EndpointId, b: &EndpointId) -> Option<RelationType> {
        let stored = *self.seen.get(&PairKey::new(a, b))?;
        if PairKey::is_forward(a, b) {
            Some(stored)
        } else {
            Some(stored.invert())
        }
    }

    /// Classify `a relation b` against the index
    pub fn status(&self, a: &EndpointId, b: &EndpointId, relation: RelationType) -> LinkStatus {
        match self.relation(a, b) {
            None => LinkStatus::New,
            Some(existing) if existing.is_compatible_with(relation) => LinkStatus::Consistent,
            Some(existing) => LinkStatus::Conflict { existing },
        }
    }

    /// Number of indexed pairs
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Outcome of one saturation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Saturation {
    /// Links appended
    pub added: usize,
    /// Inferences dropped because they contradicted an existing relation
    pub conflicts: usize,
    /// Passes over the edge list, including the final empty one
    pub passes: usize,
}

impl Saturation {
    /// True if any inference was dropped as a conflict
    pub fn conflict_occurred(&self) -> bool {
        self.conflicts > 0
    }
}

/// Links derived by [`ClosureEngine::expand_with_report`] plus run statistics
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Newly derived links, in derivation order
    pub links: Vec<TemporalLink>,
    /// Run statistics
    pub saturation: Saturation,
}

/// A shared endpoint between two facts and the two outer endpoints
struct Junction {
    pattern: JunctionPattern,
    b: EndpointId,
    c: EndpointId,
}

/// Find how two facts meet, if they share exactly one endpoint
fn junction(first: &TemporalLink, second: &TemporalLink) -> Option<Junction> {
    let (pattern, b, c) = if first.id1 == second.id1 && first.id2 != second.id2 {
        (JunctionPattern::AbAc, &first.id2, &second.id2)
    } else if first.id1 == second.id2 && first.id2 != second.id1 {
        (JunctionPattern::AbCa, &first.id2, &second.id1)
    } else if first.id2 == second.id1 && first.id1 != second.id2 {
        (JunctionPattern::BaAc, &first.id1, &second.id2)
    } else if first.id2 == second.id2 && first.id1 != second.id1 {
        (JunctionPattern::BaCa, &first.id1, &second.id1)
    } else {
        return None;
    };
    Some(Junction {
        pattern,
        b: b.clone(),
        c: c.clone(),
    })
}

/// Self-loops asserting identity or containment carry no ordering information
fn is_trivial_loop(link: &TemporalLink) -> bool {
    link.id1 == link.id2
        && matches!(
            link.relation,
            RelationType::Simultaneous | RelationType::Includes
        )
}

/// Transitive closure over a composition table
///
/// # Examples
///
/// ```
/// use sieve_closure::ClosureEngine;
/// use sieve_domain::{RelationType, TemporalLink};
///
/// let engine = ClosureEngine::standard().unwrap();
/// let derived = engine.expand(&[
///     TemporalLink::new("e1", "e2", RelationType::Before),
///     TemporalLink::new("e2", "e3", RelationType::Before),
/// ]);
/// assert_eq!(derived.len(), 1);
/// assert_eq!(derived[0].to_string(), "e1 BEFORE e3");
/// ```
#[derive(Debug, Clone)]
pub struct ClosureEngine {
    table: CompositionTable,
    trace: bool,
}

impl ClosureEngine {
    /// Create an engine over a table
    pub fn new(table: CompositionTable) -> Self {
        Self {
            table,
            trace: false,
        }
    }

    /// Engine over the bundled rules
    pub fn standard() -> Result<Self, crate::ClosureError> {
        Ok(Self::new(CompositionTable::standard()?))
    }

    /// Log every inference at debug level
    pub fn with_tracing(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// The composition table in use
    pub fn table(&self) -> &CompositionTable {
        &self.table
    }

    /// Whether `candidate` can join `existing` without contradicting the
    /// relation already held for its pair
    pub fn check_consistency(&self, existing: &[TemporalLink], candidate: &TemporalLink) -> bool {
        let index = RelationIndex::from_links(existing);
        match index.status(&candidate.id1, &candidate.id2, candidate.relation) {
            LinkStatus::Conflict { existing } => {
                tracing::debug!(
                    candidate = %candidate,
                    existing = %existing,
                    "Candidate conflicts with existing relation"
                );
                false
            }
            LinkStatus::New | LinkStatus::Consistent => true,
        }
    }

    /// Links entailed by `edges` that `edges` does not already relate
    ///
    /// `edges` is left untouched.
    pub fn expand(&self, edges: &[TemporalLink]) -> Vec<TemporalLink> {
        self.expand_with_report(edges).links
    }

    /// Like [`expand`](Self::expand), also reporting conflicts and passes
    pub fn expand_with_report(&self, edges: &[TemporalLink]) -> Expansion {
        self.expand_from(edges, 0)
    }

    /// Expand `edges` whose first `settled` links are already closed
    ///
    /// Pairs of two settled links are never examined, so conflicts among
    /// them are not found again. With `settled` of 0 this is
    /// [`expand_with_report`](Self::expand_with_report).
    pub fn expand_from(&self, edges: &[TemporalLink], settled: usize) -> Expansion {
        let mut working = edges.to_vec();
        let mut links = Vec::new();
        let saturation = self.saturate_from(&mut working, settled, &mut links);
        Expansion { links, saturation }
    }

    /// Extend `edges` to its fixpoint under the composition table
    ///
    /// Every appended link is also pushed onto `new_edges`. Each pair of
    /// edges is examined once over the whole run: the first pass covers the
    /// input edges, later passes only pairs involving an edge appended by
    /// the previous pass. An inference that contradicts the relation already
    /// held for its pair is dropped and counted; it never aborts the run.
    pub fn saturate_in_place(
        &self,
        edges: &mut Vec<TemporalLink>,
        new_edges: &mut Vec<TemporalLink>,
    ) -> Saturation {
        self.saturate_from(edges, 0, new_edges)
    }

    fn saturate_from(
        &self,
        edges: &mut Vec<TemporalLink>,
        settled: usize,
        new_edges: &mut Vec<TemporalLink>,
    ) -> Saturation {
        let mut index = RelationIndex::from_links(edges.iter());
        let mut report = Saturation::default();
        let mut size = settled.min(edges.len());

        loop {
            let old_size = size;
            size = edges.len();
            report.passes += 1;

            for i in 0..size {
                let start = if i >= old_size { i + 1 } else { old_size };
                for j in start..size {
                    let Some((junction, relation)) = self.infer(&edges[i], &edges[j]) else {
                        continue;
                    };

                    match index.status(&junction.b, &junction.c, relation) {
                        LinkStatus::New => {
                            let link = TemporalLink::derived(junction.b, junction.c, relation);
                            if self.trace {
                                tracing::debug!(
                                    link = %link,
                                    kind = %link.kind(),
                                    pattern = %junction.pattern,
                                    from_first = %edges[i],
                                    from_second = %edges[j],
                                    "Inferred link"
                                );
                            }
                            index.insert(&link);
                            new_edges.push(link.clone());
                            edges.push(link);
                            report.added += 1;
                        }
                        LinkStatus::Consistent => {}
                        LinkStatus::Conflict { existing } => {
                            report.conflicts += 1;
                            tracing::debug!(
                                b = %junction.b,
                                c = %junction.c,
                                existing = %existing,
                                inferred = %relation,
                                "Closure conflict"
                            );
                        }
                    }
                }
            }

            if edges.len() == size {
                break;
            }
        }

        report
    }

    fn infer(
        &self,
        first: &TemporalLink,
        second: &TemporalLink,
    ) -> Option<(Junction, RelationType)> {
        if is_trivial_loop(first) || is_trivial_loop(second) {
            return None;
        }
        let junction = junction(first, second)?;
        let relation = self
            .table
            .compose(first.relation, second.relation, junction.pattern)?;
        Some((junction, relation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(a: &str, b: &str, r: RelationType) -> TemporalLink {
        TemporalLink::new(a, b, r)
    }

    #[test]
    fn test_junction_patterns() {
        let ab = link("A", "B", RelationType::Before);
        let ac = link("A", "C", RelationType::Before);
        let ca = link("C", "A", RelationType::Before);
        let ba = link("B", "A", RelationType::Before);
        let bc = link("B", "C", RelationType::Before);

        assert_eq!(junction(&ab, &ac).map(|j| j.pattern), Some(JunctionPattern::AbAc));
        assert_eq!(junction(&ab, &ca).map(|j| j.pattern), Some(JunctionPattern::AbCa));
        assert_eq!(junction(&ba, &ac).map(|j| j.pattern), Some(JunctionPattern::BaAc));
        assert_eq!(junction(&ba, &ca).map(|j| j.pattern), Some(JunctionPattern::BaCa));

        let j = junction(&ab, &bc).unwrap();
        assert_eq!(j.pattern, JunctionPattern::BaAc);
        assert_eq!(j.b.as_str(), "A");
        assert_eq!(j.c.as_str(), "C");
    }

    #[test]
    fn test_junction_requires_exactly_one_shared_endpoint() {
        let ab = link("A", "B", RelationType::Before);
        assert!(junction(&ab, &link("A", "B", RelationType::After)).is_none());
        assert!(junction(&ab, &link("B", "A", RelationType::After)).is_none());
        assert!(junction(&ab, &link("C", "D", RelationType::After)).is_none());
    }

    #[test]
    fn test_trivial_loops_skipped() {
        let engine = ClosureEngine::standard().unwrap();
        let derived = engine.expand(&[
            link("A", "A", RelationType::Simultaneous),
            link("A", "B", RelationType::Before),
        ]);
        assert!(derived.is_empty());
    }

    #[test]
    fn test_index_orientation() {
        let index = RelationIndex::from_links(&[link("e2", "e1", RelationType::Before)]);
        let e1 = EndpointId::new("e1");
        let e2 = EndpointId::new("e2");
        assert_eq!(index.relation(&e1, &e2), Some(RelationType::After));
        assert_eq!(index.relation(&e2, &e1), Some(RelationType::Before));
        assert_eq!(index.status(&e1, &e2, RelationType::After), LinkStatus::Consistent);
        assert_eq!(index.status(&e1, &e2, RelationType::IAfter), LinkStatus::Consistent);
        assert_eq!(
            index.status(&e1, &e2, RelationType::Before),
            LinkStatus::Conflict {
                existing: RelationType::After
            }
        );
    }

    #[test]
    fn test_empty_table_derives_nothing() {
        let engine = ClosureEngine::new(CompositionTable::empty());
        let report = engine.expand_with_report(&[
            link("A", "B", RelationType::Before),
            link("B", "C", RelationType::Before),
        ]);
        assert!(report.links.is_empty());
        assert_eq!(report.saturation.passes, 1);
        assert!(!report.saturation.conflict_occurred());
    }

    #[test]
    fn test_settled_prefix_is_not_revisited() {
        let engine = ClosureEngine::standard().unwrap();
        let edges = vec![
            link("A", "B", RelationType::Before),
            link("B", "C", RelationType::Before),
            link("A", "C", RelationType::After),
            link("D", "E", RelationType::Before),
        ];

        let full = engine.expand_from(&edges, 0);
        assert!(full.saturation.conflict_occurred());

        let incremental = engine.expand_from(&edges, 3);
        assert!(incremental.links.is_empty());
        assert_eq!(incremental.saturation.conflicts, 0);
    }

    #[test]
    fn test_settled_prefix_still_joins_new_edges() {
        let engine = ClosureEngine::standard().unwrap();
        let edges = vec![
            link("A", "B", RelationType::Before),
            link("B", "C", RelationType::Before),
        ];
        let report = engine.expand_from(&edges, 1);
        assert_eq!(report.links.len(), 1);
        assert_eq!(report.links[0].to_string(), "A BEFORE C");
    }

    #[test]
    fn test_expand_leaves_input_untouched() {
        let engine = ClosureEngine::standard().unwrap();
        let input = vec![
            link("A", "B", RelationType::Before),
            link("B", "C", RelationType::Before),
        ];
        let before = input.clone();
        let _ = engine.expand(&input);
        assert_eq!(input, before);
    }
}
