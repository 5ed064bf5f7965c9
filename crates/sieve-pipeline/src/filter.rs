//! Candidate filtering ahead of insertion

use sieve_domain::TemporalLink;
use sieve_store::LinkStore;
use std::collections::HashSet;
use thiserror::Error;

/// Why a proposed link was not inserted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// An endpoint id is empty
    #[error("invalid link (empty endpoint)")]
    Invalid,

    /// The same pair appeared earlier in the same batch
    #[error("pair proposed twice in one batch")]
    DuplicateProposal,

    /// An earlier annotator already owns the pair
    #[error("pair already claimed (compatible: {compatible})")]
    PriorClaim {
        /// Whether the proposal agreed with the stored relation
        compatible: bool,
    },
}

/// Result of filtering one batch
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Candidates that may be inserted, in proposal order
    pub accepted: Vec<TemporalLink>,

    /// Dropped candidates and the reason for each
    pub rejected: Vec<(TemporalLink, Rejection)>,
}

/// Split a batch into insertable candidates and rejections
///
/// Checks run in order: invalid endpoints, then repeats of a pair already
/// seen in this batch (the first valid occurrence wins), then pairs already
/// present in `store`. A pair held in the store is never re-assigned, even
/// when the proposal agrees with it.
pub fn filter_candidates(candidates: Vec<TemporalLink>, store: &LinkStore) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut seen = HashSet::new();

    for candidate in candidates {
        let rejection = if !candidate.is_valid() {
            Some(Rejection::Invalid)
        } else if !seen.insert(candidate.pair()) {
            Some(Rejection::DuplicateProposal)
        } else if let Some(owner) = store.lookup(&candidate.id1, &candidate.id2) {
            let compatible = owner
                .relation_from(&candidate.id1)
                .is_some_and(|held| held.is_compatible_with(candidate.relation));
            Some(Rejection::PriorClaim { compatible })
        } else {
            None
        };

        match rejection {
            Some(reason) => outcome.rejected.push((candidate, reason)),
            None => outcome.accepted.push(candidate),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_domain::RelationType;

    #[test]
    fn test_filter_order() {
        let mut store = LinkStore::new();
        store
            .add(TemporalLink::new("e1", "e2", RelationType::Before))
            .unwrap();

        let outcome = filter_candidates(
            vec![
                TemporalLink::new("", "e3", RelationType::Before),
                TemporalLink::new("e3", "e4", RelationType::Before),
                TemporalLink::new("e4", "e3", RelationType::Before),
                TemporalLink::new("e2", "e1", RelationType::After),
                TemporalLink::new("e1", "e2", RelationType::After),
                TemporalLink::new("e5", "e6", RelationType::Vague),
            ],
            &store,
        );

        let accepted: Vec<String> = outcome.accepted.iter().map(|l| l.to_string()).collect();
        assert_eq!(accepted, vec!["e3 BEFORE e4", "e5 VAGUE e6"]);

        let reasons: Vec<Rejection> = outcome.rejected.iter().map(|(_, r)| *r).collect();
        assert_eq!(
            reasons,
            vec![
                Rejection::Invalid,
                Rejection::DuplicateProposal,
                Rejection::PriorClaim { compatible: true },
                Rejection::DuplicateProposal,
            ]
        );
    }

    #[test]
    fn test_prior_claim_compatibility() {
        let mut store = LinkStore::new();
        store
            .add(TemporalLink::new("A", "B", RelationType::Includes))
            .unwrap();

        let outcome = filter_candidates(
            vec![TemporalLink::new("B", "A", RelationType::BegunBy)],
            &store,
        );
        assert_eq!(outcome.rejected[0].1, Rejection::PriorClaim { compatible: true });

        let outcome = filter_candidates(
            vec![TemporalLink::new("A", "B", RelationType::Before)],
            &store,
        );
        assert_eq!(outcome.rejected[0].1, Rejection::PriorClaim { compatible: false });
    }
}
