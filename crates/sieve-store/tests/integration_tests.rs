//! Integration tests for sieve-store
//!
//! These tests exercise the one-link-per-pair invariant over arbitrary
//! insertion sequences.

use proptest::prelude::*;
use sieve_domain::{EndpointId, RelationType, TemporalLink};
use sieve_store::{LinkStore, StoreError};
use std::collections::HashMap;

#[test]
fn test_first_link_for_pair_wins() {
    let mut store = LinkStore::new();
    store
        .add(TemporalLink::new("e1", "e2", RelationType::Before).with_provenance("first"))
        .unwrap();
    let rejected = store.add(TemporalLink::new("e2", "e1", RelationType::Before).with_provenance("second"));

    match rejected {
        Err(StoreError::PairAlreadyLinked { pair, existing }) => {
            assert_eq!(pair.lo().as_str(), "e1");
            assert_eq!(existing, "e1 BEFORE e2");
        }
        other => panic!("expected pair conflict, got {:?}", other),
    }

    let kept = store
        .lookup(&EndpointId::new("e2"), &EndpointId::new("e1"))
        .unwrap();
    assert_eq!(kept.provenance.as_deref(), Some("first"));
}

#[test]
fn test_iteration_preserves_insertion_order() {
    let mut store = LinkStore::new();
    for (a, b) in [("e3", "e4"), ("e1", "e2"), ("t0", "e1")] {
        store
            .add(TemporalLink::new(a, b, RelationType::Vague))
            .unwrap();
    }
    let order: Vec<String> = store.iter().map(|l| l.id1.to_string()).collect();
    assert_eq!(order, vec!["e3", "e1", "t0"]);
    assert_eq!((&store).into_iter().count(), 3);
    assert_eq!(store.into_links().len(), 3);
}

fn proposal() -> impl Strategy<Value = (usize, usize, RelationType)> {
    (
        0usize..5,
        0usize..5,
        proptest::sample::select(RelationType::ALL.to_vec()),
    )
}

proptest! {
    /// Property: the store keeps exactly the first link proposed for each pair
    #[test]
    fn test_one_link_per_pair(proposals in proptest::collection::vec(proposal(), 0..40)) {
        let mut store = LinkStore::new();
        let mut first: HashMap<_, TemporalLink> = HashMap::new();

        for (a, b, r) in proposals {
            let link = TemporalLink::new(format!("e{}", a), format!("e{}", b), r);
            let accepted = store.add(link.clone()).is_ok();
            let fresh = !first.contains_key(&link.pair());
            prop_assert_eq!(accepted, fresh);
            first.entry(link.pair()).or_insert(link);
        }

        prop_assert_eq!(store.len(), first.len());
        for (pair, link) in &first {
            let stored = store.lookup(pair.lo(), pair.hi()).unwrap();
            prop_assert_eq!(stored, link);
        }
    }
}
