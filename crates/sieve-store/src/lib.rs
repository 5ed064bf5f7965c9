//! Sieve Storage Layer
//!
//! Holds the accepted temporal links of one document, indexed by unordered
//! endpoint pair.
//!
//! # Invariants
//!
//! - At most one link per unordered pair; the first link for a pair wins
//! - Links are immutable once stored; callers only get shared references
//! - Insertion order is preserved, so downstream closure is deterministic
//!
//! # Examples
//!
//! ```
//! use sieve_domain::{RelationType, TemporalLink};
//! use sieve_store::LinkStore;
//!
//! let mut store = LinkStore::new();
//! store.add(TemporalLink::new("e1", "e2", RelationType::Before)).unwrap();
//!
//! // The reverse orientation names the same pair
//! assert!(store.add(TemporalLink::new("e2", "e1", RelationType::After)).is_err());
//! assert_eq!(store.len(), 1);
//! ```

#![warn(missing_docs)]

use sieve_domain::{EndpointId, PairKey, RelationType, TemporalLink};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when adding links
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The unordered pair already carries a link
    #[error("Pair {pair} already linked as {existing}")]
    PairAlreadyLinked {
        /// Pair of the rejected link
        pair: PairKey,
        /// Stored link, as stored
        existing: String,
    },

    /// The link names no endpoint on one side
    #[error("Invalid link: {0}")]
    InvalidLink(String),
}

/// Pair-indexed set of accepted links for one document
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    links: Vec<TemporalLink>,
    by_pair: HashMap<PairKey, usize>,
}

impl LinkStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link unless its pair is already linked
    pub fn add(&mut self, link: TemporalLink) -> Result<(), StoreError> {
        if !link.is_valid() {
            tracing::warn!(link = %link, "Rejecting link with empty endpoint");
            return Err(StoreError::InvalidLink(link.to_string()));
        }

        let pair = link.pair();
        if let Some(&idx) = self.by_pair.get(&pair) {
            let existing = &self.links[idx];
            tracing::warn!(
                rejected = %link,
                existing = %existing,
                "Pair already linked"
            );
            return Err(StoreError::PairAlreadyLinked {
                pair,
                existing: existing.to_string(),
            });
        }

        self.by_pair.insert(pair, self.links.len());
        self.links.push(link);
        Ok(())
    }

    /// Link stored for `{a, b}`, in whatever orientation it was stored
    pub fn lookup(&self, a: &EndpointId, b: &EndpointId) -> Option<&TemporalLink> {
        self.by_pair
            .get(&PairKey::new(a, b))
            .map(|&idx| &self.links[idx])
    }

    /// Relation between `a` and `b`, read from `a` to `b`
    pub fn relation_between(&self, a: &EndpointId, b: &EndpointId) -> Option<RelationType> {
        self.lookup(a, b).and_then(|link| link.relation_from(a))
    }

    /// Whether `{a, b}` already carries a link
    pub fn contains_pair(&self, a: &EndpointId, b: &EndpointId) -> bool {
        self.by_pair.contains_key(&PairKey::new(a, b))
    }

    /// Whether two links connect the same unordered pair
    pub fn covers_same_pair(e1: &TemporalLink, e2: &TemporalLink) -> bool {
        e1.covers_same_pair(e2)
    }

    /// Accepted links in insertion order
    pub fn links(&self) -> &[TemporalLink] {
        &self.links
    }

    /// Iterate accepted links in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TemporalLink> {
        self.links.iter()
    }

    /// Number of stored links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of links produced by closure
    pub fn derived_count(&self) -> usize {
        self.links.iter().filter(|l| l.derived).count()
    }

    /// Drop every link; used when a document is reset for re-annotation
    pub fn clear(&mut self) {
        self.links.clear();
        self.by_pair.clear();
    }

    /// Consume the store, returning links in insertion order
    pub fn into_links(self) -> Vec<TemporalLink> {
        self.links
    }
}

impl<'a> IntoIterator for &'a LinkStore {
    type Item = &'a TemporalLink;
    type IntoIter = std::slice::Iter<'a, TemporalLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EndpointId {
        EndpointId::new(s)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut store = LinkStore::new();
        store
            .add(TemporalLink::new("e1", "t1", RelationType::IsIncluded))
            .unwrap();

        let found = store.lookup(&id("t1"), &id("e1")).unwrap();
        assert_eq!(found.relation, RelationType::IsIncluded);
        assert_eq!(
            store.relation_between(&id("t1"), &id("e1")),
            Some(RelationType::Includes)
        );
        assert!(store.lookup(&id("e1"), &id("e2")).is_none());
    }

    #[test]
    fn test_pair_already_linked() {
        let mut store = LinkStore::new();
        store
            .add(TemporalLink::new("e1", "e2", RelationType::Before))
            .unwrap();

        let err = store
            .add(TemporalLink::new("e1", "e2", RelationType::Before))
            .unwrap_err();
        assert!(matches!(err, StoreError::PairAlreadyLinked { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_link() {
        let mut store = LinkStore::new();
        let err = store
            .add(TemporalLink::new("", "e2", RelationType::Before))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidLink(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_and_derived_count() {
        let mut store = LinkStore::new();
        store
            .add(TemporalLink::new("e1", "e2", RelationType::Before))
            .unwrap();
        store
            .add(TemporalLink::derived("e1", "e3", RelationType::Before))
            .unwrap();
        assert_eq!(store.derived_count(), 1);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains_pair(&id("e1"), &id("e2")));
        store
            .add(TemporalLink::new("e2", "e1", RelationType::After))
            .unwrap();
    }

    #[test]
    fn test_covers_same_pair() {
        let a = TemporalLink::new("e1", "e2", RelationType::Before);
        let b = TemporalLink::new("e2", "e1", RelationType::Vague);
        let c = TemporalLink::new("e1", "e3", RelationType::Before);
        assert!(LinkStore::covers_same_pair(&a, &b));
        assert!(!LinkStore::covers_same_pair(&a, &c));
    }
}
