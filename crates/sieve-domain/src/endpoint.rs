//! Endpoint identifiers and canonical pair keys

use std::fmt;

/// Identifier of an event instance or a time expression
///
/// Ids are opaque strings owned by the document provider. Ids starting with
/// `t` name time expressions (`t0` is conventionally the document creation
/// time); every other id names an event instance. Ordering is the
/// lexicographic order of the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointId(String);

impl EndpointId {
    /// Wrap a raw id
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_domain::{EndpointId, EndpointKind};
    ///
    /// assert_eq!(EndpointId::new("t3").kind(), EndpointKind::Time);
    /// assert_eq!(EndpointId::new("ei12").kind(), EndpointKind::Event);
    /// ```
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind of entity this id names
    pub fn kind(&self) -> EndpointKind {
        EndpointKind::of(&self.0)
    }

    /// True for the empty id, which never names an entity
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EndpointId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EndpointId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EndpointId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Kind of entity named by an [`EndpointId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// Event instance
    Event,

    /// Time expression (including the document creation time)
    Time,
}

impl EndpointKind {
    /// Classify a raw id
    pub fn of(id: &str) -> Self {
        if id.starts_with('t') {
            EndpointKind::Time
        } else {
            EndpointKind::Event
        }
    }
}

/// Canonical key of an unordered endpoint pair: `(lo, hi)` with `lo <= hi`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    lo: EndpointId,
    hi: EndpointId,
}

impl PairKey {
    /// Build the key for `{a, b}` regardless of argument order
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_domain::{EndpointId, PairKey};
    ///
    /// let a = EndpointId::new("e1");
    /// let b = EndpointId::new("e2");
    /// assert_eq!(PairKey::new(&a, &b), PairKey::new(&b, &a));
    /// ```
    pub fn new(a: &EndpointId, b: &EndpointId) -> Self {
        if a <= b {
            Self {
                lo: a.clone(),
                hi: b.clone(),
            }
        } else {
            Self {
                lo: b.clone(),
                hi: a.clone(),
            }
        }
    }

    /// Smaller endpoint
    pub fn lo(&self) -> &EndpointId {
        &self.lo
    }

    /// Larger endpoint
    pub fn hi(&self) -> &EndpointId {
        &self.hi
    }

    /// True when `a` is the smaller endpoint of the pair
    pub fn is_forward(a: &EndpointId, b: &EndpointId) -> bool {
        a <= b
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_prefix() {
        assert_eq!(EndpointKind::of("t0"), EndpointKind::Time);
        assert_eq!(EndpointKind::of("tmx4"), EndpointKind::Time);
        assert_eq!(EndpointKind::of("e1"), EndpointKind::Event);
        assert_eq!(EndpointKind::of("ei7"), EndpointKind::Event);
        assert_eq!(EndpointKind::of(""), EndpointKind::Event);
    }

    #[test]
    fn test_pair_key_canonical() {
        let a = EndpointId::new("e10");
        let b = EndpointId::new("e2");
        let key = PairKey::new(&b, &a);
        assert_eq!(key.lo().as_str(), "e10");
        assert_eq!(key.hi().as_str(), "e2");
        assert_eq!(key, PairKey::new(&a, &b));
    }

    #[test]
    fn test_pair_keys_do_not_collide() {
        // "e1"+"e12" and "e11"+"e2" concatenate to the same string
        let k1 = PairKey::new(&EndpointId::new("e1"), &EndpointId::new("e12"));
        let k2 = PairKey::new(&EndpointId::new("e11"), &EndpointId::new("e2"));
        assert_ne!(k1, k2);
    }
}
