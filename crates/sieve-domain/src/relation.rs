//! Relation algebra: the closed vocabulary of interval relations

use std::fmt;

/// Temporal relation between two endpoints, read left to right
/// (`A BEFORE B` means A ends before B starts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationType {
    /// A ends before B starts
    Before,

    /// A starts after B ends
    After,

    /// A ends exactly where B starts
    IBefore,

    /// A starts exactly where B ends
    IAfter,

    /// B lies within A
    Includes,

    /// A lies within B
    IsIncluded,

    /// A starts B (same start, A ends first)
    Begins,

    /// B starts A
    BegunBy,

    /// A ends B (same end, A starts later)
    Ends,

    /// B ends A
    EndedBy,

    /// Same interval
    Simultaneous,

    /// Some shared time, otherwise unspecified
    Overlap,

    /// Before or overlapping
    BeforeOrOverlap,

    /// Overlapping or after
    OverlapOrAfter,

    /// Explicitly unrelated
    None,

    /// Related, but the order cannot be decided
    Vague,

    /// Not annotated
    Unknown,
}

/// Unequal relation pairs that still describe the same situation
/// (stated in one orientation; the inverse pairs are derived).
const COMPATIBLE_PAIRS: [(RelationType, RelationType); 5] = [
    (RelationType::Before, RelationType::IBefore),
    (RelationType::Includes, RelationType::Begins),
    (RelationType::Includes, RelationType::Ends),
    (RelationType::Includes, RelationType::BegunBy),
    (RelationType::Includes, RelationType::EndedBy),
];

impl RelationType {
    /// Every relation in declaration order
    pub const ALL: [RelationType; 17] = [
        RelationType::Before,
        RelationType::After,
        RelationType::IBefore,
        RelationType::IAfter,
        RelationType::Includes,
        RelationType::IsIncluded,
        RelationType::Begins,
        RelationType::BegunBy,
        RelationType::Ends,
        RelationType::EndedBy,
        RelationType::Simultaneous,
        RelationType::Overlap,
        RelationType::BeforeOrOverlap,
        RelationType::OverlapOrAfter,
        RelationType::None,
        RelationType::Vague,
        RelationType::Unknown,
    ];

    /// The same fact with its endpoints swapped.
    ///
    /// `invert` is total and involutive:
    ///
    /// ```
    /// use sieve_domain::RelationType;
    ///
    /// assert_eq!(RelationType::Before.invert(), RelationType::After);
    /// assert_eq!(RelationType::Vague.invert(), RelationType::Vague);
    /// for r in RelationType::ALL {
    ///     assert_eq!(r.invert().invert(), r);
    /// }
    /// ```
    pub fn invert(self) -> Self {
        match self {
            RelationType::Before => RelationType::After,
            RelationType::After => RelationType::Before,
            RelationType::IBefore => RelationType::IAfter,
            RelationType::IAfter => RelationType::IBefore,
            RelationType::Includes => RelationType::IsIncluded,
            RelationType::IsIncluded => RelationType::Includes,
            RelationType::Begins => RelationType::BegunBy,
            RelationType::BegunBy => RelationType::Begins,
            RelationType::Ends => RelationType::EndedBy,
            RelationType::EndedBy => RelationType::Ends,
            RelationType::BeforeOrOverlap => RelationType::OverlapOrAfter,
            RelationType::OverlapOrAfter => RelationType::BeforeOrOverlap,
            RelationType::Simultaneous
            | RelationType::Overlap
            | RelationType::None
            | RelationType::Vague
            | RelationType::Unknown => self,
        }
    }

    /// Whether two relations over the same ordered pair can both hold.
    ///
    /// Both relations must be stated in the same endpoint orientation.
    /// This only answers "is this a conflict", never "does one entail the other".
    pub fn is_compatible_with(self, other: RelationType) -> bool {
        if self == other {
            return true;
        }
        COMPATIBLE_PAIRS.iter().any(|&(a, b)| {
            (self == a && other == b)
                || (self == b && other == a)
                || (self == a.invert() && other == b.invert())
                || (self == b.invert() && other == a.invert())
        })
    }

    /// True for relations that read the same in both directions
    pub fn is_symmetric(self) -> bool {
        self.invert() == self
    }

    /// Canonical upper-case name (e.g. `IS_INCLUDED`)
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Before => "BEFORE",
            RelationType::After => "AFTER",
            RelationType::IBefore => "IBEFORE",
            RelationType::IAfter => "IAFTER",
            RelationType::Includes => "INCLUDES",
            RelationType::IsIncluded => "IS_INCLUDED",
            RelationType::Begins => "BEGINS",
            RelationType::BegunBy => "BEGUN_BY",
            RelationType::Ends => "ENDS",
            RelationType::EndedBy => "ENDED_BY",
            RelationType::Simultaneous => "SIMULTANEOUS",
            RelationType::Overlap => "OVERLAP",
            RelationType::BeforeOrOverlap => "BEFORE_OR_OVERLAP",
            RelationType::OverlapOrAfter => "OVERLAP_OR_AFTER",
            RelationType::None => "NONE",
            RelationType::Vague => "VAGUE",
            RelationType::Unknown => "UNKNOWN",
        }
    }

    /// Parse a relation name.
    ///
    /// Case-insensitive, hyphens read as underscores, and the TimeBank
    /// aliases `during`, `during_inv` and `identity` are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().replace('-', "_").to_uppercase();
        match normalized.as_str() {
            "DURING" => return Some(RelationType::IsIncluded),
            "DURING_INV" => return Some(RelationType::Includes),
            "IDENTITY" => return Some(RelationType::Simultaneous),
            _ => {}
        }
        RelationType::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
    }
}

/// Free-function form of [`RelationType::is_compatible_with`]
pub fn compatible(r1: RelationType, r2: RelationType) -> bool {
    r1.is_compatible_with(r2)
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_pairs() {
        assert_eq!(RelationType::Before.invert(), RelationType::After);
        assert_eq!(RelationType::IBefore.invert(), RelationType::IAfter);
        assert_eq!(RelationType::Includes.invert(), RelationType::IsIncluded);
        assert_eq!(RelationType::Begins.invert(), RelationType::BegunBy);
        assert_eq!(RelationType::Ends.invert(), RelationType::EndedBy);
        assert_eq!(
            RelationType::BeforeOrOverlap.invert(),
            RelationType::OverlapOrAfter
        );
    }

    #[test]
    fn test_symmetric_relations() {
        assert!(RelationType::Simultaneous.is_symmetric());
        assert!(RelationType::Vague.is_symmetric());
        assert!(!RelationType::Before.is_symmetric());
    }

    #[test]
    fn test_whitelisted_pairs_are_compatible() {
        assert!(compatible(RelationType::Before, RelationType::IBefore));
        assert!(compatible(RelationType::IBefore, RelationType::Before));
        assert!(compatible(RelationType::After, RelationType::IAfter));
        assert!(compatible(RelationType::Includes, RelationType::Begins));
        assert!(compatible(RelationType::Includes, RelationType::Ends));
        assert!(compatible(RelationType::IsIncluded, RelationType::BegunBy));
        assert!(compatible(RelationType::Includes, RelationType::EndedBy));
    }

    #[test]
    fn test_conflicting_pairs() {
        assert!(!compatible(RelationType::Before, RelationType::After));
        assert!(!compatible(RelationType::Before, RelationType::Includes));
        assert!(!compatible(RelationType::Simultaneous, RelationType::Includes));
        assert!(!compatible(RelationType::IBefore, RelationType::IAfter));
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!(RelationType::parse("BEFORE"), Some(RelationType::Before));
        assert_eq!(RelationType::parse("is-included"), Some(RelationType::IsIncluded));
        assert_eq!(RelationType::parse("during"), Some(RelationType::IsIncluded));
        assert_eq!(RelationType::parse("DURING_INV"), Some(RelationType::Includes));
        assert_eq!(RelationType::parse("identity"), Some(RelationType::Simultaneous));
        assert_eq!(RelationType::parse("sometime"), None);
    }

    #[test]
    fn test_display_roundtrip() {
        for r in RelationType::ALL {
            assert_eq!(r.to_string().parse::<RelationType>(), Ok(r));
        }
    }
}
