//! Composition table and rule-file loader

use crate::ClosureError;
use sieve_domain::RelationType;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Rules shipped with the crate
const STANDARD_RULES: &str = include_str!("../rules/closure.rules");

/// How two facts share their common endpoint `A`
///
/// The first fact connects `A` and `B`, the second connects `A` and `C`.
/// Composition always yields a relation from `B` to `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JunctionPattern {
    /// `A r1 B`, `A r2 C`
    AbAc,
    /// `A r1 B`, `C r2 A`
    AbCa,
    /// `B r1 A`, `A r2 C`
    BaAc,
    /// `B r1 A`, `C r2 A`
    BaCa,
}

impl JunctionPattern {
    /// All patterns in rule-file order
    pub const ALL: [JunctionPattern; 4] = [
        JunctionPattern::AbAc,
        JunctionPattern::AbCa,
        JunctionPattern::BaAc,
        JunctionPattern::BaCa,
    ];

    fn index(self) -> usize {
        match self {
            JunctionPattern::AbAc => 0,
            JunctionPattern::AbCa => 1,
            JunctionPattern::BaAc => 2,
            JunctionPattern::BaCa => 3,
        }
    }

    /// Section header text used in rule files
    pub fn header(&self) -> &'static str {
        match self {
            JunctionPattern::AbAc => "A-B A-C",
            JunctionPattern::AbCa => "A-B C-A",
            JunctionPattern::BaAc => "B-A A-C",
            JunctionPattern::BaCa => "B-A C-A",
        }
    }

    /// Pattern whose header appears on `line`, if any
    pub fn from_header(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| line.contains(p.header()))
    }
}

impl fmt::Display for JunctionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Four independent partial functions `(r1, r2) -> r3`, one per junction pattern
///
/// A missing entry means the two facts entail nothing about `B` and `C`.
#[derive(Debug, Clone, Default)]
pub struct CompositionTable {
    rules: [HashMap<(RelationType, RelationType), RelationType>; 4],
}

impl CompositionTable {
    /// A table with no rules; closure over it derives nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled rule set
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_closure::{CompositionTable, JunctionPattern};
    /// use sieve_domain::RelationType;
    ///
    /// let table = CompositionTable::standard().unwrap();
    /// // B BEFORE A, A BEFORE C => B BEFORE C
    /// assert_eq!(
    ///     table.compose(RelationType::Before, RelationType::Before, JunctionPattern::BaAc),
    ///     Some(RelationType::Before)
    /// );
    /// ```
    pub fn standard() -> Result<Self, ClosureError> {
        Self::parse(STANDARD_RULES)
    }

    /// Parse rules from text
    ///
    /// A line containing a pattern header (`A-B A-C`, `A-B C-A`, `B-A A-C`,
    /// `B-A C-A`) opens that pattern's section; rules before any header
    /// belong to `A-B A-C`. Blank lines, `#` lines and any other line
    /// containing `/` are comments. Every remaining line must be
    /// `REL1 REL2 REL3`.
    pub fn parse(text: &str) -> Result<Self, ClosureError> {
        let mut table = Self::empty();
        let mut pattern = JunctionPattern::AbAc;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            if let Some(p) = JunctionPattern::from_header(raw) {
                pattern = p;
                continue;
            }

            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.contains('/') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 3 {
                return Err(ClosureError::MalformedRule {
                    line: line_no,
                    text: line.to_string(),
                });
            }

            let mut rels = [RelationType::Unknown; 3];
            for (slot, name) in rels.iter_mut().zip(&parts) {
                *slot = RelationType::parse(name).ok_or_else(|| ClosureError::UnknownRelation {
                    line: line_no,
                    name: name.to_string(),
                })?;
            }
            table.insert(pattern, rels[0], rels[1], rels[2]);
        }

        if table.is_empty() {
            tracing::warn!("No closure rules loaded; closure will derive nothing");
        } else {
            tracing::debug!(rules = table.len(), "Loaded closure rules");
        }
        Ok(table)
    }

    /// Read and parse rules from a stream
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ClosureError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Read and parse a rule file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClosureError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ClosureError::RulesFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loading closure rules");
        Self::parse(&text)
    }

    /// Add or replace one rule, returning the replaced conclusion
    pub fn insert(
        &mut self,
        pattern: JunctionPattern,
        first: RelationType,
        second: RelationType,
        inferred: RelationType,
    ) -> Option<RelationType> {
        self.rules[pattern.index()].insert((first, second), inferred)
    }

    /// Relation from `B` to `C` entailed by the two facts, if any
    pub fn compose(
        &self,
        first: RelationType,
        second: RelationType,
        pattern: JunctionPattern,
    ) -> Option<RelationType> {
        self.rules[pattern.index()].get(&(first, second)).copied()
    }

    /// Number of rules for one pattern
    pub fn rules_for(&self, pattern: JunctionPattern) -> usize {
        self.rules[pattern.index()].len()
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.rules.iter().map(HashMap::len).sum()
    }

    /// True when no rules are loaded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
