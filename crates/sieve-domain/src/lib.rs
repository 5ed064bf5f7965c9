//! Sieve Domain Layer
//!
//! Core vocabulary of the temporal link sieve. This crate has no external
//! dependencies and defines the value types and trait interfaces every other
//! crate builds on.
//!
//! ## Key Concepts
//!
//! - **RelationType**: closed algebra of interval relations with inversion and compatibility
//! - **EndpointId / PairKey**: entity ids and canonical unordered pair keys
//! - **TemporalLink**: a directed relation fact between two endpoints
//! - **Document**: read-only events, time expressions and the creation time
//! - **Annotator**: a proposer of candidate links

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod endpoint;
pub mod link;
pub mod relation;
pub mod traits;

// Re-exports for convenience
pub use document::{Document, Event, Tense, Timex, TimexType};
pub use endpoint::{EndpointId, EndpointKind, PairKey};
pub use link::{LinkKind, TemporalLink};
pub use relation::{compatible, RelationType};
pub use traits::{Annotator, AnnotatorFault};
