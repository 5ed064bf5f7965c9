//! Sieve Closure
//!
//! Transitive closure and consistency checking over the interval relation
//! algebra.
//!
//! The closure engine provides:
//! - A composition table keyed by junction pattern, loaded from a rule file
//! - Fixpoint saturation of a link set, dropping and counting conflicts
//! - A non-mutating expansion returning only the derived links
//! - Consistency checks of a single candidate against accepted links
//!
//! # Examples
//!
//! ```no_run
//! use sieve_closure::{ClosureConfig, ClosureEngine};
//!
//! let engine = ClosureConfig::default().build_engine()?;
//!
//! // Derive everything entailed by the accepted links
//! // let derived = engine.expand(store.links());
//! # Ok::<(), sieve_closure::ClosureError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod table;

pub use config::ClosureConfig;
pub use engine::{ClosureEngine, Expansion, LinkStatus, RelationIndex, Saturation};
pub use error::ClosureError;
pub use table::{CompositionTable, JunctionPattern};
