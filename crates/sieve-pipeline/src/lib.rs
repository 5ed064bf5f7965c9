//! Sieve Pipeline
//!
//! Arbitration of candidate temporal links proposed by an ordered list of
//! annotators.
//!
//! # Overview
//!
//! For each document the pipeline:
//! - **Runs annotators in priority order**: each sees the links accepted so far
//! - **Filters proposals**: invalid links, repeats within a batch, and pairs
//!   an earlier annotator already claimed are dropped
//! - **Runs closure**: after an annotator gets anything accepted, every link
//!   the store now entails is added with that annotator as provenance
//! - **Counts**: per-annotator counters for every outcome
//!
//! Annotator failures and closure conflicts are never fatal.
//!
//! # Usage
//!
//! ## One document
//!
//! ```no_run
//! use sieve_pipeline::{AnnotatorRegistry, ArbitrationPipeline, PipelineConfig};
//! # use sieve_domain::{Document, Timex, TimexType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = AnnotatorRegistry::with_defaults();
//! let pipeline = ArbitrationPipeline::from_config(&PipelineConfig::default(), &registry)?;
//!
//! # let doc = Document::new("doc", Timex::new("t0", 0, 0, TimexType::Date, "2000-01-01"));
//! let run = pipeline.run(&doc);
//! for link in run.links() {
//!     println!("{}", link);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Pipelines can be configured via TOML:
//!
//! ```toml
//! annotators = ["time_time", "event_dct", "all_vague"]
//! parallelism = 4
//!
//! [closure]
//! enabled = true
//! trace_inferences = false
//! # rules_path = "custom.rules"
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod filter;
mod pipeline;
mod registry;
mod stats;

pub use batch::{BatchReport, BatchRunner};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use filter::{filter_candidates, FilterOutcome, Rejection};
pub use pipeline::{
    AnnotatorFailure, ArbitrationPipeline, DocumentRun, PipelineRun, PipelineState,
};
pub use registry::AnnotatorRegistry;
pub use stats::{AnnotatorStats, PipelineStats};
