//! Sieve Reference Annotators
//!
//! Rule-based implementations of the `Annotator` trait from `sieve-domain`.
//!
//! # Annotators
//!
//! - `TimeTimeAnnotator` (`time_time`): orders time expressions by their normalized values
//! - `EventDctAnnotator` (`event_dct`): places tensed events relative to the creation time
//! - `AllVagueAnnotator` (`all_vague`): labels every nearby pair VAGUE
//! - `ScriptedAnnotator`: replays fixed proposals, for tests and demos
//!
//! # Examples
//!
//! ```
//! use sieve_annotators::EventDctAnnotator;
//! use sieve_domain::{Annotator, Document, Event, Tense, Timex, TimexType};
//!
//! let doc = Document::new("doc", Timex::new("t0", 0, 0, TimexType::Date, "1998-10-02"))
//!     .with_event(Event::new("e1", 0, 1, "said").with_tense(Tense::Past));
//!
//! let links = EventDctAnnotator::new().propose(&doc, &[]).unwrap();
//! assert_eq!(links[0].to_string(), "e1 BEFORE t0");
//! ```

#![warn(missing_docs)]

pub mod all_vague;
pub mod event_dct;
pub mod scripted;
pub mod time_time;

pub use all_vague::AllVagueAnnotator;
pub use event_dct::EventDctAnnotator;
pub use scripted::ScriptedAnnotator;
pub use time_time::TimeTimeAnnotator;

/// Mentions in the same or adjacent sentences are close enough to relate
pub(crate) fn nearby(sentence_a: usize, sentence_b: usize) -> bool {
    sentence_a.abs_diff(sentence_b) <= 1
}
