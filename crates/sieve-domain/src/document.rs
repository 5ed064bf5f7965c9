//! Document model: the entities annotators relate
//!
//! The pipeline never creates or deletes entities; a [`Document`] is a
//! read-only view handed to every annotator.

use crate::endpoint::EndpointId;
use std::fmt;

/// Grammatical tense of an event mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    /// Simple present
    Present,
    /// Present participle
    PresPart,
    /// Simple past
    Past,
    /// Past participle
    PastPart,
    /// Infinitive
    Infinitive,
    /// Future
    Future,
    /// Passive voice
    Passive,
}

impl Tense {
    /// Upper-case TimeML name
    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Present => "PRESENT",
            Tense::PresPart => "PRESPART",
            Tense::Past => "PAST",
            Tense::PastPart => "PASTPART",
            Tense::Infinitive => "INFINITIVE",
            Tense::Future => "FUTURE",
            Tense::Passive => "PASSIVE",
        }
    }

    /// Parse a TimeML tense name; `NONE` and unknown names give `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PRESENT" => Some(Tense::Present),
            "PRESPART" => Some(Tense::PresPart),
            "PAST" => Some(Tense::Past),
            "PASTPART" => Some(Tense::PastPart),
            "INFINITIVE" => Some(Tense::Infinitive),
            "FUTURE" => Some(Tense::Future),
            "PASSIVE" => Some(Tense::Passive),
            _ => None,
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TimeML type of a time expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimexType {
    /// Calendar date (`1998-10-02`)
    #[default]
    Date,
    /// Clock time (`1998-10-02T14:30`)
    Time,
    /// Duration (`P3D`)
    Duration,
    /// Recurring set (`XXXX-WXX-1`)
    Set,
}

impl TimexType {
    /// Upper-case TimeML name
    pub fn as_str(&self) -> &'static str {
        match self {
            TimexType::Date => "DATE",
            TimexType::Time => "TIME",
            TimexType::Duration => "DURATION",
            TimexType::Set => "SET",
        }
    }

    /// Parse a TimeML type name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DATE" => Some(TimexType::Date),
            "TIME" => Some(TimexType::Time),
            "DURATION" => Some(TimexType::Duration),
            "SET" => Some(TimexType::Set),
            _ => None,
        }
    }

    /// Dates and times can be placed on a timeline
    pub fn is_anchored(&self) -> bool {
        matches!(self, TimexType::Date | TimexType::Time)
    }
}

/// An event instance mention
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event instance id (`ei12`)
    pub eiid: EndpointId,

    /// Sentence index
    pub sentence: usize,

    /// Token index of the event head within its sentence
    pub token: usize,

    /// Surface text
    pub text: String,

    /// Tense, when the provider annotated one
    pub tense: Option<Tense>,
}

impl Event {
    /// Create an event without tense
    pub fn new(
        eiid: impl Into<EndpointId>,
        sentence: usize,
        token: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            eiid: eiid.into(),
            sentence,
            token,
            text: text.into(),
            tense: None,
        }
    }

    /// Attach a tense
    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }
}

/// A time expression mention
#[derive(Debug, Clone, PartialEq)]
pub struct Timex {
    /// Time expression id (`t3`)
    pub tid: EndpointId,

    /// Sentence index
    pub sentence: usize,

    /// Token index of the first token
    pub token: usize,

    /// TimeML type
    pub timex_type: TimexType,

    /// Normalized value (`1998-10-02`, `PRESENT_REF`, `P3D`)
    pub value: String,
}

impl Timex {
    /// Create a time expression
    pub fn new(
        tid: impl Into<EndpointId>,
        sentence: usize,
        token: usize,
        timex_type: TimexType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tid: tid.into(),
            sentence,
            token,
            timex_type,
            value: value.into(),
        }
    }

    /// True for the `PRESENT_REF` value ("now")
    pub fn is_present_reference(&self) -> bool {
        self.value.eq_ignore_ascii_case("PRESENT_REF")
    }

    /// True when this timex appears before `other` in the text
    pub fn is_before_in_text(&self, other: &Timex) -> bool {
        (self.sentence, self.token) < (other.sentence, other.token)
    }
}

/// A document: named collection of events and time expressions with exactly
/// one document creation time
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document name (file stem or corpus id)
    pub name: String,

    /// Event instances in text order
    pub events: Vec<Event>,

    /// Time expressions in text order, excluding the creation time
    pub timexes: Vec<Timex>,

    /// Document creation time
    pub dct: Timex,
}

impl Document {
    /// Create an empty document around its creation time
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_domain::{Document, Event, Timex, TimexType};
    ///
    /// let doc = Document::new("wsj_0001", Timex::new("t0", 0, 0, TimexType::Date, "1998-10-02"))
    ///     .with_event(Event::new("e1", 1, 3, "said"));
    /// assert_eq!(doc.endpoint_ids().len(), 2);
    /// ```
    pub fn new(name: impl Into<String>, dct: Timex) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
            timexes: Vec::new(),
            dct,
        }
    }

    /// Add an event
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Add a time expression
    pub fn with_timex(mut self, timex: Timex) -> Self {
        self.timexes.push(timex);
        self
    }

    /// Events of one sentence
    pub fn events_by_sentence(&self, sentence: usize) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.sentence == sentence)
    }

    /// Time expressions of one sentence
    pub fn timexes_by_sentence(&self, sentence: usize) -> impl Iterator<Item = &Timex> {
        self.timexes.iter().filter(move |t| t.sentence == sentence)
    }

    /// Number of sentences that carry at least one mention
    pub fn sentence_count(&self) -> usize {
        self.events
            .iter()
            .map(|e| e.sentence + 1)
            .chain(self.timexes.iter().map(|t| t.sentence + 1))
            .max()
            .unwrap_or(0)
    }

    /// Every endpoint id in the document, creation time first
    pub fn endpoint_ids(&self) -> Vec<&EndpointId> {
        std::iter::once(&self.dct.tid)
            .chain(self.timexes.iter().map(|t| &t.tid))
            .chain(self.events.iter().map(|e| &e.eiid))
            .collect()
    }

    /// Whether `id` names an entity of this document
    pub fn contains(&self, id: &EndpointId) -> bool {
        self.dct.tid == *id
            || self.timexes.iter().any(|t| t.tid == *id)
            || self.events.iter().any(|e| e.eiid == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new("doc", Timex::new("t0", 0, 0, TimexType::Date, "1998-10-02"))
            .with_event(Event::new("e1", 0, 2, "said").with_tense(Tense::Past))
            .with_event(Event::new("e2", 1, 4, "visit"))
            .with_timex(Timex::new("t1", 1, 0, TimexType::Date, "1998-10-01"))
    }

    #[test]
    fn test_by_sentence() {
        let doc = sample();
        assert_eq!(doc.events_by_sentence(0).count(), 1);
        assert_eq!(doc.events_by_sentence(1).count(), 1);
        assert_eq!(doc.timexes_by_sentence(1).count(), 1);
        assert_eq!(doc.timexes_by_sentence(5).count(), 0);
        assert_eq!(doc.sentence_count(), 2);
    }

    #[test]
    fn test_contains() {
        let doc = sample();
        assert!(doc.contains(&EndpointId::new("t0")));
        assert!(doc.contains(&EndpointId::new("e2")));
        assert!(!doc.contains(&EndpointId::new("e9")));
    }

    #[test]
    fn test_tense_parse() {
        assert_eq!(Tense::parse("past"), Some(Tense::Past));
        assert_eq!(Tense::parse("NONE"), None);
        assert_eq!(TimexType::parse("duration"), Some(TimexType::Duration));
        assert!(!TimexType::Set.is_anchored());
    }
}
