//! Event to creation-time baseline driven by tense

use sieve_domain::{Annotator, AnnotatorFault, Document, RelationType, Tense, TemporalLink};

/// Relates each tensed event to the document creation time
///
/// Past events precede the creation time, future events follow it, and
/// present-tense events include it. Events without a usable tense get no
/// proposal.
#[derive(Debug, Clone, Default)]
pub struct EventDctAnnotator;

impl EventDctAnnotator {
    /// Registry name
    pub const NAME: &'static str = "event_dct";

    /// Create the annotator
    pub fn new() -> Self {
        Self
    }

    fn relation_for(tense: Tense) -> Option<RelationType> {
        match tense {
            Tense::Past => Some(RelationType::Before),
            Tense::Future => Some(RelationType::After),
            Tense::Present => Some(RelationType::Includes),
            _ => None,
        }
    }
}

impl Annotator for EventDctAnnotator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn propose(
        &self,
        doc: &Document,
        _current: &[TemporalLink],
    ) -> Result<Vec<TemporalLink>, AnnotatorFault> {
        let proposed: Vec<TemporalLink> = doc
            .events
            .iter()
            .filter_map(|event| {
                let relation = event.tense.and_then(Self::relation_for)?;
                Some(TemporalLink::new(
                    event.eiid.clone(),
                    doc.dct.tid.clone(),
                    relation,
                ))
            })
            .collect();

        tracing::debug!(
            document = %doc.name,
            proposals = proposed.len(),
            "event_dct proposals"
        );
        Ok(proposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_domain::{Event, Timex, TimexType};

    #[test]
    fn test_tense_mapping() {
        let doc = Document::new("d", Timex::new("t0", 0, 0, TimexType::Date, "2001-01-01"))
            .with_event(Event::new("e1", 0, 0, "left").with_tense(Tense::Past))
            .with_event(Event::new("e2", 0, 2, "will go").with_tense(Tense::Future))
            .with_event(Event::new("e3", 1, 0, "is").with_tense(Tense::Present))
            .with_event(Event::new("e4", 1, 3, "to run").with_tense(Tense::Infinitive))
            .with_event(Event::new("e5", 2, 0, "war"));

        let links = EventDctAnnotator::new().propose(&doc, &[]).unwrap();
        let rendered: Vec<String> = links.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["e1 BEFORE t0", "e2 AFTER t0", "e3 INCLUDES t0"]
        );
    }
}
