//! Last-resort baseline: everything nearby is VAGUE

use crate::nearby;
use sieve_domain::{Annotator, AnnotatorFault, Document, EndpointId, RelationType, TemporalLink};

/// Labels every pair of mentions in the same or adjacent sentences VAGUE
///
/// Covers event-event, event-time and time-time pairs. The creation time is
/// not a mention and is left alone. Links run in text order.
#[derive(Debug, Clone, Default)]
pub struct AllVagueAnnotator;

impl AllVagueAnnotator {
    /// Registry name
    pub const NAME: &'static str = "all_vague";

    /// Create the annotator
    pub fn new() -> Self {
        Self
    }
}

impl Annotator for AllVagueAnnotator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn propose(
        &self,
        doc: &Document,
        _current: &[TemporalLink],
    ) -> Result<Vec<TemporalLink>, AnnotatorFault> {
        let mut mentions: Vec<(usize, usize, &EndpointId)> = doc
            .events
            .iter()
            .map(|e| (e.sentence, e.token, &e.eiid))
            .chain(doc.timexes.iter().map(|t| (t.sentence, t.token, &t.tid)))
            .collect();
        mentions.sort_by_key(|&(sentence, token, _)| (sentence, token));

        let mut proposed = Vec::new();
        for (i, &(s1, _, id1)) in mentions.iter().enumerate() {
            for &(s2, _, id2) in &mentions[i + 1..] {
                if !nearby(s1, s2) {
                    break;
                }
                proposed.push(TemporalLink::new(
                    id1.clone(),
                    id2.clone(),
                    RelationType::Vague,
                ));
            }
        }

        tracing::debug!(
            document = %doc.name,
            proposals = proposed.len(),
            "all_vague proposals"
        );
        Ok(proposed)
    }
}
