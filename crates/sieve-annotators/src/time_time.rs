//! Orders time expressions by their normalized values

use crate::nearby;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use sieve_domain::{
    Annotator, AnnotatorFault, Document, PairKey, RelationType, TemporalLink, Timex,
};
use std::collections::HashSet;

/// Half-open interval `[start, end)` covered by a normalized timex value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First instant covered
    pub start: NaiveDateTime,
    /// First instant no longer covered
    pub end: NaiveDateTime,
}

impl Span {
    /// Parse a TimeML value of the form `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or
    /// `YYYY-MM-DDThh[:mm[:ss]]`
    ///
    /// Returns `None` for anything else (`PAST_REF`, `1998-W40`, `P3D`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_annotators::time_time::Span;
    ///
    /// let month = Span::parse("1998-10").unwrap();
    /// let day = Span::parse("1998-10-02").unwrap();
    /// assert!(month.start <= day.start && day.end <= month.end);
    /// assert!(Span::parse("PAST_REF").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let (date_part, time_part) = match value.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (value, None),
        };

        let date_span = Self::parse_date(date_part)?;
        match time_part {
            None => Some(date_span),
            Some(time) => {
                if date_part.len() != 10 {
                    return None;
                }
                Self::parse_time(date_span.start.date(), time)
            }
        }
    }

    fn parse_date(text: &str) -> Option<Self> {
        let field = |range: std::ops::Range<usize>| -> Option<u32> {
            let digits = text.get(range)?;
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()
        };

        let year = field(0..4)? as i32;
        let (start, end) = match text.len() {
            4 => (
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
            ),
            7 if text.as_bytes()[4] == b'-' => {
                let start = NaiveDate::from_ymd_opt(year, field(5..7)?, 1)?;
                let end = if start.month() == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, start.month() + 1, 1)?
                };
                (start, end)
            }
            10 if text.as_bytes()[4] == b'-' && text.as_bytes()[7] == b'-' => {
                let start = NaiveDate::from_ymd_opt(year, field(5..7)?, field(8..10)?)?;
                (start, start.succ_opt()?)
            }
            _ => return None,
        };

        Some(Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        })
    }

    fn parse_time(date: NaiveDate, text: &str) -> Option<Self> {
        let (time, step) = if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
            (t, TimeDelta::try_seconds(1)?)
        } else if let Ok(t) = NaiveTime::parse_from_str(text, "%H:%M") {
            (t, TimeDelta::try_minutes(1)?)
        } else if text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit()) {
            (NaiveTime::from_hms_opt(text.parse().ok()?, 0, 0)?, TimeDelta::try_hours(1)?)
        } else {
            return None;
        };

        let start = date.and_time(time);
        Some(Self {
            start,
            end: start.checked_add_signed(step)?,
        })
    }

    /// Relation from `self` to `other`
    pub fn relation_to(&self, other: &Span) -> RelationType {
        if self.start == other.start && self.end == other.end {
            RelationType::Simultaneous
        } else if self.end <= other.start {
            RelationType::Before
        } else if self.start >= other.end {
            RelationType::After
        } else if self.start <= other.start && self.end >= other.end {
            RelationType::Includes
        } else if self.start >= other.start && self.end <= other.end {
            RelationType::IsIncluded
        } else {
            RelationType::Vague
        }
    }
}

/// Orders dates and times of the same or adjacent sentences, and each of
/// them against the document creation time
///
/// `PRESENT_REF` resolves to the creation day. Values that do not name a
/// calendar interval are skipped.
#[derive(Debug, Clone, Default)]
pub struct TimeTimeAnnotator;

impl TimeTimeAnnotator {
    /// Registry name
    pub const NAME: &'static str = "time_time";

    /// Create the annotator
    pub fn new() -> Self {
        Self
    }

    fn span_of(timex: &Timex, dct: Option<Span>) -> Option<Span> {
        if !timex.timex_type.is_anchored() {
            return None;
        }
        if timex.is_present_reference() {
            return dct;
        }
        Span::parse(&timex.value)
    }

    /// Creation day; a clock time on the creation stamp is ignored
    fn dct_span(doc: &Document) -> Option<Span> {
        let day = doc.dct.value.split('T').next().unwrap_or_default();
        Span::parse(day)
    }
}

impl Annotator for TimeTimeAnnotator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn propose(
        &self,
        doc: &Document,
        _current: &[TemporalLink],
    ) -> Result<Vec<TemporalLink>, AnnotatorFault> {
        let dct = Self::dct_span(doc);
        let spans: Vec<(&Timex, Span)> = doc
            .timexes
            .iter()
            .filter_map(|t| Self::span_of(t, dct).map(|span| (t, span)))
            .collect();

        let mut seen = HashSet::new();
        let mut proposed = Vec::new();

        for (i, (t1, span1)) in spans.iter().enumerate() {
            for (t2, span2) in &spans[i + 1..] {
                if !nearby(t1.sentence, t2.sentence) || t1.tid == t2.tid {
                    continue;
                }
                if seen.insert(PairKey::new(&t1.tid, &t2.tid)) {
                    proposed.push(TemporalLink::new(
                        t1.tid.clone(),
                        t2.tid.clone(),
                        span1.relation_to(span2),
                    ));
                }
            }
        }

        if let Some(dct_span) = dct {
            for (t, span) in &spans {
                if t.tid != doc.dct.tid && seen.insert(PairKey::new(&t.tid, &doc.dct.tid)) {
                    proposed.push(TemporalLink::new(
                        t.tid.clone(),
                        doc.dct.tid.clone(),
                        span.relation_to(&dct_span),
                    ));
                }
            }
        }

        tracing::debug!(
            document = %doc.name,
            anchored = spans.len(),
            proposals = proposed.len(),
            "time_time proposals"
        );
        Ok(proposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_domain::TimexType;

    fn span(v: &str) -> Span {
        Span::parse(v).unwrap()
    }

    #[test]
    fn test_parse_granularities() {
        let year = span("1998");
        assert_eq!(year.start.to_string(), "1998-01-01 00:00:00");
        assert_eq!(year.end.to_string(), "1999-01-01 00:00:00");

        let december = span("1998-12");
        assert_eq!(december.end.to_string(), "1999-01-01 00:00:00");

        let minute = span("1998-10-02T14:30");
        assert_eq!(minute.end.to_string(), "1998-10-02 14:31:00");

        let hour = span("1998-10-02T14");
        assert_eq!(hour.end.to_string(), "1998-10-02 15:00:00");
    }

    #[test]
    fn test_parse_rejects_non_calendar_values() {
        for value in ["PAST_REF", "P3D", "1998-W40", "1998-Q1", "XXXX-10", "1998-13", "1998-10-02TMO"] {
            assert!(Span::parse(value).is_none(), "{} should not parse", value);
        }
    }

    #[test]
    fn test_relations() {
        assert_eq!(span("1998").relation_to(&span("1998")), RelationType::Simultaneous);
        assert_eq!(span("1997").relation_to(&span("1998-10")), RelationType::Before);
        assert_eq!(span("1998-11").relation_to(&span("1998-10-02")), RelationType::After);
        assert_eq!(span("1998").relation_to(&span("1998-10-02")), RelationType::Includes);
        assert_eq!(span("1998-10").relation_to(&span("1998-10-01")), RelationType::Includes);
        assert_eq!(span("1998-10-02").relation_to(&span("1998-10")), RelationType::IsIncluded);
    }

    #[test]
    fn test_proposals() {
        let doc = Document::new("d", Timex::new("t0", 0, 0, TimexType::Date, "1998-10-02"))
            .with_timex(Timex::new("t1", 0, 2, TimexType::Date, "1998-10-01"))
            .with_timex(Timex::new("t2", 1, 0, TimexType::Date, "PRESENT_REF"))
            .with_timex(Timex::new("t3", 1, 5, TimexType::Duration, "P3D"))
            .with_timex(Timex::new("t4", 4, 0, TimexType::Date, "1998"));

        let links = TimeTimeAnnotator::new().propose(&doc, &[]).unwrap();
        let rendered: Vec<String> = links.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "t1 BEFORE t2",
                "t1 BEFORE t0",
                "t2 SIMULTANEOUS t0",
                "t4 INCLUDES t0",
            ]
        );
    }
}
