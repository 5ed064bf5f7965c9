//! JSON shapes read and written by the CLI, and their domain conversions.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sieve_domain::{Document, Event, RelationType, Tense, TemporalLink, Timex, TimexType};

/// Document as read from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDto {
    pub name: String,
    pub dct: TimexDto,
    #[serde(default)]
    pub events: Vec<EventDto>,
    #[serde(default)]
    pub timexes: Vec<TimexDto>,
}

/// Event mention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub eiid: String,
    pub sentence: usize,
    pub token: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
}

/// Time expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimexDto {
    pub tid: String,
    #[serde(default)]
    pub sentence: usize,
    #[serde(default)]
    pub token: usize,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub timex_type: Option<String>,
    pub value: String,
}

/// Link as read and written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDto {
    pub id1: String,
    pub id2: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<String>,
    #[serde(default)]
    pub derived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A documents file holds one document or an array of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentsFile {
    Many(Vec<DocumentDto>),
    One(DocumentDto),
}

impl DocumentsFile {
    /// Parse JSON text and convert every document
    pub fn parse(text: &str) -> Result<Vec<Document>> {
        let file: DocumentsFile = serde_json::from_str(text)?;
        let dtos = match file {
            DocumentsFile::Many(docs) => docs,
            DocumentsFile::One(doc) => vec![doc],
        };
        dtos.into_iter().map(Document::try_from).collect()
    }
}

/// Parse a JSON array of links
pub fn parse_links(text: &str) -> Result<Vec<TemporalLink>> {
    let dtos: Vec<LinkDto> = serde_json::from_str(text)?;
    dtos.into_iter().map(TemporalLink::try_from).collect()
}

impl TryFrom<TimexDto> for Timex {
    type Error = CliError;

    fn try_from(dto: TimexDto) -> Result<Self> {
        let timex_type = match dto.timex_type.as_deref() {
            None => TimexType::default(),
            Some(raw) => TimexType::parse(raw).ok_or_else(|| {
                CliError::InvalidInput(format!("Unknown timex type '{}' on {}", raw, dto.tid))
            })?,
        };
        Ok(Timex::new(dto.tid, dto.sentence, dto.token, timex_type, dto.value))
    }
}

impl TryFrom<EventDto> for Event {
    type Error = CliError;

    fn try_from(dto: EventDto) -> Result<Self> {
        let tense = match dto.tense.as_deref() {
            None => None,
            Some(raw) if raw.eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(Tense::parse(raw).ok_or_else(|| {
                CliError::InvalidInput(format!("Unknown tense '{}' on {}", raw, dto.eiid))
            })?),
        };
        let event = Event::new(dto.eiid, dto.sentence, dto.token, dto.text);
        Ok(match tense {
            Some(tense) => event.with_tense(tense),
            None => event,
        })
    }
}

impl TryFrom<DocumentDto> for Document {
    type Error = CliError;

    fn try_from(dto: DocumentDto) -> Result<Self> {
        let mut doc = Document::new(dto.name, Timex::try_from(dto.dct)?);
        for event in dto.events {
            doc = doc.with_event(Event::try_from(event)?);
        }
        for timex in dto.timexes {
            doc = doc.with_timex(Timex::try_from(timex)?);
        }
        Ok(doc)
    }
}

impl TryFrom<LinkDto> for TemporalLink {
    type Error = CliError;

    fn try_from(dto: LinkDto) -> Result<Self> {
        let relation = RelationType::parse(&dto.relation)
            .ok_or_else(|| CliError::InvalidInput(format!("Unknown relation '{}'", dto.relation)))?;
        let mut link = TemporalLink::new(dto.id1, dto.id2, relation);
        link.provenance = dto.provenance;
        link.derived = dto.derived;
        link.confidence = dto.confidence;
        Ok(link)
    }
}

impl From<&TemporalLink> for LinkDto {
    fn from(link: &TemporalLink) -> Self {
        Self {
            id1: link.id1.to_string(),
            id2: link.id2.to_string(),
            relation: link.relation.as_str().to_string(),
            provenance: link.provenance.clone(),
            derived: link.derived,
            confidence: link.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_document() {
        let docs = DocumentsFile::parse(
            r#"{
                "name": "wsj_0001",
                "dct": {"tid": "t0", "value": "1998-10-02"},
                "events": [{"eiid": "e1", "sentence": 0, "token": 3, "text": "said", "tense": "PAST"}],
                "timexes": [{"tid": "t1", "sentence": 0, "token": 1, "type": "DATE", "value": "1998"}]
            }"#,
        )
        .unwrap();

        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.name, "wsj_0001");
        assert_eq!(doc.dct.timex_type, TimexType::Date);
        assert_eq!(doc.events[0].tense, Some(Tense::Past));
        assert_eq!(doc.timexes.iter().filter(|t| t.tid.as_str() == "t1").count(), 1);
    }

    #[test]
    fn test_document_array() {
        let docs = DocumentsFile::parse(
            r#"[
                {"name": "a", "dct": {"tid": "t0", "value": "2000"}},
                {"name": "b", "dct": {"tid": "t0", "value": "2001"}}
            ]"#,
        )
        .unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_tense() {
        let result = DocumentsFile::parse(
            r#"{"name": "a", "dct": {"tid": "t0", "value": "2000"},
                "events": [{"eiid": "e1", "sentence": 0, "token": 0, "tense": "SOMEDAY"}]}"#,
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_links() {
        let links = parse_links(
            r#"[
                {"id1": "e1", "id2": "e2", "relation": "before"},
                {"id1": "e2", "id2": "t0", "relation": "IS_INCLUDED", "provenance": "manual"}
            ]"#,
        )
        .unwrap();
        assert_eq!(links[0].relation, RelationType::Before);
        assert_eq!(links[1].provenance.as_deref(), Some("manual"));

        let dto = LinkDto::from(&links[1]);
        assert_eq!(dto.relation, "IS_INCLUDED");
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("confidence"));
    }

    #[test]
    fn test_unknown_relation() {
        let result = parse_links(r#"[{"id1": "e1", "id2": "e2", "relation": "SOON"}]"#);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
