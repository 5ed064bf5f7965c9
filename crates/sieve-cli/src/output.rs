//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::conversions::LinkDto;
use crate::error::Result;
use colored::*;
use sieve_closure::{CompositionTable, JunctionPattern};
use sieve_domain::TemporalLink;
use sieve_pipeline::{AnnotatorStats, BatchReport, DocumentRun, PipelineStats};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of links.
    pub fn format_links(&self, links: &[TemporalLink]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let dtos: Vec<LinkDto> = links.iter().map(LinkDto::from).collect();
                Ok(serde_json::to_string_pretty(&dtos)?)
            }
            OutputFormat::Table => Ok(self.links_table(links)),
            OutputFormat::Quiet => Ok(links
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the outcome of a batch run.
    pub fn format_report(&self, report: &BatchReport, stats_only: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let documents: Vec<serde_json::Value> = report
                    .runs
                    .iter()
                    .map(|run| {
                        let links: Vec<LinkDto> = if stats_only {
                            Vec::new()
                        } else {
                            run.links().iter().map(LinkDto::from).collect()
                        };
                        let failures: Vec<serde_json::Value> = run
                            .failures
                            .iter()
                            .map(|f| serde_json::json!({"annotator": f.annotator, "message": f.message}))
                            .collect();
                        serde_json::json!({
                            "document": run.document,
                            "run_id": run.run_id.to_string(),
                            "links": links,
                            "failures": failures,
                        })
                    })
                    .collect();
                let stats: Vec<serde_json::Value> =
                    report.stats.annotators.iter().map(stats_json).collect();

                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "documents": documents,
                    "stats": stats,
                }))?)
            }
            OutputFormat::Table => {
                let mut sections = Vec::new();
                if !stats_only {
                    for run in &report.runs {
                        sections.push(self.run_section(run));
                    }
                }
                sections.push(self.stats_table(&report.stats));
                Ok(sections.join("\n\n"))
            }
            OutputFormat::Quiet => {
                if stats_only {
                    return Ok(report.stats.summary());
                }
                let lines: Vec<String> = report
                    .runs
                    .iter()
                    .flat_map(|run| {
                        run.links()
                            .iter()
                            .map(move |l| format!("{}\t{}", run.document, l))
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format per-pattern rule counts.
    pub fn format_rules(&self, source: &str, table: &CompositionTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let patterns: serde_json::Map<String, serde_json::Value> = JunctionPattern::ALL
                    .iter()
                    .map(|p| (p.to_string(), serde_json::Value::from(table.rules_for(*p))))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "source": source,
                    "total": table.len(),
                    "patterns": patterns,
                }))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Pattern", "Rules"]);
                for pattern in JunctionPattern::ALL {
                    builder.push_record([pattern.to_string(), table.rules_for(pattern).to_string()]);
                }
                builder.push_record(["Total".to_string(), table.len().to_string()]);
                Ok(format!("{}\n{}", self.info(source), self.finish_table(builder)))
            }
            OutputFormat::Quiet => Ok(table.len().to_string()),
        }
    }

    /// Format registered annotator names.
    pub fn format_annotators(&self, names: &[&str], defaults: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "registered": names,
                "configured": defaults,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Annotator", "Configured"]);
                for (i, name) in names.iter().enumerate() {
                    let position = defaults
                        .iter()
                        .position(|d| d == name)
                        .map(|p| format!("#{}", p + 1))
                        .unwrap_or_else(|| "-".to_string());
                    builder.push_record([(i + 1).to_string(), name.to_string(), position]);
                }
                Ok(self.finish_table(builder))
            }
            OutputFormat::Quiet => Ok(names.join("\n")),
        }
    }

    fn run_section(&self, run: &DocumentRun) -> String {
        let mut lines = vec![self.info(&format!(
            "{} ({} links, {} derived)",
            run.document,
            run.store.len(),
            run.store.derived_count()
        ))];
        lines.push(self.links_table(run.links()));
        for failure in &run.failures {
            lines.push(self.warning(&failure.to_string()));
        }
        lines.join("\n")
    }

    fn links_table(&self, links: &[TemporalLink]) -> String {
        if links.is_empty() {
            return self.colorize("No links.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["From", "Relation", "To", "Kind", "Source"]);
        for link in links {
            let source = match (&link.provenance, link.derived) {
                (Some(p), true) => format!("{} (closure)", p),
                (Some(p), false) => p.clone(),
                (None, true) => "closure".to_string(),
                (None, false) => "-".to_string(),
            };
            builder.push_record([
                link.id1.to_string(),
                link.relation.to_string(),
                link.id2.to_string(),
                link.kind().to_string(),
                source,
            ]);
        }
        self.finish_table(builder)
    }

    fn stats_table(&self, stats: &PipelineStats) -> String {
        let mut builder = Builder::default();
        builder.push_record([
            "Annotator", "Proposed", "Accepted", "Derived", "Invalid", "Duplicate",
            "Conflicting", "Redundant", "Closure conflicts", "Failed",
        ]);
        for s in &stats.annotators {
            builder.push_record([
                s.annotator.clone(),
                s.proposed.to_string(),
                s.accepted.to_string(),
                s.derived.to_string(),
                s.rejected_invalid.to_string(),
                s.rejected_duplicate.to_string(),
                s.rejected_conflict.to_string(),
                s.redundant.to_string(),
                s.closure_conflicts.to_string(),
                s.failed.to_string(),
            ]);
        }
        format!(
            "{}\n{}",
            self.info(&format!("Documents: {}", stats.documents)),
            self.finish_table(builder)
        )
    }

    fn finish_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn stats_json(s: &AnnotatorStats) -> serde_json::Value {
    serde_json::json!({
        "annotator": s.annotator,
        "proposed": s.proposed,
        "accepted": s.accepted,
        "derived": s.derived,
        "rejected_invalid": s.rejected_invalid,
        "rejected_duplicate": s.rejected_duplicate,
        "rejected_conflict": s.rejected_conflict,
        "redundant": s.redundant,
        "closure_conflicts": s.closure_conflicts,
        "failed": s.failed,
    })
}
