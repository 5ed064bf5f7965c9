//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::conversions::DocumentsFile;
use crate::error::Result;
use crate::output::Formatter;
use sieve_pipeline::{AnnotatorRegistry, BatchReport, BatchRunner, PipelineConfig};

/// Execute the run command.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)?;
    let documents = DocumentsFile::parse(&text)?;
    let pipeline = pipeline_config(&args, config);

    let report = run_documents(&pipeline, documents).await?;

    println!("{}", formatter.format_report(&report, args.stats_only)?);
    if report.documents_with_failures() > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} document(s) had annotator failures",
                report.documents_with_failures()
            ))
        );
    }

    Ok(())
}

/// Configured pipeline with command-line overrides applied.
fn pipeline_config(args: &RunArgs, config: &Config) -> PipelineConfig {
    let mut pipeline = config.pipeline.clone();
    if let Some(annotators) = &args.annotators {
        pipeline.annotators = annotators.clone();
    }
    if let Some(parallelism) = args.parallelism {
        pipeline.parallelism = parallelism;
    }
    pipeline
}

/// Run the pipeline described by `pipeline` over `documents`.
pub async fn run_documents(
    pipeline: &PipelineConfig,
    documents: Vec<sieve_domain::Document>,
) -> Result<BatchReport> {
    let registry = AnnotatorRegistry::with_defaults();
    let runner = BatchRunner::from_config(pipeline, &registry)?;
    Ok(runner.run(documents).await?)
}
