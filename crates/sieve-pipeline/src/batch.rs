//! Parallel runs over independent documents

use crate::{
    AnnotatorRegistry, ArbitrationPipeline, DocumentRun, PipelineConfig, PipelineError,
    PipelineStats,
};
use sieve_domain::Document;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs of a whole batch plus merged counters
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One run per document, in input order
    pub runs: Vec<DocumentRun>,
    /// Counters merged over every finished document
    pub stats: PipelineStats,
}

impl BatchReport {
    /// Total links over all documents
    pub fn total_links(&self) -> usize {
        self.runs.iter().map(|r| r.store.len()).sum()
    }

    /// Documents with at least one annotator failure
    pub fn documents_with_failures(&self) -> usize {
        self.runs.iter().filter(|r| !r.failures.is_empty()).count()
    }
}

/// Runs a pipeline over many documents on blocking tasks
///
/// Each document gets its own store and counters; documents never share
/// state. Counters are merged only after a document is done.
///
/// # Examples
///
/// ```no_run
/// use sieve_pipeline::{AnnotatorRegistry, BatchRunner, PipelineConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runner = BatchRunner::from_config(
///         &PipelineConfig::default(),
///         &AnnotatorRegistry::with_defaults(),
///     )?;
///
///     // let report = runner.run(documents).await?;
///     // println!("{}", report.stats.summary());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pipeline: Arc<ArbitrationPipeline>,
    parallelism: usize,
}

impl BatchRunner {
    /// Create a runner; `parallelism` below 1 is treated as 1
    pub fn new(pipeline: ArbitrationPipeline, parallelism: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            parallelism: parallelism.max(1),
        }
    }

    /// Assemble the pipeline from configuration
    pub fn from_config(
        config: &PipelineConfig,
        registry: &AnnotatorRegistry,
    ) -> Result<Self, PipelineError> {
        let pipeline = ArbitrationPipeline::from_config(config, registry)?;
        Ok(Self::new(pipeline, config.parallelism))
    }

    /// The shared pipeline
    pub fn pipeline(&self) -> &ArbitrationPipeline {
        &self.pipeline
    }

    /// Process every document
    ///
    /// # Errors
    ///
    /// Returns an error only if the runtime shuts down or the pipeline
    /// itself panics. Annotator errors and panics are recorded in the
    /// per-document runs.
    pub async fn run(&self, documents: Vec<Document>) -> Result<BatchReport, PipelineError> {
        let total = documents.len();
        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let mut handles = Vec::with_capacity(total);

        tracing::info!(
            documents = total,
            parallelism = self.parallelism,
            "Batch started"
        );

        for doc in documents {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Worker(e.to_string()))?;
            let pipeline = Arc::clone(&self.pipeline);
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                pipeline.run(&doc)
            }));
        }

        let mut report = BatchReport::default();
        for (done, handle) in handles.into_iter().enumerate() {
            let run = handle
                .await
                .map_err(|e| PipelineError::Worker(e.to_string()))?;
            report.stats.record_document(&run.stats);
            tracing::debug!(
                document = %run.document,
                progress = format!("{}/{}", done + 1, total),
                "Document merged"
            );
            report.runs.push(run);
        }

        tracing::info!(
            documents = report.stats.documents,
            links = report.total_links(),
            failures = report.stats.total_failed(),
            "Batch finished"
        );
        Ok(report)
    }
}
