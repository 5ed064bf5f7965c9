//! Annotators command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sieve_pipeline::AnnotatorRegistry;

/// Execute the annotators command.
pub fn execute_annotators(config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = AnnotatorRegistry::with_defaults();
    println!(
        "{}",
        formatter.format_annotators(&registry.names(), &config.pipeline.annotators)?
    );
    Ok(())
}
