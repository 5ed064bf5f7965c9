//! Close command implementation.

use crate::cli::CloseArgs;
use crate::config::Config;
use crate::conversions::parse_links;
use crate::error::Result;
use crate::output::Formatter;
use sieve_domain::TemporalLink;

/// Execute the close command.
///
/// Closure always runs here; `--no-closure` only affects `run`.
pub fn execute_close(args: CloseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)?;
    let links = parse_links(&text)?;
    let engine = config.pipeline.closure.build_engine()?;

    let expansion = engine.expand_with_report(&links);
    tracing::info!(
        input = links.len(),
        derived = expansion.saturation.added,
        conflicts = expansion.saturation.conflicts,
        passes = expansion.saturation.passes,
        "Closure computed"
    );

    let shown: Vec<TemporalLink> = if args.all {
        links.into_iter().chain(expansion.links).collect()
    } else {
        expansion.links
    };
    println!("{}", formatter.format_links(&shown)?);

    if expansion.saturation.conflict_occurred() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} inference(s) contradicted existing links and were dropped",
                expansion.saturation.conflicts
            ))
        );
    }

    Ok(())
}
