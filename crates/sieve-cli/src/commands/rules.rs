//! Rules command implementation.

use crate::cli::RulesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sieve_closure::CompositionTable;

/// Execute the rules command.
///
/// An explicit path wins over `--rules` and the configured rule file.
pub fn execute_rules(args: RulesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args
        .path
        .or_else(|| config.pipeline.closure.rules_path.clone());

    let (source, table) = match path {
        Some(path) => {
            let table = CompositionTable::from_path(&path)?;
            (path.display().to_string(), table)
        }
        None => ("bundled rules".to_string(), CompositionTable::standard()?),
    };

    println!("{}", formatter.format_rules(&source, &table)?);
    if table.is_empty() {
        eprintln!("{}", formatter.warning("No rules loaded; closure will derive nothing"));
    }

    Ok(())
}
