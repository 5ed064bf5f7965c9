//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Sieve - arbitrate temporal links between events and time expressions.
#[derive(Debug, Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SIEVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Composition rule file replacing the bundled rules
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Skip closure after annotators
    #[arg(long, global = true)]
    pub no_closure: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one link per line)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the annotator pipeline over documents
    Run(RunArgs),

    /// Print the links entailed by a link set
    Close(CloseArgs),

    /// Load a rule file and report rule counts
    Rules(RulesArgs),

    /// List registered annotators
    Annotators,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON file with one document or an array of documents
    pub file: PathBuf,

    /// Annotators to run, highest priority first (overrides config)
    #[arg(short, long, value_delimiter = ',')]
    pub annotators: Option<Vec<String>>,

    /// Documents processed at once
    #[arg(short, long)]
    pub parallelism: Option<usize>,

    /// Print only the statistics
    #[arg(long)]
    pub stats_only: bool,
}

/// Arguments for the close command.
#[derive(Debug, Parser)]
pub struct CloseArgs {
    /// JSON file with an array of links
    pub file: PathBuf,

    /// Also print the input links
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the rules command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Rule file to validate (bundled rules when omitted)
    pub path: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
