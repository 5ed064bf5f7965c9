//! Sieve CLI - arbitrate temporal links from the command line.

use clap::Parser;
use sieve_cli::commands;
use sieve_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays machine-readable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> sieve_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_closure_flags(cli.rules.as_deref(), cli.no_closure);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let result = match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter).await,
        Command::Close(args) => commands::execute_close(args, &config, &formatter),
        Command::Rules(args) => commands::execute_rules(args, &config, &formatter),
        Command::Annotators => commands::execute_annotators(&config, &formatter),
    };

    if let Err(e) = &result {
        tracing::debug!(error = ?e, "Command failed");
    }
    result
}
