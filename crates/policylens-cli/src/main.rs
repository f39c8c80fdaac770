//! PolicyLens CLI - Classify access-control policies with an LLM.

use clap::Parser;
use policylens_cli::commands;
use policylens_cli::{Cli, Command, Formatter, OutputFormat};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    commands::load_env_file();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> policylens_cli::Result<()> {
    let format = cli.format.map(Into::into).unwrap_or(OutputFormat::Table);
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Classify(args) => commands::execute_classify(args, &formatter),
        Command::Evaluate(args) => commands::execute_evaluate(args, &formatter),
    }
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
