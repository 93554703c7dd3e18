//! yamlsplitter - split multi-document YAML streams
//!
//! Reads a stream of YAML documents (or text that looks like one) and writes
//! each document to its own file, named from an embedded `# path` comment, from
//! its `kind`/`metadata.name`, or from a running counter.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod sink;
mod split;
mod ui;

use cli::Cli;

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.completions {
        Some(shell) => commands::completions::run(shell),
        None => commands::split::run(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("{}", help);
        }
        std::process::exit(1);
    }
}
