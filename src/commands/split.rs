//! Split command: open the input, pick a sink, run the splitter

use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal};
use std::path::Path;

use tracing::debug;

use crate::cli::Cli;
use crate::error::{Result, SplitterError};
use crate::sink::{DryRunSink, FsSink, Sink};
use crate::split;
use crate::ui::ConsoleReporter;

/// Run the split command
pub fn run(cli: &Cli) -> Result<()> {
    let input = open_input(cli.input.as_deref(), std::io::stdin().is_terminal())?;

    let sink: Box<dyn Sink> = if cli.dry_run {
        Box::new(DryRunSink::new(&cli.output_dir))
    } else {
        Box::new(FsSink::new(&cli.output_dir))
    };
    let reporter = ConsoleReporter::new(cli.dry_run);

    debug!(
        output_dir = %cli.output_dir.display(),
        dry_run = cli.dry_run,
        "starting split"
    );
    split::split(input, sink.as_ref(), &reporter)?;
    Ok(())
}

/// Open the named file, or standard input when it is not a terminal.
fn open_input(path: Option<&Path>, stdin_is_terminal: bool) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| SplitterError::InputOpenFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            debug!(path = %path.display(), "reading input file");
            Ok(Box::new(BufReader::new(file)))
        }
        None if stdin_is_terminal => Err(SplitterError::NoInput),
        None => {
            debug!("reading standard input");
            Ok(Box::new(BufReader::new(std::io::stdin())))
        }
    }
}
