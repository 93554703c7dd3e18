//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// yamlsplitter - split multi-document YAML streams into files
///
/// Reads a stream of `---`-separated documents and writes each one to its own
/// file, named from a `# path/to/file` comment or from `kind` and
/// `metadata.name`.
#[derive(Parser, Debug)]
#[command(
    name = "yamlsplitter",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Split multi-document YAML streams into individual files",
    long_about = "Splits a multi-document YAML stream into individual files. Each document is \
                  named from a leading `# path/to/file` comment, from its `kind` and \
                  `metadata.name` (as `<kind>-<name>.yaml`), or as `unknown-<N>.txt`.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  yamlsplitter manifests.yaml              \x1b[90m# Split a file\x1b[0m\n   \
                  kubectl get all -o yaml | yamlsplitter   \x1b[90m# Split stdin\x1b[0m\n   \
                  yamlsplitter -o out/ bundle.yaml         \x1b[90m# Write below out/\x1b[0m\n   \
                  yamlsplitter --dry-run bundle.yaml       \x1b[90m# Show names only\x1b[0m\n"
)]
pub struct Cli {
    /// Input file (reads standard input when omitted)
    pub input: Option<PathBuf>,

    /// Directory output paths are resolved against
    #[arg(
        long,
        short = 'o',
        value_name = "DIR",
        env = "YAMLSPLITTER_OUTPUT_DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    /// Print the files that would be created without writing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<clap_complete::Shell>,
}
