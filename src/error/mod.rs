//! Error types and handling for yamlsplitter
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Structured-parse failures never show up here: a segment that does not
//! parse as a mapping is named anonymously instead of aborting the run.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for yamlsplitter operations
#[derive(Error, Diagnostic, Debug)]
pub enum SplitterError {
    // Input errors
    #[error("No input provided and standard input is a terminal")]
    #[diagnostic(
        code(yamlsplitter::input::missing),
        help("Usage: yamlsplitter [filename] or cat yourfile.yaml | yamlsplitter")
    )]
    NoInput,

    #[error("Failed to open input file {path}: {reason}")]
    #[diagnostic(
        code(yamlsplitter::input::open_failed),
        help("Check that the file exists and is readable")
    )]
    InputOpenFailed { path: String, reason: String },

    #[error("Failed to read input: {reason}")]
    #[diagnostic(code(yamlsplitter::input::read_failed))]
    InputReadFailed { reason: String },

    // Output errors
    #[error("Failed to create directory {path}: {reason}")]
    #[diagnostic(code(yamlsplitter::fs::create_dir_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Failed to write file {path}: {reason}")]
    #[diagnostic(code(yamlsplitter::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Refusing to write {path}: it resolves outside the output directory {root}")]
    #[diagnostic(
        code(yamlsplitter::fs::outside_output_dir),
        help("Use a relative path in the filename comment, or write to the current directory")
    )]
    PathOutsideOutputDir { path: String, root: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SplitterError>;
