//! User-facing output
//!
//! Every written document is announced through the [`Reporter`] trait, so the
//! command can print confirmations while tests stay quiet.

use std::path::Path;

use console::style;

/// Receives one notification per persisted document.
pub trait Reporter {
    fn created(&self, path: &Path);
}

/// Prints `Created: <path>` lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    fn label(&self) -> &'static str {
        if self.dry_run {
            "Would create:"
        } else {
            "Created:"
        }
    }
}

impl Reporter for ConsoleReporter {
    fn created(&self, path: &Path) {
        println!("{} {}", style(self.label()).green(), path.display());
    }
}

/// Discards every notification.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

#[cfg(test)]
impl Reporter for SilentReporter {
    fn created(&self, _path: &Path) {}
}
