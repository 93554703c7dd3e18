//! Command implementations for the yamlsplitter CLI

pub mod completions;
pub mod split;
