//! Output persistence
//!
//! This module handles:
//! - Creating parent directories for output paths (ensure_parent_dirs)
//! - Writing document bytes with create-or-overwrite semantics
//! - A dry-run sink that touches nothing

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SplitterError};

/// Destination for named documents.
///
/// Paths are relative output names; implementations decide where they land.
pub trait Sink {
    /// Make sure every missing parent directory of `path` exists.
    fn ensure_parent_dirs(&self, path: &Path) -> Result<()>;

    /// Persist `contents` at `path`, replacing any existing file. Returns the
    /// location the document was written to.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf>;
}

fn dir_create_error(path: &Path, e: &std::io::Error) -> SplitterError {
    SplitterError::DirectoryCreateFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn file_write_error(path: &Path, e: &std::io::Error) -> SplitterError {
    SplitterError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Directory that output names are resolved against.
///
/// The current directory (`.`) takes names as written. Any other root keeps
/// names inside it: absolute prefixes are dropped and `..` may not climb
/// above the root.
#[derive(Debug, Clone)]
pub struct OutputRoot {
    root: PathBuf,
}

impl OutputRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_current_dir(&self) -> bool {
        self.root.components().all(|c| matches!(c, Component::CurDir))
    }

    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if self.is_current_dir() {
            return Ok(path.to_path_buf());
        }

        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::Normal(part) => relative.push(part),
                Component::ParentDir => {
                    if !relative.pop() {
                        return Err(self.outside(path));
                    }
                }
            }
        }
        if relative.as_os_str().is_empty() {
            return Err(self.outside(path));
        }
        Ok(self.root.join(relative))
    }

    fn outside(&self, path: &Path) -> SplitterError {
        SplitterError::PathOutsideOutputDir {
            path: path.display().to_string(),
            root: self.root.display().to_string(),
        }
    }
}

/// Writes documents below an output root directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: OutputRoot,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: OutputRoot::new(root),
        }
    }
}

impl Sink for FsSink {
    fn ensure_parent_dirs(&self, path: &Path) -> Result<()> {
        let target = self.root.resolve(path)?;
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| dir_create_error(parent, &e))?;
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf> {
        let target = self.root.resolve(path)?;
        std::fs::write(&target, contents).map_err(|e| file_write_error(&target, &e))?;
        debug!(path = %target.display(), bytes = contents.len(), "wrote file");
        Ok(target)
    }
}

/// Resolves names like [`FsSink`] but touches nothing.
#[derive(Debug, Clone)]
pub struct DryRunSink {
    root: OutputRoot,
}

impl DryRunSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: OutputRoot::new(root),
        }
    }
}

impl Sink for DryRunSink {
    fn ensure_parent_dirs(&self, path: &Path) -> Result<()> {
        let target = self.root.resolve(path)?;
        debug!(path = %target.display(), "dry run: skipping directory creation");
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf> {
        let target = self.root.resolve(path)?;
        debug!(path = %target.display(), bytes = contents.len(), "dry run: skipping write");
        Ok(target)
    }
}

/// In-memory sink recording directories and files in call order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    dirs: std::cell::RefCell<Vec<PathBuf>>,
    files: std::cell::RefCell<Vec<(PathBuf, Vec<u8>)>>,
    fail_on: Option<PathBuf>,
}

#[cfg(test)]
impl MemorySink {
    /// A sink whose write to `path` fails.
    pub fn failing_on(path: &Path) -> Self {
        Self {
            fail_on: Some(path.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().clone()
    }

    pub fn files(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.files.borrow().clone()
    }

    pub fn read_bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .borrow()
            .iter()
            .find(|(p, _)| p.as_path() == Path::new(path))
            .map(|(_, c)| c.clone())
    }

    pub fn read(&self, path: &str) -> Option<String> {
        self.read_bytes(path)
            .map(|c| String::from_utf8_lossy(&c).into_owned())
    }
}

#[cfg(test)]
impl Sink for MemorySink {
    fn ensure_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.dirs.borrow_mut().push(parent.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<PathBuf> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(SplitterError::FileWriteFailed {
                path: path.display().to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        let contents = contents.to_vec();
        let mut files = self.files.borrow_mut();
        match files.iter_mut().find(|(p, _)| p.as_path() == path) {
            Some(entry) => entry.1 = contents,
            None => files.push((path.to_path_buf(), contents)),
        }
        Ok(path.to_path_buf())
    }
}
