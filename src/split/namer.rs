//! Output naming for finished segments
//!
//! Precedence, highest first:
//! 1. a filename-marker first line (body trimmed, one trailing newline)
//! 2. `<kind>-<name>.yaml` from the parsed document (body verbatim)
//! 3. `unknown-<N>.txt` from the shared counter (body verbatim)

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::classify;
use super::manifest::{self, ManifestId};
use super::segmenter::Segment;

/// Monotonic counter for anonymous output files.
///
/// Shared through an `Arc` so several splitters can hand out distinct numbers.
#[derive(Debug, Default)]
pub struct UnknownCounter {
    issued: AtomicU32,
}

impl UnknownCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next number; the first call returns 1.
    pub fn next(&self) -> u32 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// How many numbers have been handed out so far.
    #[cfg(test)]
    pub fn issued(&self) -> u32 {
        self.issued.load(Ordering::SeqCst)
    }
}

/// Where an output name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    Marker,
    Manifest(ManifestId),
    Anonymous(u32),
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSource::Marker => write!(f, "filename marker"),
            NameSource::Manifest(id) => write!(f, "{} {}", id.kind, id.name),
            NameSource::Anonymous(n) => write!(f, "anonymous #{n}"),
        }
    }
}

/// A segment with its final path and the bytes to write there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDocument {
    pub path: PathBuf,
    pub contents: Vec<u8>,
    pub source: NameSource,
}

/// Decides the output path for each segment.
#[derive(Debug, Clone)]
pub struct Namer {
    counter: Arc<UnknownCounter>,
}

impl Namer {
    pub fn new(counter: Arc<UnknownCounter>) -> Self {
        Self { counter }
    }

    pub fn name(&self, segment: &Segment) -> NamedDocument {
        let marker = segment.first_line().and_then(classify::filename_marker);
        let trimmed = segment.content().trim_ascii();

        if let Some(path) = marker {
            if !trimmed.is_empty() {
                let mut contents = trimmed.to_vec();
                contents.push(b'\n');
                return NamedDocument {
                    path: PathBuf::from(path),
                    contents,
                    source: NameSource::Marker,
                };
            }
        }

        match manifest::identify(&segment.text()) {
            Some(id) => NamedDocument {
                path: PathBuf::from(id.file_name()),
                contents: segment.content().to_vec(),
                source: NameSource::Manifest(id),
            },
            None => self.anonymous(segment),
        }
    }

    fn anonymous(&self, segment: &Segment) -> NamedDocument {
        let n = self.counter.next();
        NamedDocument {
            path: PathBuf::from(format!("unknown-{n}.txt")),
            contents: segment.content().to_vec(),
            source: NameSource::Anonymous(n),
        }
    }
}
