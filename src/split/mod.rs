//! Multi-document stream splitting
//!
//! This module handles:
//! - Line classification (filename markers, content sniffing)
//! - Segmentation of the input into documents
//! - Naming each document and handing it to a [`Sink`]
//!
//! Data flows one way: lines → [`Segmenter`] → [`Namer`] → [`Sink`].

pub mod classify;
pub mod manifest;
pub mod namer;
pub mod segmenter;

use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, SplitterError};
use crate::sink::Sink;
use crate::ui::Reporter;

pub use namer::{NameSource, Namer, UnknownCounter};
pub use segmenter::{Segment, Segmenter};

/// Totals for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub written: usize,
    pub anonymous: usize,
}

/// Drives a [`Segmenter`] over an input stream and persists every finished
/// segment through a [`Sink`].
pub struct Splitter<'a> {
    namer: Namer,
    sink: &'a dyn Sink,
    reporter: &'a dyn Reporter,
    summary: SplitSummary,
}

impl<'a> Splitter<'a> {
    pub fn new(sink: &'a dyn Sink, reporter: &'a dyn Reporter) -> Self {
        Self::with_counter(Arc::new(UnknownCounter::new()), sink, reporter)
    }

    /// Build a splitter sharing an existing anonymous-file counter.
    pub fn with_counter(
        counter: Arc<UnknownCounter>,
        sink: &'a dyn Sink,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            namer: Namer::new(counter),
            sink,
            reporter,
            summary: SplitSummary::default(),
        }
    }

    /// Consume `input` line by line. Lines are raw bytes split on `\n`, with a
    /// trailing `\r` dropped. Stops at the first read or write failure; files
    /// written before it stay on disk.
    pub fn run<R: BufRead>(mut self, input: R) -> Result<SplitSummary> {
        let mut segmenter = Segmenter::new();

        for line in input.split(b'\n') {
            let mut line = line.map_err(|e| SplitterError::InputReadFailed {
                reason: e.to_string(),
            })?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if let Some(segment) = segmenter.push_line(&line) {
                self.emit(&segment)?;
            }
        }

        if let Some(segment) = segmenter.finish() {
            self.emit(&segment)?;
        }

        info!(
            written = self.summary.written,
            anonymous = self.summary.anonymous,
            "split complete"
        );
        Ok(self.summary)
    }

    fn emit(&mut self, segment: &Segment) -> Result<()> {
        let doc = self.namer.name(segment);
        debug!(
            path = %doc.path.display(),
            source = %doc.source,
            bytes = doc.contents.len(),
            "writing segment"
        );

        self.sink.ensure_parent_dirs(&doc.path)?;
        let written = self.sink.write_file(&doc.path, &doc.contents)?;
        self.reporter.created(&written);

        self.summary.written += 1;
        if matches!(doc.source, NameSource::Anonymous(_)) {
            self.summary.anonymous += 1;
        }
        Ok(())
    }
}

/// Split `input` with a fresh counter.
pub fn split<R: BufRead>(
    input: R,
    sink: &dyn Sink,
    reporter: &dyn Reporter,
) -> Result<SplitSummary> {
    Splitter::new(sink, reporter).run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::ui::SilentReporter;
    use std::path::{Path, PathBuf};

    fn run(input: &str) -> (MemorySink, SplitSummary) {
        let sink = MemorySink::default();
        let summary = split(input.as_bytes(), &sink, &SilentReporter).unwrap();
        (sink, summary)
    }

    fn paths(sink: &MemorySink) -> Vec<PathBuf> {
        sink.files().into_iter().map(|(p, _)| p).collect()
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let (sink, summary) = run("");
        assert!(sink.files().is_empty());
        assert_eq!(summary, SplitSummary::default());
    }

    #[test]
    fn test_deployment_named_from_manifest() {
        let doc = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\n";
        let (sink, _) = run(doc);
        assert_eq!(sink.read("deployment-web.yaml").as_deref(), Some(doc));
    }

    #[test]
    fn test_round_trip_of_separated_manifests() {
        let docs = [
            "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: shop\n",
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: api\nspec:\n  ports:\n  - port: 80\n",
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: api\n",
        ];
        let input: String = docs.iter().map(|d| format!("---\n{d}")).collect();
        let (sink, summary) = run(&input);

        assert_eq!(summary.written, 3);
        assert_eq!(summary.anonymous, 0);
        assert_eq!(sink.read("namespace-shop.yaml").as_deref(), Some(docs[0]));
        assert_eq!(sink.read("service-api.yaml").as_deref(), Some(docs[1]));
        assert_eq!(sink.read("deployment-api.yaml").as_deref(), Some(docs[2]));
    }

    #[test]
    fn test_marker_path_written_trimmed() {
        let (sink, _) = run("---\n# overlays/prod/patch.yaml\nreplicas: 3\n\n\n---\n");
        assert_eq!(
            sink.read("overlays/prod/patch.yaml").as_deref(),
            Some("# overlays/prod/patch.yaml\nreplicas: 3\n")
        );
        assert_eq!(sink.dirs(), vec![PathBuf::from("overlays/prod")]);
    }

    #[test]
    fn test_anonymous_files_numbered_in_order() {
        let input = "kind: Namespace\n---\nspec: {}\n---\ndata: [broken\n";
        let (sink, summary) = run(input);
        assert_eq!(
            paths(&sink),
            vec![
                PathBuf::from("unknown-1.txt"),
                PathBuf::from("unknown-2.txt"),
                PathBuf::from("unknown-3.txt"),
            ]
        );
        assert_eq!(summary.anonymous, 3);
        assert_eq!(sink.read("unknown-3.txt").as_deref(), Some("data: [broken\n"));
    }

    #[test]
    fn test_same_name_overwrites() {
        let input = "---\nkind: Pod\nmetadata:\n  name: a\n---\nkind: Pod\nmetadata:\n  name: a\nspec: {}\n";
        let (sink, summary) = run(input);
        assert_eq!(summary.written, 2);
        assert_eq!(
            sink.read("pod-a.yaml").as_deref(),
            Some("kind: Pod\nmetadata:\n  name: a\nspec: {}\n")
        );
    }

    #[test]
    fn test_shared_counter_continues_across_runs() {
        let counter = Arc::new(UnknownCounter::new());
        let sink = MemorySink::default();

        Splitter::with_counter(Arc::clone(&counter), &sink, &SilentReporter)
            .run("kind: A\n".as_bytes())
            .unwrap();
        Splitter::with_counter(Arc::clone(&counter), &sink, &SilentReporter)
            .run("kind: B\n".as_bytes())
            .unwrap();

        assert_eq!(sink.read("unknown-2.txt").as_deref(), Some("kind: B\n"));
        assert_eq!(counter.issued(), 2);
    }

    #[test]
    fn test_write_failure_stops_processing() {
        let sink = MemorySink::failing_on(Path::new("service-b.yaml"));
        let input = "---\nkind: Service\nmetadata:\n  name: a\n---\nkind: Service\nmetadata:\n  name: b\n---\nkind: Service\nmetadata:\n  name: c\n";
        let err = split(input.as_bytes(), &sink, &SilentReporter).unwrap_err();

        assert!(matches!(err, SplitterError::FileWriteFailed { .. }));
        assert_eq!(paths(&sink), vec![PathBuf::from("service-a.yaml")]);
    }

    #[test]
    fn test_invalid_utf8_passes_through() {
        let sink = MemorySink::default();
        let input: &[u8] = b"---\nkind: ConfigMap\nmetadata:\n  name: first\n---\n# notes.txt\ncaf\xe9\n---\nkind: ConfigMap\nmetadata:\n  name: last\n";
        let summary = split(input, &sink, &SilentReporter).unwrap();

        assert_eq!(summary.written, 3);
        assert_eq!(
            paths(&sink),
            vec![
                PathBuf::from("configmap-first.yaml"),
                PathBuf::from("notes.txt"),
                PathBuf::from("configmap-last.yaml"),
            ]
        );
        assert_eq!(
            sink.read_bytes("notes.txt").as_deref(),
            Some(&b"# notes.txt\ncaf\xe9\n"[..])
        );
    }

    #[test]
    fn test_invalid_utf8_manifest_still_named() {
        let sink = MemorySink::default();
        let input: &[u8] = b"kind: Pod\nmetadata:\n  name: p\n  # caf\xe9\n";
        split(input, &sink, &SilentReporter).unwrap();
        assert_eq!(
            sink.read_bytes("pod-p.yaml").as_deref(),
            Some(&input[..])
        );
    }

    #[test]
    fn test_crlf_input() {
        let (sink, _) = run("---\r\nkind: Pod\r\nmetadata:\r\n  name: p\r\n");
        assert_eq!(
            sink.read("pod-p.yaml").as_deref(),
            Some("kind: Pod\nmetadata:\n  name: p\n")
        );
    }
}
