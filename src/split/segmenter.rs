//! Line-driven document segmentation
//!
//! The segmenter is a two-state machine. While `Idle` it collects leftover
//! text (prose, tree drawings, a leading document without a separator) and
//! watches for a filename marker. While `Accumulating` it collects one
//! segment until the next `---`.
//!
//! Lines are raw bytes. Classification looks at a lossy UTF-8 view, while the
//! buffered content keeps the input bytes untouched.

use std::borrow::Cow;

use tracing::{debug, warn};

use super::classify;

/// Explicit document boundary.
pub const SEPARATOR: &[u8] = b"---";

/// A contiguous span of input lines, each terminated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    first_line: Option<String>,
    content: Vec<u8>,
}

impl Segment {
    #[cfg(test)]
    pub fn new(first_line: Option<&str>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            first_line: first_line.map(str::to_string),
            content: content.into(),
        }
    }

    /// First non-blank line, kept for marker detection.
    pub fn first_line(&self) -> Option<&str> {
        self.first_line.as_deref()
    }

    /// Raw bytes as read from the input.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.trim_ascii().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Accumulating { first_line: Option<String> },
}

/// Splits a line sequence into [`Segment`]s.
#[derive(Debug)]
pub struct Segmenter {
    state: State,
    buffer: Vec<u8>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            buffer: Vec::new(),
        }
    }

    /// Feed one line (without its terminator). Returns a segment when this
    /// line closed one.
    pub fn push_line(&mut self, line: &[u8]) -> Option<Segment> {
        if line == SEPARATOR {
            return self.on_separator();
        }

        let text = String::from_utf8_lossy(line);
        let finished = match self.state {
            State::Idle if classify::is_filename_marker(&text) => {
                let leftover = self.take_leftover();
                self.state = State::Accumulating {
                    first_line: Some(text.into_owned()),
                };
                leftover
            }
            State::Idle => None,
            State::Accumulating { ref mut first_line } => {
                if first_line.is_none() && !text.trim().is_empty() {
                    *first_line = Some(text.into_owned());
                }
                None
            }
        };

        self.buffer.extend_from_slice(line);
        self.buffer.push(b'\n');
        finished
    }

    /// Close the stream and return the trailing segment, if it is worth
    /// keeping.
    pub fn finish(mut self) -> Option<Segment> {
        let first_line = match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Accumulating { first_line } => first_line,
        };
        let content = std::mem::take(&mut self.buffer);
        if is_blank(&content) {
            return None;
        }

        let marked = first_line
            .as_deref()
            .is_some_and(classify::is_filename_marker);
        if marked || classify::is_likely_content(&String::from_utf8_lossy(&content)) {
            Some(Segment {
                first_line,
                content,
            })
        } else {
            warn!(bytes = content.len(), "discarding trailing text without document content");
            None
        }
    }

    fn on_separator(&mut self) -> Option<Segment> {
        let finished = match std::mem::replace(
            &mut self.state,
            State::Accumulating { first_line: None },
        ) {
            State::Idle => self.take_leftover(),
            State::Accumulating { first_line } => {
                let content = std::mem::take(&mut self.buffer);
                if is_blank(&content) {
                    None
                } else {
                    Some(Segment {
                        first_line,
                        content,
                    })
                }
            }
        };
        self.buffer.clear();
        finished
    }

    /// Drain text collected while idle, keeping it only if it sniffs like a
    /// document.
    fn take_leftover(&mut self) -> Option<Segment> {
        let content = std::mem::take(&mut self.buffer);
        if is_blank(&content) {
            return None;
        }
        if classify::is_likely_content(&String::from_utf8_lossy(&content)) {
            debug!(bytes = content.len(), "keeping leftover text as its own segment");
            Some(Segment {
                first_line: None,
                content,
            })
        } else {
            warn!(bytes = content.len(), "discarding leftover text without document content");
            None
        }
    }
}
