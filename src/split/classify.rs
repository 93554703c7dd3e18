//! Line classification heuristics
//!
//! Two questions get answered here:
//! - is this comment line naming an output file?
//! - does this span of text look like a real document, or like prose and
//!   directory-tree art that happened to sit between documents?

const COMMENT_MARKER: char = '#';

/// Characters used to draw directory trees. A comment containing any of them
/// is an illustration, not a filename.
const TREE_CHARS: &[char] = &[
    '├', '└', '│', '─', '┌', '┐', '┘', '┬', '┴', '┼', '┤', '|',
];

/// Connector sequences that mark a whole span as a tree listing.
const TREE_CONNECTORS: &[&str] = &["├──", "└──", "│   "];

/// Substrings that indicate structured content worth keeping.
const CONTENT_INDICATORS: &[&str] = &[
    "apiVersion:",
    "kind:",
    "metadata:",
    "spec:",
    "data:",
    "rules:",
    ".PHONY",
    "#!",
];

/// Returns the output path named by a filename-marker comment, if `line` is one.
///
/// Accepted shapes are `#path/to/file`, `# path/to/file`, `# name.ext` and
/// `# Makefile`. Shebangs, indented comment text, tree drawings and prose are
/// rejected.
pub fn filename_marker(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(COMMENT_MARKER)?;
    if rest.starts_with('!') {
        return None;
    }

    // At most one space between the marker and the name.
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    if rest.starts_with(char::is_whitespace) {
        return None;
    }

    let candidate = rest.trim();
    if candidate.is_empty() || candidate == "." {
        return None;
    }
    if candidate.contains(TREE_CHARS) || candidate.contains("--") {
        return None;
    }

    if candidate.contains('/') || candidate.contains('.') || candidate == "Makefile" {
        Some(candidate)
    } else {
        None
    }
}

/// Whether `line` is a comment that qualifies as a filename marker.
pub fn is_filename_marker(line: &str) -> bool {
    filename_marker(line).is_some()
}

/// Content sniff used to decide whether an unmarked span deserves its own file.
pub fn is_likely_content(text: &str) -> bool {
    if TREE_CONNECTORS.iter().any(|c| text.contains(c)) {
        return false;
    }
    CONTENT_INDICATORS.iter().any(|i| text.contains(i))
}
