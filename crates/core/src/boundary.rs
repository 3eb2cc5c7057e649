//! Definition boundary resolution: find the line that ends a header.
//!
//! A header may span several lines when its parameter list (or base-class
//! list) is wrapped. The boundary is the line carrying the block-introducer
//! `:` outside every bracket, string, and comment. Docstrings are inserted
//! directly below it, so callers must pass the *current* line array.

use crate::syntax::{body_after_introducer, match_header, LexState};

/// Where a header ends: the boundary line and, when found, the byte offset
/// of the introducer `:` within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub line: usize,
    pub introducer: Option<usize>,
}

impl Boundary {
    fn fallback(line: usize) -> Self {
        Self { line, introducer: None }
    }

    /// True when the header carries its body after the introducer
    /// (`def f(): pass`). Only text after the resolved `:` counts, so colons
    /// in annotations on a wrapped header's last line are not mistaken for it.
    pub fn has_inline_body(&self, lines: &[String]) -> bool {
        match (self.introducer, lines.get(self.line)) {
            (Some(offset), Some(line)) => body_after_introducer(line, offset),
            _ => false,
        }
    }
}

/// Resolve the header at `header`, lexing continuously from the header line
/// so bracket state carries across wrapped lines.
pub fn resolve_header(lines: &[String], header: usize) -> Boundary {
    if lines.is_empty() {
        return Boundary::fallback(0);
    }
    if header >= lines.len() {
        return Boundary::fallback(lines.len() - 1);
    }
    if match_header(lines[header].trim_start()).is_none() {
        return Boundary::fallback(header);
    }

    let mut state = LexState::default();
    for (i, line) in lines.iter().enumerate().skip(header) {
        if let Some(offset) = state.feed(line) {
            return Boundary { line: i, introducer: Some(offset) };
        }
    }
    Boundary::fallback(header)
}

/// Index of the line on which the header at `header` ends.
///
/// Lines that are not headers resolve to themselves, as do unterminated
/// headers. Out-of-range indices are clamped to the last line.
pub fn resolve_boundary(lines: &[String], header: usize) -> usize {
    resolve_header(lines, header).line
}
