//! Documentation block management: detect, remove, format, and insert
//! docstring blocks directly below a definition's header.
//!
//! Everything here is a pure function of `(lines, position)`; nothing is
//! mutated in place. The only state is the [`DocStyle`] describing how blocks
//! are written and how far to look for them.

use std::borrow::Cow;

use tracing::debug;

use crate::boundary::{resolve_boundary, resolve_header};
use crate::syntax::{indent_width, is_trivia, leading_whitespace, line_ending};
use crate::types::{DocScope, Position};

/// Marker line written into every generated block.
pub const DEFAULT_MARKER: &str = "Generated documentation";

/// Lines scanned after the boundary when looking for a block.
pub const DEFAULT_LOOKAHEAD: usize = 9;

/// Lines scanned after an opening delimiter when looking for its close.
pub const MAX_BLOCK_LINES: usize = 400;

const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

// ---------------------------------------------------------------------------
// Block style
// ---------------------------------------------------------------------------

/// How documentation blocks are recognized and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocStyle {
    /// Token identifying generated blocks.
    pub marker: String,
    /// One nesting level of indentation.
    pub indent_unit: String,
    /// Lines searched after the header boundary.
    pub lookahead: usize,
    /// Write the marker line (and a blank separator) into every new block.
    pub generation_aware: bool,
}

impl Default for DocStyle {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            indent_unit: "    ".to_string(),
            lookahead: DEFAULT_LOOKAHEAD,
            generation_aware: true,
        }
    }
}

/// A located block: inclusive line span and the delimiter that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocBlock {
    pub start: usize,
    /// `None` when no closing delimiter was found within [`MAX_BLOCK_LINES`].
    pub end: Option<usize>,
    pub delimiter: &'static str,
}

impl DocStyle {
    /// Style that writes plain blocks without the generation marker.
    pub fn plain() -> Self {
        Self { generation_aware: false, ..Self::default() }
    }

    /// Locate the block following the header at `position`, if the first
    /// substantive line after the boundary opens one.
    pub fn find_block(&self, lines: &[String], position: &Position) -> Option<DocBlock> {
        if position.start_line >= lines.len() {
            return None;
        }
        let boundary = resolve_boundary(lines, position.start_line);
        let last = (boundary + self.lookahead).min(lines.len() - 1);

        for i in boundary + 1..=last {
            if is_trivia(&lines[i]) {
                continue;
            }
            let delimiter = opening_delimiter(lines[i].trim())?;
            return Some(DocBlock { start: i, end: closing_line(lines, i, delimiter), delimiter });
        }
        None
    }

    pub fn has_documentation(&self, lines: &[String], position: &Position) -> bool {
        self.find_block(lines, position).is_some()
    }

    /// The block exists, is properly closed, and carries the generation marker.
    pub fn is_generated(&self, lines: &[String], position: &Position) -> bool {
        match self.find_block(lines, position) {
            Some(DocBlock { start, end: Some(end), .. }) => {
                lines[start..=end].iter().any(|line| line.contains(&self.marker))
            }
            _ => false,
        }
    }

    /// Remove the block at `position`. `scope` picks the whole file or the
    /// symbol's own body slice. Unclosed blocks are left alone.
    pub fn remove_documentation(
        &self,
        lines: &[String],
        position: &Position,
        scope: DocScope,
    ) -> Vec<String> {
        let span = self
            .find_block(lines, position)
            .and_then(|block| block.end.map(|end| block.start..=end));

        match scope {
            DocScope::File => match span {
                Some(span) => {
                    let mut out = Vec::with_capacity(lines.len());
                    out.extend_from_slice(&lines[..*span.start()]);
                    out.extend_from_slice(&lines[*span.end() + 1..]);
                    out
                }
                None => lines.to_vec(),
            },
            DocScope::Body => {
                if lines.is_empty() || position.start_line >= lines.len() {
                    return Vec::new();
                }
                let end = position.end_line.unwrap_or(lines.len() - 1).min(lines.len() - 1);
                (position.start_line..=end)
                    .filter(|i| span.as_ref().map_or(true, |span| !span.contains(i)))
                    .map(|i| lines[i].clone())
                    .collect()
            }
        }
    }

    /// Insert `text` as a block right after the header boundary.
    ///
    /// Blank text, an out-of-range position, or a header with an inline body
    /// leave the lines unchanged.
    pub fn insert_documentation(&self, lines: &[String], position: &Position, text: &str) -> Vec<String> {
        if text.trim().is_empty() || position.start_line >= lines.len() {
            return lines.to_vec();
        }
        let header = resolve_header(lines, position.start_line);
        if header.has_inline_body(lines) {
            debug!(line = header.line, "Header has an inline body, not inserting");
            return lines.to_vec();
        }
        let boundary = header.line;

        let indent = self.block_indent(lines, position.start_line, boundary);
        let eol = line_ending(&lines[boundary]);
        let block = self.format_block(text, &indent, eol);

        let mut out = Vec::with_capacity(lines.len() + block.len());
        out.extend_from_slice(&lines[..=boundary]);
        if let Some(last) = out.last_mut() {
            if !last.ends_with('\n') {
                last.push_str(eol);
            }
        }
        out.extend(block);
        out.extend_from_slice(&lines[boundary + 1..]);
        out
    }

    pub fn replace_documentation(&self, lines: &[String], position: &Position, text: &str) -> Vec<String> {
        let stripped = self.remove_documentation(lines, position, DocScope::File);
        self.insert_documentation(&stripped, position, text)
    }

    /// Render `text` as block lines, each prefixed by `indent` and ended by `eol`.
    pub fn format_block(&self, text: &str, indent: &str, eol: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let (delimiter, text) = choose_delimiter(text);
        let content: Vec<&str> = text.lines().map(str::trim_end).collect();

        if content.len() == 1 && !self.generation_aware {
            let mut line = content[0].to_string();
            if line.ends_with(&delimiter[..1]) {
                line.push(' ');
            }
            return vec![format!("{indent}{delimiter}{line}{delimiter}{eol}")];
        }

        let mut out = Vec::with_capacity(content.len() + 4);
        out.push(format!("{indent}{delimiter}{eol}"));
        if self.generation_aware {
            out.push(format!("{indent}{}{eol}", self.marker));
            out.push(eol.to_string());
        }
        for line in content {
            if line.is_empty() {
                out.push(eol.to_string());
            } else {
                out.push(format!("{indent}{line}{eol}"));
            }
        }
        out.push(format!("{indent}{delimiter}{eol}"));
        out
    }

    /// Indentation for a new block: the existing body's, when it is deeper
    /// than the header, otherwise the header's plus one unit.
    fn block_indent(&self, lines: &[String], header: usize, boundary: usize) -> String {
        let header_ws = leading_whitespace(&lines[header]);
        let last = (boundary + self.lookahead).min(lines.len() - 1);
        let body = (boundary + 1..=last).map(|i| &lines[i]).find(|line| !is_trivia(line));
        match body {
            Some(line) if indent_width(line) > header_ws.len() => leading_whitespace(line).to_string(),
            _ => format!("{header_ws}{}", self.indent_unit),
        }
    }
}

// ---------------------------------------------------------------------------
// Delimiters
// ---------------------------------------------------------------------------

/// Delimiter opening a docstring, allowing a single `r`/`u` prefix.
fn opening_delimiter(trimmed: &str) -> Option<&'static str> {
    let body = match trimmed.as_bytes().first() {
        Some(b'r' | b'R' | b'u' | b'U') => &trimmed[1..],
        _ => trimmed,
    };
    DELIMITERS.into_iter().find(|d| body.starts_with(d))
}

/// Line closing the block opened on `start` with `delimiter`.
fn closing_line(lines: &[String], start: usize, delimiter: &str) -> Option<usize> {
    let opening = lines[start].trim();
    let offset = opening.find(delimiter)? + delimiter.len();
    if opening[offset..].contains(delimiter) {
        return Some(start);
    }
    let stop = (start + MAX_BLOCK_LINES).min(lines.len());
    (start + 1..stop).find(|&i| lines[i].contains(delimiter))
}

/// Pick a delimiter the text cannot terminate early.
fn choose_delimiter(text: &str) -> (&'static str, Cow<'_, str>) {
    if !text.contains(DELIMITERS[0]) {
        (DELIMITERS[0], Cow::Borrowed(text))
    } else if !text.contains(DELIMITERS[1]) {
        (DELIMITERS[1], Cow::Borrowed(text))
    } else {
        (DELIMITERS[0], Cow::Owned(text.replace(DELIMITERS[0], "\\\"\\\"\\\"")))
    }
}
