//! Structural scanner: recover a nested symbol table (classes, functions,
//! methods) from indentation alone, in a single pass over the lines.
//!
//! An indentation stack tracks the symbols still open. A substantive line at
//! or left of an open symbol's column closes it; a `def`/`class` header opens
//! a new one under the innermost shallower symbol. Lines continuing a wrapped
//! header, bracketed expression, or triple-quoted string never close anything.

use tracing::debug;

use crate::docblock::DocStyle;
use crate::syntax::{indent_width, is_decorator, match_header, LexState};
use crate::types::{DocScope, PosWithBody, Position, SymbolRecord, SymbolTable};

/// One parse of one file. Consumed by [`Scanner::scan`].
pub struct Scanner<'a> {
    file_path: &'a str,
    lines: &'a [String],
    style: &'a DocStyle,
    stack: Vec<SymbolRecord>,
    table: SymbolTable,
}

impl<'a> Scanner<'a> {
    /// `file_path` prefixes every top-level symbol path; pass the canonical path.
    pub fn new(file_path: &'a str, lines: &'a [String], style: &'a DocStyle) -> Self {
        Self { file_path, lines, style, stack: Vec::new(), table: SymbolTable::new() }
    }

    pub fn scan(mut self) -> SymbolTable {
        let lines = self.lines;
        let mut lex = LexState::default();
        let mut decorators = 0;

        for (i, line) in lines.iter().enumerate() {
            let continuation = lex.in_continuation();
            lex.feed(line);
            lex.settle();

            let stripped = line.trim_start();
            if continuation || stripped.trim_end().is_empty() || stripped.starts_with('#') {
                continue;
            }

            let indent = indent_width(line);
            if self.stack.last().is_some_and(|top| indent <= top.pos) {
                self.close_from(indent, i - 1);
            }

            if is_decorator(stripped) {
                decorators += 1;
                continue;
            }
            if let Some((_, name)) = match_header(stripped) {
                self.open(name, i, indent, decorators);
            }
            decorators = 0;
        }

        let last = lines.len().saturating_sub(1);
        self.close_from(0, last);
        debug!(path = self.file_path, symbols = self.table.len(), "Scanned file");
        self.table
    }

    /// Push a newly matched header under the innermost shallower symbol.
    fn open(&mut self, name: &str, line: usize, indent: usize, decorators: usize) {
        // Closing already popped every symbol at this column or deeper, which
        // empties the stack for a top-level header.
        let parent = self.stack.last().map_or(self.file_path, |top| top.path.as_str());
        let path = format!("{parent}/{name}");

        self.table.insert(path.clone(), PosWithBody::open(Position::open(line, indent, decorators)));
        self.stack.push(SymbolRecord { path, pos: indent });
    }

    /// Close, innermost first, every open symbol indented at least `indent`.
    fn close_from(&mut self, indent: usize, end_line: usize) {
        while self.stack.last().is_some_and(|top| top.pos >= indent) {
            if let Some(record) = self.stack.pop() {
                self.close(&record.path, end_line);
            }
        }
    }

    fn close(&mut self, path: &str, end_line: usize) {
        let Some(entry) = self.table.get_mut(path) else {
            return;
        };
        if entry.position.is_closed() {
            return;
        }
        entry.position.close(end_line);
        let position = entry.position;
        entry.body = self.style.remove_documentation(self.lines, &position, DocScope::Body);
    }
}
