//! A scanned source file: its canonical path, its lines, and its symbol table,
//! plus the two retrieval modes built on the finished table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::boundary::resolve_header;
use crate::docblock::DocStyle;
use crate::error::{DocgenError, Result};
use crate::scanner::Scanner;
use crate::syntax::split_lines;
use crate::types::SymbolTable;

const BOM: char = '\u{feff}';

/// File contents split into terminator-preserving lines, with a leading
/// UTF-8 BOM held apart so scanning never sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub bom: bool,
    pub lines: Vec<String>,
}

impl SourceText {
    pub fn parse(content: &str) -> Self {
        match content.strip_prefix(BOM) {
            Some(rest) => Self { bom: true, lines: split_lines(rest) },
            None => Self { bom: false, lines: split_lines(content) },
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DocgenError::io(path, e))?;
        Ok(Self::parse(&content))
    }

    /// Rewrite the whole file, restoring the BOM if it had one.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut out = String::with_capacity(self.lines.iter().map(String::len).sum::<usize>() + 3);
        if self.bom {
            out.push(BOM);
        }
        out.extend(self.lines.iter().map(String::as_str));
        fs::write(path, out).map_err(|e| DocgenError::io(path, e))
    }
}

/// Read a file into terminator-preserving lines, dropping a UTF-8 BOM.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    SourceText::read(path).map(|text| text.lines)
}

/// One file, parsed once.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    lines: Vec<String>,
    symbols: SymbolTable,
    style: DocStyle,
}

impl SourceFile {
    /// Read and scan `path`. Symbol paths are rooted at its canonical form.
    pub fn open(path: &Path, style: &DocStyle) -> Result<Self> {
        let canonical: PathBuf = fs::canonicalize(path).map_err(|e| DocgenError::io(path, e))?;
        let lines = read_lines(&canonical)?;
        Ok(Self::from_lines(canonical.to_string_lossy().into_owned(), lines, style))
    }

    /// Scan in-memory source under the given path prefix.
    pub fn from_source(path: impl Into<String>, source: &str, style: &DocStyle) -> Self {
        Self::from_lines(path.into(), split_lines(source), style)
    }

    fn from_lines(path: String, lines: Vec<String>, style: &DocStyle) -> Self {
        let symbols = Scanner::new(&path, &lines, style).scan();
        debug!(path = path.as_str(), lines = lines.len(), symbols = symbols.len(), "Loaded source file");
        Self { path, lines, symbols, style: style.clone() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every symbol found, documented or not.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Symbols with no documentation block. Headers with an inline body
    /// (`def f(): ...`) cannot take a block and are left out.
    pub fn to_document(&self) -> SymbolTable {
        self.symbols.filtered(|_, entry| {
            let position = &entry.position;
            !self.style.has_documentation(&self.lines, position)
                && !resolve_header(&self.lines, position.start_line).has_inline_body(&self.lines)
        })
    }

    /// Symbols whose block carries the generation marker.
    pub fn to_regenerate(&self) -> SymbolTable {
        self.symbols.filtered(|_, entry| self.style.is_generated(&self.lines, &entry.position))
    }
}
