//! Core types shared across docgen: symbol positions, scanned symbol entries,
//! documentation entries from the AI collaborator, and the ordered symbol table.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Where a definition lives in its file. All line numbers are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct Position {
    /// Line of the `def`/`class` keyword, after any decorator lines.
    pub start_line: usize,
    /// Indentation width of the header.
    pub pos: usize,
    /// Last line belonging to the symbol, inclusive. `None` while still open.
    #[serde(default)]
    pub end_line: Option<usize>,
    /// Number of decorator lines directly above the header.
    #[serde(default)]
    pub decorator_count: usize,
}

impl Position {
    /// A freshly matched, still-open symbol.
    pub fn open(start_line: usize, pos: usize, decorator_count: usize) -> Self {
        Self { start_line, pos, end_line: None, decorator_count }
    }

    pub fn is_closed(&self) -> bool {
        self.end_line.is_some()
    }

    /// Assign the end line. Only the first call has an effect.
    pub fn close(&mut self, end_line: usize) {
        if self.end_line.is_none() {
            self.end_line = Some(end_line.max(self.start_line));
        }
    }

    /// Inclusive line range, once the symbol is closed.
    pub fn line_range(&self) -> Option<RangeInclusive<usize>> {
        self.end_line.map(|end| self.start_line..=end)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_line {
            Some(end) => write!(f, "(lines:{}-{}, offset:{})", self.start_line, end, self.pos),
            None => write!(f, "(lines:{}-?, offset:{})", self.start_line, self.pos),
        }
    }
}

// ---------------------------------------------------------------------------
// Symbol entries
// ---------------------------------------------------------------------------

/// A finalized symbol: its position plus its body with any existing docstring removed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct PosWithBody {
    pub position: Position,
    pub body: Vec<String>,
}

impl PosWithBody {
    pub fn open(position: Position) -> Self {
        Self { position, body: Vec::new() }
    }

    /// Body lines joined back into source text.
    pub fn body_text(&self) -> String {
        self.body.concat()
    }
}

/// Documentation produced for one symbol, ready to be spliced into its file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct DocumentationEntry {
    pub position: Position,
    pub text: String,
}

impl DocumentationEntry {
    pub fn new(position: Position, text: impl Into<String>) -> Self {
        Self { position, text: text.into() }
    }
}

/// Documentation keyed by symbol path, as handed to the edit orchestrator.
pub type DocMap = BTreeMap<String, DocumentationEntry>;

/// Open symbol on the scanner's indentation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SymbolRecord {
    pub path: String,
    pub pos: usize,
}

/// Which slice `remove_documentation` hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocScope {
    /// The whole file with the block excised.
    File,
    /// Only the symbol's own lines (`start_line..=end_line`) with the block excised.
    Body,
}

// ---------------------------------------------------------------------------
// Symbol table
// ---------------------------------------------------------------------------

/// Symbol path → entry, in order of first appearance.
///
/// Re-inserting an existing path replaces its entry but keeps the original slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<(String, PosWithBody)>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: String, entry: PosWithBody) {
        match self.index.get(&path) {
            Some(&slot) => self.entries[slot].1 = entry,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, entry));
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&PosWithBody> {
        self.index.get(path).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn get_mut(&mut self, path: &str) -> Option<&mut PosWithBody> {
        match self.index.get(path) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PosWithBody)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Keep the entries matching `keep`, preserving order.
    pub fn filtered(&self, mut keep: impl FnMut(&str, &PosWithBody) -> bool) -> SymbolTable {
        self.iter()
            .filter(|(path, entry)| keep(path, entry))
            .map(|(path, entry)| (path.to_string(), entry.clone()))
            .collect()
    }
}

impl FromIterator<(String, PosWithBody)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (String, PosWithBody)>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        for (path, entry) in iter {
            table.insert(path, entry);
        }
        table
    }
}

impl Serialize for SymbolTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
