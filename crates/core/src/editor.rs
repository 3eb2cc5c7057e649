//! Edit orchestration: apply a batch of documentation entries to their files.
//!
//! Entries are grouped by file. Within a file they are applied bottom-up
//! (descending `start_line`): an edit only shifts the lines below it, so every
//! entry still waiting above keeps a valid position.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::docblock::DocStyle;
use crate::error::{DocgenError, Result};
use crate::source::SourceText;
use crate::types::{DocMap, DocumentationEntry};

// ---------------------------------------------------------------------------
// Modes and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Insert blocks only where none exist.
    #[default]
    Insert,
    /// Replace generated blocks, insert where none exist, never touch
    /// hand-written blocks.
    Regenerate,
}

/// Edits made to one file's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditCounts {
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: usize,
}

impl EditCounts {
    pub fn changed(&self) -> bool {
        self.inserted + self.replaced > 0
    }
}

#[derive(Debug)]
pub enum FileStatus {
    Written(EditCounts),
    Unchanged(EditCounts),
    Failed(DocgenError),
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// Result of one orchestrator run, one outcome per file touched.
#[derive(Debug, Default)]
pub struct EditReport {
    pub files: Vec<FileOutcome>,
}

impl EditReport {
    pub fn written(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| matches!(f.status, FileStatus::Written(_)))
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| matches!(f.status, FileStatus::Failed(_)))
    }

    pub fn totals(&self) -> EditCounts {
        let mut totals = EditCounts::default();
        for outcome in &self.files {
            if let FileStatus::Written(c) | FileStatus::Unchanged(c) = &outcome.status {
                totals.inserted += c.inserted;
                totals.replaced += c.replaced;
                totals.skipped += c.skipped;
            }
        }
        totals
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// The file part of a symbol path: the first `/`-separated prefix that is not
/// an existing directory. When that prefix is not an existing file either,
/// the first segment from there on with an extension ends the file part,
/// failing that everything before the last segment.
pub fn file_segment<'a>(
    symbol_path: &'a str,
    is_dir: impl Fn(&Path) -> bool,
    is_file: impl Fn(&Path) -> bool,
) -> &'a str {
    let cuts: Vec<usize> = symbol_path.match_indices('/').map(|(i, _)| i).filter(|&i| i > 0).collect();
    let fallback = cuts.last().map_or(symbol_path, |&cut| &symbol_path[..cut]);

    let Some(first) = cuts.iter().position(|&cut| !is_dir(Path::new(&symbol_path[..cut]))) else {
        return fallback;
    };
    let candidate = &symbol_path[..cuts[first]];
    if is_file(Path::new(candidate)) {
        return candidate;
    }
    cuts[first..]
        .iter()
        .map(|&cut| &symbol_path[..cut])
        .find(|prefix| prefix.rsplit('/').next().is_some_and(|segment| segment.contains('.')))
        .unwrap_or(fallback)
}

/// Group entries by the file their path names.
pub fn group_by_file(entries: &DocMap) -> BTreeMap<PathBuf, Vec<&DocumentationEntry>> {
    let mut files: BTreeMap<PathBuf, Vec<&DocumentationEntry>> = BTreeMap::new();
    for (path, entry) in entries {
        let file = file_segment(path, Path::is_dir, Path::is_file);
        files.entry(PathBuf::from(file)).or_default().push(entry);
    }
    files
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Applies documentation entries to files on disk.
#[derive(Debug, Clone, Default)]
pub struct DocEditor {
    style: DocStyle,
    mode: EditMode,
}

impl DocEditor {
    pub fn new(style: DocStyle, mode: EditMode) -> Self {
        Self { style, mode }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Apply every entry to its file. Failures are recorded per file and do
    /// not stop the remaining files.
    pub fn process_files(&self, entries: &DocMap) -> EditReport {
        let mut report = EditReport::default();
        for (path, file_entries) in group_by_file(entries) {
            let status = match self.process_single_file(&path, file_entries) {
                Ok(status) => status,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to document file");
                    FileStatus::Failed(e)
                }
            };
            report.files.push(FileOutcome { path, status });
        }
        report
    }

    fn process_single_file(&self, path: &Path, entries: Vec<&DocumentationEntry>) -> Result<FileStatus> {
        let mut text = SourceText::read(path)?;
        let (lines, counts) = self.apply(std::mem::take(&mut text.lines), entries);

        if !counts.changed() {
            info!(path = %path.display(), skipped = counts.skipped, "File already documented");
            return Ok(FileStatus::Unchanged(counts));
        }
        text.lines = lines;
        text.write(path)?;
        info!(
            path = %path.display(),
            inserted = counts.inserted,
            replaced = counts.replaced,
            skipped = counts.skipped,
            "Documentation applied"
        );
        Ok(FileStatus::Written(counts))
    }

    /// Apply entries to one file's lines, bottom-up.
    pub fn apply(
        &self,
        mut lines: Vec<String>,
        mut entries: Vec<&DocumentationEntry>,
    ) -> (Vec<String>, EditCounts) {
        entries.sort_by(|a, b| b.position.start_line.cmp(&a.position.start_line));
        let mut counts = EditCounts::default();

        for entry in entries {
            let position = &entry.position;
            let documented = self.style.has_documentation(&lines, position);

            let updated = match (self.mode, documented) {
                (_, false) => {
                    let updated = self.style.insert_documentation(&lines, position, &entry.text);
                    if updated.len() != lines.len() {
                        counts.inserted += 1;
                    }
                    updated
                }
                (EditMode::Regenerate, true) if self.style.is_generated(&lines, position) => {
                    let updated = self.style.replace_documentation(&lines, position, &entry.text);
                    if updated != lines {
                        counts.replaced += 1;
                    }
                    updated
                }
                (_, true) => {
                    debug!(line = position.start_line, "Existing documentation kept");
                    counts.skipped += 1;
                    continue;
                }
            };
            if updated.len() == lines.len() && updated == lines {
                if !entry.text.trim().is_empty() {
                    warn!(line = position.start_line, "Documentation could not be placed");
                }
                counts.skipped += 1;
            }
            lines = updated;
        }
        (lines, counts)
    }
}
