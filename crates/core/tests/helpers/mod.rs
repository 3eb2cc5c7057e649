//! Test harness for scanner/editor integration tests.
//!
//! Copies a fixture project into a temp dir so tests can rewrite files freely.

pub mod fixtures;

use std::path::{Path, PathBuf};

use docgen_core::{DocStyle, DocumentationEntry, SourceFile};
use tempfile::TempDir;

pub struct TestHarness {
    root: PathBuf,
    _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a harness from a named fixture directory.
    pub fn from_fixture(name: &str) -> Self {
        let fixture_src = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
        assert!(fixture_src.exists(), "Fixture '{name}' not found at {}", fixture_src.display());

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let copied = fixtures::copy_fixture_project(&fixture_src, temp_dir.path());
        assert!(!copied.is_empty(), "Fixture '{name}' has no source files");
        let root = std::fs::canonicalize(temp_dir.path()).expect("Failed to canonicalize temp dir");

        TestHarness { root, _temp_dir: temp_dir }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("Failed to read fixture file")
    }

    pub fn open(&self, relative: &str, style: &DocStyle) -> SourceFile {
        SourceFile::open(&self.path(relative), style).expect("Failed to open fixture file")
    }

    /// Symbol path for `symbol` (e.g. `Circle/area`) inside `relative`.
    pub fn symbol(&self, relative: &str, symbol: &str) -> String {
        format!("{}/{symbol}", self.path(relative).display())
    }

    /// A documentation entry for `symbol`, positioned from a fresh scan.
    pub fn entry(&self, relative: &str, symbol: &str, text: &str) -> (String, DocumentationEntry) {
        let file = self.open(relative, &DocStyle::default());
        let key = self.symbol(relative, symbol);
        let found = file.symbols().get(&key).unwrap_or_else(|| panic!("no symbol {key}"));
        (key, DocumentationEntry::new(found.position, text))
    }
}
