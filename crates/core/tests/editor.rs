//! Integration tests for scanning and editing real files on disk.
//!
//! Each test copies the `project` fixture into a temp dir, scans it, and
//! applies documentation through the edit orchestrator.

mod helpers;

use std::collections::BTreeMap;

use docgen_core::{DocEditor, DocMap, DocStyle, DocgenError, DocumentationEntry, EditMode, FileStatus, Position};
use helpers::TestHarness;

const SHAPES: &str = "pkg/shapes.py";
const REGEN: &str = "pkg/regen.py";

fn docs_for_all(h: &TestHarness, relative: &str) -> DocMap {
    let file = h.open(relative, &DocStyle::default());
    file.to_document()
        .iter()
        .map(|(path, entry)| {
            let name = path.rsplit('/').next().unwrap_or(path);
            (path.to_string(), DocumentationEntry::new(entry.position, format!("Documents {name}.")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

#[test]
fn test_scan_fixture_structure() {
    let h = TestHarness::from_fixture("project");
    let file = h.open(SHAPES, &DocStyle::default());

    let symbols: Vec<String> = file
        .symbols()
        .paths()
        .map(|p| p.strip_prefix(&format!("{}/", file.path())).unwrap().to_string())
        .collect();
    assert_eq!(
        symbols,
        vec![
            "Shape",
            "Shape/area",
            "Shape/name",
            "Circle",
            "Circle/__init__",
            "Circle/area",
            "scale",
            "scale/helper",
            "fetch_shape",
            "noop",
        ]
    );

    let name = file.symbols().get(&h.symbol(SHAPES, "Shape/name")).unwrap().position;
    assert_eq!(name.decorator_count, 1);
    assert_eq!((name.start_line, name.end_line), (10, Some(13)));

    let scale = file.symbols().get(&h.symbol(SHAPES, "scale")).unwrap().position;
    assert_eq!((scale.start_line, scale.end_line), (27, Some(35)));
}

#[test]
fn test_to_document_excludes_documented_and_inline() {
    let h = TestHarness::from_fixture("project");
    let file = h.open(SHAPES, &DocStyle::default());
    let table = file.to_document();

    assert_eq!(file.symbols().len(), 10);
    assert_eq!(table.len(), 8);
    assert!(!table.contains(&h.symbol(SHAPES, "Circle")));
    assert!(!table.contains(&h.symbol(SHAPES, "noop")));
    assert!(table.contains(&h.symbol(SHAPES, "Circle/area")));
}

#[test]
fn test_file_without_definitions() {
    let h = TestHarness::from_fixture("project");
    let file = h.open("pkg/empty.py", &DocStyle::default());
    assert!(file.symbols().is_empty());
    assert!(file.to_document().is_empty());
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

#[test]
fn test_insert_pass_is_idempotent() {
    let h = TestHarness::from_fixture("project");
    let docs = docs_for_all(&h, SHAPES);
    let editor = DocEditor::new(DocStyle::default(), EditMode::Insert);

    let report = editor.process_files(&docs);
    assert_eq!(report.files.len(), 1);
    assert!(matches!(report.files[0].status, FileStatus::Written(c) if c.inserted == 8));

    let rescanned = h.open(SHAPES, &DocStyle::default());
    assert!(rescanned.to_document().is_empty(), "{:?}", rescanned.to_document().paths().collect::<Vec<_>>());
    assert_eq!(rescanned.symbols().len(), 10);
    assert_eq!(rescanned.to_regenerate().len(), 8);

    // Every symbol again, positioned from the rescan: nothing left to write.
    let again: DocMap = rescanned
        .symbols()
        .iter()
        .map(|(path, entry)| (path.to_string(), DocumentationEntry::new(entry.position, "Again.")))
        .collect();
    let before = h.read(SHAPES);
    let report = editor.process_files(&again);
    assert!(matches!(report.files[0].status, FileStatus::Unchanged(_)));
    assert_eq!(h.read(SHAPES), before);
}

#[test]
fn test_insert_preserves_untouched_lines() {
    let h = TestHarness::from_fixture("project");
    let original = h.read(SHAPES);
    let (key, entry) = h.entry(SHAPES, "scale", "Scales a shape.");
    let docs: DocMap = BTreeMap::from([(key, entry)]);

    DocEditor::default().process_files(&docs);
    let updated = h.read(SHAPES);

    let expected = original.replacen(
        ") -> Shape:\n",
        ") -> Shape:\n    \"\"\"\n    Generated documentation\n\n    Scales a shape.\n    \"\"\"\n",
        1,
    );
    assert_eq!(updated, expected);
}

#[test]
fn test_two_top_level_symbols_in_one_pass() {
    let h = TestHarness::from_fixture("project");
    let (k1, e1) = h.entry(SHAPES, "Shape", "Base shape.");
    let (k2, e2) = h.entry(SHAPES, "fetch_shape", "Fetches a shape.");
    let docs: DocMap = BTreeMap::from([(k1, e1), (k2, e2)]);

    DocEditor::new(DocStyle::plain(), EditMode::Insert).process_files(&docs);
    let text = h.read(SHAPES);
    assert!(text.contains("class Shape:\n    \"\"\"Base shape.\"\"\"\n    def area(self):\n"), "{text}");
    assert!(
        text.contains("async def fetch_shape(name):\n    \"\"\"Fetches a shape.\"\"\"\n    return await"),
        "{text}"
    );
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

#[test]
fn test_retrieval_modes_on_regen_fixture() {
    let h = TestHarness::from_fixture("project");
    let file = h.open(REGEN, &DocStyle::default());

    let regen: Vec<&str> = file.symbols().paths().collect();
    assert_eq!(regen.len(), 3);
    let to_regenerate = file.to_regenerate();
    assert_eq!(to_regenerate.paths().collect::<Vec<_>>(), vec![h.symbol(REGEN, "stale").as_str()]);
    let to_document = file.to_document();
    assert_eq!(to_document.paths().collect::<Vec<_>>(), vec![h.symbol(REGEN, "bare").as_str()]);
}

#[test]
fn test_regenerate_leaves_hand_written_blocks() {
    let h = TestHarness::from_fixture("project");
    let docs: DocMap = ["stale", "manual", "bare"]
        .into_iter()
        .map(|name| h.entry(REGEN, name, &format!("Fresh {name}.")))
        .collect();

    let report = DocEditor::new(DocStyle::default(), EditMode::Regenerate).process_files(&docs);
    let totals = report.totals();
    assert_eq!((totals.inserted, totals.replaced, totals.skipped), (1, 1, 1));

    let text = h.read(REGEN);
    assert!(!text.contains("Old summary."), "{text}");
    assert!(text.contains("    Fresh stale.\n"), "{text}");
    assert!(text.contains("    '''Written by a person.'''\n"), "{text}");
    assert!(!text.contains("Fresh manual."), "{text}");
    assert!(text.contains("    Fresh bare.\n"), "{text}");
}

#[test]
fn test_insert_mode_never_replaces_generated_blocks() {
    let h = TestHarness::from_fixture("project");
    let before = h.read(REGEN);
    let (key, entry) = h.entry(REGEN, "stale", "Should not land.");
    let docs: DocMap = BTreeMap::from([(key, entry)]);

    let report = DocEditor::new(DocStyle::default(), EditMode::Insert).process_files(&docs);
    assert!(matches!(report.files[0].status, FileStatus::Unchanged(_)));
    assert_eq!(h.read(REGEN), before);
}

#[test]
fn test_bom_survives_rewrite() {
    let h = TestHarness::from_fixture("project");
    let path = h.path("pkg/bom.py");
    std::fs::write(&path, "\u{feff}def f():\n    pass\n").unwrap();
    let (key, entry) = h.entry("pkg/bom.py", "f", "Does f.");
    let docs: DocMap = BTreeMap::from([(key, entry)]);

    let report = DocEditor::new(DocStyle::plain(), EditMode::Insert).process_files(&docs);
    assert!(matches!(report.files[0].status, FileStatus::Written(c) if c.inserted == 1));
    assert_eq!(h.read("pkg/bom.py"), "\u{feff}def f():\n    \"\"\"Does f.\"\"\"\n    pass\n");
}

#[test]
fn test_wrapped_annotated_header_is_documented() {
    let h = TestHarness::from_fixture("project");
    std::fs::write(h.path("pkg/wrapped.py"), "def f(self,\n      a: int) -> None:\n    return None\n").unwrap();
    let docs = docs_for_all(&h, "pkg/wrapped.py");
    assert_eq!(docs.len(), 1);

    DocEditor::new(DocStyle::plain(), EditMode::Insert).process_files(&docs);
    assert_eq!(
        h.read("pkg/wrapped.py"),
        "def f(self,\n      a: int) -> None:\n    \"\"\"Documents f.\"\"\"\n    return None\n"
    );
}

// ---------------------------------------------------------------------------
// Failure isolation
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file_does_not_abort_others() {
    let h = TestHarness::from_fixture("project");
    let mut docs = docs_for_all(&h, REGEN);
    let ghost = format!("{}/gone", h.path("pkg/ghost.py").display());
    docs.insert(ghost, DocumentationEntry::new(Position::open(0, 0, 0), "Lost."));

    let report = DocEditor::default().process_files(&docs);
    assert_eq!(report.files.len(), 2);

    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("pkg/ghost.py"));
    assert!(matches!(failed[0].status, FileStatus::Failed(DocgenError::NotFound { .. })));

    assert_eq!(report.written().count(), 1);
    assert!(h.read(REGEN).contains("Documents bare."));
}
