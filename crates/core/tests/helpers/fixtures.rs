//! Python fixture material for the integration tests: copying a fixture
//! project (e.g. `tests/fixtures/project/pkg/*.py`) into a scratch directory
//! the editor may rewrite, and generating nested sources for property tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Copy the fixture project at `src` under `dst`, keeping its package layout.
/// Returns the copied source files, relative to `dst`, in sorted order.
pub fn copy_fixture_project(src: &Path, dst: &Path) -> Vec<PathBuf> {
    let mut copied = Vec::new();
    let mut pending = vec![PathBuf::new()];
    while let Some(relative) = pending.pop() {
        fs::create_dir_all(dst.join(&relative)).expect("Failed to create fixture package dir");
        for entry in fs::read_dir(src.join(&relative)).expect("Failed to list fixture dir") {
            let name = relative.join(entry.expect("Failed to read fixture entry").file_name());
            if src.join(&name).is_dir() {
                pending.push(name);
            } else {
                fs::copy(src.join(&name), dst.join(&name)).expect("Failed to copy fixture source");
                copied.push(name);
            }
        }
    }
    copied.sort();
    copied
}

/// Python source with `depth` nested classes, each holding `width` methods.
pub fn nested_source(depth: usize, width: usize) -> String {
    let mut src = String::new();
    for level in 0..depth {
        let pad = "    ".repeat(level);
        src.push_str(&format!("{pad}class Level{level}:\n"));
        for m in 0..width {
            src.push_str(&format!("{pad}    def method_{level}_{m}(self):\n"));
            src.push_str(&format!("{pad}        return {m}\n\n"));
        }
    }
    src
}
