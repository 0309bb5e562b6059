// Test utility module for qualmap integration tests
#![allow(dead_code)]

use qualmap::ProjectOutcome;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `files` (relative path, content) under a fresh temp directory.
pub fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, content) in files {
        write_file(temp_dir.path(), relative, content);
    }
    temp_dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Ten code lines, no comments, no blank lines, no functions.
pub const DENSE_PYTHON: &str = "print(0)
print(1)
print(2)
print(3)
print(4)
print(5)
print(6)
print(7)
print(8)
print(9)
";

/// File names relative to `root`, in report order.
pub fn relative_paths(project: &ProjectOutcome, root: &Path) -> Vec<String> {
    project
        .files
        .iter()
        .map(|f| {
            f.path
                .strip_prefix(root)
                .unwrap_or(&f.path)
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
