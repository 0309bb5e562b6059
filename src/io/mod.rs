pub mod walker;

pub use walker::{find_project_files, FileWalker};

use crate::core::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a source file. Failures carry the path and are recoverable.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
