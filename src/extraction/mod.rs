//! Structural extraction: raw text in, [`ParsedFile`](crate::core::ParsedFile) out.

pub mod extractor;
pub mod scan;
pub mod signature;

pub use extractor::StructuralExtractor;

use crate::core::{Language, ParsedFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Drop function records repeated at the same line under the same name
    /// when several signature patterns match one declaration.
    #[serde(default = "default_true")]
    pub deduplicate: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self { deduplicate: true }
    }
}

/// Parse with default options.
pub fn parse(path: &Path, text: &str, language: Language) -> ParsedFile {
    StructuralExtractor::default().parse(path, text, language)
}
