//! Analysis configuration.
//!
//! Everything the pipeline reads at run time lives in [`AnalysisConfig`]:
//! exclude patterns, the language filter, metric weights, thresholds and the
//! worker settings. `.qualmap.toml` deserializes straight into it; missing
//! fields fall back to their defaults.

mod exclude;
mod loader;
mod scoring;
mod thresholds;

pub use exclude::{is_excluded, ExcludePattern};
pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use scoring::{MetricWeights, WEIGHT_SUM_TOLERANCE};
pub use thresholds::{
    CommentRatioThresholds, ComplexityThresholds, DuplicationThresholds, ErrorHandlingThresholds,
    FunctionLengthThresholds, StructureThresholds, Thresholds,
};

use crate::core::{Error, Language, Result};
use crate::extraction::ExtractionOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<ExcludePattern>,

    /// Restrict analysis to these languages. `None` analyzes every supported one.
    #[serde(default)]
    pub languages: Option<Vec<Language>>,

    #[serde(default)]
    pub weights: MetricWeights,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub extraction: ExtractionOptions,

    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker count; 0 uses the available parallelism.
    #[serde(default)]
    pub jobs: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: default_exclude_patterns(),
            languages: None,
            weights: MetricWeights::default(),
            thresholds: Thresholds::default(),
            extraction: ExtractionOptions::default(),
            parallel: default_parallel(),
            jobs: 0,
        }
    }
}

impl AnalysisConfig {
    /// Check weights and thresholds. The pipeline runs on an invalid
    /// configuration too; callers decide what to do with the error.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate().map_err(Error::Configuration)?;
        self.thresholds.validate().map_err(Error::Configuration)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn add_exclude_pattern(&mut self, pattern: &str) {
        self.exclude_patterns.push(ExcludePattern::new(pattern));
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        is_excluded(&self.exclude_patterns, path)
    }

    pub fn accepts_language(&self, language: Language) -> bool {
        language.is_supported()
            && self
                .languages
                .as_ref()
                .is_none_or(|languages| languages.contains(&language))
    }

    pub fn effective_jobs(&self) -> usize {
        if self.jobs > 0 {
            self.jobs
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

pub fn default_exclude_patterns() -> Vec<ExcludePattern> {
    [
        "**/node_modules/**",
        "**/dist/**",
        "**/build/**",
        "**/.git/**",
        "**/Library/**",
        "**/Temp/**",
        "**/obj/**",
        "**/bin/**",
    ]
    .iter()
    .map(|pattern| ExcludePattern::new(pattern))
    .collect()
}

fn default_parallel() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.exclude_patterns.len(), 8);
        assert!(config.parallel);
    }

    #[test]
    fn test_invalid_weights_are_a_configuration_error() {
        let mut config = AnalysisConfig::default();
        config.weights.cyclomatic_complexity = 0.5;

        match config.validate() {
            Err(Error::Configuration(message)) => assert!(message.contains("sum to 1.0")),
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert!(!config.is_valid());
    }

    #[test]
    fn test_toml_round_trip_of_sections() {
        let config: AnalysisConfig = toml::from_str(indoc! {r#"
            exclude_patterns = ["**/vendor/**"]
            languages = ["go", "python"]
            jobs = 2

            [weights]
            cyclomatic_complexity = 0.25
            function_length = 0.10

            [thresholds.complexity]
            high = 12

            [extraction]
            deduplicate = false
        "#})
        .unwrap();

        assert_eq!(config.exclude_patterns, vec![ExcludePattern::new("**/vendor/**")]);
        assert!(config.accepts_language(Language::Go));
        assert!(!config.accepts_language(Language::CSharp));
        assert_eq!(config.weights.cyclomatic_complexity, 0.25);
        assert_eq!(config.weights.comment_ratio, 0.10);
        assert_eq!(config.thresholds.complexity.high, 12);
        assert!(!config.extraction.deduplicate);
        assert_eq!(config.effective_jobs(), 2);
        assert!(config.is_valid());
    }

    #[test]
    fn test_unsupported_language_never_accepted() {
        let config = AnalysisConfig::default();
        assert!(config.accepts_language(Language::Cpp));
        assert!(!config.accepts_language(Language::Unsupported));
    }

    #[test]
    fn test_default_excludes() {
        let config = AnalysisConfig::default();
        assert!(config.is_excluded(Path::new("/repo/node_modules/a/b.js")));
        assert!(config.is_excluded(Path::new("/repo/obj/Debug/a.cs")));
        assert!(!config.is_excluded(Path::new("/repo/src/main.go")));
    }
}
