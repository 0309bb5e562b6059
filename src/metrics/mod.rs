//! The seven scoring rules.
//!
//! Each [`Metric`] reads a [`ParsedFile`] and returns a badness score in
//! `[0, 1]` plus issue strings. Weights are not part of a metric: the
//! [`MetricSet`] attaches them from [`MetricWeights`], which is also what the
//! orchestrator uses for the weighted file score.

pub mod comment_ratio;
pub mod complexity;
pub mod duplication;
pub mod error_handling;
pub mod function_length;
pub mod loc_counter;
pub mod naming;
pub mod structure;

pub use comment_ratio::CommentRatio;
pub use complexity::CyclomaticComplexity;
pub use duplication::CodeDuplication;
pub use error_handling::ErrorHandling;
pub use function_length::FunctionLength;
pub use loc_counter::{classify_line, count_lines, CommentState, LineType, LocCount};
pub use naming::NamingConvention;
pub use structure::StructureAnalysis;

use crate::config::{AnalysisConfig, MetricWeights, Thresholds};
use crate::core::{Language, MetricOutcome, ParsedFile};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CyclomaticComplexity,
    FunctionLength,
    CommentRatio,
    ErrorHandling,
    NamingConvention,
    CodeDuplication,
    StructureAnalysis,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::CyclomaticComplexity,
        MetricKind::FunctionLength,
        MetricKind::CommentRatio,
        MetricKind::ErrorHandling,
        MetricKind::NamingConvention,
        MetricKind::CodeDuplication,
        MetricKind::StructureAnalysis,
    ];

    /// Stable key used in outcome maps and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::CyclomaticComplexity => "cyclomatic_complexity",
            MetricKind::FunctionLength => "function_length",
            MetricKind::CommentRatio => "comment_ratio",
            MetricKind::ErrorHandling => "error_handling",
            MetricKind::NamingConvention => "naming_convention",
            MetricKind::CodeDuplication => "code_duplication",
            MetricKind::StructureAnalysis => "structure_analysis",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::CyclomaticComplexity => "Cyclomatic complexity",
            MetricKind::FunctionLength => "Function length",
            MetricKind::CommentRatio => "Comment ratio",
            MetricKind::ErrorHandling => "Error handling",
            MetricKind::NamingConvention => "Naming convention",
            MetricKind::CodeDuplication => "Code duplication",
            MetricKind::StructureAnalysis => "Structure",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Score and issues of one metric on one file, before a weight is attached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assessment {
    pub score: f64,
    pub issues: Vec<String>,
}

impl Assessment {
    pub fn new(score: f64, issues: Vec<String>) -> Self {
        Self { score, issues }
    }

    pub fn clean() -> Self {
        Self::default()
    }
}

pub trait Metric: Send + Sync {
    fn kind(&self) -> MetricKind;

    fn description(&self) -> &'static str;

    fn supported_languages(&self) -> &'static [Language] {
        &Language::SUPPORTED
    }

    fn supports(&self, language: Language) -> bool {
        self.supported_languages().contains(&language)
    }

    /// Only called for supported languages.
    fn assess(&self, parsed: &ParsedFile) -> Assessment;

    /// Score `parsed`. Unsupported languages score 0 with no issues.
    fn analyze(&self, parsed: &ParsedFile, weight: f64) -> MetricOutcome {
        let assessment = if self.supports(parsed.language) {
            self.assess(parsed)
        } else {
            Assessment::clean()
        };
        MetricOutcome::new(
            self.kind().name(),
            assessment.score,
            self.description(),
            weight,
        )
        .with_issues(assessment.issues)
    }
}

/// The seven metrics, built once per run and shared by every file analysis.
pub struct MetricSet {
    metrics: Vec<Box<dyn Metric>>,
    weights: MetricWeights,
}

impl MetricSet {
    pub fn new(thresholds: &Thresholds, weights: MetricWeights) -> Self {
        let metrics: Vec<Box<dyn Metric>> = vec![
            Box::new(CyclomaticComplexity::new(thresholds.complexity.clone())),
            Box::new(FunctionLength::new(thresholds.function_length.clone())),
            Box::new(CommentRatio::new(thresholds.comment_ratio.clone())),
            Box::new(ErrorHandling::new(thresholds.error_handling.clone())),
            Box::new(NamingConvention),
            Box::new(CodeDuplication::new(thresholds.duplication.clone())),
            Box::new(StructureAnalysis::new(thresholds.structure.clone())),
        ];
        Self { metrics, weights }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(&config.thresholds, config.weights.clone())
    }

    pub fn weights(&self) -> &MetricWeights {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Metric> {
        self.metrics.iter().map(|metric| metric.as_ref())
    }

    /// Run every metric that supports the file's language.
    pub fn analyze(&self, parsed: &ParsedFile) -> Vec<MetricOutcome> {
        self.iter()
            .filter(|metric| metric.supports(parsed.language))
            .map(|metric| metric.analyze(parsed, self.weights.weight_for(metric.kind())))
            .collect()
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::new(&Thresholds::default(), MetricWeights::default())
    }
}

/// `Σ(score × weight) / Σ weight`, or 0 when no weight is present.
pub fn weighted_score(outcomes: &[MetricOutcome]) -> f64 {
    let (weighted, total_weight) = outcomes
        .iter()
        .fold((0.0, 0.0), |(sum, weights), outcome| {
            (sum + outcome.score * outcome.weight, weights + outcome.weight)
        });
    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        0.0
    }
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub(crate) fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
