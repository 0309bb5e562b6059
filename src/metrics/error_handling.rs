use super::{percent, Assessment, Metric, MetricKind};
use crate::config::ErrorHandlingThresholds;
use crate::core::{FunctionRecord, ParsedFile};
use crate::languages::{rules_for, LanguageRules};

#[derive(Debug, Clone, Default)]
pub struct ErrorHandling {
    thresholds: ErrorHandlingThresholds,
}

impl ErrorHandling {
    pub fn new(thresholds: ErrorHandlingThresholds) -> Self {
        Self { thresholds }
    }
}

/// Whether the body contains at least one defensive marker of its language.
pub fn handles_errors(function: &FunctionRecord, rules: &LanguageRules) -> bool {
    rules
        .error_handling_patterns
        .iter()
        .any(|pattern| pattern.is_match(&function.body))
}

impl Metric for ErrorHandling {
    fn kind(&self) -> MetricKind {
        MetricKind::ErrorHandling
    }

    fn description(&self) -> &'static str {
        "Share of functions with any error handling or defensive checks"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let Some(rules) = rules_for(parsed.language) else {
            return Assessment::clean();
        };
        if parsed.functions.is_empty() {
            return Assessment::clean();
        }

        let covered = parsed
            .functions
            .iter()
            .filter(|function| handles_errors(function, rules))
            .count();
        let coverage = covered as f64 / parsed.functions.len() as f64;

        let mut issues = Vec::new();
        if coverage < self.thresholds.min_coverage {
            issues.push(format!("Error handling coverage too low: {}", percent(coverage)));
        }
        Assessment::new(1.0 - coverage, issues)
    }
}
