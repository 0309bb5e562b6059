//! Metric weights.
//!
//! `MetricWeights` is the only place weights are defined. The same values are
//! reported on every `MetricOutcome` and used for the weighted file score.

use crate::metrics::MetricKind;
use serde::{Deserialize, Serialize};

/// Allowed distance of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    #[serde(default = "default_cyclomatic_complexity_weight")]
    pub cyclomatic_complexity: f64,

    #[serde(default = "default_function_length_weight")]
    pub function_length: f64,

    #[serde(default = "default_comment_ratio_weight")]
    pub comment_ratio: f64,

    #[serde(default = "default_error_handling_weight")]
    pub error_handling: f64,

    #[serde(default = "default_naming_convention_weight")]
    pub naming_convention: f64,

    #[serde(default = "default_code_duplication_weight")]
    pub code_duplication: f64,

    #[serde(default = "default_structure_analysis_weight")]
    pub structure_analysis: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            cyclomatic_complexity: default_cyclomatic_complexity_weight(),
            function_length: default_function_length_weight(),
            comment_ratio: default_comment_ratio_weight(),
            error_handling: default_error_handling_weight(),
            naming_convention: default_naming_convention_weight(),
            code_duplication: default_code_duplication_weight(),
            structure_analysis: default_structure_analysis_weight(),
        }
    }
}

impl MetricWeights {
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    pub fn weight_for(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::CyclomaticComplexity => self.cyclomatic_complexity,
            MetricKind::FunctionLength => self.function_length,
            MetricKind::CommentRatio => self.comment_ratio,
            MetricKind::ErrorHandling => self.error_handling,
            MetricKind::NamingConvention => self.naming_convention,
            MetricKind::CodeDuplication => self.code_duplication,
            MetricKind::StructureAnalysis => self.structure_analysis,
        }
    }

    pub fn sum(&self) -> f64 {
        MetricKind::ALL.iter().map(|kind| self.weight_for(*kind)).sum()
    }

    /// Every weight in `[0, 1]` and the total within tolerance of 1.0.
    pub fn validate(&self) -> Result<(), String> {
        for kind in MetricKind::ALL {
            let weight = self.weight_for(kind);
            if !Self::is_valid_weight(weight) {
                return Err(format!(
                    "{} weight must be between 0.0 and 1.0, got {weight}",
                    kind.name()
                ));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("Metric weights must sum to 1.0, but sum to {sum:.3}"));
        }
        Ok(())
    }
}

fn default_cyclomatic_complexity_weight() -> f64 {
    0.20
}
fn default_function_length_weight() -> f64 {
    0.15
}
fn default_comment_ratio_weight() -> f64 {
    0.10
}
fn default_error_handling_weight() -> f64 {
    0.10
}
fn default_naming_convention_weight() -> f64 {
    0.15
}
fn default_code_duplication_weight() -> f64 {
    0.15
}
fn default_structure_analysis_weight() -> f64 {
    0.15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = MetricWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_sum_tolerance() {
        let mut weights = MetricWeights::default();
        weights.comment_ratio += 0.005;
        assert!(weights.validate().is_ok());

        weights.comment_ratio += 0.02;
        let err = weights.validate().unwrap_err();
        assert!(err.contains("sum to 1.025"), "{err}");
    }

    #[test]
    fn test_out_of_range_weight() {
        let weights = MetricWeights {
            naming_convention: 1.5,
            ..MetricWeights::default()
        };
        assert!(weights.validate().unwrap_err().contains("naming_convention"));
    }
}
