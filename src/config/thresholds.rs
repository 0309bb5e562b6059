use serde::{Deserialize, Serialize};

/// Every numeric limit the metrics use to score and to raise issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub complexity: ComplexityThresholds,

    #[serde(default)]
    pub function_length: FunctionLengthThresholds,

    #[serde(default)]
    pub comment_ratio: CommentRatioThresholds,

    #[serde(default)]
    pub error_handling: ErrorHandlingThresholds,

    #[serde(default)]
    pub duplication: DuplicationThresholds,

    #[serde(default)]
    pub structure: StructureThresholds,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), String> {
        let ratios = [
            ("comment_ratio.low", self.comment_ratio.low),
            ("comment_ratio.high", self.comment_ratio.high),
            ("comment_ratio.ideal", self.comment_ratio.ideal),
            ("error_handling.min_coverage", self.error_handling.min_coverage),
            ("duplication.similarity", self.duplication.similarity),
            ("structure.min_comment_ratio", self.structure.min_comment_ratio),
            ("structure.min_blank_ratio", self.structure.min_blank_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0.0 and 1.0, got {value}"));
            }
        }

        if self.comment_ratio.low > self.comment_ratio.high {
            return Err("comment_ratio.low must not exceed comment_ratio.high".to_string());
        }
        if self.complexity.saturation <= 0.0 || self.function_length.saturation <= 0.0 {
            return Err("saturation values must be positive".to_string());
        }
        if self.duplication.min_block_lines == 0
            || self.duplication.min_block_lines > self.duplication.max_block_lines
        {
            return Err(format!(
                "duplication block range {}..={} is empty",
                self.duplication.min_block_lines, self.duplication.max_block_lines
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityThresholds {
    /// A function above this complexity counts as high-complexity.
    #[serde(default = "default_complexity_high")]
    pub high: usize,

    /// Any function above this raises an extreme-complexity issue.
    #[serde(default = "default_complexity_extreme")]
    pub extreme: usize,

    /// Mean complexity at which the score reaches 1.
    #[serde(default = "default_complexity_saturation")]
    pub saturation: f64,
}

impl Default for ComplexityThresholds {
    fn default() -> Self {
        Self {
            high: default_complexity_high(),
            extreme: default_complexity_extreme(),
            saturation: default_complexity_saturation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLengthThresholds {
    #[serde(default = "default_long_function")]
    pub long: usize,

    #[serde(default = "default_very_long_function")]
    pub very_long: usize,

    /// Mean length above which the file gets an issue.
    #[serde(default = "default_mean_length_warning")]
    pub mean_warning: f64,

    #[serde(default = "default_length_saturation")]
    pub saturation: f64,
}

impl Default for FunctionLengthThresholds {
    fn default() -> Self {
        Self {
            long: default_long_function(),
            very_long: default_very_long_function(),
            mean_warning: default_mean_length_warning(),
            saturation: default_length_saturation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRatioThresholds {
    #[serde(default = "default_comment_low")]
    pub low: f64,

    #[serde(default = "default_comment_high")]
    pub high: f64,

    #[serde(default = "default_comment_ideal")]
    pub ideal: f64,
}

impl Default for CommentRatioThresholds {
    fn default() -> Self {
        Self {
            low: default_comment_low(),
            high: default_comment_high(),
            ideal: default_comment_ideal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingThresholds {
    /// Share of functions that should contain an error-handling marker.
    #[serde(default = "default_min_error_coverage")]
    pub min_coverage: f64,
}

impl Default for ErrorHandlingThresholds {
    fn default() -> Self {
        Self {
            min_coverage: default_min_error_coverage(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicationThresholds {
    /// Function pairs strictly above this similarity are duplicates.
    #[serde(default = "default_similarity")]
    pub similarity: f64,

    #[serde(default = "default_min_block_lines")]
    pub min_block_lines: usize,

    #[serde(default = "default_max_block_lines")]
    pub max_block_lines: usize,
}

impl Default for DuplicationThresholds {
    fn default() -> Self {
        Self {
            similarity: default_similarity(),
            min_block_lines: default_min_block_lines(),
            max_block_lines: default_max_block_lines(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureThresholds {
    #[serde(default = "default_max_class_lines")]
    pub max_class_lines: usize,

    #[serde(default = "default_max_function_lines")]
    pub max_function_lines: usize,

    #[serde(default = "default_max_parameters")]
    pub max_parameters: usize,

    #[serde(default = "default_max_file_lines")]
    pub max_file_lines: usize,

    #[serde(default = "default_max_classes")]
    pub max_classes: usize,

    #[serde(default = "default_max_functions")]
    pub max_functions: usize,

    #[serde(default = "default_min_comment_ratio")]
    pub min_comment_ratio: f64,

    #[serde(default = "default_min_blank_ratio")]
    pub min_blank_ratio: f64,
}

impl Default for StructureThresholds {
    fn default() -> Self {
        Self {
            max_class_lines: default_max_class_lines(),
            max_function_lines: default_max_function_lines(),
            max_parameters: default_max_parameters(),
            max_file_lines: default_max_file_lines(),
            max_classes: default_max_classes(),
            max_functions: default_max_functions(),
            min_comment_ratio: default_min_comment_ratio(),
            min_blank_ratio: default_min_blank_ratio(),
        }
    }
}

fn default_complexity_high() -> usize {
    10
}
fn default_complexity_extreme() -> usize {
    20
}
fn default_complexity_saturation() -> f64 {
    15.0
}
fn default_long_function() -> usize {
    50
}
fn default_very_long_function() -> usize {
    100
}
fn default_mean_length_warning() -> f64 {
    30.0
}
fn default_length_saturation() -> f64 {
    100.0
}
fn default_comment_low() -> f64 {
    0.10
}
fn default_comment_high() -> f64 {
    0.50
}
fn default_comment_ideal() -> f64 {
    0.30
}
fn default_min_error_coverage() -> f64 {
    0.30
}
fn default_similarity() -> f64 {
    0.80
}
fn default_min_block_lines() -> usize {
    3
}
fn default_max_block_lines() -> usize {
    10
}
fn default_max_class_lines() -> usize {
    500
}
fn default_max_function_lines() -> usize {
    100
}
fn default_max_parameters() -> usize {
    5
}
fn default_max_file_lines() -> usize {
    1000
}
fn default_max_classes() -> usize {
    10
}
fn default_max_functions() -> usize {
    50
}
fn default_min_comment_ratio() -> f64 {
    0.10
}
fn default_min_blank_ratio() -> f64 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let thresholds: Thresholds = toml::from_str("[complexity]\nhigh = 8\n").unwrap();
        assert_eq!(thresholds.complexity.high, 8);
        assert_eq!(thresholds.complexity.extreme, 20);
        assert_eq!(thresholds.structure, StructureThresholds::default());
    }

    #[test]
    fn test_validate_rejects_inverted_comment_band() {
        let mut thresholds = Thresholds::default();
        assert!(thresholds.validate().is_ok());

        thresholds.comment_ratio.low = 0.6;
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_block_range() {
        let mut thresholds = Thresholds::default();
        thresholds.duplication.min_block_lines = 12;
        assert!(thresholds.validate().is_err());
    }
}
