use super::{mean, percent, Assessment, Metric, MetricKind};
use crate::config::StructureThresholds;
use crate::core::{AccessModifier, ClassRecord, FunctionRecord, ParsedFile};

/// Averages class, function and file structure health. Each sub-score is
/// 1 when nothing is wrong; the metric reports `1 - average`.
#[derive(Debug, Clone, Default)]
pub struct StructureAnalysis {
    thresholds: StructureThresholds,
}

impl StructureAnalysis {
    pub fn new(thresholds: StructureThresholds) -> Self {
        Self { thresholds }
    }

    fn class_health(&self, classes: &[ClassRecord], issues: &mut Vec<String>) -> f64 {
        let scores = classes.iter().map(|class| {
            let mut health: f64 = 1.0;
            let length = class.line_span();
            if length > self.thresholds.max_class_lines {
                health -= 0.3;
                issues.push(format!("Class too long: {} ({length} lines)", class.name));
            }
            if !class.has_heritage() {
                health -= 0.1;
            }
            if class.access == AccessModifier::None {
                health -= 0.2;
                issues.push(format!("Class without access modifier: {}", class.name));
            }
            health.max(0.0)
        });
        mean(scores.collect::<Vec<_>>()).unwrap_or(1.0)
    }

    fn function_health(&self, functions: &[FunctionRecord], issues: &mut Vec<String>) -> f64 {
        let scores = functions.iter().map(|function| {
            let mut health: f64 = 1.0;
            let length = function.line_span();
            if length > self.thresholds.max_function_lines {
                health -= 0.4;
                issues.push(format!(
                    "Function too long: {} ({length} lines)",
                    function.name
                ));
            }
            let params = function.parameter_count();
            if params > self.thresholds.max_parameters {
                health -= 0.3;
                issues.push(format!(
                    "Too many parameters: {} ({params} parameters)",
                    function.name
                ));
            }
            if function.return_type.is_empty() {
                health -= 0.1;
            }
            if function.access == AccessModifier::None {
                health -= 0.2;
                issues.push(format!("Function without access modifier: {}", function.name));
            }
            health.max(0.0)
        });
        mean(scores.collect::<Vec<_>>()).unwrap_or(1.0)
    }

    fn file_health(&self, parsed: &ParsedFile, issues: &mut Vec<String>) -> f64 {
        let limits = &self.thresholds;
        let mut health: f64 = 1.0;

        if parsed.total_lines > limits.max_file_lines {
            health -= 0.3;
            issues.push(format!("File too long: {} lines", parsed.total_lines));
        }
        if parsed.classes.len() > limits.max_classes {
            health -= 0.2;
            issues.push(format!("Too many classes in file: {}", parsed.classes.len()));
        }
        if parsed.functions.len() > limits.max_functions {
            health -= 0.2;
            issues.push(format!("Too many functions in file: {}", parsed.functions.len()));
        }

        if parsed.total_lines > 0 {
            let total = parsed.total_lines as f64;
            let comment_ratio = parsed.comment_lines as f64 / total;
            if comment_ratio < limits.min_comment_ratio {
                health -= 0.1;
                issues.push(format!("Too few comments: {}", percent(comment_ratio)));
            }
            let blank_ratio = parsed.blank_lines as f64 / total;
            if blank_ratio < limits.min_blank_ratio {
                health -= 0.1;
                issues.push(format!("Too few blank lines: {}", percent(blank_ratio)));
            }
        }

        health.max(0.0)
    }
}

impl Metric for StructureAnalysis {
    fn kind(&self) -> MetricKind {
        MetricKind::StructureAnalysis
    }

    fn description(&self) -> &'static str {
        "Size, signature and layout checks on classes, functions and the file"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let mut issues = Vec::new();
        let class = self.class_health(&parsed.classes, &mut issues);
        let function = self.function_health(&parsed.functions, &mut issues);
        let file = self.file_health(parsed, &mut issues);

        let health = (class + function + file) / 3.0;
        Assessment::new(1.0 - health, issues)
    }
}
