use super::{mean, Assessment, Metric, MetricKind};
use crate::config::FunctionLengthThresholds;
use crate::core::ParsedFile;
use crate::languages::{rules_for, CommentSyntax};

#[derive(Debug, Clone, Default)]
pub struct FunctionLength {
    thresholds: FunctionLengthThresholds,
}

impl FunctionLength {
    pub fn new(thresholds: FunctionLengthThresholds) -> Self {
        Self { thresholds }
    }
}

/// Lines of a body that are neither blank nor start with a comment marker.
pub fn logical_lines(body: &str, syntax: CommentSyntax) -> usize {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !syntax.is_comment_prefixed(line))
        .count()
}

impl Metric for FunctionLength {
    fn kind(&self) -> MetricKind {
        MetricKind::FunctionLength
    }

    fn description(&self) -> &'static str {
        "Logical lines per function; long functions are hard to read and maintain"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let Some(rules) = rules_for(parsed.language) else {
            return Assessment::clean();
        };

        let lengths: Vec<(&str, usize)> = parsed
            .functions
            .iter()
            .map(|f| (f.name.as_str(), logical_lines(&f.body, rules.comments)))
            .collect();

        let Some(average) = mean(lengths.iter().map(|(_, len)| *len as f64)) else {
            return Assessment::clean();
        };
        let score = (average / self.thresholds.saturation).min(1.0);

        let mut issues = Vec::new();
        if let Some((name, longest)) = lengths.iter().max_by_key(|(_, len)| *len) {
            if *longest > self.thresholds.very_long {
                issues.push(format!("Extremely long function: {name} ({longest} lines)"));
            }
        }
        let long = lengths
            .iter()
            .filter(|(_, len)| *len > self.thresholds.long)
            .count();
        if long > 0 {
            issues.push(format!(
                "{long} long functions (>{} lines)",
                self.thresholds.long
            ));
        }
        if average > self.thresholds.mean_warning {
            issues.push(format!("Average function length too high: {average:.1} lines"));
        }

        Assessment::new(score, issues)
    }
}
