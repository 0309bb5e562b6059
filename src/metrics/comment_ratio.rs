use super::loc_counter::count_lines;
use super::{percent, Assessment, Metric, MetricKind};
use crate::config::CommentRatioThresholds;
use crate::core::ParsedFile;
use crate::languages::rules_for;

const NO_COMMENT_SCORE: f64 = 0.8;

/// Share of comment lines among non-blank lines, recounted from the file text.
#[derive(Debug, Clone, Default)]
pub struct CommentRatio {
    thresholds: CommentRatioThresholds,
}

impl CommentRatio {
    pub fn new(thresholds: CommentRatioThresholds) -> Self {
        Self { thresholds }
    }

    /// Piecewise score: twice the distance from `ideal` inside `low..=high`,
    /// linear above `high`. Below `low` the score falls in a straight line
    /// from 0.8 at zero comments to the value the middle band takes at `low`.
    pub fn score_ratio(&self, ratio: f64) -> f64 {
        let CommentRatioThresholds { low, high, ideal } = self.thresholds;
        if ratio < low {
            let at_low = 2.0 * (low - ideal).abs();
            NO_COMMENT_SCORE - (NO_COMMENT_SCORE - at_low) * ratio / low
        } else if ratio > high {
            2.0 * (ratio - high)
        } else {
            2.0 * (ratio - ideal).abs()
        }
    }
}

impl Metric for CommentRatio {
    fn kind(&self) -> MetricKind {
        MetricKind::CommentRatio
    }

    fn description(&self) -> &'static str {
        "Share of comment lines; both too few and too many hurt comprehension"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let Some(rules) = rules_for(parsed.language) else {
            return Assessment::clean();
        };

        let ratio = count_lines(&parsed.content, rules.comments).comment_ratio();
        let mut issues = Vec::new();
        if ratio < self.thresholds.low {
            issues.push(format!("Comment ratio too low: {}", percent(ratio)));
        } else if ratio > self.thresholds.high {
            issues.push(format!("Comment ratio too high: {}", percent(ratio)));
        }

        Assessment::new(self.score_ratio(ratio), issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;
    use crate::extraction::parse;
    use std::path::Path;

    #[test]
    fn test_score_bands() {
        let metric = CommentRatio::default();
        assert!((metric.score_ratio(0.0) - 0.8).abs() < 1e-9);
        assert!((metric.score_ratio(0.05) - 0.6).abs() < 1e-9);
        assert!((metric.score_ratio(0.3)).abs() < 1e-9);
        assert!((metric.score_ratio(0.1) - 0.4).abs() < 1e-9);
        assert!((metric.score_ratio(0.75) - 0.5).abs() < 1e-9);
        assert!((metric.score_ratio(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_band_follows_configured_threshold() {
        let metric = CommentRatio::new(CommentRatioThresholds {
            low: 0.2,
            high: 0.6,
            ideal: 0.3,
        });
        assert!((metric.score_ratio(0.0) - 0.8).abs() < 1e-9);
        assert!((metric.score_ratio(0.1) - 0.5).abs() < 1e-9);
        assert!((metric.score_ratio(0.199_999) - 0.2).abs() < 1e-4);
        assert!((metric.score_ratio(0.2) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_no_comments() {
        let parsed = parse(Path::new("a.js"), "run();\nstop();\n", Language::JavaScript);
        let assessment = CommentRatio::default().assess(&parsed);
        assert!((assessment.score - 0.8).abs() < 1e-9);
        assert_eq!(assessment.issues, vec!["Comment ratio too low: 0.0%".to_string()]);
    }

    #[test]
    fn test_comment_heavy_file() {
        let source = "# one\n# two\n# three\nx = 1\n";
        let parsed = parse(Path::new("a.py"), source, Language::Python);
        let assessment = CommentRatio::default().assess(&parsed);
        assert!((assessment.score - 0.5).abs() < 1e-9);
        assert_eq!(assessment.issues, vec!["Comment ratio too high: 75.0%".to_string()]);
    }

    #[test]
    fn test_ideal_band_has_no_issue() {
        let source = "// a\nb();\nc();\n";
        let parsed = parse(Path::new("a.c"), source, Language::C);
        let assessment = CommentRatio::default().assess(&parsed);
        assert!(assessment.issues.is_empty());
        assert!((assessment.score - 2.0 * (1.0 / 3.0 - 0.3)).abs() < 1e-9);
    }
}
