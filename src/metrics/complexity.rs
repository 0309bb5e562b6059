use super::{mean, Assessment, Metric, MetricKind};
use crate::config::ComplexityThresholds;
use crate::core::{FunctionRecord, ParsedFile};
use crate::languages::{rules_for, LanguageRules};

/// Branch-count cyclomatic complexity over the extracted function bodies.
#[derive(Debug, Clone, Default)]
pub struct CyclomaticComplexity {
    thresholds: ComplexityThresholds,
}

impl CyclomaticComplexity {
    pub fn new(thresholds: ComplexityThresholds) -> Self {
        Self { thresholds }
    }
}

/// `1 + number of decision points` in the function body.
pub fn function_complexity(function: &FunctionRecord, rules: &LanguageRules) -> usize {
    1 + rules
        .complexity_patterns
        .iter()
        .map(|pattern| pattern.find_iter(&function.body).count())
        .sum::<usize>()
}

impl Metric for CyclomaticComplexity {
    fn kind(&self) -> MetricKind {
        MetricKind::CyclomaticComplexity
    }

    fn description(&self) -> &'static str {
        "Decision points per function; branchy functions are hard to test and reason about"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let Some(rules) = rules_for(parsed.language) else {
            return Assessment::clean();
        };

        let complexities: Vec<(&str, usize)> = parsed
            .functions
            .iter()
            .map(|function| (function.name.as_str(), function_complexity(function, rules)))
            .collect();

        let Some(average) = mean(complexities.iter().map(|(_, c)| *c as f64)) else {
            return Assessment::clean();
        };
        let score = (average / self.thresholds.saturation).min(1.0);

        let mut issues = Vec::new();
        if let Some((name, max)) = complexities.iter().max_by_key(|(_, c)| *c) {
            if *max > self.thresholds.extreme {
                issues.push(format!("Extremely high complexity: {name} ({max})"));
            }
        }
        let high: Vec<&str> = complexities
            .iter()
            .filter(|(_, c)| *c > self.thresholds.high)
            .map(|(name, _)| *name)
            .collect();
        if !high.is_empty() {
            issues.push(format!(
                "{} high-complexity functions (>{}): {}",
                high.len(),
                self.thresholds.high,
                high.join(", ")
            ));
        }

        Assessment::new(score, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;
    use crate::extraction::parse;
    use indoc::indoc;
    use std::path::Path;

    fn record(body: &str) -> FunctionRecord {
        FunctionRecord::new("Run".into(), body.into(), 1, 1)
    }

    #[test]
    fn test_two_ifs_and_a_while() {
        let rules = rules_for(Language::CSharp).unwrap();
        let body = "if (a) { x(); }\nif (b) { y(); }\nwhile (c) { z(); }";
        assert_eq!(function_complexity(&record(body), rules), 4);
    }

    #[test]
    fn test_else_if_adds_two_paths() {
        let rules = rules_for(Language::Java).unwrap();
        let body = "if (a) {} else if (b) {} else {}";
        assert_eq!(function_complexity(&record(body), rules), 4);
    }

    #[test]
    fn test_switch_default_counts() {
        let rules = rules_for(Language::JavaScript).unwrap();
        let body = "switch (x) {\ncase 1:\n  a();\n  break;\ndefault:\n  b();\n}";
        assert_eq!(function_complexity(&record(body), rules), 4);
    }

    #[test]
    fn test_python_try_clauses() {
        let rules = rules_for(Language::Python).unwrap();
        let body = indoc! {"
            try:
                x()
            except ValueError:
                y()
            else:
                z()
            finally:
                w()
        "};
        assert_eq!(function_complexity(&record(body), rules), 5);
    }

    #[test]
    fn test_go_counts_select_go_and_defer() {
        let rules = rules_for(Language::Go).unwrap();
        let body = "defer close(ch)\ngo worker()\nselect {\ncase <-done:\n}";
        assert_eq!(function_complexity(&record(body), rules), 5);
    }

    #[test]
    fn test_no_functions_scores_zero() {
        let parsed = parse(Path::new("a.py"), "x = 1\n", Language::Python);
        let assessment = CyclomaticComplexity::default().assess(&parsed);
        assert_eq!(assessment.score, 0.0);
        assert!(assessment.issues.is_empty());
    }

    #[test]
    fn test_score_and_high_complexity_issue() {
        let source = indoc! {"
            def busy(a, b):
                if a and b:
                    pass
                if a or b:
                    pass
                for x in a:
                    if x:
                        pass
                while b:
                    pass
                try:
                    pass
                except ValueError:
                    pass
                if a:
                    pass
                elif b:
                    pass
        "};
        let parsed = parse(Path::new("busy.py"), source, Language::Python);
        let metric = CyclomaticComplexity::new(ComplexityThresholds {
            high: 5,
            ..ComplexityThresholds::default()
        });
        let assessment = metric.assess(&parsed);

        assert_eq!(parsed.functions.len(), 1);
        assert!(assessment.score > 0.5);
        assert_eq!(assessment.issues.len(), 1);
        assert!(assessment.issues[0].starts_with("1 high-complexity functions"));
    }
}
