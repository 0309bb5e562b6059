use super::{Assessment, Metric, MetricKind};
use crate::core::ParsedFile;
use crate::languages::rules_for;

/// Checks function, class and variable names against the casing rules of
/// their language.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingConvention;

impl Metric for NamingConvention {
    fn kind(&self) -> MetricKind {
        MetricKind::NamingConvention
    }

    fn description(&self) -> &'static str {
        "Share of identifiers that break the naming convention of their language"
    }

    fn assess(&self, parsed: &ParsedFile) -> Assessment {
        let Some(rules) = rules_for(parsed.language) else {
            return Assessment::clean();
        };
        let naming = &rules.naming;

        let checks = parsed
            .functions
            .iter()
            .map(|f| ("function", f.name.as_str(), naming.is_valid_function(&f.name)))
            .chain(
                parsed
                    .classes
                    .iter()
                    .map(|c| ("class", c.name.as_str(), naming.is_valid_class(&c.name))),
            )
            .chain(parsed.variables.iter().map(|v| {
                (
                    "variable",
                    v.name.as_str(),
                    naming.is_valid_variable(&v.name, v.is_const),
                )
            }));

        let mut total = 0usize;
        let mut issues = Vec::new();
        for (category, name, valid) in checks {
            total += 1;
            if !valid {
                issues.push(format!("Non-conventional {category} name: {name}"));
            }
        }

        if total == 0 {
            return Assessment::clean();
        }
        let score = issues.len() as f64 / total as f64;
        Assessment::new(score, issues)
    }
}
