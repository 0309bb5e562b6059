//! Property-based tests for extraction and scoring
//!
//! These tests verify invariants that should hold for all inputs:
//! - Line categories always partition the physical lines
//! - Every metric and file score stays within [0, 1]
//! - Analysis of the same text is deterministic

use proptest::prelude::*;
use qualmap::{Analyzer, Language, StructuralExtractor};
use std::path::Path;

const EXTENSIONS: &[(&str, Language)] = &[
    ("cs", Language::CSharp),
    ("js", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("py", Language::Python),
    ("java", Language::Java),
    ("cpp", Language::Cpp),
    ("c", Language::C),
    ("go", Language::Go),
];

/// Source-like lines drawn from every language's vocabulary.
fn source_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("// note".to_string()),
        Just("# note".to_string()),
        Just("/* open".to_string()),
        Just("close */".to_string()),
        Just("}".to_string()),
        Just("{".to_string()),
        Just("    return x;".to_string()),
        Just("if (a && b) { run(); }".to_string()),
        Just("public static int Compute(int a, int b) {".to_string()),
        Just("def handle(self, item):".to_string()),
        Just("func Serve(ctx context.Context) error {".to_string()),
        Just("function load(url) {".to_string()),
        Just("try { x(); } catch (e) { }".to_string()),
        Just("class Widget {".to_string()),
        "[a-z_ ]{0,20}[=;(){}]{0,3}",
    ]
}

fn source_text() -> impl Strategy<Value = String> {
    prop::collection::vec(source_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

fn extension() -> impl Strategy<Value = (&'static str, Language)> {
    prop::sample::select(EXTENSIONS)
}

proptest! {
    #[test]
    fn prop_line_categories_partition_total((ext, language) in extension(), text in source_text()) {
        let path = format!("sample.{ext}");
        let parsed = StructuralExtractor::default().parse(Path::new(&path), &text, language);

        prop_assert_eq!(
            parsed.total_lines,
            parsed.code_lines + parsed.comment_lines + parsed.blank_lines
        );
        prop_assert_eq!(parsed.total_lines, text.lines().count());
    }

    #[test]
    fn prop_scores_within_unit_interval((ext, _language) in extension(), text in source_text()) {
        let path = format!("sample.{ext}");
        let analysis = Analyzer::default().analyze_source(Path::new(&path), &text);

        for metric in &analysis.metrics {
            prop_assert!((0.0..=1.0).contains(&metric.score), "{} = {}", metric.name, metric.score);
        }
        prop_assert!((0.0..=1.0).contains(&analysis.outcome.score));
    }

    #[test]
    fn prop_extracted_records_are_well_formed((ext, language) in extension(), text in source_text()) {
        let path = format!("sample.{ext}");
        let parsed = StructuralExtractor::default().parse(Path::new(&path), &text, language);

        for function in &parsed.functions {
            prop_assert!(!function.name.is_empty());
            prop_assert!(function.start_line >= 1);
            prop_assert!(function.start_line <= function.end_line);
        }
        for class in &parsed.classes {
            prop_assert!(!class.name.is_empty());
            prop_assert!(class.start_line <= class.end_line);
        }
    }

    #[test]
    fn prop_analysis_is_deterministic((ext, _language) in extension(), text in source_text()) {
        let path = format!("sample.{ext}");
        let analyzer = Analyzer::default();

        let first = analyzer.analyze_source(Path::new(&path), &text);
        let second = analyzer.analyze_source(Path::new(&path), &text);
        prop_assert_eq!(first, second);
    }
}
