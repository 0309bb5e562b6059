//! Rendering of a [`ProjectOutcome`] for people (terminal) and tools (JSON).

use crate::core::{ProjectOutcome, Result};
use crate::metrics::MetricKind;
use clap::ValueEnum;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

pub fn render_json(project: &ProjectOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)?)
}

fn score_label(score: f64) -> ColoredString {
    let text = format!("{score:.3}");
    if score >= 0.6 {
        text.red().bold()
    } else if score >= 0.3 {
        text.yellow()
    } else {
        text.green()
    }
}

/// Summary: overall score, per-metric means, the `top` worst files with
/// their most severe issues.
pub fn render_terminal(project: &ProjectOutcome, top: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Code quality report".bold()));
    out.push_str(&format!(
        "Overall score: {}  ({} files, {} lines, {:.2}s)\n",
        score_label(project.overall_score),
        project.total_files,
        project.total_lines,
        project.analysis_time_secs
    ));
    out.push_str(&format!(
        "Issues: {} total, {} critical, {} warning, {} info\n",
        project.total_issues,
        project.critical_issues.to_string().red(),
        project.warning_issues.to_string().yellow(),
        project.info_issues
    ));
    if project.incomplete {
        out.push_str(&format!("{}\n", "Analysis was cancelled; results are partial.".yellow()));
    }
    if !project.skipped_files.is_empty() {
        out.push_str(&format!("Skipped {} unreadable files\n", project.skipped_files.len()));
    }

    if !project.metric_means.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Metric", "Mean score", "Weight"]);
        for kind in MetricKind::ALL {
            let Some(mean) = project.metric_means.get(kind.name()) else {
                continue;
            };
            let weight = project
                .metrics
                .get(kind.name())
                .map(|m| format!("{:.2}", m.weight))
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(kind.label()),
                Cell::new(format!("{mean:.3}")),
                Cell::new(weight),
            ]);
        }
        out.push_str(&format!("\n{table}\n"));
    }

    let worst = project.worst_files(top);
    if !worst.is_empty() {
        out.push_str(&format!("\n{}\n", "Files needing attention".bold()));
        for file in worst {
            out.push_str(&format!(
                "  {} {}  ({} lines, {} code, {} comment, {} blank)\n",
                score_label(file.score),
                file.path.display(),
                file.total_lines,
                file.code_lines,
                file.comment_lines,
                file.blank_lines
            ));
            let mut issues: Vec<_> = file.issues.iter().collect();
            issues.sort_by(|a, b| b.severity.cmp(&a.severity));
            for issue in issues.into_iter().take(3) {
                out.push_str(&format!(
                    "      [{}] {}: {}\n",
                    issue.severity, issue.metric, issue.message
                ));
            }
        }
    }

    out
}

/// Write the report to `output`, or stdout when `None`.
pub fn write_report(
    project: &ProjectOutcome,
    format: OutputFormat,
    output: Option<&Path>,
    top: usize,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => render_json(project)?,
        OutputFormat::Terminal => render_terminal(project, top),
    };

    match output {
        Some(path) => crate::io::write_file(path, &rendered),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use std::path::Path;

    fn sample() -> ProjectOutcome {
        let analysis = Analyzer::default().analyze_source(Path::new("src/app.js"), "run();\n");
        ProjectOutcome::fold(vec![analysis], std::time::Duration::from_millis(5))
    }

    #[test]
    fn test_json_contains_outcome_fields() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_files"], 1);
        assert!(value["metrics"]["comment_ratio"]["score"].as_f64().unwrap() > 0.7);
        assert_eq!(value["files"][0]["path"], "src/app.js");
    }

    #[test]
    fn test_terminal_summary_mentions_worst_file() {
        colored::control::set_override(false);
        let text = render_terminal(&sample(), 5);
        assert!(text.contains("Overall score:"));
        assert!(text.contains("Comment ratio"));
        assert!(text.contains("src/app.js"));
        assert!(text.contains("[critical] comment_ratio: Comment ratio too low: 0.0%"));
    }
}
