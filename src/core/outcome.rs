//! Score-bearing results: per metric, per file and per project.
//!
//! Every score in this module is a badness score in `[0, 1]` where `0` is
//! ideal. Constructors clamp, so the range holds for any input.

use super::{Language, ParsedFile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

const CRITICAL_SCORE: f64 = 0.8;
const WARNING_SCORE: f64 = 0.5;

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Issue severity is derived from the score of the metric that raised it.
    pub fn from_score(score: f64) -> Self {
        if score >= CRITICAL_SCORE {
            Severity::Critical
        } else if score >= WARNING_SCORE {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricOutcome {
    pub name: String,
    pub score: f64,
    pub description: String,
    pub weight: f64,
    pub issues: Vec<String>,
}

impl MetricOutcome {
    pub fn new(
        name: impl Into<String>,
        score: f64,
        description: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            score: clamp_score(score),
            description: description.into(),
            weight,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<String>) -> Self {
        self.issues = issues;
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FileIssue {
    pub metric: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub language: Language,
    pub score: f64,
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub issues: Vec<FileIssue>,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
    pub metric_scores: BTreeMap<String, f64>,
}

impl FileOutcome {
    pub fn new(parsed: &ParsedFile) -> Self {
        Self {
            path: parsed.path.clone(),
            language: parsed.language,
            score: 0.0,
            total_lines: parsed.total_lines,
            code_lines: parsed.code_lines,
            comment_lines: parsed.comment_lines,
            blank_lines: parsed.blank_lines,
            issues: Vec::new(),
            critical_issues: 0,
            warning_issues: 0,
            info_issues: 0,
            metric_scores: BTreeMap::new(),
        }
    }

    pub fn add_issue(&mut self, metric: &str, message: String, severity: Severity) {
        match severity {
            Severity::Critical => self.critical_issues += 1,
            Severity::Warning => self.warning_issues += 1,
            Severity::Info => self.info_issues += 1,
        }
        self.issues.push(FileIssue {
            metric: metric.to_string(),
            severity,
            message,
        });
    }

    pub fn add_metric_score(&mut self, metric: &str, score: f64) {
        self.metric_scores
            .insert(metric.to_string(), clamp_score(score));
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = clamp_score(score);
    }
}

/// One analyzed file: its outcome plus the metric outcomes that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct FileAnalysis {
    pub outcome: FileOutcome,
    pub metrics: Vec<MetricOutcome>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectOutcome {
    pub overall_score: f64,
    pub total_files: usize,
    pub total_lines: usize,
    pub analysis_time_secs: f64,
    /// Representative outcome per metric: the one from the last file folded.
    pub metrics: BTreeMap<String, MetricOutcome>,
    /// Mean score per metric across the files in which it ran.
    pub metric_means: BTreeMap<String, f64>,
    pub files: Vec<FileOutcome>,
    pub total_issues: usize,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
    /// Set when the run was cancelled before every file was analyzed.
    pub incomplete: bool,
    /// Files dropped because reading or analyzing them failed.
    pub skipped_files: Vec<PathBuf>,
}

impl Default for ProjectOutcome {
    fn default() -> Self {
        Self {
            overall_score: 0.0,
            total_files: 0,
            total_lines: 0,
            analysis_time_secs: 0.0,
            metrics: BTreeMap::new(),
            metric_means: BTreeMap::new(),
            files: Vec::new(),
            total_issues: 0,
            critical_issues: 0,
            warning_issues: 0,
            info_issues: 0,
            incomplete: false,
            skipped_files: Vec::new(),
        }
    }
}

impl ProjectOutcome {
    /// Fold per-file analyses, in order, into a project outcome.
    pub fn fold(analyses: Vec<FileAnalysis>, elapsed: Duration) -> Self {
        let mut project = Self {
            analysis_time_secs: elapsed.as_secs_f64(),
            ..Self::default()
        };
        let mut metric_totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for analysis in analyses {
            for metric in analysis.metrics {
                let entry = metric_totals.entry(metric.name.clone()).or_default();
                entry.0 += metric.score;
                entry.1 += 1;
                project.metrics.insert(metric.name.clone(), metric);
            }
            project.add_file(analysis.outcome);
        }

        project.metric_means = metric_totals
            .into_iter()
            .map(|(name, (sum, count))| (name, clamp_score(sum / count as f64)))
            .collect();
        project.calculate_overall_score();
        project.calculate_issue_stats();
        project
    }

    pub fn with_skipped(mut self, skipped: Vec<PathBuf>) -> Self {
        self.skipped_files = skipped;
        self
    }

    pub fn mark_incomplete(mut self, incomplete: bool) -> Self {
        self.incomplete = incomplete;
        self
    }

    fn add_file(&mut self, file: FileOutcome) {
        self.total_files += 1;
        self.total_lines += file.total_lines;
        self.files.push(file);
    }

    fn calculate_overall_score(&mut self) {
        self.overall_score = if self.files.is_empty() {
            0.0
        } else {
            let total: f64 = self.files.iter().map(|f| f.score).sum();
            clamp_score(total / self.files.len() as f64)
        };
    }

    fn calculate_issue_stats(&mut self) {
        let (total, critical, warning, info) =
            self.files.iter().fold((0, 0, 0, 0), |(t, c, w, i), f| {
                (
                    t + f.issues.len(),
                    c + f.critical_issues,
                    w + f.warning_issues,
                    i + f.info_issues,
                )
            });
        self.total_issues = total;
        self.critical_issues = critical;
        self.warning_issues = warning;
        self.info_issues = info;
    }

    /// Files ordered worst first.
    pub fn worst_files(&self, limit: usize) -> Vec<&FileOutcome> {
        let mut files: Vec<&FileOutcome> = self.files.iter().collect();
        files.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
        files.truncate(limit);
        files
    }
}
