//! Analysis orchestration.
//!
//! Discovers files, runs extraction and the metric set on each one, and folds
//! the per-file outcomes into a [`ProjectOutcome`]. Each file depends only on
//! its own text, so files are analyzed on a rayon pool and folded afterwards
//! in path order; the result does not depend on scheduling.

mod cancel;

pub use cancel::CancellationToken;

use crate::config::AnalysisConfig;
use crate::core::{
    detect_language, Error, FileAnalysis, FileOutcome, ProjectOutcome, Result, Severity,
};
use crate::extraction::StructuralExtractor;
use crate::io::{read_file, FileWalker};
use crate::metrics::{weighted_score, MetricSet};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Per-run analysis state: configuration, extractor and metric set are built
/// once and shared by reference with every file analysis.
pub struct Analyzer {
    config: AnalysisConfig,
    extractor: StructuralExtractor,
    metrics: MetricSet,
}

/// What happened to one discovered file.
enum FileResult {
    Analyzed(Box<FileAnalysis>),
    Failed(PathBuf, Error),
    Cancelled,
}

impl Analyzer {
    /// Invalid weights or thresholds are logged; the analyzer still runs.
    pub fn new(config: AnalysisConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("{e}");
        }
        Self {
            extractor: StructuralExtractor::new(config.extraction),
            metrics: MetricSet::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze already-loaded text. Never fails.
    pub fn analyze_source(&self, path: &Path, text: &str) -> FileAnalysis {
        let language = detect_language(path);
        let parsed = self.extractor.parse(path, text, language);
        let metrics = self.metrics.analyze(&parsed);

        let mut outcome = FileOutcome::new(&parsed);
        for metric in &metrics {
            outcome.add_metric_score(&metric.name, metric.score);
            let severity = Severity::from_score(metric.score);
            for issue in &metric.issues {
                outcome.add_issue(&metric.name, issue.clone(), severity);
            }
        }
        outcome.set_score(weighted_score(&metrics));

        log::debug!(
            "Analyzed {} ({}, {} lines): score {:.3}",
            path.display(),
            language,
            parsed.total_lines,
            outcome.score
        );
        FileAnalysis { outcome, metrics }
    }

    /// Read and analyze one file. Read failures are recoverable
    /// [`Error::FileAnalysis`] values.
    pub fn analyze_path(&self, path: &Path) -> Result<FileAnalysis> {
        let text = read_file(path)?;
        Ok(self.analyze_source(path, &text))
    }

    /// Single-file project outcome.
    pub fn analyze_file(&self, path: &Path) -> Result<ProjectOutcome> {
        if !path.exists() {
            return Err(Error::path_not_found(path));
        }
        let start = Instant::now();
        let analysis = self.analyze_path(path)?;
        Ok(ProjectOutcome::fold(vec![analysis], start.elapsed()))
    }

    pub fn analyze_directory(&self, root: &Path) -> Result<ProjectOutcome> {
        self.analyze_directory_with_cancel(root, &CancellationToken::new())
    }

    /// Analyze every selected file under `root`. A cancelled run returns the
    /// files finished so far with `incomplete` set.
    pub fn analyze_directory_with_cancel(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<ProjectOutcome> {
        if !root.exists() {
            return Err(Error::path_not_found(root));
        }
        let start = Instant::now();

        let files = self.discover(root)?;
        log::info!("Analyzing {} files under {}", files.len(), root.display());

        let results = self.run_all(&files, cancel);

        let mut analyses = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        let mut incomplete = false;
        for result in results {
            match result {
                FileResult::Analyzed(analysis) => analyses.push(*analysis),
                FileResult::Failed(path, e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    skipped.push(path);
                }
                FileResult::Cancelled => incomplete = true,
            }
        }

        let project = ProjectOutcome::fold(analyses, start.elapsed())
            .with_skipped(skipped)
            .mark_incomplete(incomplete);
        log::info!(
            "Analyzed {} files ({} skipped{}) in {:.2}s, overall score {:.3}",
            project.total_files,
            project.skipped_files.len(),
            if incomplete { ", cancelled" } else { "" },
            project.analysis_time_secs,
            project.overall_score
        );
        Ok(project)
    }

    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let languages = self
            .config
            .languages
            .clone()
            .unwrap_or_else(|| crate::core::Language::SUPPORTED.to_vec());
        FileWalker::new(root.to_path_buf())
            .with_languages(languages)
            .with_exclude_patterns(self.config.exclude_patterns.clone())
            .walk()
    }

    fn run_one(&self, path: &Path, cancel: &CancellationToken) -> FileResult {
        if cancel.is_cancelled() {
            return FileResult::Cancelled;
        }
        match self.analyze_path(path) {
            Ok(analysis) => FileResult::Analyzed(Box::new(analysis)),
            Err(e) => FileResult::Failed(path.to_path_buf(), e),
        }
    }

    /// Results come back in the order of `files`.
    fn run_all(&self, files: &[PathBuf], cancel: &CancellationToken) -> Vec<FileResult> {
        let jobs = self.config.effective_jobs();
        if !self.config.parallel || jobs <= 1 || files.len() <= 1 {
            return files.iter().map(|f| self.run_one(f, cancel)).collect();
        }

        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(|| {
                files
                    .par_iter()
                    .map(|f| self.run_one(f, cancel))
                    .collect()
            }),
            Err(e) => {
                log::warn!("Failed to build worker pool: {e}. Analyzing sequentially.");
                files.iter().map(|f| self.run_one(f, cancel)).collect()
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Analyze a directory tree with `config`.
pub fn analyze_directory(root: &Path, config: AnalysisConfig) -> Result<ProjectOutcome> {
    Analyzer::new(config).analyze_directory(root)
}

/// Analyze one file with the default configuration.
pub fn analyze_file(path: &Path) -> Result<ProjectOutcome> {
    Analyzer::default().analyze_file(path)
}
