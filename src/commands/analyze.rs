use crate::analyzer::Analyzer;
use crate::config::{self, AnalysisConfig};
use crate::core::Language;
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub config_file: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub languages: Option<Vec<String>>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub top: usize,
    pub jobs: Option<usize>,
    pub parallel: bool,
}

pub fn handle_analyze(options: AnalyzeConfig) -> Result<()> {
    let config = build_config(&options)?;
    let analyzer = Analyzer::new(config);

    let project = if options.path.is_file() {
        analyzer.analyze_file(&options.path)
    } else {
        analyzer.analyze_directory(&options.path)
    }
    .with_context(|| format!("Failed to analyze {}", options.path.display()))?;

    output::write_report(
        &project,
        options.format,
        options.output.as_deref(),
        options.top,
    )
    .context("Failed to write report")?;
    Ok(())
}

/// Config file (explicit or discovered) with command-line overrides applied.
pub fn build_config(options: &AnalyzeConfig) -> Result<AnalysisConfig> {
    let mut config = match &options.config_file {
        Some(path) => config::load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => config::load_config(&options.path),
    };

    for pattern in &options.exclude {
        config.add_exclude_pattern(pattern);
    }
    if let Some(names) = &options.languages {
        config.languages = Some(parse_languages(names)?);
    }
    if let Some(jobs) = options.jobs {
        config.jobs = jobs;
    }
    if !options.parallel {
        config.parallel = false;
    }
    Ok(config)
}

pub fn parse_languages(names: &[String]) -> Result<Vec<Language>> {
    names
        .iter()
        .map(|name| {
            Language::from_name(name).with_context(|| format!("Unknown language: {name}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(path: PathBuf) -> AnalyzeConfig {
        AnalyzeConfig {
            path,
            config_file: None,
            exclude: vec!["**/gen/**".into()],
            languages: Some(vec!["cs".into(), "golang".into()]),
            format: OutputFormat::Json,
            output: None,
            top: 10,
            jobs: Some(3),
            parallel: false,
        }
    }

    #[test]
    fn test_cli_overrides_apply() {
        let temp = TempDir::new().unwrap();
        let config = build_config(&options(temp.path().to_path_buf())).unwrap();

        assert_eq!(config.languages, Some(vec![Language::CSharp, Language::Go]));
        assert!(config.is_excluded(std::path::Path::new("/p/gen/a.go")));
        assert_eq!(config.jobs, 3);
        assert!(!config.parallel);
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let err = parse_languages(&["cobol".to_string()]).unwrap_err();
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn test_report_written_to_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("main.go"), "package main\n").unwrap();
        let report = temp.path().join("report.json");

        handle_analyze(AnalyzeConfig {
            output: Some(report.clone()),
            languages: None,
            ..options(temp.path().to_path_buf())
        })
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(json["total_files"], 1);
    }
}
