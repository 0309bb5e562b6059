//! Heuristic, multi-language code quality analysis.
//!
//! Files are classified by extension, reduced to a structural inventory by
//! pattern-based extraction, and scored by seven independent metrics. Per-file
//! weighted scores fold into a project outcome.
//!
//! ```no_run
//! use qualmap::{analyze_directory, AnalysisConfig};
//! use std::path::Path;
//!
//! let project = analyze_directory(Path::new("src"), AnalysisConfig::default())?;
//! println!("overall score {:.3}", project.overall_score);
//! # Ok::<(), qualmap::Error>(())
//! ```

pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod extraction;
pub mod io;
pub mod languages;
pub mod metrics;
pub mod output;

pub use crate::analyzer::{analyze_directory, analyze_file, Analyzer, CancellationToken};
pub use crate::config::{AnalysisConfig, MetricWeights, Thresholds};
pub use crate::core::{
    detect_language, is_supported_file, ClassRecord, Error, FileAnalysis, FileIssue, FileOutcome,
    FunctionRecord, Language, MetricOutcome, ParsedFile, ProjectOutcome, Result, Severity,
    VariableRecord,
};
pub use crate::extraction::{ExtractionOptions, StructuralExtractor};
pub use crate::metrics::{Metric, MetricKind, MetricSet};
