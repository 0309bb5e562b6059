use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::AnalysisConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".qualmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a config document. Validation problems are logged, not fatal:
/// weights that do not sum to 1.0 still drive the run.
pub fn parse_and_validate_config(contents: &str) -> Result<AnalysisConfig> {
    let config = toml::from_str::<AnalysisConfig>(contents)?;
    if let Err(e) = config.validate() {
        log::warn!("{e}. Continuing with the configured values.");
    }
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<AnalysisConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.qualmap.toml` in `start` or one of its ancestors.
///
/// A file path starts the search at its parent directory. Unreadable or
/// malformed files are skipped with a warning; no file at all yields the
/// default configuration.
pub fn load_config(start: &Path) -> AnalysisConfig {
    let start = if start.is_file() {
        start.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        start.to_path_buf()
    };
    let start = fs::canonicalize(&start).unwrap_or(start);

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AnalysisConfig::default()
        })
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing
/// or malformed file is an error.
pub fn load_config_from_path(path: &Path) -> Result<AnalysisConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_and_validate_config(&contents)
}
