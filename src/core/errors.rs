//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for qualmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The root directory or file handed to an analysis call does not exist.
    /// Fatal for that call.
    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// Reading or processing a single file failed. Recoverable: the
    /// directory walk logs it and skips the file.
    #[error("Failed to analyze {}: {message}", path.display())]
    FileAnalysis {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors (weights, thresholds, unreadable config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The analysis root exists but cannot be traversed
    #[error("Walk error: {0}")]
    Walk(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML errors
    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a per-file analysis error with path context
    pub fn file_analysis(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileAnalysis {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an IO failure on a single file
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAnalysis {
            path: path.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Whether the directory-level analysis may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FileAnalysis { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_message() {
        let err = Error::path_not_found("/missing/dir");
        assert_eq!(err.to_string(), "Path not found: /missing/dir");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_file_io_is_recoverable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::file_io("src/a.cs", io);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("src/a.cs"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
