//! Error types for babystat
//!
//! The aggregation core itself is total and never fails for documented
//! inputs; errors exist only at the boundaries: file I/O, argument parsing,
//! and filters a caller got wrong. All variants derive from `thiserror` for
//! convenient propagation with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for babystat operations
#[derive(Error, Debug)]
pub enum BabystatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No activity data directory found
    #[error("No activity data directory found")]
    NoDataDirectory,

    /// Invalid date argument
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Unrecognized period granularity
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Period filter would generate more slices than the configured bound
    #[error("Date range would generate more than {max} period slices")]
    RangeTooLarge { max: usize },

    /// Invalid timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },
}

/// Convenience type alias for Results in babystat
pub type Result<T> = std::result::Result<T, BabystatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BabystatError::NoDataDirectory;
        assert_eq!(error.to_string(), "No activity data directory found");

        let error = BabystatError::RangeTooLarge { max: 500 };
        assert_eq!(
            error.to_string(),
            "Date range would generate more than 500 period slices"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: BabystatError = io_error.into();
        assert!(matches!(error, BabystatError::Io(_)));
    }
}
