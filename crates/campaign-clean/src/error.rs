//! Custom error types for the cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every error is
//! fatal for the run: the pipeline stops at the first failing stage and the
//! writer is never invoked.
//!
//! Errors are serializable so the CLI can emit them as JSON in `--json` mode.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The input file does not exist or cannot be opened.
    #[error("Input file not found or unreadable: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A column that needs a median or mode has no non-missing values.
    #[error("Column '{0}' has no non-missing values to impute from")]
    EmptyColumn(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "MISSING_FILE",
            Self::EmptyColumn(_) => "EMPTY_COLUMN",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the input data rather than the
    /// environment or configuration.
    pub fn is_data_error(&self) -> bool {
        match self {
            Self::EmptyColumn(_) | Self::ColumnNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_data_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Io(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::EmptyColumn("Income".to_string()).error_code(),
            "EMPTY_COLUMN"
        );
        assert_eq!(
            CleaningError::MissingFile {
                path: PathBuf::from("nope.csv")
            }
            .error_code(),
            "MISSING_FILE"
        );
    }

    #[test]
    fn test_missing_file_message_contains_path() {
        let error = CleaningError::MissingFile {
            path: PathBuf::from("data/marketing_campaign.csv"),
        };
        assert!(error.to_string().contains("marketing_campaign.csv"));
    }

    #[test]
    fn test_is_data_error() {
        assert!(CleaningError::EmptyColumn("Income".to_string()).is_data_error());
        assert!(
            CleaningError::EmptyColumn("Income".to_string())
                .with_context("During imputation")
                .is_data_error()
        );
        assert!(!CleaningError::InvalidConfig("bad".to_string()).is_data_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::EmptyColumn("Income".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("EMPTY_COLUMN"));
        assert!(json.contains("Income"));
    }

    #[test]
    fn test_with_context() {
        let error =
            CleaningError::ColumnNotFound("Mnt".to_string()).with_context("During derivation");
        assert!(error.to_string().contains("During derivation"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND"); // Preserves original code
    }
}
