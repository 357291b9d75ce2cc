//! Configuration types for the cleaning pipeline.
//!
//! The pipeline itself is not configurable (every stage runs when its target
//! column exists); this module only carries the run's file locations, the
//! reference year for age derivation and input parsing options.

use crate::error::{CleaningError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default input file name.
pub const DEFAULT_INPUT_PATH: &str = "marketing_campaign.csv";
/// Default cleaned-dataset file name.
pub const DEFAULT_OUTPUT_PATH: &str = "cleaned_marketing_campaign.csv";
/// Default markdown summary file name.
pub const DEFAULT_REPORT_PATH: &str = "cleaning_summary.md";
/// Year that `Age` is computed against.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;
/// Field separator of the input file.
pub const DEFAULT_SEPARATOR: char = ';';

/// Date formats tried in order when parsing `Dt_Customer`.
pub const DEFAULT_DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Configuration for a cleaning run.
///
/// Use [`CleaningConfig::builder()`] for a validated configuration, or
/// [`CleaningConfig::from_json_file`] to load one from disk.
///
/// # Example
///
/// ```rust,ignore
/// use campaign_clean::CleaningConfig;
///
/// let config = CleaningConfig::builder()
///     .input_path("data/marketing_campaign.csv")
///     .reference_year(2024)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Delimited input file.
    pub input_path: PathBuf,

    /// Destination of the cleaned dataset (comma-separated, header, no index).
    pub output_path: PathBuf,

    /// Destination of the markdown cleaning summary.
    pub report_path: PathBuf,

    /// Year that birth years are subtracted from to derive `Age`.
    /// Default: 2024
    pub reference_year: i32,

    /// Field separator of the input file. Must be a single ASCII character.
    /// Default: ';'
    pub separator: char,

    /// chrono format strings tried in order for `Dt_Customer`.
    pub date_formats: Vec<String>,

    /// Optional destination of a JSON rendering of the summary.
    /// Default: None
    pub json_report_path: Option<PathBuf>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            reference_year: DEFAULT_REFERENCE_YEAR,
            separator: DEFAULT_SEPARATOR,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            json_report_path: None,
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Keys that are absent take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CleaningError::Io(e).with_context(format!("Reading config {}", path.display()))
        })?;
        let config: CleaningConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if !(1900..=9999).contains(&self.reference_year) {
            return Err(ConfigValidationError::InvalidReferenceYear(
                self.reference_year,
            ));
        }

        if !self.separator.is_ascii() || matches!(self.separator, '"' | '\n' | '\r') {
            return Err(ConfigValidationError::InvalidSeparator(self.separator));
        }

        if self.date_formats.is_empty() {
            return Err(ConfigValidationError::NoDateFormats);
        }

        for (field, path) in [
            ("input_path", &self.input_path),
            ("output_path", &self.output_path),
            ("report_path", &self.report_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigValidationError::EmptyPath(field.to_string()));
            }
        }

        Ok(())
    }

    /// The separator as the byte polars expects. Only meaningful after
    /// [`validate`](Self::validate) succeeded.
    pub fn separator_byte(&self) -> u8 {
        self.separator as u8
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid reference year: {0} (must be between 1900 and 9999)")]
    InvalidReferenceYear(i32),

    #[error("Invalid separator {0:?} (must be ASCII and not a quote or newline)")]
    InvalidSeparator(char),

    #[error("At least one date format is required")]
    NoDateFormats,

    #[error("Path '{0}' must not be empty")]
    EmptyPath(String),
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    base: Option<CleaningConfig>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    reference_year: Option<i32>,
    separator: Option<char>,
    date_formats: Option<Vec<String>>,
    json_report_path: Option<PathBuf>,
}

impl CleaningConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from a file)
    /// instead of the defaults. Values set on the builder still win.
    pub fn base(mut self, config: CleaningConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the input file path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the cleaned-dataset output path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the markdown summary path.
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Set the reference year for `Age`.
    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Set the input field separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Replace the list of accepted date formats.
    pub fn date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    /// Also write the summary as JSON to this path.
    pub fn json_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_report_path = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<CleaningConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = CleaningConfig {
            input_path: self.input_path.unwrap_or(base.input_path),
            output_path: self.output_path.unwrap_or(base.output_path),
            report_path: self.report_path.unwrap_or(base.report_path),
            reference_year: self.reference_year.unwrap_or(base.reference_year),
            separator: self.separator.unwrap_or(base.separator),
            date_formats: self.date_formats.unwrap_or(base.date_formats),
            json_report_path: self.json_report_path.or(base.json_report_path),
        };

        config.validate()?;
        Ok(config)
    }
}
