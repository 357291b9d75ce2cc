//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the cleaning workflow.

use crate::cleaner::{DataCleaner, DateDecomposer, TextNormalizer};
use crate::columns;
use crate::config::CleaningConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::io::load_dataset;
use crate::pipeline::{FeatureDeriver, OutlierHandler};
use crate::quality::QualityAnalyzer;
use crate::reporting::ReportGenerator;
use crate::types::{CleaningSummary, PipelineResult};
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, error, info};

/// Stage names recorded in [`CleaningSummary::skipped_stages`].
pub const STAGE_TEXT_NORMALIZATION: &str = "text_normalization";
pub const STAGE_DATE_DECOMPOSITION: &str = "date_decomposition";

/// The cleaning pipeline.
///
/// Stages run in a fixed order: quality snapshot, imputation, deduplication,
/// text normalization, date decomposition, outlier capping, feature
/// derivation. Any failing stage aborts the run before anything is written.
///
/// # Example
///
/// ```rust,ignore
/// use campaign_clean::{CleaningConfig, Pipeline};
///
/// let config = CleaningConfig::builder()
///     .input_path("marketing_campaign.csv")
///     .reference_year(2024)
///     .build()?;
///
/// let result = Pipeline::builder().config(config).build()?.run()?;
/// println!("{} rows cleaned", result.summary.final_rows);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: CleaningConfig,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Load the input, clean it, and write the dataset and reports.
    pub fn run(&self) -> Result<PipelineResult> {
        let df = self.load()?;
        let mut result = self.process(df)?;
        self.write_outputs(&mut result)?;
        Ok(result)
    }

    /// Load the configured input file.
    pub fn load(&self) -> Result<DataFrame> {
        info!("Loading dataset from: {}", self.config.input_path.display());
        load_dataset(&self.config.input_path, self.config.separator_byte())
    }

    /// Clean a table in memory. Nothing is written.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        match self.process_internal(df) {
            Ok(result) => {
                info!("Data cleaning and preprocessing completed");
                Ok(result)
            }
            Err(e) => {
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn process_internal(&self, mut df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!("Starting cleaning pipeline...");

        // Step 1: Quality snapshot
        let quality = QualityAnalyzer::analyze(&df).context("analyzing data quality")?;
        info!(
            "Dataset shape: ({}, {}), {} columns with missing values, {} duplicate rows",
            quality.rows,
            quality.columns,
            quality.missing_columns.len(),
            quality.duplicate_count
        );
        let mut summary = CleaningSummary::from_quality(&quality);

        // Step 2: Missing values
        info!("Step 1: Handling missing values...");
        summary.imputations = StatisticalImputer::impute_missing(&mut df, &quality.missing_columns)
            .context("imputing missing values")?;

        // Step 3: Duplicates
        info!("Step 2: Removing duplicate rows...");
        let (mut df, dedup) = DataCleaner::remove_duplicates(df).context("removing duplicates")?;
        summary.deduplication = dedup;

        // Step 4: Text normalization
        info!("Step 3: Standardizing text values...");
        summary.normalized_columns = TextNormalizer::normalize_known_columns(&mut df)
            .context("normalizing text values")?;
        if summary.normalized_columns.is_empty() {
            summary.skipped_stages.push(STAGE_TEXT_NORMALIZATION.to_string());
        }

        // Step 5: Dates
        info!("Step 4: Decomposing {}...", columns::DT_CUSTOMER);
        summary.date_decomposition = DateDecomposer::decompose(&mut df, &self.config.date_formats)
            .context("decomposing customer dates")?;
        if summary.date_decomposition.is_none() {
            summary.skipped_stages.push(STAGE_DATE_DECOMPOSITION.to_string());
        }

        // Step 6: Outliers
        info!("Step 5: Handling outliers with the IQR method...");
        let (checked, outliers) = OutlierHandler::cap_outliers(&mut df)?;
        summary.outlier_columns_checked = checked;
        summary.outliers = outliers;

        // Step 7: Derived features
        info!("Step 6: Creating new features...");
        let (derived, skipped) = FeatureDeriver::derive(&mut df, self.config.reference_year)
            .context("deriving features")?;
        summary.derived_features = derived;
        summary.skipped_stages.extend(skipped);

        summary.final_rows = df.height();
        summary.final_columns = df.width();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        debug!("Skipped stages: {:?}", summary.skipped_stages);
        info!(
            "Cleaned shape: ({}, {}) in {}ms",
            summary.final_rows, summary.final_columns, summary.duration_ms
        );

        Ok(PipelineResult { data: df, summary })
    }

    /// Write the cleaned dataset, the markdown summary, and the JSON report
    /// when one is configured.
    pub fn write_outputs(&self, result: &mut PipelineResult) -> Result<()> {
        ReportGenerator::write_dataset(&mut result.data, &self.config.output_path)?;
        ReportGenerator::write_summary(&result.summary, &self.config.report_path)?;
        if let Some(json_path) = &self.config.json_report_path {
            ReportGenerator::write_json_report(&result.summary, json_path)?;
        }
        Ok(())
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;
        Ok(Pipeline { config })
    }
}
