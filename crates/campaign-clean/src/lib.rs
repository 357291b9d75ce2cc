//! Customer Campaign Cleaning Library
//!
//! A batch cleaning pipeline for the customer personality / marketing
//! campaign dataset, built with Rust and Polars.
//!
//! # Overview
//!
//! One delimited table goes in; a cleaned table and a human-readable summary
//! come out. The stages, in the order they run:
//!
//! - **Quality snapshot**: missing values per column and exact duplicate rows
//! - **Imputation**: median for numeric columns, mode for everything else
//! - **Deduplication**: exact duplicate rows removed, first occurrence kept
//! - **Text normalization**: `Education` and `Marital_Status` mapped onto
//!   canonical spellings
//! - **Date decomposition**: `Dt_Customer` parsed and split into year, month
//!   and day columns
//! - **Outlier capping**: numeric columns Winsorized at their IQR fences
//! - **Feature derivation**: `Age` and `Total_Spending`
//!
//! A stage whose column is absent is skipped; any other failure aborts the
//! run before anything is written.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use campaign_clean::{CleaningConfig, Pipeline};
//!
//! let config = CleaningConfig::builder()
//!     .input_path("marketing_campaign.csv")
//!     .output_path("cleaned_marketing_campaign.csv")
//!     .report_path("cleaning_summary.md")
//!     .build()?;
//!
//! let result = Pipeline::builder().config(config).build()?.run()?;
//!
//! println!("Rows: {} -> {}", result.summary.original_rows, result.summary.final_rows);
//! ```
//!
//! Stages can also be called on their own, e.g.
//! [`QualityAnalyzer::analyze`] or [`OutlierHandler::cap_outliers`], and
//! [`Pipeline::process`] cleans an in-memory `DataFrame` without touching
//! the filesystem.

pub mod cleaner;
pub mod columns;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, DateDecomposer, TextNormalizer, normalize_with_fallback};
pub use config::{CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use io::load_dataset;
pub use pipeline::{FeatureDeriver, IqrBounds, OutlierHandler, Pipeline, PipelineBuilder};
pub use quality::QualityAnalyzer;
pub use reporting::ReportGenerator;
pub use types::{
    CleaningSummary, ColumnMissing, DateDecomposition, DeduplicationOutcome, DerivedFeature,
    ImputationMethod, ImputationRecord, OutlierRecord, PipelineResult, QualityReport,
};
pub use utils::{DtypeCategory, fill_numeric_nulls, fill_string_nulls, get_dtype_category, is_numeric_dtype};
