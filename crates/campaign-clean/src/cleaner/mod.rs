//! Data cleaning module.
//!
//! This module provides the row- and value-level repairs of the pipeline:
//! - Removing duplicate rows
//! - Normalizing categorical text against canonical spellings
//! - Decomposing the customer enrolment date

mod dates;
mod text;

pub use dates::DateDecomposer;
pub use text::{
    CanonicalMapping, EDUCATION_MAPPING, MARITAL_STATUS_MAPPING, TextNormalizer,
    normalize_with_fallback,
};

use crate::types::DeduplicationOutcome;
use polars::prelude::*;
use tracing::{debug, info};

/// Row-level cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove every row equal to an earlier row.
    ///
    /// The first occurrence is kept and the relative order of kept rows is
    /// preserved, so running this twice removes nothing the second time.
    pub fn remove_duplicates(df: DataFrame) -> PolarsResult<(DataFrame, DeduplicationOutcome)> {
        let rows_before = df.height();
        let df = if df.width() == 0 {
            df
        } else {
            df.unique_stable(None, UniqueKeepStrategy::First, None)?
        };
        let outcome = DeduplicationOutcome {
            rows_before,
            rows_after: df.height(),
        };

        if outcome.removed() > 0 {
            let pct = (outcome.removed() as f64 / rows_before as f64) * 100.0;
            info!(
                "Removed {} duplicate rows ({:.1}%)",
                outcome.removed(),
                pct
            );
        } else {
            debug!("No duplicate rows found");
        }

        Ok((df, outcome))
    }
}
