//! Statistical imputation methods.
//!
//! Provides median imputation for numeric columns and mode imputation for
//! categorical ones.

use crate::error::{CleaningError, Result};
use crate::types::{ImputationMethod, ImputationRecord};
use crate::utils::{
    DtypeCategory, fill_boolean_nulls, fill_numeric_nulls, fill_string_nulls, get_dtype_category,
    string_mode,
};
use polars::prelude::*;
use tracing::{debug, info};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill every missing value in the listed columns, choosing median or
    /// mode from each column's dtype.
    ///
    /// Columns that are not present are ignored. Fails with
    /// [`CleaningError::EmptyColumn`] on a column with no values at all.
    pub fn impute_missing(
        df: &mut DataFrame,
        missing_columns: &[String],
    ) -> Result<Vec<ImputationRecord>> {
        let mut records = Vec::with_capacity(missing_columns.len());

        for col_name in missing_columns {
            let dtype = match df.column(col_name) {
                Ok(col) => col.dtype().clone(),
                Err(_) => {
                    debug!("Skipping imputation for absent column '{}'", col_name);
                    continue;
                }
            };

            let record = match get_dtype_category(&dtype) {
                DtypeCategory::Numeric => Self::apply_numeric_median(df, col_name)?,
                _ => Self::apply_mode_imputation(df, col_name)?,
            };

            info!(
                "Filling missing values in {} with {}: {}",
                record.column,
                record.method.as_str(),
                record.fill_value
            );
            records.push(record);
        }

        Ok(records)
    }

    /// Apply median imputation for a numeric column.
    pub fn apply_numeric_median(df: &mut DataFrame, col_name: &str) -> Result<ImputationRecord> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let median_val = series
            .median()
            .ok_or_else(|| CleaningError::EmptyColumn(col_name.to_string()))?;

        let filled_count = series.null_count();
        let filled = fill_numeric_nulls(&series, median_val)?;
        df.replace(col_name, filled)?;

        Ok(ImputationRecord {
            column: col_name.to_string(),
            method: ImputationMethod::Median,
            fill_value: format_number(median_val),
            filled_count,
        })
    }

    /// Apply mode imputation for a categorical column.
    ///
    /// Boolean columns stay Boolean; every other dtype is filled as text.
    pub fn apply_mode_imputation(df: &mut DataFrame, col_name: &str) -> Result<ImputationRecord> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let mode_val =
            string_mode(&series)?.ok_or_else(|| CleaningError::EmptyColumn(col_name.to_string()))?;

        let filled_count = series.null_count();
        let filled = if series.dtype() == &DataType::Boolean {
            fill_boolean_nulls(&series, mode_val == "true")?
        } else {
            fill_string_nulls(&series, &mode_val)?
        };
        df.replace(col_name, filled)?;

        Ok(ImputationRecord {
            column: col_name.to_string(),
            method: ImputationMethod::Mode,
            fill_value: mode_val,
            filled_count,
        })
    }
}

/// Render a fill value; whole numbers keep one decimal place.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
