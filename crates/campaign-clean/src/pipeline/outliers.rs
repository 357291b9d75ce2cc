//! Outlier handling module.
//!
//! Numeric columns are Winsorized at their IQR fences: anything below
//! `Q1 - 1.5*IQR` or above `Q3 + 1.5*IQR` is clamped onto the fence. Rows are
//! never removed.

use crate::columns::is_outlier_exempt;
use crate::error::{CleaningError, Result};
use crate::types::OutlierRecord;
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use tracing::{debug, info};

/// Distance of the fences from the quartiles, in IQRs.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Quartiles and fences of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute the bounds from non-missing values with linear-interpolation
    /// quartiles. `None` when there are no values.
    pub fn from_values(values: &Float64Chunked) -> PolarsResult<Option<Self>> {
        let q1 = values.quantile(0.25, QuantileMethod::Linear)?;
        let q3 = values.quantile(0.75, QuantileMethod::Linear)?;

        Ok(match (q1, q3) {
            (Some(q1), Some(q3)) => {
                let iqr = q3 - q1;
                Some(Self {
                    q1,
                    q3,
                    lower: q1 - IQR_MULTIPLIER * iqr,
                    upper: q3 + IQR_MULTIPLIER * iqr,
                })
            }
            _ => None,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Numeric columns eligible for capping, in table order.
    pub fn candidate_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()) && !is_outlier_exempt(col.name()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Cap every candidate column.
    ///
    /// Each column's bounds come from its own values only; capping one column
    /// never influences another. Returns the candidates that were checked and
    /// a record for each column that had outliers.
    pub fn cap_outliers(df: &mut DataFrame) -> Result<(Vec<String>, Vec<OutlierRecord>)> {
        let candidates = Self::candidate_columns(df);
        debug!("Numerical columns for outlier treatment: {:?}", candidates);

        let mut records = Vec::new();
        for col_name in &candidates {
            if let Some(record) = Self::cap_column(df, col_name)? {
                info!("Found {} outliers in {}", record.outlier_count, col_name);
                records.push(record);
            }
        }

        Ok((candidates, records))
    }

    /// Cap one column at its IQR fences.
    ///
    /// Returns `None` when nothing lies outside the fences, in which case the
    /// column is left exactly as it was. Otherwise the column becomes `Float64`.
    pub fn cap_column(df: &mut DataFrame, col_name: &str) -> Result<Option<OutlierRecord>> {
        let column = df
            .column(col_name)
            .map_err(|_| CleaningError::ColumnNotFound(col_name.to_string()))?;
        let float_series = column.as_materialized_series().cast(&DataType::Float64)?;
        let values = float_series.f64()?;

        let Some(bounds) = IqrBounds::from_values(values)? else {
            debug!("'{}' has no values, skipping outlier capping", col_name);
            return Ok(None);
        };

        let outlier_count = values
            .into_iter()
            .flatten()
            .filter(|v| !bounds.contains(*v))
            .count();

        debug!(
            "'{}': Q1={:.2} Q3={:.2} IQR={:.2} bounds=[{:.2}, {:.2}]",
            col_name,
            bounds.q1,
            bounds.q3,
            bounds.iqr(),
            bounds.lower,
            bounds.upper
        );

        if outlier_count == 0 {
            return Ok(None);
        }

        let capped: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| v.map(|val| bounds.clamp(val)))
            .collect();
        df.replace(col_name, Series::new(col_name.into(), capped))?;

        Ok(Some(OutlierRecord {
            column: col_name.to_string(),
            outlier_count,
            lower_bound: bounds.lower,
            upper_bound: bounds.upper,
        }))
    }
}
