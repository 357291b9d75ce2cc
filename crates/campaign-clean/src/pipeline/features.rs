//! Derived customer features.

use crate::columns;
use crate::types::DerivedFeature;
use crate::utils::{column_names, has_column, is_integer_dtype, is_numeric_dtype};
use polars::prelude::*;
use tracing::{debug, info};

/// Appends `Age` and `Total_Spending` to the cleaned table.
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Derive every feature whose source columns exist.
    ///
    /// Returns the derived features and the names of the skipped ones.
    pub fn derive(
        df: &mut DataFrame,
        reference_year: i32,
    ) -> PolarsResult<(Vec<DerivedFeature>, Vec<String>)> {
        let mut derived = Vec::new();
        let mut skipped = Vec::new();

        match Self::derive_age(df, reference_year)? {
            Some(feature) => derived.push(feature),
            None => skipped.push(columns::AGE.to_string()),
        }
        match Self::derive_total_spending(df)? {
            Some(feature) => derived.push(feature),
            None => skipped.push(columns::TOTAL_SPENDING.to_string()),
        }

        Ok((derived, skipped))
    }

    /// `Age = reference_year - Year_Birth`. Integer birth years give an
    /// integer age; anything else is computed as `Float64`.
    pub fn derive_age(df: &mut DataFrame, reference_year: i32) -> PolarsResult<Option<DerivedFeature>> {
        if !has_column(df, columns::YEAR_BIRTH) {
            info!(
                "Column '{}' not present, skipping {}",
                columns::YEAR_BIRTH,
                columns::AGE
            );
            return Ok(None);
        }

        let birth = df.column(columns::YEAR_BIRTH)?.as_materialized_series();
        let age = if is_integer_dtype(birth.dtype()) {
            let reference = i64::from(reference_year);
            let values: Vec<Option<i64>> = birth
                .cast(&DataType::Int64)?
                .i64()?
                .into_iter()
                .map(|v| v.map(|year| reference - year))
                .collect();
            Series::new(columns::AGE.into(), values)
        } else {
            let reference = f64::from(reference_year);
            let values: Vec<Option<f64>> = birth
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.map(|year| reference - year))
                .collect();
            Series::new(columns::AGE.into(), values)
        };

        df.with_column(age)?;
        info!("Created feature: {}", columns::AGE);

        Ok(Some(DerivedFeature {
            name: columns::AGE.to_string(),
            sources: vec![columns::YEAR_BIRTH.to_string()],
        }))
    }

    /// Numeric columns whose name starts with the spending prefix, in table
    /// order. Non-numeric matches are left out of the sum.
    pub fn spending_columns(df: &DataFrame) -> Vec<String> {
        column_names(df)
            .into_iter()
            .filter(|name| name.starts_with(columns::SPENDING_PREFIX))
            .filter(|name| match df.column(name) {
                Ok(col) if is_numeric_dtype(col.dtype()) => true,
                Ok(col) => {
                    debug!("Ignoring non-numeric spending column '{}' ({})", name, col.dtype());
                    false
                }
                Err(_) => false,
            })
            .collect()
    }

    /// Row-wise sum of every numeric spending column.
    pub fn derive_total_spending(df: &mut DataFrame) -> PolarsResult<Option<DerivedFeature>> {
        let sources = Self::spending_columns(df);
        if sources.is_empty() {
            info!(
                "No numeric '{}' columns present, skipping {}",
                columns::SPENDING_PREFIX,
                columns::TOTAL_SPENDING
            );
            return Ok(None);
        }
        if !sources.iter().all(|name| has_column(df, name)) {
            info!(
                "Spending columns {:?} not all present, skipping {}",
                sources,
                columns::TOTAL_SPENDING
            );
            return Ok(None);
        }
        debug!("Summing spending columns: {:?}", sources);

        let mut total = df.column(&sources[0])?.as_materialized_series().clone();
        for name in &sources[1..] {
            let next = df.column(name)?.as_materialized_series();
            total = (&total + next)?;
        }
        total.rename(columns::TOTAL_SPENDING.into());

        df.with_column(total)?;
        info!("Created feature: {}", columns::TOTAL_SPENDING);

        Ok(Some(DerivedFeature {
            name: columns::TOTAL_SPENDING.to_string(),
            sources,
        }))
    }
}
