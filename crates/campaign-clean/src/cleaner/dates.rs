//! Customer date decomposition.
//!
//! `Dt_Customer` is parsed leniently: a value no format accepts becomes a
//! missing date, never an error and never a dropped row.

use crate::columns;
use crate::types::DateDecomposition;
use crate::utils::{DtypeCategory, get_dtype_category, has_column};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Parses the customer date and splits it into year, month and day columns.
pub struct DateDecomposer;

impl DateDecomposer {
    /// Decompose `Dt_Customer` if present. Returns `None` when the column is
    /// absent.
    pub fn decompose(
        df: &mut DataFrame,
        date_formats: &[String],
    ) -> PolarsResult<Option<DateDecomposition>> {
        if !has_column(df, columns::DT_CUSTOMER) {
            info!(
                "Column '{}' not present, skipping date decomposition",
                columns::DT_CUSTOMER
            );
            return Ok(None);
        }
        Self::decompose_column(df, columns::DT_CUSTOMER, date_formats).map(Some)
    }

    /// Replace `col_name` with a `Date` column and append
    /// `Customer_Year`/`Customer_Month`/`Customer_Day`.
    pub fn decompose_column(
        df: &mut DataFrame,
        col_name: &str,
        date_formats: &[String],
    ) -> PolarsResult<DateDecomposition> {
        let source = df.column(col_name)?;
        let non_missing = source.len() - source.null_count();
        let dates = Self::parse_dates(source.as_materialized_series(), date_formats)?;

        let parsed = dates.iter().filter(|d| d.is_some()).count();
        let unparseable = non_missing.saturating_sub(parsed);
        if unparseable > 0 {
            warn!(
                "{} values in '{}' could not be parsed as dates and were set to missing",
                unparseable, col_name
            );
        }

        let years: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.year())).collect();
        let months: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.month() as i32)).collect();
        let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.day() as i32)).collect();

        df.replace(col_name, Series::new(col_name.into(), dates))?;
        df.with_column(Series::new(columns::CUSTOMER_YEAR.into(), years))?;
        df.with_column(Series::new(columns::CUSTOMER_MONTH.into(), months))?;
        df.with_column(Series::new(columns::CUSTOMER_DAY.into(), days))?;

        info!(
            "Date column '{}' converted to date format and decomposed into year, month, day",
            col_name
        );

        Ok(DateDecomposition {
            column: col_name.to_string(),
            parsed,
            unparseable,
            derived_columns: vec![
                columns::CUSTOMER_YEAR.to_string(),
                columns::CUSTOMER_MONTH.to_string(),
                columns::CUSTOMER_DAY.to_string(),
            ],
        })
    }

    /// Dates of a series, one per row. Temporal columns are cast, anything
    /// else is parsed as text.
    fn parse_dates(series: &Series, date_formats: &[String]) -> PolarsResult<Vec<Option<NaiveDate>>> {
        if get_dtype_category(series.dtype()) == DtypeCategory::Datetime {
            debug!("'{}' is already temporal, casting to Date", series.name());
            let date_series = series.cast(&DataType::Date)?;
            return Ok(date_series.date()?.as_date_iter().collect());
        }

        let str_series = series.cast(&DataType::String)?;
        Ok(str_series
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(|raw| parse_date(raw, date_formats)))
            .collect())
    }
}

/// Try each format in order; `None` when none of them accepts the value.
pub fn parse_date(raw: &str, date_formats: &[String]) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    date_formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATE_FORMATS;
    use pretty_assertions::assert_eq;

    fn formats() -> Vec<String> {
        DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
    }

    fn i32_values(df: &DataFrame, name: &str) -> Vec<Option<i32>> {
        df.column(name).unwrap().i32().unwrap().into_iter().collect()
    }

    #[test]
    fn test_parse_date_formats() {
        let formats = formats();
        assert_eq!(
            parse_date("2012-09-04", &formats),
            NaiveDate::from_ymd_opt(2012, 9, 4)
        );
        assert_eq!(
            parse_date("04-09-2012", &formats),
            NaiveDate::from_ymd_opt(2012, 9, 4)
        );
        assert_eq!(
            parse_date(" 21/08/2013 ", &formats),
            NaiveDate::from_ymd_opt(2013, 8, 21)
        );
        assert_eq!(parse_date("not a date", &formats), None);
        assert_eq!(parse_date("31-02-2014", &formats), None);
        assert_eq!(parse_date("", &formats), None);
    }

    #[test]
    fn test_decompose_adds_component_columns() {
        let mut df = df![
            "ID" => [1, 2, 3],
            "Dt_Customer" => ["04-09-2012", "garbage", "2014-03-08"],
        ]
        .unwrap();

        let outcome = DateDecomposer::decompose(&mut df, &formats())
            .unwrap()
            .unwrap();

        assert_eq!(outcome.parsed, 2);
        assert_eq!(outcome.unparseable, 1);
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 5);
        assert_eq!(df.column("Dt_Customer").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("Dt_Customer").unwrap().null_count(), 1);

        assert_eq!(i32_values(&df, "Customer_Year"), vec![Some(2012), None, Some(2014)]);
        assert_eq!(i32_values(&df, "Customer_Month"), vec![Some(9), None, Some(3)]);
        assert_eq!(i32_values(&df, "Customer_Day"), vec![Some(4), None, Some(8)]);
    }

    #[test]
    fn test_decompose_absent_column_is_noop() {
        let mut df = df![
            "ID" => [1, 2],
        ]
        .unwrap();

        let outcome = DateDecomposer::decompose(&mut df, &formats()).unwrap();
        assert!(outcome.is_none());
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn test_decompose_respects_custom_formats() {
        let mut df = df![
            "Dt_Customer" => ["2012.09.04"],
        ]
        .unwrap();

        let outcome = DateDecomposer::decompose(&mut df, &["%Y.%m.%d".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(outcome.unparseable, 0);
        assert_eq!(i32_values(&df, "Customer_Month"), vec![Some(9)]);
    }

    #[test]
    fn test_decompose_existing_date_column() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2013, 1, 31),
            None,
        ];
        let mut df = DataFrame::new(vec![Series::new("Dt_Customer".into(), dates).into()]).unwrap();

        let outcome = DateDecomposer::decompose(&mut df, &formats())
            .unwrap()
            .unwrap();

        assert_eq!(outcome.parsed, 1);
        assert_eq!(outcome.unparseable, 0);
        assert_eq!(i32_values(&df, "Customer_Day"), vec![Some(31), None]);
    }
}
