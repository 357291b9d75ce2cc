use crate::types::{ColumnMissing, QualityReport};
use polars::prelude::*;
use tracing::debug;

/// Read-only measurements over a table. Nothing here mutates its input.
pub struct QualityAnalyzer;

impl QualityAnalyzer {
    /// Take a full quality snapshot of the table.
    pub fn analyze(df: &DataFrame) -> PolarsResult<QualityReport> {
        let missing_counts = Self::missing_counts(df);
        let missing_columns = missing_counts
            .iter()
            .filter(|c| c.missing_count > 0)
            .map(|c| c.name.clone())
            .collect();
        let duplicate_count = Self::duplicate_count(df)?;

        for col in &missing_counts {
            debug!("{}: {} missing", col.name, col.missing_count);
        }

        Ok(QualityReport {
            rows: df.height(),
            columns: df.width(),
            missing_counts,
            missing_columns,
            duplicate_count,
        })
    }

    /// Missing-value count of every column, in table order.
    pub fn missing_counts(df: &DataFrame) -> Vec<ColumnMissing> {
        df.get_columns()
            .iter()
            .map(|col| ColumnMissing {
                name: col.name().to_string(),
                missing_count: col.null_count(),
            })
            .collect()
    }

    /// Names of columns with at least one missing value, in table order.
    pub fn missing_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Number of rows that exactly repeat an earlier row.
    pub fn duplicate_count(df: &DataFrame) -> PolarsResult<usize> {
        if df.width() == 0 {
            return Ok(0);
        }
        let unique = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_df() -> DataFrame {
        df![
            "ID" => [1, 2, 2, 3],
            "Income" => [Some(100.0), None, None, Some(300.0)],
            "Education" => [Some("PhD"), Some("Master"), Some("Master"), None],
            "Kidhome" => [0, 1, 1, 0],
        ]
        .unwrap()
    }

    #[test]
    fn test_missing_columns_in_table_order() {
        let df = sample_df();
        assert_eq!(
            QualityAnalyzer::missing_columns(&df),
            vec!["Income".to_string(), "Education".to_string()]
        );
    }

    #[test]
    fn test_missing_counts() {
        let df = sample_df();
        let counts = QualityAnalyzer::missing_counts(&df);

        assert_eq!(counts.len(), 4);
        assert_eq!(counts[0].missing_count, 0);
        assert_eq!(counts[1].missing_count, 2);
        assert_eq!(counts[2].missing_count, 1);
    }

    #[test]
    fn test_duplicate_count() {
        let df = sample_df();
        // Rows 1 and 2 are identical, including their missing values
        assert_eq!(QualityAnalyzer::duplicate_count(&df).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_count_counts_every_repeat() {
        let df = df![
            "a" => [1, 1, 1, 2],
            "b" => ["x", "x", "x", "y"],
        ]
        .unwrap();
        assert_eq!(QualityAnalyzer::duplicate_count(&df).unwrap(), 2);
    }

    #[test]
    fn test_duplicate_count_partial_match_is_not_duplicate() {
        let df = df![
            "a" => [1, 1],
            "b" => ["x", "y"],
        ]
        .unwrap();
        assert_eq!(QualityAnalyzer::duplicate_count(&df).unwrap(), 0);
    }

    #[test]
    fn test_analyze() {
        let df = sample_df();
        let report = QualityAnalyzer::analyze(&df).unwrap();

        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, 4);
        assert_eq!(report.missing_columns, vec!["Income", "Education"]);
        assert_eq!(report.duplicate_count, 1);
    }

    #[test]
    fn test_analyze_empty_dataframe() {
        let df = DataFrame::empty();
        let report = QualityAnalyzer::analyze(&df).unwrap();

        assert_eq!(report.rows, 0);
        assert!(report.missing_columns.is_empty());
        assert_eq!(report.duplicate_count, 0);
    }
}
