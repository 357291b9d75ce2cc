use chrono::Local;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub name: String,
    pub missing_count: usize,
}

/// Read-only quality snapshot of a table, taken before cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub rows: usize,
    pub columns: usize,
    /// Missing count for every column, in table order.
    pub missing_counts: Vec<ColumnMissing>,
    /// Columns with at least one missing value, in table order.
    pub missing_columns: Vec<String>,
    /// Rows that exactly repeat an earlier row.
    pub duplicate_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationMethod {
    Median,
    Mode,
}

impl ImputationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationRecord {
    pub column: String,
    pub method: ImputationMethod,
    /// The fill value, rendered as text.
    pub fill_value: String,
    pub filled_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeduplicationOutcome {
    pub rows_before: usize,
    pub rows_after: usize,
}

impl DeduplicationOutcome {
    pub fn removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateDecomposition {
    pub column: String,
    pub parsed: usize,
    /// Values that could not be parsed and became missing.
    pub unparseable: usize,
    pub derived_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub column: String,
    pub outlier_count: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFeature {
    pub name: String,
    pub sources: Vec<String>,
}

/// Everything the written report says about a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub generated_at: String,
    /// Wall-clock time spent in the cleaning stages.
    pub duration_ms: u64,
    pub original_rows: usize,
    pub original_columns: usize,
    pub missing_columns: Vec<String>,
    pub duplicate_count: usize,
    pub imputations: Vec<ImputationRecord>,
    pub deduplication: DeduplicationOutcome,
    pub normalized_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_decomposition: Option<DateDecomposition>,
    /// Columns whose bounds were computed, whether or not anything was capped.
    pub outlier_columns_checked: Vec<String>,
    pub outliers: Vec<OutlierRecord>,
    pub derived_features: Vec<DerivedFeature>,
    /// Stages skipped because their target column was absent.
    pub skipped_stages: Vec<String>,
    pub final_rows: usize,
    pub final_columns: usize,
}

impl CleaningSummary {
    /// Start a summary from the pre-cleaning quality snapshot.
    pub fn from_quality(report: &QualityReport) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_ms: 0,
            original_rows: report.rows,
            original_columns: report.columns,
            missing_columns: report.missing_columns.clone(),
            duplicate_count: report.duplicate_count,
            imputations: Vec::new(),
            deduplication: DeduplicationOutcome {
                rows_before: report.rows,
                rows_after: report.rows,
            },
            normalized_columns: Vec::new(),
            date_decomposition: None,
            outlier_columns_checked: Vec::new(),
            outliers: Vec::new(),
            derived_features: Vec::new(),
            skipped_stages: Vec::new(),
            final_rows: report.rows,
            final_columns: report.columns,
        }
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.derived_features.iter().any(|f| f.name == name)
    }

    pub fn total_outliers(&self) -> usize {
        self.outliers.iter().map(|o| o.outlier_count).sum()
    }
}

/// Cleaned table plus the summary of how it got that way.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub data: DataFrame,
    pub summary: CleaningSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quality() -> QualityReport {
        QualityReport {
            rows: 10,
            columns: 4,
            missing_counts: vec![
                ColumnMissing {
                    name: "Income".to_string(),
                    missing_count: 2,
                },
                ColumnMissing {
                    name: "ID".to_string(),
                    missing_count: 0,
                },
            ],
            missing_columns: vec!["Income".to_string()],
            duplicate_count: 1,
        }
    }

    #[test]
    fn test_summary_from_quality() {
        let summary = CleaningSummary::from_quality(&quality());
        assert_eq!(summary.original_rows, 10);
        assert_eq!(summary.original_columns, 4);
        assert_eq!(summary.missing_columns, vec!["Income".to_string()]);
        assert_eq!(summary.duplicate_count, 1);
        assert_eq!(summary.deduplication.removed(), 0);
    }

    #[test]
    fn test_total_outliers_and_features() {
        let mut summary = CleaningSummary::from_quality(&quality());
        summary.outliers.push(OutlierRecord {
            column: "Income".to_string(),
            outlier_count: 3,
            lower_bound: 0.0,
            upper_bound: 1.0,
        });
        summary.outliers.push(OutlierRecord {
            column: "Kidhome".to_string(),
            outlier_count: 2,
            lower_bound: 0.0,
            upper_bound: 1.0,
        });
        summary.derived_features.push(DerivedFeature {
            name: "Age".to_string(),
            sources: vec!["Year_Birth".to_string()],
        });

        assert_eq!(summary.total_outliers(), 5);
        assert!(summary.has_feature("Age"));
        assert!(!summary.has_feature("Total_Spending"));
    }

    #[test]
    fn test_deduplication_removed_never_underflows() {
        let outcome = DeduplicationOutcome {
            rows_before: 3,
            rows_after: 5,
        };
        assert_eq!(outcome.removed(), 0);
    }

    #[test]
    fn test_imputation_method_serializes_snake_case() {
        let json = serde_json::to_string(&ImputationMethod::Median).unwrap();
        assert_eq!(json, "\"median\"");
    }
}
