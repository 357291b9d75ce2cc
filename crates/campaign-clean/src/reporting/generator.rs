use crate::columns;
use crate::error::{Result, ResultExt};
use crate::types::CleaningSummary;
use polars::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const REPORT_TITLE: &str = "# Data Cleaning and Preprocessing Summary";
pub const DATASET_HEADING: &str = "## Dataset: Customer Personality Analysis";

/// Writes the cleaned dataset and the run summary.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Save the cleaned table as comma-separated CSV with a header row.
    pub fn write_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let mut file = File::create(path).context(format!("creating {}", path.display()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context(format!("writing {}", path.display()))?;

        info!("Cleaned dataset saved to: {}", path.display());
        Ok(())
    }

    /// Render the markdown summary, one entry per line.
    ///
    /// Step 4 is only listed when the date column was decomposed; the text
    /// and feature steps only list the columns actually handled.
    pub fn render_markdown(summary: &CleaningSummary) -> Vec<String> {
        let mut lines = vec![
            REPORT_TITLE.to_string(),
            String::new(),
            DATASET_HEADING.to_string(),
            String::new(),
            "### Original Dataset".to_string(),
            format!("- Rows: {}", summary.original_rows),
            format!("- Columns: {}", summary.original_columns),
        ];

        if summary.missing_columns.is_empty() {
            lines.push("- Missing values: None".to_string());
        } else {
            lines.push(format!("- Missing values: {}", summary.missing_columns.join(", ")));
        }
        lines.push(format!("- Duplicates: {}", summary.duplicate_count));
        lines.push(String::new());

        lines.push("### Cleaning Steps Performed".to_string());
        lines.push("1. Handled missing values in the following columns:".to_string());
        for record in &summary.imputations {
            lines.push(format!(
                "   - {} ({}: {})",
                record.column,
                record.method.as_str(),
                record.fill_value
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "2. Removed {} duplicate rows",
            summary.deduplication.removed()
        ));

        lines.push(String::new());
        lines.push("3. Standardized text values in the following columns:".to_string());
        for column in &summary.normalized_columns {
            lines.push(format!("   - {}", column));
        }

        if let Some(dates) = &summary.date_decomposition {
            lines.push(String::new());
            lines.push(format!(
                "4. Converted '{}' to datetime format and created year, month, day columns",
                dates.column
            ));
            if dates.unparseable > 0 {
                lines.push(format!(
                    "   - {} unparseable dates set to missing",
                    dates.unparseable
                ));
            }
        }

        lines.push(String::new());
        lines.push("5. Handled outliers in numerical columns using IQR method".to_string());
        for record in &summary.outliers {
            lines.push(format!(
                "   - {}: {} values capped to [{:.2}, {:.2}]",
                record.column, record.outlier_count, record.lower_bound, record.upper_bound
            ));
        }

        lines.push(String::new());
        lines.push("6. Created new features:".to_string());
        if summary.has_feature(columns::AGE) {
            lines.push(format!(
                "   - {} (calculated from {})",
                columns::AGE,
                columns::YEAR_BIRTH
            ));
        }
        if summary.has_feature(columns::TOTAL_SPENDING) {
            lines.push(format!(
                "   - {} (sum of all spending categories)",
                columns::TOTAL_SPENDING
            ));
        }

        lines.push(String::new());
        lines.push("### Final Dataset".to_string());
        lines.push(format!("- Rows: {}", summary.final_rows));
        lines.push(format!("- Columns: {}", summary.final_columns));
        lines.push("- All data is now consistently formatted and ready for analysis".to_string());

        lines
    }

    /// Write the markdown summary.
    pub fn write_summary(summary: &CleaningSummary, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let mut file = File::create(path).context(format!("creating {}", path.display()))?;
        for line in Self::render_markdown(summary) {
            writeln!(file, "{}", line)?;
        }

        info!("Created summary file: {}", path.display());
        Ok(())
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_json_report(summary: &CleaningSummary, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(path, json).context(format!("writing {}", path.display()))?;

        info!("JSON report saved: {}", path.display());
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).context(format!("creating {}", parent.display()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DateDecomposition, DeduplicationOutcome, DerivedFeature, ImputationMethod,
        ImputationRecord, OutlierRecord, QualityReport,
    };
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn empty_summary() -> CleaningSummary {
        CleaningSummary::from_quality(&QualityReport {
            rows: 4,
            columns: 3,
            missing_counts: Vec::new(),
            missing_columns: Vec::new(),
            duplicate_count: 0,
        })
    }

    fn full_summary() -> CleaningSummary {
        let mut summary = empty_summary();
        summary.original_rows = 10;
        summary.missing_columns = vec!["Income".to_string()];
        summary.duplicate_count = 2;
        summary.imputations = vec![ImputationRecord {
            column: "Income".to_string(),
            method: ImputationMethod::Median,
            fill_value: "51381.5".to_string(),
            filled_count: 3,
        }];
        summary.deduplication = DeduplicationOutcome {
            rows_before: 10,
            rows_after: 8,
        };
        summary.normalized_columns = vec!["Education".to_string(), "Marital_Status".to_string()];
        summary.date_decomposition = Some(DateDecomposition {
            column: "Dt_Customer".to_string(),
            parsed: 8,
            unparseable: 0,
            derived_columns: Vec::new(),
        });
        summary.outliers = vec![OutlierRecord {
            column: "Income".to_string(),
            outlier_count: 1,
            lower_bound: -10.0,
            upper_bound: 120.5,
        }];
        summary.derived_features = vec![
            DerivedFeature {
                name: "Age".to_string(),
                sources: vec!["Year_Birth".to_string()],
            },
            DerivedFeature {
                name: "Total_Spending".to_string(),
                sources: vec!["MntWines".to_string()],
            },
        ];
        summary.final_rows = 8;
        summary.final_columns = 8;
        summary
    }

    #[test]
    fn test_render_markdown_full_run() {
        let lines = ReportGenerator::render_markdown(&full_summary());

        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[2], DATASET_HEADING);
        assert!(lines.contains(&"- Rows: 10".to_string()));
        assert!(lines.contains(&"- Missing values: Income".to_string()));
        assert!(lines.contains(&"- Duplicates: 2".to_string()));
        assert!(lines.contains(&"   - Income (median: 51381.5)".to_string()));
        assert!(lines.contains(&"2. Removed 2 duplicate rows".to_string()));
        assert!(lines.contains(&"   - Marital_Status".to_string()));
        assert!(lines.contains(
            &"4. Converted 'Dt_Customer' to datetime format and created year, month, day columns"
                .to_string()
        ));
        assert!(lines.contains(&"   - Income: 1 values capped to [-10.00, 120.50]".to_string()));
        assert!(lines.contains(&"   - Age (calculated from Year_Birth)".to_string()));
        assert!(lines.contains(&"   - Total_Spending (sum of all spending categories)".to_string()));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("- All data is now consistently formatted and ready for analysis")
        );
    }

    #[test]
    fn test_render_markdown_sections_in_order() {
        let lines = ReportGenerator::render_markdown(&full_summary());
        let position = |needle: &str| {
            lines
                .iter()
                .position(|l| l.starts_with(needle))
                .unwrap_or_else(|| panic!("missing line starting with {:?}", needle))
        };

        let order = [
            "### Original Dataset",
            "### Cleaning Steps Performed",
            "1.",
            "2.",
            "3.",
            "4.",
            "5.",
            "6.",
            "### Final Dataset",
        ];
        for pair in order.windows(2) {
            assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_render_markdown_minimal_run() {
        let lines = ReportGenerator::render_markdown(&empty_summary());

        assert!(lines.contains(&"- Missing values: None".to_string()));
        assert!(lines.contains(&"2. Removed 0 duplicate rows".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("4.")));
        assert!(!lines.iter().any(|l| l.contains("Age")));
        assert!(!lines.iter().any(|l| l.contains("Total_Spending")));
    }

    #[test]
    fn test_render_markdown_notes_unparseable_dates() {
        let mut summary = full_summary();
        if let Some(dates) = summary.date_decomposition.as_mut() {
            dates.unparseable = 3;
        }

        let lines = ReportGenerator::render_markdown(&summary);
        assert!(lines.contains(&"   - 3 unparseable dates set to missing".to_string()));
    }

    #[test]
    fn test_write_summary_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("cleaning_summary.md");

        ReportGenerator::write_summary(&full_summary(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Data Cleaning and Preprocessing Summary\n\n## Dataset"));
        assert!(content.ends_with("ready for analysis\n"));
    }

    #[test]
    fn test_write_dataset_comma_separated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cleaned.csv");
        let mut df = df![
            "ID" => [1, 2],
            "Education" => ["PhD", "Basic"],
        ]
        .unwrap();

        ReportGenerator::write_dataset(&mut df, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["ID,Education", "1,PhD", "2,Basic"]);
    }

    #[test]
    fn test_write_json_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        ReportGenerator::write_json_report(&full_summary(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["original_rows"], 10);
        assert_eq!(value["outliers"][0]["column"], "Income");
        assert_eq!(value["imputations"][0]["method"], "median");
    }
}
