//! Column names the pipeline looks for, and the columns it derives.
//!
//! Columns are consumed by name, never by position. A stage whose column is
//! absent is skipped.

pub const EDUCATION: &str = "Education";
pub const MARITAL_STATUS: &str = "Marital_Status";
pub const DT_CUSTOMER: &str = "Dt_Customer";
pub const YEAR_BIRTH: &str = "Year_Birth";

/// Case-sensitive prefix of the per-category spending columns.
pub const SPENDING_PREFIX: &str = "Mnt";

/// Lowercased name prefixes exempt from outlier capping.
pub const OUTLIER_EXEMPT_PREFIXES: [&str; 2] = ["id", "dt"];

pub const CUSTOMER_YEAR: &str = "Customer_Year";
pub const CUSTOMER_MONTH: &str = "Customer_Month";
pub const CUSTOMER_DAY: &str = "Customer_Day";
pub const AGE: &str = "Age";
pub const TOTAL_SPENDING: &str = "Total_Spending";

/// Whether a column name is identifier- or date-like and must not be capped.
pub fn is_outlier_exempt(name: &str) -> bool {
    let lower = name.to_lowercase();
    OUTLIER_EXEMPT_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}
