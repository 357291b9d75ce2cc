//! Imputation module for handling missing values.
//!
//! Numeric columns are filled with their median, everything else with its
//! mode.

mod statistical;

pub use statistical::StatisticalImputer;
