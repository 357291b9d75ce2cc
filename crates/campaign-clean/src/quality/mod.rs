//! Data quality analysis module.
//!
//! This module measures the quality issues the cleaning stages repair:
//! missing values per column and exact duplicate rows.

mod analyzer;

pub use analyzer::QualityAnalyzer;
