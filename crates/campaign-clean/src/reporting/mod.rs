//! Report generation module.
//!
//! This module writes the outputs of a run:
//! - The cleaned dataset as comma-separated CSV
//! - A markdown summary of the cleaning steps performed
//! - Optionally, the same summary as JSON

mod generator;

pub use generator::{DATASET_HEADING, REPORT_TITLE, ReportGenerator};
