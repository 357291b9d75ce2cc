//! Pipeline module.
//!
//! This module provides the cleaning pipeline and the stages that live only
//! inside it: outlier capping and feature derivation.

mod builder;
pub mod features;
pub mod outliers;

pub use builder::{Pipeline, PipelineBuilder, STAGE_DATE_DECOMPOSITION, STAGE_TEXT_NORMALIZATION};
pub use features::FeatureDeriver;
pub use outliers::{IqrBounds, OutlierHandler};
