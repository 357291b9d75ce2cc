//! Categorical text normalization.
//!
//! Values are lowercased and looked up in a fixed canonical table; a value
//! missing from the table goes through a fallback transform instead of being
//! dropped, so unseen categories survive.

use crate::columns;
use crate::utils::{capitalize_first, has_column};
use polars::prelude::*;
use tracing::{debug, info};

/// A fixed lowercase-key to canonical-value table for one column.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalMapping {
    pub column: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

pub const EDUCATION_MAPPING: CanonicalMapping = CanonicalMapping {
    column: columns::EDUCATION,
    entries: &[
        ("basic", "Basic"),
        ("graduation", "Graduation"),
        ("2n cycle", "2n Cycle"),
        ("master", "Master"),
        ("phd", "PhD"),
    ],
};

pub const MARITAL_STATUS_MAPPING: CanonicalMapping = CanonicalMapping {
    column: columns::MARITAL_STATUS,
    entries: &[
        ("single", "Single"),
        ("married", "Married"),
        ("together", "Together"),
        ("divorced", "Divorced"),
        ("widow", "Widow"),
    ],
};

/// Lowercase `raw`, return its canonical form from `entries`, or hand the
/// lowercased value to `fallback` when there is none.
pub fn normalize_with_fallback<F>(raw: &str, entries: &[(&str, &str)], fallback: F) -> String
where
    F: Fn(&str) -> String,
{
    let lowered = raw.to_lowercase();
    entries
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| fallback(&lowered))
}

/// Applies the canonical mappings to the columns they name.
pub struct TextNormalizer;

impl TextNormalizer {
    /// The mappings applied by [`normalize_known_columns`](Self::normalize_known_columns).
    pub const MAPPINGS: [CanonicalMapping; 2] = [EDUCATION_MAPPING, MARITAL_STATUS_MAPPING];

    /// Normalize `Education` and `Marital_Status` where present, with
    /// capitalization as the fallback. Returns the columns that were touched.
    pub fn normalize_known_columns(df: &mut DataFrame) -> PolarsResult<Vec<String>> {
        let mut normalized = Vec::new();
        for mapping in Self::MAPPINGS {
            if !has_column(df, mapping.column) {
                info!("Column '{}' not present, skipping text normalization", mapping.column);
                continue;
            }
            Self::normalize_column(df, &mapping, capitalize_first)?;
            normalized.push(mapping.column.to_string());
        }
        Ok(normalized)
    }

    /// Normalize one column in place. Missing values stay missing.
    pub fn normalize_column<F>(
        df: &mut DataFrame,
        mapping: &CanonicalMapping,
        fallback: F,
    ) -> PolarsResult<()>
    where
        F: Fn(&str) -> String,
    {
        let series = df.column(mapping.column)?.as_materialized_series();
        let str_series = series.cast(&DataType::String)?;

        let mut changed = 0usize;
        let values: Vec<Option<String>> = str_series
            .str()?
            .into_iter()
            .map(|opt| {
                opt.map(|raw| {
                    let value = normalize_with_fallback(raw, mapping.entries, &fallback);
                    if value != raw {
                        changed += 1;
                    }
                    value
                })
            })
            .collect();

        debug!("Normalized {} values in '{}'", changed, mapping.column);
        df.replace(mapping.column, Series::new(mapping.column.into(), values))?;
        Ok(())
    }
}
