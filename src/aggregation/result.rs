//! Dot-plot result types
//!
//! The finalized payload consumed by the downstream rendering and
//! serialization layer. The field shape
//! `{categories, name, values: [{name, mean, fractionExpressed}]}` is a
//! wire contract and must be preserved exactly.

use serde::{Deserialize, Serialize};

use crate::types::CategoryValue;

/// Finalized dot-plot data for one grouping dimension
///
/// `categories` is naturally sorted; every sequence inside `values` is
/// aligned to it index by index, one dot per category and measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPlotResult {
    /// Category keys in natural sort order
    pub categories: Vec<CategoryValue>,

    /// Dimension name this result was grouped by
    pub name: String,

    /// Per-measure summary sequences, in declared measure order
    pub values: Vec<MeasureSummary>,
}

impl DotPlotResult {
    /// Serialize to a compact JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Summary sequences for one measure, aligned to the sorted categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSummary {
    /// Measure name
    pub name: String,

    /// Mean value per category
    pub mean: Vec<f64>,

    /// Fraction of observations per category with a strictly positive value
    #[serde(rename = "fractionExpressed")]
    pub fraction_expressed: Vec<f64>,
}
