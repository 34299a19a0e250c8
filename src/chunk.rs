//! Chunk tables for vectorized processing
//!
//! A chunk is a bounded slice of the full dataset's rows in columnar
//! layout: named columns of equal length, one entry per observation.
//! Upstream layers (row filtering, coordinate binning, the storage
//! backend) produce chunks; the engine folds them in one at a time and
//! never materializes the full dataset.
//!
//! Columns come in two kinds:
//! - numeric columns holding measure values (and the per-row weight
//!   column [`WEIGHT_COLUMN`]),
//! - category columns holding grouping-dimension values.
//!
//! # Example
//!
//! ```rust
//! use dotplot_engine::chunk::Chunk;
//!
//! let chunk = Chunk::builder()
//!     .measure("CD4", vec![0.0, 2.5, 1.0])
//!     .dimension("louvain", vec!["1".into(), "2".into(), "1".into()])
//!     .unit_weights()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(chunk.len(), 3);
//! assert_eq!(chunk.measure("CD4"), Some(&[0.0, 2.5, 1.0][..]));
//! ```

use indexmap::IndexMap;

use crate::error::InputShapeError;
use crate::types::CategoryValue;

/// Name of the derived per-row weight column
///
/// Conceptually "1 per observation", but pre-aggregated inputs may carry
/// larger weights. The engine requires the column to be present and passes
/// it through without scaling counts by it.
pub const WEIGHT_COLUMN: &str = "__count";

// ============================================================================
// Chunk
// ============================================================================

/// A columnar table of observations
///
/// All columns have the same length. Chunks are logically disjoint row
/// subsets of one dataset; no ordering is implied between chunks, and a
/// chunk may carry more columns than the engine declares (extra columns
/// are ignored).
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    /// Row count shared by every column
    rows: usize,

    /// Numeric columns: measures plus the weight column
    numeric: IndexMap<String, Vec<f64>>,

    /// Category columns: grouping dimensions
    categorical: IndexMap<String, Vec<CategoryValue>>,
}

impl Chunk {
    /// Start building a chunk
    pub fn builder() -> ChunkBuilder {
        ChunkBuilder::default()
    }

    /// Number of rows (observations)
    #[inline]
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Check if the chunk has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Numeric column by name, if present
    pub fn measure(&self, name: &str) -> Option<&[f64]> {
        self.numeric.get(name).map(Vec::as_slice)
    }

    /// Category column by name, if present
    pub fn dimension(&self, name: &str) -> Option<&[CategoryValue]> {
        self.categorical.get(name).map(Vec::as_slice)
    }

    /// The per-row weight column, if present
    pub fn weights(&self) -> Option<&[f64]> {
        self.measure(WEIGHT_COLUMN)
    }

    /// Names of every column the chunk carries, numeric then categorical
    ///
    /// Used for error reporting when a declared column is missing.
    pub fn column_names(&self) -> Vec<String> {
        self.numeric
            .keys()
            .chain(self.categorical.keys())
            .cloned()
            .collect()
    }
}

// ============================================================================
// Chunk Builder
// ============================================================================

/// Builder that accumulates columns and validates them into a [`Chunk`]
///
/// Validation happens at `build()`: every column must have the same
/// length, established by the first column added. A mismatch fails with
/// [`InputShapeError::LengthMismatch`] and no chunk is produced.
#[derive(Debug, Default)]
pub struct ChunkBuilder {
    numeric: IndexMap<String, Vec<f64>>,
    categorical: IndexMap<String, Vec<CategoryValue>>,
    unit_weights: bool,
}

impl ChunkBuilder {
    /// Add a numeric measure column
    pub fn measure(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.numeric.insert(name.into(), values);
        self
    }

    /// Add a categorical dimension column
    pub fn dimension(mut self, name: impl Into<String>, values: Vec<CategoryValue>) -> Self {
        self.categorical.insert(name.into(), values);
        self
    }

    /// Add an explicit weight column
    pub fn weights(self, values: Vec<f64>) -> Self {
        self.measure(WEIGHT_COLUMN, values)
    }

    /// Fill the weight column with 1.0 per row at build time
    pub fn unit_weights(mut self) -> Self {
        self.unit_weights = true;
        self
    }

    /// Validate column lengths and produce the chunk
    pub fn build(mut self) -> Result<Chunk, InputShapeError> {
        let rows = self
            .numeric
            .values()
            .map(Vec::len)
            .chain(self.categorical.values().map(Vec::len))
            .next()
            .unwrap_or(0);

        if self.unit_weights && !self.numeric.contains_key(WEIGHT_COLUMN) {
            self.numeric
                .insert(WEIGHT_COLUMN.to_string(), vec![1.0; rows]);
        }

        for (name, len) in self
            .numeric
            .iter()
            .map(|(n, v)| (n, v.len()))
            .chain(self.categorical.iter().map(|(n, v)| (n, v.len())))
        {
            if len != rows {
                return Err(InputShapeError::LengthMismatch {
                    column: name.clone(),
                    expected: rows,
                    actual: len,
                });
            }
        }

        Ok(Chunk {
            rows,
            numeric: self.numeric,
            categorical: self.categorical,
        })
    }
}
