//! Error types for the aggregation engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum Error {
    /// A chunk does not match the declared input shape
    #[error("Input shape error: {0}")]
    InputShape(#[from] InputShapeError),

    /// A category reached finalization with a zero observation count
    #[error("Empty category error: {0}")]
    EmptyCategory(#[from] EmptyCategoryError),
}

/// Input shape errors
///
/// Raised synchronously from `add` (or chunk construction) when a chunk
/// violates the declared column contract. The call aborts with no partial
/// mutation committed, so a malformed chunk never corrupts running
/// aggregates.
#[derive(Error, Debug)]
pub enum InputShapeError {
    /// A declared measure, dimension, or the weight column is missing
    #[error("Missing column '{column}' (chunk has: {})", chunk_columns.join(", "))]
    MissingColumn {
        /// The declared column that was not found
        column: String,
        /// The columns the chunk actually carries
        chunk_columns: Vec<String>,
    },

    /// A column's length disagrees with the chunk's row count
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// The offending column
        column: String,
        /// Row count established by the first column
        expected: usize,
        /// Row count of the offending column
        actual: usize,
    },

    /// Two aggregators with different declarations cannot be merged
    #[error("Declaration mismatch: {0}")]
    DeclarationMismatch(String),
}

/// Internal invariant violation: a key with zero count reached division
///
/// Unreachable given correct `add` usage, since a key only exists because
/// at least one row was folded in for it. Surfacing it indicates a defect
/// in the engine or its callers, not a user input problem.
#[derive(Error, Debug)]
#[error("Category '{category}' of dimension '{dimension}' has zero observations")]
pub struct EmptyCategoryError {
    /// Dimension whose table held the empty category
    pub dimension: String,
    /// The offending category key, rendered as text
    pub category: String,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
