//! Dot-plot aggregation engine for chunked measurement data
//!
//! This library computes the data behind dot-plot visualizations without
//! ever holding the full dataset in memory:
//! - Chunked, order-independent ingestion with exact mergeable aggregates
//! - Multiple independent grouping dimensions per pass
//! - Deterministic, naturally sorted finalization
//! - Memory bounded by distinct categories, not by row count
//!
//! Callers construct a [`DotPlotAggregator`] with the measure and
//! dimension declarations for the session, fold in chunks with `add`, and
//! finalize with `collect`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

/// Natural alphanumeric ordering for category labels
pub mod natsort;

/// Columnar chunk tables supplied by upstream data layers
pub mod chunk;

/// The incremental aggregation engine and its result payloads
pub mod aggregation;

// Re-export main types
pub use aggregation::{AggregatorSpec, DotPlotAggregator, DotPlotResult, MeasureSummary};
pub use chunk::{Chunk, ChunkBuilder, WEIGHT_COLUMN};
pub use error::{Error, Result};
pub use types::CategoryValue;
