//! Incremental Dot-Plot Aggregation Engine
//!
//! This module computes per-category summary statistics over streamed
//! chunks of tabular measurement data, producing the inputs a dot plot
//! needs: one dot per category and measure, encoding mean intensity and
//! fraction of non-zero observations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │              Chunks                 │
//! │  columnar row slices, any order     │
//! └─────────────────────────────────────┘
//!                  ↓ add()
//! ┌─────────────────────────────────────┐
//! │       Running Aggregate Tables      │
//! │  per dimension: key → {sum, count,  │
//! │  non_zero} per measure              │
//! └─────────────────────────────────────┘
//!                  ↓ collect()
//! ┌─────────────────────────────────────┐
//! │         Dot Plot Payload            │
//! │  naturally sorted categories with   │
//! │  mean / fractionExpressed series    │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Key Components
//!
//! - **Measure Accumulator**: exact, mergeable `{sum, count, non_zero}`
//!   triple per category and measure
//! - **Category Table**: per-dimension running aggregate table with
//!   outer-union merge
//! - **Dot Plot Aggregator**: the single-use engine folding chunks and
//!   finalizing results
//!
//! # Example
//!
//! ```rust,ignore
//! use dotplot_engine::aggregation::DotPlotAggregator;
//!
//! let mut aggregator = DotPlotAggregator::new(measures, dimensions);
//! for chunk in chunks {
//!     aggregator.add(&chunk)?;
//! }
//! let payload = aggregator.collect()?;
//! ```

pub mod accumulator;
pub mod dotplot;
pub mod result;

// Re-export main types
pub use accumulator::{CategoryTable, MeasureAccumulator};
pub use dotplot::{AggregatorSpec, DotPlotAggregator};
pub use result::{DotPlotResult, MeasureSummary};
