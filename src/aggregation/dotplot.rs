//! Incremental dot-plot aggregation
//!
//! [`DotPlotAggregator`] folds chunks of observations into per-dimension
//! running aggregate tables and finalizes them into the dot-plot payload.
//! One instance serves one logical dataset: construct it with the fixed
//! measure and dimension declarations, `add` every chunk, then `collect`.
//!
//! Chunk order never affects the result, and partial aggregators built on
//! separate workers can be combined with [`DotPlotAggregator::merge`]
//! using the same key-union-and-sum rule, so a reduction tree over
//! per-worker instances is equivalent to a single sequential pass.
//!
//! # Example
//!
//! ```rust
//! use dotplot_engine::aggregation::DotPlotAggregator;
//! use dotplot_engine::chunk::Chunk;
//!
//! let mut aggregator = DotPlotAggregator::new(
//!     vec!["CD4".to_string()],
//!     vec!["louvain".to_string()],
//! );
//!
//! let chunk = Chunk::builder()
//!     .measure("CD4", vec![0.0, 3.0, 4.0])
//!     .dimension("louvain", vec!["1".into(), "1".into(), "2".into()])
//!     .unit_weights()
//!     .build()
//!     .unwrap();
//!
//! aggregator.add(&chunk).unwrap();
//! let results = aggregator.collect().unwrap();
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].values[0].mean, vec![1.5, 4.0]);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::aggregation::accumulator::CategoryTable;
use crate::aggregation::result::{DotPlotResult, MeasureSummary};
use crate::chunk::{Chunk, WEIGHT_COLUMN};
use crate::error::{EmptyCategoryError, InputShapeError, Result};

// ============================================================================
// Aggregator Spec
// ============================================================================

/// Declared input shape for one aggregation session
///
/// This is the request shape the orchestration layer sends when it decides
/// a dot plot should be computed: which measures to summarize and which
/// dimensions to group by. Declarations are fixed for the lifetime of the
/// aggregator built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorSpec {
    /// Measure column names, in output order
    pub measures: Vec<String>,

    /// Dimension column names, in output order
    pub dimensions: Vec<String>,
}

// ============================================================================
// Dot Plot Aggregator
// ============================================================================

/// Incremental per-category aggregator for dot-plot data
///
/// Owns one running [`CategoryTable`] per dimension, registered on first
/// `add` in declaration order. Memory is proportional to the number of
/// distinct category values times the number of measures, independent of
/// total row count.
///
/// Single-writer: `add` and `merge` take `&mut self` and the instance
/// holds no locks. Callers wanting parallelism run one instance per
/// worker and reduce with [`DotPlotAggregator::merge`].
#[derive(Debug, Clone)]
pub struct DotPlotAggregator {
    /// Declared measure names, fixed at construction
    measures: Vec<String>,

    /// Declared dimension names, fixed at construction
    dimensions: Vec<String>,

    /// Dimension name to running aggregate table, in first-add order
    tables: IndexMap<String, CategoryTable>,
}

impl DotPlotAggregator {
    /// Create an aggregator for the declared measures and dimensions
    pub fn new(measures: Vec<String>, dimensions: Vec<String>) -> Self {
        Self {
            measures,
            dimensions,
            tables: IndexMap::new(),
        }
    }

    /// Declared measure names
    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    /// Declared dimension names
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Check that the chunk carries every declared column plus the weight
    /// column
    ///
    /// Runs before any mutation so a malformed chunk aborts the call with
    /// the running tables untouched.
    fn validate_chunk(&self, chunk: &Chunk) -> Result<()> {
        let missing_column = |column: &str| InputShapeError::MissingColumn {
            column: column.to_string(),
            chunk_columns: chunk.column_names(),
        };

        for measure in &self.measures {
            if chunk.measure(measure).is_none() {
                return Err(missing_column(measure).into());
            }
        }
        for dimension in &self.dimensions {
            if chunk.dimension(dimension).is_none() {
                return Err(missing_column(dimension).into());
            }
        }
        // The weight column is required by the chunk contract even though
        // counts derive from row counts, not from summed weights.
        if chunk.weights().is_none() {
            return Err(missing_column(WEIGHT_COLUMN).into());
        }

        Ok(())
    }

    /// Fold a chunk into the running aggregate tables
    ///
    /// Groups the chunk's rows by each declared dimension independently
    /// and merges the per-chunk partial tables into the running tables by
    /// outer union on key. Safe to call any number of times before
    /// `collect`; a zero-row chunk changes no accumulator.
    pub fn add(&mut self, chunk: &Chunk) -> Result<()> {
        self.validate_chunk(chunk)?;

        let measure_columns: Vec<&[f64]> = self
            .measures
            .iter()
            .filter_map(|name| chunk.measure(name))
            .collect();

        for dimension in &self.dimensions {
            let keys = chunk
                .dimension(dimension)
                .unwrap_or_default();

            let mut partial = CategoryTable::new(self.measures.len());
            for (row, key) in keys.iter().enumerate() {
                partial.fold_row(
                    key.clone(),
                    measure_columns.iter().map(|column| column[row]),
                );
            }
            trace!(
                "Dimension '{}': {} categories in chunk",
                dimension,
                partial.len()
            );

            self.tables
                .entry(dimension.clone())
                .or_insert_with(|| CategoryTable::new(self.measures.len()))
                .merge(partial);
        }

        debug!(
            "Folded chunk of {} rows into {} dimension tables",
            chunk.len(),
            self.dimensions.len()
        );
        Ok(())
    }

    /// Merge another aggregator into this one
    ///
    /// Both instances must have been built with identical declarations.
    /// The merge is the same key-union-and-sum rule `add` uses, and is
    /// associative, so per-worker aggregators can be reduced in any tree
    /// shape.
    pub fn merge(&mut self, other: DotPlotAggregator) -> Result<()> {
        if self.measures != other.measures || self.dimensions != other.dimensions {
            return Err(InputShapeError::DeclarationMismatch(format!(
                "cannot merge aggregator over ({:?}, {:?}) into ({:?}, {:?})",
                other.measures, other.dimensions, self.measures, self.dimensions
            ))
            .into());
        }

        for (dimension, table) in other.tables {
            self.tables
                .entry(dimension)
                .or_insert_with(|| CategoryTable::new(self.measures.len()))
                .merge(table);
        }
        Ok(())
    }

    /// Finalize the running tables into dot-plot payloads
    ///
    /// Pure read: calling it again with no intervening `add` returns an
    /// identical result, and after further `add` calls the result reflects
    /// every chunk folded in so far. Emits one record per dimension seen
    /// by `add`, in first-add order; an aggregator that never saw a chunk
    /// returns an empty list.
    pub fn collect(&self) -> Result<Vec<DotPlotResult>> {
        let mut results = Vec::with_capacity(self.tables.len());

        for (dimension, table) in &self.tables {
            let categories = table.sorted_keys();

            let mut values = Vec::with_capacity(self.measures.len());
            for (index, measure) in self.measures.iter().enumerate() {
                let mut mean = Vec::with_capacity(categories.len());
                let mut fraction_expressed = Vec::with_capacity(categories.len());

                for category in &categories {
                    let accumulator = table
                        .get(category)
                        .map(|accumulators| accumulators[index])
                        .unwrap_or_default();
                    let empty_category = || EmptyCategoryError {
                        dimension: dimension.clone(),
                        category: category.to_string(),
                    };
                    mean.push(accumulator.mean().ok_or_else(empty_category)?);
                    fraction_expressed
                        .push(accumulator.fraction_expressed().ok_or_else(empty_category)?);
                }

                values.push(MeasureSummary {
                    name: measure.clone(),
                    mean,
                    fraction_expressed,
                });
            }

            results.push(DotPlotResult {
                categories,
                name: dimension.clone(),
                values,
            });
        }

        debug!("Collected {} dot plot results", results.len());
        Ok(results)
    }
}

impl From<&AggregatorSpec> for DotPlotAggregator {
    fn from(spec: &AggregatorSpec) -> Self {
        Self::new(spec.measures.clone(), spec.dimensions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::CategoryValue;

    fn declared() -> DotPlotAggregator {
        DotPlotAggregator::new(
            vec!["CD4".to_string(), "CD8".to_string()],
            vec!["louvain".to_string()],
        )
    }

    fn chunk(cd4: Vec<f64>, cd8: Vec<f64>, louvain: Vec<&str>) -> Chunk {
        Chunk::builder()
            .measure("CD4", cd4)
            .measure("CD8", cd8)
            .dimension(
                "louvain",
                louvain.into_iter().map(CategoryValue::from).collect(),
            )
            .unit_weights()
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_chunk_derived_metrics() {
        let mut aggregator = declared();
        aggregator
            .add(&chunk(
                vec![0.0, 0.0, 3.0, 4.0, 5.0],
                vec![1.0, 1.0, 1.0, 1.0, 1.0],
                vec!["a", "a", "a", "a", "a"],
            ))
            .unwrap();

        let results = aggregator.collect().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "louvain");
        assert_eq!(results[0].values[0].mean, vec![2.4]);
        assert_eq!(results[0].values[0].fraction_expressed, vec![0.6]);
        assert_eq!(results[0].values[1].mean, vec![1.0]);
        assert_eq!(results[0].values[1].fraction_expressed, vec![1.0]);
    }

    #[test]
    fn test_chunked_equals_whole() {
        let mut whole = declared();
        whole
            .add(&chunk(
                vec![1.0, 2.0, 3.0, 0.0],
                vec![0.0, 0.0, 5.0, 5.0],
                vec!["a", "b", "a", "b"],
            ))
            .unwrap();

        let mut chunked = declared();
        chunked
            .add(&chunk(vec![1.0, 2.0], vec![0.0, 0.0], vec!["a", "b"]))
            .unwrap();
        chunked
            .add(&chunk(vec![3.0, 0.0], vec![5.0, 5.0], vec!["a", "b"]))
            .unwrap();

        assert_eq!(whole.collect().unwrap(), chunked.collect().unwrap());
    }

    #[test]
    fn test_missing_column_rejected_without_mutation() {
        let mut aggregator = declared();
        aggregator
            .add(&chunk(vec![1.0], vec![2.0], vec!["a"]))
            .unwrap();
        let before = aggregator.collect().unwrap();

        let malformed = Chunk::builder()
            .measure("CD4", vec![9.0])
            .dimension("louvain", vec!["z".into()])
            .unit_weights()
            .build()
            .unwrap();
        let err = aggregator.add(&malformed).unwrap_err();
        assert!(matches!(
            err,
            Error::InputShape(InputShapeError::MissingColumn { .. })
        ));

        assert_eq!(aggregator.collect().unwrap(), before);
    }

    #[test]
    fn test_missing_weight_column_rejected() {
        let mut aggregator = declared();
        let no_weights = Chunk::builder()
            .measure("CD4", vec![1.0])
            .measure("CD8", vec![1.0])
            .dimension("louvain", vec!["a".into()])
            .build()
            .unwrap();

        let err = aggregator.add(&no_weights).unwrap_err();
        match err {
            Error::InputShape(InputShapeError::MissingColumn { column, .. }) => {
                assert_eq!(column, WEIGHT_COLUMN);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collect_before_any_add_is_empty() {
        let aggregator = declared();
        assert!(aggregator.collect().unwrap().is_empty());
    }

    #[test]
    fn test_zero_row_chunk_is_a_no_op() {
        let mut aggregator = declared();
        aggregator
            .add(&chunk(vec![1.0, 2.0], vec![0.0, 1.0], vec!["a", "b"]))
            .unwrap();
        let before = aggregator.collect().unwrap();

        aggregator
            .add(&chunk(Vec::new(), Vec::new(), Vec::new()))
            .unwrap();
        assert_eq!(aggregator.collect().unwrap(), before);
    }

    #[test]
    fn test_undeclared_dimension_ignored() {
        let mut aggregator = declared();
        let extra = Chunk::builder()
            .measure("CD4", vec![1.0])
            .measure("CD8", vec![2.0])
            .measure("TNFRSF4", vec![3.0])
            .dimension("louvain", vec!["a".into()])
            .dimension("cell_type", vec!["T".into()])
            .unit_weights()
            .build()
            .unwrap();
        aggregator.add(&extra).unwrap();

        let results = aggregator.collect().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "louvain");
        assert_eq!(results[0].values.len(), 2);
    }

    #[test]
    fn test_merge_reduction_tree() {
        let full = {
            let mut aggregator = declared();
            aggregator
                .add(&chunk(
                    vec![1.0, 2.0, 3.0, 4.0],
                    vec![0.0, 1.0, 0.0, 1.0],
                    vec!["a", "a", "b", "c"],
                ))
                .unwrap();
            aggregator.collect().unwrap()
        };

        let mut worker_1 = declared();
        worker_1
            .add(&chunk(vec![1.0, 2.0], vec![0.0, 1.0], vec!["a", "a"]))
            .unwrap();
        let mut worker_2 = declared();
        worker_2
            .add(&chunk(vec![3.0, 4.0], vec![0.0, 1.0], vec!["b", "c"]))
            .unwrap();

        worker_1.merge(worker_2).unwrap();
        assert_eq!(worker_1.collect().unwrap(), full);
    }

    #[test]
    fn test_merge_declaration_mismatch() {
        let mut aggregator = declared();
        let other = DotPlotAggregator::new(vec!["CD4".to_string()], vec!["louvain".to_string()]);

        let err = aggregator.merge(other).unwrap_err();
        assert!(matches!(
            err,
            Error::InputShape(InputShapeError::DeclarationMismatch(_))
        ));
    }

    #[test]
    fn test_from_spec() {
        let spec: AggregatorSpec = serde_json::from_str(
            r#"{"measures": ["CD4"], "dimensions": ["louvain", "cell_type"]}"#,
        )
        .unwrap();
        let aggregator = DotPlotAggregator::from(&spec);

        assert_eq!(aggregator.measures(), ["CD4"]);
        assert_eq!(aggregator.dimensions(), ["louvain", "cell_type"]);
    }
}
