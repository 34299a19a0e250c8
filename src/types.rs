//! Core data types used throughout the engine
//!
//! # Key Types
//!
//! - **`CategoryValue`**: a distinct value of a grouping dimension (for
//!   example a cluster label), stored as an opaque scalar so categories of
//!   mixed types still key tables and sort deterministically
//!
//! # Example
//!
//! ```rust
//! use dotplot_engine::types::CategoryValue;
//!
//! let a = CategoryValue::from("cluster2");
//! let b = CategoryValue::from("cluster10");
//! assert!(a < b);
//!
//! let n = CategoryValue::from(42i64);
//! assert_eq!(n.to_string(), "42");
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::natsort::natural_cmp;

/// A category key: one distinct value of a grouping dimension
///
/// Upstream layers produce string labels, integer codes, or boolean flags
/// as grouping values. All three are representable so a chunk's dimension
/// column can carry whatever the source data uses, and the engine never
/// needs to coerce keys to text for bookkeeping.
///
/// Ordering is total: values of the same variant compare naturally
/// (strings in natural alphanumeric order, integers numerically, booleans
/// false before true), and mixed variants order by variant rank
/// (Bool < Int < Str) so heterogeneous key sets still finalize
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    /// Boolean flag category (e.g. a doublet marker)
    Bool(bool),
    /// Integer-coded category (e.g. a cluster id)
    Int(i64),
    /// Text label category (e.g. "cluster10", "CD4 T cells")
    Str(String),
}

impl CategoryValue {
    /// Rank used to order values of different variants
    fn variant_rank(&self) -> u8 {
        match self {
            CategoryValue::Bool(_) => 0,
            CategoryValue::Int(_) => 1,
            CategoryValue::Str(_) => 2,
        }
    }
}

impl PartialOrd for CategoryValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CategoryValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CategoryValue::Bool(a), CategoryValue::Bool(b)) => a.cmp(b),
            (CategoryValue::Int(a), CategoryValue::Int(b)) => a.cmp(b),
            (CategoryValue::Str(a), CategoryValue::Str(b)) => natural_cmp(a, b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Bool(v) => write!(f, "{}", v),
            CategoryValue::Int(v) => write!(f, "{}", v),
            CategoryValue::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for CategoryValue {
    fn from(v: &str) -> Self {
        CategoryValue::Str(v.to_string())
    }
}

impl From<String> for CategoryValue {
    fn from(v: String) -> Self {
        CategoryValue::Str(v)
    }
}

impl From<i64> for CategoryValue {
    fn from(v: i64) -> Self {
        CategoryValue::Int(v)
    }
}

impl From<bool> for CategoryValue {
    fn from(v: bool) -> Self {
        CategoryValue::Bool(v)
    }
}
