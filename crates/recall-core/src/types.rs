//! Domain types shared by the diff and index engines.

use serde::{Deserialize, Serialize};

/// Label attached to each stored vector. Signed, matching the
/// convention of external callers that reserve negatives for "absent".
pub type VectorId = i64;

/// Distance semantics for a vector index.
///
/// `L2` is squared euclidean (no square root); smaller is better.
/// `InnerProduct` is a dot product; larger is better. Search results
/// are always ordered best-first for the configured metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Metric {
    L2,
    InnerProduct,
}

/// A single search result: the stored vector's id and its distance
/// (or score, for `InnerProduct`) relative to the query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    pub id: VectorId,
    pub distance: f32,
}
