//! Exhaustive flat index.
//!
//! Vectors live in one contiguous row-major buffer and are labelled by
//! their insertion position `0..ntotal`. Search scans everything; with
//! the dimensions and corpus sizes the recall pipeline produces this
//! is both exact and fast enough.

use serde::{Deserialize, Serialize};

use recall_core::error::{Error, Result};
use recall_core::traits::VectorIndex;
use recall_core::types::{Metric, Neighbor, VectorId};

use crate::metric;
use crate::selector::IdSelector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dim: usize,
    metric: Metric,
    data: Vec<f32>,
}

impl FlatIndex {
    pub fn new(dim: usize, metric: Metric) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidParameter("dimension must be non-zero".to_string()));
        }
        Ok(FlatIndex { dim, metric, data: Vec::new() })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Validate a flat row-major batch and return its row count.
    fn check_batch(&self, vectors: &[f32]) -> Result<usize> {
        if vectors.len() % self.dim != 0 {
            return Err(Error::DimensionMismatch { expected: self.dim, got: vectors.len() });
        }
        Ok(vectors.len() / self.dim)
    }

    /// Structural invariants a decoded index must satisfy before use.
    pub(crate) fn check_consistent(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(Error::Corrupt("zero dimension".to_string()));
        }
        if self.data.len() % self.dim != 0 {
            return Err(Error::Corrupt(format!(
                "{} values do not fill rows of dimension {}",
                self.data.len(),
                self.dim
            )));
        }
        Ok(())
    }

    /// Copy of the stored vector labelled `id`.
    pub fn reconstruct(&self, id: VectorId) -> Result<Vec<f32>> {
        let i = usize::try_from(id)
            .map_err(|_| Error::NotFound(format!("vector id {}", id)))?;
        if i >= self.ntotal() {
            return Err(Error::NotFound(format!("vector id {}", id)));
        }
        Ok(self.row(i).to_vec())
    }

    /// All neighbors within `radius` of `query`, best-first.
    ///
    /// For L2 the cutoff is `distance <= radius`; for inner product it
    /// is `score >= radius`, mirroring the metric's sense.
    pub fn range_search(&self, query: &[f32], radius: f32) -> Result<Vec<Neighbor>> {
        if query.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, got: query.len() });
        }
        let mut hits = Vec::new();
        for i in 0..self.ntotal() {
            let d = metric::score(self.metric, query, self.row(i));
            let within = match self.metric {
                Metric::L2 => d <= radius,
                Metric::InnerProduct => d >= radius,
            };
            if within {
                hits.push(Neighbor { id: i as VectorId, distance: d });
            }
        }
        sort_best_first(self.metric, &mut hits);
        Ok(hits)
    }

    /// Remove all selected vectors. Survivors are compacted and
    /// relabelled sequentially from zero. Returns the removed count.
    pub fn remove_ids(&mut self, selector: &IdSelector) -> usize {
        let rows = self.ntotal();
        let mut kept = Vec::with_capacity(self.data.len());
        let mut removed = 0;
        for i in 0..rows {
            if selector.is_member(i as VectorId) {
                removed += 1;
            } else {
                kept.extend_from_slice(self.row(i));
            }
        }
        self.data = kept;
        removed
    }
}

impl VectorIndex for FlatIndex {
    fn dim(&self) -> usize {
        self.dim
    }

    fn ntotal(&self) -> usize {
        self.data.len() / self.dim
    }

    fn add(&mut self, vectors: &[f32]) -> Result<()> {
        self.check_batch(vectors)?;
        self.data.extend_from_slice(vectors);
        Ok(())
    }

    fn search(&self, queries: &[f32], k: usize) -> Result<Vec<Vec<Neighbor>>> {
        let n_queries = self.check_batch(queries)?;
        let mut out = Vec::with_capacity(n_queries);
        for q in 0..n_queries {
            let query = &queries[q * self.dim..(q + 1) * self.dim];
            let mut hits: Vec<Neighbor> = (0..self.ntotal())
                .map(|i| Neighbor {
                    id: i as VectorId,
                    distance: metric::score(self.metric, query, self.row(i)),
                })
                .collect();
            sort_best_first(self.metric, &mut hits);
            hits.truncate(k);
            out.push(hits);
        }
        Ok(out)
    }

    fn reset(&mut self) {
        self.data.clear();
    }
}

pub(crate) fn sort_best_first(m: Metric, hits: &mut [Neighbor]) {
    // total_cmp keeps this a strict weak ordering even with NaN
    // distances; under L2 they rank past +inf, so last.
    hits.sort_by(|a, b| {
        let ord = match m {
            Metric::L2 => a.distance.total_cmp(&b.distance),
            Metric::InnerProduct => b.distance.total_cmp(&a.distance),
        };
        // Tie-break on id keeps results deterministic.
        ord.then_with(|| a.id.cmp(&b.id))
    });
}
