//! Caller-supplied id wrapper around a flat index.
//!
//! The inner index keeps its sequential labels; this wrapper maintains
//! the sequential-to-external mapping, so search results and removals
//! speak external ids and those ids survive compaction.

use serde::{Deserialize, Serialize};

use recall_core::error::{Error, Result};
use recall_core::traits::VectorIndex;
use recall_core::types::{Neighbor, VectorId};

use crate::flat::FlatIndex;
use crate::selector::IdSelector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdMapIndex {
    inner: FlatIndex,
    ids: Vec<VectorId>,
}

impl IdMapIndex {
    pub fn new(inner: FlatIndex) -> Self {
        IdMapIndex { inner, ids: Vec::new() }
    }

    pub fn add_with_ids(&mut self, vectors: &[f32], ids: &[VectorId]) -> Result<()> {
        let rows = vectors.len() / self.inner.dim();
        if vectors.len() % self.inner.dim() != 0 || rows != ids.len() {
            return Err(Error::InvalidParameter(format!(
                "expected {} ids for {} values of dimension {}",
                rows,
                vectors.len(),
                self.inner.dim()
            )));
        }
        self.inner.add(vectors)?;
        self.ids.extend_from_slice(ids);
        Ok(())
    }

    /// Structural invariants a decoded index must satisfy before use.
    pub(crate) fn check_consistent(&self) -> Result<()> {
        self.inner.check_consistent()?;
        if self.ids.len() != self.inner.ntotal() {
            return Err(Error::Corrupt(format!(
                "id table covers {} of {} vectors",
                self.ids.len(),
                self.inner.ntotal()
            )));
        }
        Ok(())
    }

    /// Copy of the stored vector with external id `id`.
    pub fn reconstruct(&self, id: VectorId) -> Result<Vec<f32>> {
        let pos = self
            .ids
            .iter()
            .position(|&x| x == id)
            .ok_or_else(|| Error::NotFound(format!("vector id {}", id)))?;
        self.inner.reconstruct(pos as VectorId)
    }

    pub fn range_search(&self, query: &[f32], radius: f32) -> Result<Vec<Neighbor>> {
        let mut hits = self.inner.range_search(query, radius)?;
        for h in &mut hits {
            h.id = self.ids[h.id as usize];
        }
        Ok(hits)
    }

    /// Remove by external id; remaining external ids are unchanged.
    pub fn remove_ids(&mut self, selector: &IdSelector) -> usize {
        // Translate to the inner index's sequential labels.
        let doomed: Vec<VectorId> = self
            .ids
            .iter()
            .enumerate()
            .filter(|(_, &id)| selector.is_member(id))
            .map(|(i, _)| i as VectorId)
            .collect();
        let removed = self.inner.remove_ids(&IdSelector::batch(doomed));
        self.ids.retain(|id| !selector.is_member(*id));
        removed
    }
}

impl VectorIndex for IdMapIndex {
    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn ntotal(&self) -> usize {
        self.inner.ntotal()
    }

    /// An id-mapped index has no implicit labels to assign.
    fn add(&mut self, _vectors: &[f32]) -> Result<()> {
        Err(Error::InvalidParameter(
            "id-mapped index requires add_with_ids".to_string(),
        ))
    }

    fn search(&self, queries: &[f32], k: usize) -> Result<Vec<Vec<Neighbor>>> {
        let mut results = self.inner.search(queries, k)?;
        for hits in &mut results {
            for h in hits.iter_mut() {
                h.id = self.ids[h.id as usize];
            }
        }
        Ok(results)
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.ids.clear();
    }
}
