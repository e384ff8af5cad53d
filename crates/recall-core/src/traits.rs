use crate::error::Result;
use crate::types::Neighbor;

/// The minimal surface every vector index exposes.
///
/// `vectors` and `queries` are flat row-major buffers whose length must
/// be a multiple of `dim()`. `search` returns one best-first list of at
/// most `k` neighbors per query row.
pub trait VectorIndex: Send + Sync {
    fn dim(&self) -> usize;
    fn ntotal(&self) -> usize;
    fn add(&mut self, vectors: &[f32]) -> Result<()>;
    fn search(&self, queries: &[f32], k: usize) -> Result<Vec<Vec<Neighbor>>>;
    fn reset(&mut self);
}
