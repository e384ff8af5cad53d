//! String-driven index construction and cloning.
//!
//! The factory grammar is a comma-separated component list. Supported
//! descriptions are `"Flat"` and `"IDMap,Flat"`; components are
//! case-sensitive, surrounding whitespace is tolerated.

use serde::{Deserialize, Serialize};

use recall_core::error::{Error, Result};
use recall_core::traits::VectorIndex;
use recall_core::types::{Metric, Neighbor};

use crate::flat::FlatIndex;
use crate::idmap::IdMapIndex;

/// Any index the factory can build. Owned, serializable, clonable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnyIndex {
    Flat(FlatIndex),
    IdMap(IdMapIndex),
}

impl AnyIndex {
    pub fn as_flat(&self) -> Option<&FlatIndex> {
        match self {
            AnyIndex::Flat(ix) => Some(ix),
            AnyIndex::IdMap(_) => None,
        }
    }

    pub fn as_id_map(&self) -> Option<&IdMapIndex> {
        match self {
            AnyIndex::IdMap(ix) => Some(ix),
            AnyIndex::Flat(_) => None,
        }
    }

    pub fn as_id_map_mut(&mut self) -> Option<&mut IdMapIndex> {
        match self {
            AnyIndex::IdMap(ix) => Some(ix),
            AnyIndex::Flat(_) => None,
        }
    }

    /// Structural invariants a decoded index must satisfy before use.
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            AnyIndex::Flat(ix) => ix.check_consistent(),
            AnyIndex::IdMap(ix) => ix.check_consistent(),
        }
    }
}

impl VectorIndex for AnyIndex {
    fn dim(&self) -> usize {
        match self {
            AnyIndex::Flat(ix) => ix.dim(),
            AnyIndex::IdMap(ix) => ix.dim(),
        }
    }

    fn ntotal(&self) -> usize {
        match self {
            AnyIndex::Flat(ix) => ix.ntotal(),
            AnyIndex::IdMap(ix) => ix.ntotal(),
        }
    }

    fn add(&mut self, vectors: &[f32]) -> Result<()> {
        match self {
            AnyIndex::Flat(ix) => ix.add(vectors),
            AnyIndex::IdMap(ix) => ix.add(vectors),
        }
    }

    fn search(&self, queries: &[f32], k: usize) -> Result<Vec<Vec<Neighbor>>> {
        match self {
            AnyIndex::Flat(ix) => ix.search(queries, k),
            AnyIndex::IdMap(ix) => ix.search(queries, k),
        }
    }

    fn reset(&mut self) {
        match self {
            AnyIndex::Flat(ix) => ix.reset(),
            AnyIndex::IdMap(ix) => ix.reset(),
        }
    }
}

/// Build an index from a factory description.
pub fn index_factory(dim: usize, description: &str, metric: Metric) -> Result<AnyIndex> {
    let components: Vec<&str> = description.split(',').map(str::trim).collect();
    match components.as_slice() {
        ["Flat"] => Ok(AnyIndex::Flat(FlatIndex::new(dim, metric)?)),
        ["IDMap", "Flat"] => Ok(AnyIndex::IdMap(IdMapIndex::new(FlatIndex::new(dim, metric)?))),
        _ => Err(Error::InvalidFactory(description.to_string())),
    }
}

/// Deep copy. The clone shares no storage with the original.
pub fn clone_index(index: &AnyIndex) -> AnyIndex {
    index.clone()
}
