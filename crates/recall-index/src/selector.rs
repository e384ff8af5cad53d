//! Id selectors for batched removal.

use std::collections::HashSet;

use recall_core::types::VectorId;

/// Selects a set of vector ids, either explicitly or as a half-open
/// range `[min, max)`.
#[derive(Debug, Clone)]
pub enum IdSelector {
    Batch(HashSet<VectorId>),
    Range { min: VectorId, max: VectorId },
}

impl IdSelector {
    pub fn batch<I: IntoIterator<Item = VectorId>>(ids: I) -> Self {
        IdSelector::Batch(ids.into_iter().collect())
    }

    pub fn range(min: VectorId, max: VectorId) -> Self {
        IdSelector::Range { min, max }
    }

    pub fn is_member(&self, id: VectorId) -> bool {
        match self {
            IdSelector::Batch(ids) => ids.contains(&id),
            IdSelector::Range { min, max } => (*min..*max).contains(&id),
        }
    }
}
