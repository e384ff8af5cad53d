//! Distance kernels.
//!
//! `score` reports in the configured metric's native sense: squared
//! euclidean distance for `L2` (smaller is better), dot product for
//! `InnerProduct` (larger is better). `better` orders two scores
//! accordingly so search code never branches on the metric itself.

use recall_core::types::Metric;

pub fn score(metric: Metric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        Metric::L2 => squared_l2(a, b),
        Metric::InnerProduct => dot(a, b),
    }
}

/// True when `candidate` beats `incumbent` under `metric`.
pub fn better(metric: Metric, candidate: f32, incumbent: f32) -> bool {
    match metric {
        Metric::L2 => candidate < incumbent,
        Metric::InnerProduct => candidate > incumbent,
    }
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
