//! Scoring for each [`Metric`]. The enum itself lives in `nest-core` so
//! configuration can parse it at load time.

use nest_core::NestError;
pub use nest_core::Metric;

use crate::vector::{cosine_similarity, dot, euclidean_distance};

/// Similarity of `stored` to `query` under `metric`; higher is closer.
pub fn score(metric: Metric, stored: &[f32], query: &[f32]) -> Result<f32, NestError> {
    match metric {
        Metric::Cosine => cosine_similarity(stored, query),
        Metric::DotProduct => dot(stored, query),
        Metric::Euclidean => euclidean_distance(stored, query).map(|d| 1.0 / (1.0 + d)),
    }
}
