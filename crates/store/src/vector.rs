//! Dense vector primitives shared by the store and by callers.
//!
//! Every binary operation checks operand lengths and reports a
//! [`NestError::DimensionMismatch`] instead of truncating.

use nest_core::NestError;

fn check_dims(a: &[f32], b: &[f32]) -> Result<(), NestError> {
    if a.len() != b.len() {
        return Err(NestError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Inner product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32, NestError> {
    check_dims(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// L2 norm.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `v` to unit length. A zero vector is returned unchanged.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = magnitude(v);
    if norm == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / norm).collect()
}

/// `dot(a, b) / (|a| * |b|)`, or 0.0 when either operand has zero length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, NestError> {
    let product = dot(a, b)?;
    let norms = magnitude(a) * magnitude(b);
    if norms == 0.0 {
        return Ok(0.0);
    }
    Ok(product / norms)
}

pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32, NestError> {
    check_dims(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt())
}
