//! Cosine similarity over fixed-dimension `f32` vectors.

use crate::error::{Error, Result};

/// Cosine similarity of `a` and `b`, in `[-1, 1]`.
///
/// Returns `Ok(None)` when either vector has zero magnitude: an all-zero
/// embedding is a valid (if degenerate) model output, so callers rank it
/// last instead of failing. Errors only when the dimensions disagree.
pub fn cosine(a: &[f32], b: &[f32]) -> Result<Option<f32>> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch { expected: a.len(), found: b.len() });
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(None);
    }
    Ok(Some(dot / (norm_a.sqrt() * norm_b.sqrt())))
}

/// L2-normalize `v` in place. Zero vectors are left untouched.
pub fn normalize_l2(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
}
