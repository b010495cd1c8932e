//! Allocation helpers (softmax weights, weighted sampling).
//!
//! Deterministic utilities for turning payout estimates into a probability
//! distribution, and for drawing from one with a caller-supplied RNG.

use rand::rngs::StdRng;
use rand::Rng;

/// Compute stable softmax weights over a slice of scores.
///
/// - `temperature` controls sharpness (must be finite and > 0; other values
///   fall back to 1.0).
/// - Uses the standard max-trick for numerical stability.
/// - Returns weights that sum to 1, aligned to the input indices (or empty
///   if the input is empty).
pub fn softmax_weights(scores: &[f64], temperature: f64) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let t = if temperature.is_finite() && temperature > 0.0 {
        temperature
    } else {
        1.0
    };

    let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out: Vec<f64> = Vec::with_capacity(scores.len());
    let mut denom = 0.0;
    for &v in scores {
        let x = ((v - max_score) / t).exp();
        denom += x;
        out.push(x);
    }
    if denom <= 0.0 || !denom.is_finite() {
        // Degenerate fallback: uniform.
        let n = scores.len() as f64;
        return vec![1.0 / n; scores.len()];
    }

    for v in &mut out {
        *v /= denom;
    }
    out
}

/// Draw an index from a weight vector using one uniform draw.
///
/// Walks the CDF; falls back to the last index if floating-point shortfall
/// leaves the cumulative sum under the drawn value. Returns `None` only for
/// empty input.
pub fn sample_weighted(weights: &[f64], rng: &mut StdRng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let r: f64 = rng.random();
    let mut cdf = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cdf += w;
        if r < cdf {
            return Some(i);
        }
    }
    Some(weights.len() - 1)
}
