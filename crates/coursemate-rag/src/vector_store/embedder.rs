//! Text embedding for the in-memory backend.

use std::cmp::Ordering;
use std::sync::LazyLock;

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use regex::Regex;

/// Turns text into a fixed-length vector.
pub trait Embedder: Send + Sync {
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Array1<f32>;
}

/// Feature-hashed bag of lowercase word tokens, L2-normalised.
///
/// Texts that share no tokens have cosine distance 1.0.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Array1<f32> {
        let mut vector = Array1::<f32>::zeros(self.dimensions);
        let lowered = text.to_lowercase();
        for token in TOKEN_RE.find_iter(&lowered) {
            let bucket = (fnv1a(token.as_str().as_bytes()) % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm = l2_norm(vector.view());
        if norm > f32::EPSILON {
            vector /= norm;
        }
        vector
    }
}

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

fn l2_norm(v: ArrayView1<'_, f32>) -> f32 {
    v.dot(&v).sqrt()
}

fn distance_from_parts(dot: f32, norm_a: f32, norm_b: f32) -> f32 {
    let denom = norm_a * norm_b;
    if denom <= f32::EPSILON {
        return 1.0;
    }
    1.0 - dot / denom
}

/// `1 - cos(a, b)`; zero vectors and mismatched lengths are treated as unrelated.
pub fn cosine_distance(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    if a.len() != b.len() {
        return 1.0;
    }
    distance_from_parts(a.dot(&b), l2_norm(a), l2_norm(b))
}

/// Cosine distance from `query` to every row of `candidates`, nearest first.
///
/// Returns `(row, distance)` pairs. Ties keep row order.
pub fn rank_by_distance(
    query: ArrayView1<'_, f32>,
    candidates: ArrayView2<'_, f32>,
) -> Vec<(usize, f32)> {
    if candidates.ncols() != query.len() {
        return (0..candidates.nrows()).map(|row| (row, 1.0)).collect();
    }

    let dots = candidates.dot(&query);
    let norms = candidates.map_axis(Axis(1), l2_norm);
    let query_norm = l2_norm(query);

    let mut ranked: Vec<(usize, f32)> = dots
        .iter()
        .zip(norms.iter())
        .enumerate()
        .map(|(row, (dot, norm))| (row, distance_from_parts(*dot, *norm, query_norm)))
        .collect();
    ranked.sort_by(|left, right| left.1.partial_cmp(&right.1).unwrap_or(Ordering::Equal));
    ranked
}
