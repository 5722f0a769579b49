//! Vector similarity utilities.
//!
//! Pure-Rust cosine similarity and top-k ranking over knowledge records.

use crate::index::KnowledgeRecord;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if either vector is empty, zero-magnitude, or the lengths differ.
/// NaN components produce a NaN score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// A record paired with its similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord<'a> {
    pub record: &'a KnowledgeRecord,
    pub score: f32,
}

/// Rank records by cosine similarity to a query embedding.
///
/// Returns at most `k` records sorted by descending score. The sort is
/// stable, so records with equal scores keep their load order. NaN scores
/// rank last.
pub fn top_k<'a>(records: &'a [KnowledgeRecord], query: &[f32], k: usize) -> Vec<ScoredRecord<'a>> {
    let mut scored: Vec<ScoredRecord<'a>> = records
        .iter()
        .map(|record| ScoredRecord {
            record,
            score: match cosine_similarity(&record.embedding, query) {
                score if score.is_nan() => f32::NEG_INFINITY,
                score => score,
            },
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}
