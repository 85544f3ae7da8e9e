use std::cmp::Ordering;

/// Sort `(key, score)` pairs by score descending and keep the first `k`.
///
/// Returns `min(k, len)` entries. The sort is stable, so equal scores keep
/// their input order. NaN scores compare as equal to everything.
pub fn top_results<K>(mut scored: Vec<(K, f64)>, k: usize) -> Vec<(K, f64)> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
