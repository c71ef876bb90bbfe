//! Character-level cosine similarity.

use std::collections::HashMap;

/// Cosine similarity between the character-bigram frequency vectors of `a`
/// and `b`.
///
/// Strings shorter than two characters fall back to unigrams so that every
/// non-empty input has a non-zero vector. Returns a value in `[0.0, 1.0]`.
pub fn cosine(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let width = if a.chars().count() < 2 || b.chars().count() < 2 {
        1
    } else {
        2
    };
    let va = profile(a, width);
    let vb = profile(b, width);

    let dot: u64 = va
        .iter()
        .filter_map(|(gram, &na)| vb.get(gram).map(|&nb| na * nb))
        .sum();
    if dot == 0 {
        return 0.0;
    }

    (dot as f64 / (norm(&va) * norm(&vb))).min(1.0)
}

fn norm(v: &HashMap<Vec<char>, u64>) -> f64 {
    v.values().map(|&n| (n * n) as f64).sum::<f64>().sqrt()
}

fn profile(s: &str, width: usize) -> HashMap<Vec<char>, u64> {
    let chars: Vec<char> = s.chars().collect();
    let mut counts = HashMap::new();
    for gram in chars.windows(width) {
        *counts.entry(gram.to_vec()).or_insert(0) += 1;
    }
    counts
}
