//! Running-mean 1-D clustering
//!
//! Every grouping step of the pipeline (glyphs into lines, spans into lines,
//! headers into rows, score tokens into rows) uses the same rule: walk the
//! items in key order and let an item join the open cluster while its key
//! stays within `tolerance` of the mean key of the cluster so far.

/// Group `items` (already sorted by `key`) into clusters of nearby keys.
///
/// The comparison is against the running mean of the open cluster rather
/// than its first member, so slowly drifting keys do not chain.
pub fn cluster_running_mean<T, F>(items: Vec<T>, tolerance: f64, key: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> f64,
{
    let mut clusters: Vec<Vec<T>> = Vec::new();
    let mut sum = 0.0;

    for item in items {
        let k = key(&item);
        if let Some(open) = clusters.last_mut() {
            let mean = sum / open.len() as f64;
            if (k - mean).abs() <= tolerance {
                sum += k;
                open.push(item);
                continue;
            }
        }
        sum = k;
        clusters.push(vec![item]);
    }

    clusters
}

/// Index of the candidate closest to `value`; the first one wins ties.
///
/// Returns 0 for an empty candidate list.
pub fn nearest_index(value: f64, candidates: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in candidates.iter().enumerate() {
        let dist = (value - c).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of already sorted values (mean of the two middle values for even lengths)
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
