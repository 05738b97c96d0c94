//! Silhouette coefficient for evaluating a clustering.

use std::collections::HashMap;

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Mean silhouette width of a clustering, in `[-1, 1]`.
///
/// For each entity `i`, `s(i) = (b(i) - a(i)) / max(a(i), b(i))` where
/// `a(i)` is the mean Euclidean distance to the other members of its own
/// cluster and `b(i)` the smallest mean distance to any other cluster.
/// Entities in singleton clusters contribute `s(i) = 0`.
///
/// Scoring is refused with [`Error::InvalidClusterCount`] when the labels
/// form fewer than two clusters, or one cluster per entity; both extremes
/// make the index meaningless.
pub fn silhouette_score(observations: ArrayView2<'_, f64>, labels: &[usize]) -> Result<f64> {
    let n = observations.nrows();
    assert_eq!(
        labels.len(),
        n,
        "one label per observation is required to score a clustering"
    );

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let k = counts.len();
    if k < 2 || k >= n {
        return Err(Error::InvalidClusterCount { k, n });
    }

    // per-cluster running total of distances from the entity under evaluation
    let mut totals: HashMap<usize, f64> = counts.keys().map(|&label| (label, 0.0)).collect();

    let mut score = 0.0;
    for (i, sample) in observations.rows().into_iter().enumerate() {
        for total in totals.values_mut() {
            *total = 0.0;
        }
        for (j, other) in observations.rows().into_iter().enumerate() {
            *totals.get_mut(&labels[j]).unwrap() += euclidean(sample, other);
        }

        let own = labels[i];
        let own_count = counts[&own];
        if own_count == 1 {
            continue;
        }
        // own cluster averages without the entity itself (distance zero)
        let a = totals[&own] / (own_count - 1) as f64;
        let b = totals
            .iter()
            .filter(|(&label, _)| label != own)
            .map(|(label, total)| total / counts[label] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            score += (b - a) / denom;
        }
    }
    Ok(score / n as f64)
}

fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
