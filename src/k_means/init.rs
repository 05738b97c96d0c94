use ndarray::{Array1, Array2, ArrayView2, Axis, s};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::algorithm::closest_centroid;

/// Strategy used to pick the initial set of centroids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KMeansInit {
    /// `n_clusters` distinct observations drawn uniformly at random.
    Random,
    /// k-means++: later centroids are drawn with probability proportional
    /// to their squared distance from the centroids chosen so far.
    KMeansPlusPlus,
}

impl KMeansInit {
    pub(crate) fn run(
        &self,
        n_clusters: usize,
        observations: ArrayView2<'_, f64>,
        rng: &mut impl Rng,
    ) -> Array2<f64> {
        match self {
            Self::Random => random_init(n_clusters, observations, rng),
            Self::KMeansPlusPlus => k_means_pp(n_clusters, observations, rng),
        }
    }
}

fn random_init(
    n_clusters: usize,
    observations: ArrayView2<'_, f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let indices = rand::seq::index::sample(rng, observations.nrows(), n_clusters).into_vec();
    observations.select(Axis(0), &indices)
}

fn k_means_pp(
    n_clusters: usize,
    observations: ArrayView2<'_, f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_samples, n_features) = observations.dim();
    let mut centroids = Array2::zeros((n_clusters, n_features));
    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&observations.row(first));

    let mut dists = Array1::zeros(n_samples);
    for c_cnt in 1..n_clusters {
        let chosen = centroids.slice(s![0..c_cnt, ..]);
        for (dist, observation) in dists.iter_mut().zip(observations.rows()) {
            *dist = closest_centroid(chosen, observation).1;
        }
        // all-zero weights happen when every remaining point coincides with
        // a chosen centroid; fall back to a uniform draw
        let idx = match WeightedIndex::new(dists.iter()) {
            Ok(weights) => weights.sample(rng),
            Err(_) => rng.gen_range(0..n_samples),
        };
        centroids.row_mut(c_cnt).assign(&observations.row(idx));
    }
    centroids
}
