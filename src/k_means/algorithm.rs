//! Lloyd's algorithm with restarts.
//!
//! K-means partitions observations into `n_clusters` groups by alternating
//! two steps until the centroids stop moving (or an iteration cap is hit):
//! assign every observation to its nearest centroid by Euclidean distance,
//! then recompute each centroid as the mean of its assigned observations.
//! Because the result depends on the random initial centroids, the fit is
//! repeated `n_runs` times and the lowest-inertia run is kept.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use rand::Rng;

use super::KMeansValidParams;
use crate::error::{Error, Result};

/// A fitted K-means model: the winning set of centroids with shape
/// `(n_clusters, n_features)`.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeans {
    centroids: Array2<f64>,
    cluster_count: Array1<usize>,
    inertia: f64,
}

impl KMeans {
    /// The centroid matrix, one row per cluster.
    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    /// Number of training observations assigned to each cluster.
    pub fn cluster_count(&self) -> &Array1<usize> {
        &self.cluster_count
    }

    /// Sum over the training observations of the squared distance to their
    /// closest centroid; the quantity minimized across restarts.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Assigns each row of `observations` to the index of its closest
    /// centroid. Every label lies in `[0, n_clusters)`.
    pub fn predict(&self, observations: ArrayView2<'_, f64>) -> Array1<usize> {
        let mut memberships = Array1::zeros(observations.nrows());
        let mut dists = Array1::zeros(observations.nrows());
        update_memberships_and_dists(
            self.centroids.view(),
            observations,
            &mut memberships,
            &mut dists,
        );
        memberships
    }
}

impl<R: Rng + Clone> KMeansValidParams<R> {
    /// Runs `n_runs` independent optimizations on `observations` (one entity
    /// per row) and keeps the lowest-inertia set of centroids.
    ///
    /// Fails with [`Error::InvalidClusterCount`] when there are fewer
    /// observations than requested clusters.
    pub fn fit(&self, observations: ArrayView2<'_, f64>) -> Result<KMeans> {
        let n_samples = observations.nrows();
        if n_samples == 0 {
            return Err(Error::EmptyDataset);
        }
        if self.n_clusters() > n_samples {
            return Err(Error::InvalidClusterCount {
                k: self.n_clusters(),
                n: n_samples,
            });
        }

        let mut rng = self.rng().clone();
        let mut memberships = Array1::zeros(n_samples);
        let mut dists = Array1::zeros(n_samples);

        let (mut best_centroids, mut min_inertia) =
            self.single_run(observations, &mut rng, &mut memberships, &mut dists);
        for _ in 1..self.n_runs() {
            let (centroids, inertia) =
                self.single_run(observations, &mut rng, &mut memberships, &mut dists);
            if inertia < min_inertia {
                min_inertia = inertia;
                best_centroids = centroids;
            }
        }

        update_memberships_and_dists(
            best_centroids.view(),
            observations,
            &mut memberships,
            &mut dists,
        );
        let mut cluster_count = Array1::zeros(self.n_clusters());
        memberships.iter().for_each(|&c| cluster_count[c] += 1);

        Ok(KMeans {
            centroids: best_centroids,
            cluster_count,
            inertia: min_inertia,
        })
    }

    fn single_run(
        &self,
        observations: ArrayView2<'_, f64>,
        rng: &mut R,
        memberships: &mut Array1<usize>,
        dists: &mut Array1<f64>,
    ) -> (Array2<f64>, f64) {
        let mut centroids = self
            .init_method()
            .run(self.n_clusters(), observations, rng);
        let mut inertia = f64::INFINITY;
        for _ in 0..self.max_n_iterations() {
            update_memberships_and_dists(centroids.view(), observations, memberships, dists);
            inertia = dists.sum();
            let new_centroids =
                compute_centroids(self.n_clusters(), observations, memberships, dists);
            let shift = (&new_centroids - &centroids).mapv(|d| d * d).sum();
            centroids = new_centroids;
            if shift < self.tolerance() {
                break;
            }
        }
        (centroids, inertia)
    }
}

/// Recomputes each centroid as the mean of its assigned observations.
///
/// A cluster left without observations is re-seeded from the observation
/// farthest from its current centroid, so no centroid ever degenerates to
/// NaN.
fn compute_centroids(
    n_clusters: usize,
    observations: ArrayView2<'_, f64>,
    memberships: &Array1<usize>,
    dists: &Array1<f64>,
) -> Array2<f64> {
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);
    let mut centroids = Array2::zeros((n_clusters, observations.ncols()));

    Zip::from(observations.rows())
        .and(memberships)
        .for_each(|observation, &cluster| {
            let mut centroid = centroids.row_mut(cluster);
            centroid += &observation;
            counts[cluster] += 1;
        });

    for (cluster, &count) in counts.iter().enumerate() {
        if count == 0 {
            let farthest = dists
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            centroids.row_mut(cluster).assign(&observations.row(farthest));
        } else {
            let mut centroid = centroids.row_mut(cluster);
            centroid /= count as f64;
        }
    }
    centroids
}

// Updates `memberships` with the closest centroid of each observation and
// `dists` with the squared distance to it.
fn update_memberships_and_dists(
    centroids: ArrayView2<'_, f64>,
    observations: ArrayView2<'_, f64>,
    memberships: &mut Array1<usize>,
    dists: &mut Array1<f64>,
) {
    Zip::from(observations.rows())
        .and(memberships)
        .and(dists)
        .for_each(|observation, membership, dist| {
            let (m, d) = closest_centroid(centroids, observation);
            *membership = m;
            *dist = d;
        });
}

/// Index of the closest centroid row and the squared distance to it.
pub(crate) fn closest_centroid(
    centroids: ArrayView2<'_, f64>,
    observation: ArrayView1<'_, f64>,
) -> (usize, f64) {
    let mut closest_index = 0;
    let mut minimum_distance = squared_distance(centroids.row(0), observation);
    for (centroid_index, centroid) in centroids.rows().into_iter().enumerate().skip(1) {
        let distance = squared_distance(centroid, observation);
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}
