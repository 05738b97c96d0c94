use ndarray::ArrayView2;
use rand::Rng;
use rand_xoshiro::Xoshiro256Plus;

use super::{KMeans, KMeansInit, KMeansParamsError};
use crate::error::Result;

/// The checked set of hyperparameters for a K-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansValidParams<R: Rng + Clone> {
    /// Number of independent optimizations run from fresh random centroids;
    /// the lowest-inertia result wins.
    n_runs: usize,
    /// A run converges once the squared centroid shift of an iteration
    /// drops below `tolerance`.
    tolerance: f64,
    /// Iteration cap for a single run, applied even without convergence.
    max_n_iterations: u64,
    /// The number of clusters to partition the observations into.
    n_clusters: usize,
    /// Centroid initialization strategy.
    init: KMeansInit,
    /// Seeded generator driving initialization; cloned per fit so repeated
    /// fits with equal parameters give identical assignments.
    rng: R,
}

/// Unchecked hyperparameters, built with the builder pattern from
/// [`KMeans::params`](crate::k_means::KMeans::params) and validated by
/// [`check`](KMeansParams::check).
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansParams<R: Rng + Clone>(KMeansValidParams<R>);

impl<R: Rng + Clone> KMeansParams<R> {
    /// Defaults: `n_runs = 10`, `tolerance = 1e-4`, `max_n_iterations = 300`,
    /// random initialization.
    pub(crate) fn new(n_clusters: usize, rng: R) -> Self {
        Self(KMeansValidParams {
            n_runs: 10,
            tolerance: 1e-4,
            max_n_iterations: 300,
            n_clusters,
            init: KMeansInit::Random,
            rng,
        })
    }

    /// Change the number of restarts.
    pub fn n_runs(mut self, n_runs: usize) -> Self {
        self.0.n_runs = n_runs;
        self
    }

    /// Change the convergence tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the per-run iteration cap.
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Change the centroid initialization strategy.
    pub fn init_method(mut self, init: KMeansInit) -> Self {
        self.0.init = init;
        self
    }

    pub fn check_ref(&self) -> std::result::Result<&KMeansValidParams<R>, KMeansParamsError> {
        if self.0.n_clusters == 0 {
            Err(KMeansParamsError::NClusters)
        } else if self.0.n_runs == 0 {
            Err(KMeansParamsError::NRuns)
        } else if self.0.tolerance <= 0.0 {
            Err(KMeansParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else {
            Ok(&self.0)
        }
    }

    pub fn check(self) -> std::result::Result<KMeansValidParams<R>, KMeansParamsError> {
        self.check_ref()?;
        Ok(self.0)
    }

    /// Validates the parameters and fits on `observations`, one entity
    /// per row.
    pub fn fit(&self, observations: ArrayView2<'_, f64>) -> Result<KMeans> {
        Ok(self.check_ref()?.fit(observations)?)
    }
}

impl KMeans {
    /// Configure a K-means run with a fixed default seed.
    pub fn params(n_clusters: usize) -> KMeansParams<Xoshiro256Plus> {
        Self::params_with_seed(n_clusters, 42)
    }

    /// Configure a K-means run seeded from `seed`; equal seeds give equal
    /// assignments.
    pub fn params_with_seed(n_clusters: usize, seed: u64) -> KMeansParams<Xoshiro256Plus> {
        use rand::SeedableRng;
        KMeansParams::new(n_clusters, Xoshiro256Plus::seed_from_u64(seed))
    }

    /// Configure a K-means run with a caller-supplied generator.
    pub fn params_with_rng<R: Rng + Clone>(n_clusters: usize, rng: R) -> KMeansParams<R> {
        KMeansParams::new(n_clusters, rng)
    }
}

impl<R: Rng + Clone> KMeansValidParams<R> {
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn init_method(&self) -> KMeansInit {
        self.init
    }

    pub(crate) fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_clusters_cannot_be_zero() {
        let res = KMeans::params(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NClusters)));
    }

    #[test]
    fn n_runs_cannot_be_zero() {
        let res = KMeans::params(2).n_runs(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NRuns)));
    }

    #[test]
    fn tolerance_has_to_be_positive() {
        let res = KMeans::params(2).tolerance(0.).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)));
    }

    #[test]
    fn max_n_iterations_cannot_be_zero() {
        let res = KMeans::params(2).max_n_iterations(0).check();
        assert!(matches!(res, Err(KMeansParamsError::MaxIterations)));
    }
}
