//! The analysis pipeline: load, standardize, cluster, report.
//!
//! The reference study runs four stages over a student survey table:
//! descriptive statistics, K-means on the transposed z-score matrix to
//! group related adjectives, a silhouette sweep over candidate segment
//! counts, and a final segmentation summarized by raw attribute means.
//! Everything is driven by an [`AnalysisConfig`]; there is no ambient
//! state, so a run can be repeated or embedded in tests.

use std::io::Write;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use log::info;
use ndarray::ArrayView2;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::k_means::KMeans;
use crate::report::Report;
use crate::scaling::Standardizer;
use crate::silhouette::silhouette_score;

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Comma-delimited input table with a header row.
    pub input: PathBuf,
    /// Seed for every K-means fit; equal configurations give equal output.
    pub seed: u64,
    /// Independent K-means restarts per fit.
    pub restarts: usize,
    /// Cluster count for the variable (adjective) grouping.
    pub variable_clusters: usize,
    /// Segment count for the final student segmentation.
    pub segments: usize,
    /// Candidate segment counts scored in the silhouette sweep.
    pub sweep: RangeInclusive<usize>,
    /// Map zero-variance columns to zero z-scores instead of failing.
    pub lenient_scaling: bool,
}

impl Default for AnalysisConfig {
    /// The defaults of the reference study: seed 1, 25 restarts, five
    /// variable clusters, two final segments, sweep over 2..=20.
    fn default() -> Self {
        AnalysisConfig {
            input: PathBuf::from("student_data.csv"),
            seed: 1,
            restarts: 25,
            variable_clusters: 5,
            segments: 2,
            sweep: 2..=20,
            lenient_scaling: false,
        }
    }
}

/// Loads the configured input file and runs the full analysis, writing the
/// report to `out`.
pub fn run<W: Write>(config: &AnalysisConfig, out: W) -> Result<()> {
    let dataset = Dataset::from_csv_path(&config.input)?;
    run_with_dataset(config, &dataset, out)
}

/// Runs the full analysis over an already-loaded dataset.
pub fn run_with_dataset<W: Write>(
    config: &AnalysisConfig,
    dataset: &Dataset,
    out: W,
) -> Result<()> {
    let mut report = Report::new(out);
    report.data_summary(dataset)?;

    let standardizer = if config.lenient_scaling {
        Standardizer::lenient()
    } else {
        Standardizer::new()
    };
    let standardized = standardizer.fit(dataset)?.transform(dataset.records());

    // variables are clustered on the transposed z-score matrix
    let variable_matrix = standardized.t();
    let variable_labels = cluster(config, config.variable_clusters, variable_matrix)?;
    let variable_score = silhouette_score(variable_matrix, &variable_labels)?;
    info!(
        "variable clustering: k = {}, silhouette {:.4}",
        config.variable_clusters, variable_score
    );
    report.variable_clusters(dataset.names(), &variable_labels, variable_score)?;

    let mut sweep_scores = Vec::new();
    for k in config.sweep.clone() {
        let labels = cluster(config, k, standardized.view())?;
        let score = silhouette_score(standardized.view(), &labels)?;
        info!("segment sweep: k = {k}, silhouette {score:.4}");
        sweep_scores.push((k, score));
    }
    report.sweep(&sweep_scores)?;

    let segment_labels = cluster(config, config.segments, standardized.view())?;
    report.segment_summary(dataset, &segment_labels, config.segments)?;
    Ok(())
}

/// One seeded, restarted K-means fit plus assignment of the fitted matrix.
fn cluster(config: &AnalysisConfig, k: usize, matrix: ArrayView2<'_, f64>) -> Result<Vec<usize>> {
    let model = KMeans::params_with_seed(k, config.seed)
        .n_runs(config.restarts)
        .fit(matrix)?;
    Ok(model.predict(matrix).to_vec())
}
