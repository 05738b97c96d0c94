//! `surveyseg` performs exploratory K-means cluster analysis on survey
//! rating data, in the manner of a market segmentation study.
//!
//! The reference dataset is a table of 240 students' 1-to-9 self-ratings on
//! 32 personality adjectives, but any rectangular numeric CSV with a header
//! row works. A run standardizes every column to z-scores and then clusters
//! twice: the transposed matrix groups related adjectives, the rows group
//! students into segments. Solutions are compared with the silhouette
//! coefficient across a range of cluster counts, and each final segment is
//! summarized by its raw attribute means.
//!
//! ```no_run
//! use surveyseg::pipeline::{run, AnalysisConfig};
//!
//! let config = AnalysisConfig {
//!     input: "student_data.csv".into(),
//!     ..AnalysisConfig::default()
//! };
//! run(&config, std::io::stdout().lock()).unwrap();
//! ```

pub mod dataset;
pub mod error;
pub mod k_means;
pub mod pipeline;
pub mod report;
pub mod scaling;
pub mod silhouette;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use k_means::KMeans;
pub use pipeline::AnalysisConfig;
pub use scaling::Standardizer;
pub use silhouette::silhouette_score;
