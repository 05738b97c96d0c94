//! K-means clustering of matrix rows.

mod algorithm;
mod errors;
mod hyperparams;
mod init;

pub use algorithm::KMeans;
pub use errors::KMeansParamsError;
pub use hyperparams::{KMeansParams, KMeansValidParams};
pub use init::KMeansInit;
