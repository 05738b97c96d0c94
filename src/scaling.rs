//! Z-score standardization of dataset columns.

use approx::abs_diff_eq;
use log::warn;
use ndarray::{Array1, Array2, ArrayView2, Axis, Zip};

use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Learns per-column centering and scaling parameters from a dataset,
/// producing a [`FittedStandardizer`] that maps columns to zero mean and
/// unit standard deviation.
///
/// A zero-variance column makes the transform undefined. The default
/// (strict) standardizer refuses to fit such a column; [`Standardizer::lenient`]
/// instead centers it to all zeros and logs a warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct Standardizer {
    lenient: bool,
}

impl Standardizer {
    pub fn new() -> Self {
        Standardizer { lenient: false }
    }

    /// A standardizer that maps constant columns to zero instead of failing.
    pub fn lenient() -> Self {
        Standardizer { lenient: true }
    }

    /// Computes per-column mean and population standard deviation (ddof = 0).
    pub fn fit(&self, dataset: &Dataset) -> Result<FittedStandardizer> {
        let records = dataset.records();
        if records.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        let offsets = records.mean_axis(Axis(0)).ok_or(Error::EmptyDataset)?;
        let std_devs = records.std_axis(Axis(0), 0.0);

        let mut scales = Array1::ones(records.ncols());
        for (idx, &std_dev) in std_devs.iter().enumerate() {
            if abs_diff_eq!(std_dev, 0.0) {
                if !self.lenient {
                    return Err(Error::DegenerateColumn(dataset.names()[idx].clone()));
                }
                // centering alone already maps a constant column to zero
                warn!(
                    "column '{}' is constant; standardized to all zeros",
                    dataset.names()[idx]
                );
            } else {
                scales[idx] = 1.0 / std_dev;
            }
        }
        Ok(FittedStandardizer { offsets, scales })
    }
}

/// The result of fitting a [`Standardizer`]: per-column offsets and scales
/// applied as `(x - offset) * scale`.
#[derive(Clone, Debug)]
pub struct FittedStandardizer {
    offsets: Array1<f64>,
    scales: Array1<f64>,
}

impl FittedStandardizer {
    /// Per-column means subtracted during the transform.
    pub fn offsets(&self) -> &Array1<f64> {
        &self.offsets
    }

    /// Per-column inverse standard deviations.
    pub fn scales(&self) -> &Array1<f64> {
        &self.scales
    }

    /// Scales a `(n_observations, n_variables)` matrix column by column.
    ///
    /// Panics if the column count differs from the fitted dataset.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        assert_eq!(
            x.ncols(),
            self.offsets.len(),
            "matrix has {} columns but the standardizer was fitted on {}",
            x.ncols(),
            self.offsets.len()
        );
        let mut scaled = x.to_owned();
        Zip::from(scaled.columns_mut())
            .and(&self.offsets)
            .and(&self.scales)
            .for_each(|mut col, &offset, &scale| {
                col.mapv_inplace(|el| (el - offset) * scale);
            });
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn dataset(records: Array2<f64>) -> Dataset {
        let names = (0..records.ncols()).map(|i| format!("v{i}")).collect();
        Dataset::new(names, records).unwrap()
    }

    #[test]
    fn standardized_columns_have_zero_mean_unit_std() {
        let data = dataset(array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]]);
        let fitted = Standardizer::new().fit(&data).unwrap();
        let scaled = fitted.transform(data.records());
        let means = scaled.mean_axis(Axis(0)).unwrap();
        let std_devs = scaled.std_axis(Axis(0), 0.);
        assert_abs_diff_eq!(means, array![0., 0., 0.], epsilon = 1e-12);
        assert_abs_diff_eq!(std_devs, array![1., 1., 1.], epsilon = 1e-12);
    }

    #[test]
    fn strict_fit_rejects_constant_column() {
        let data = dataset(array![[1., 2.], [2., 2.], [0., 2.]]);
        let err = Standardizer::new().fit(&data).unwrap_err();
        match err {
            Error::DegenerateColumn(name) => assert_eq!(name, "v1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_fit_zeroes_constant_column() {
        let data = dataset(array![[1., 2.], [2., 2.], [0., 2.]]);
        let fitted = Standardizer::lenient().fit(&data).unwrap();
        let scaled = fitted.transform(data.records());
        let expected = array![0., 0., 0.];
        assert_abs_diff_eq!(scaled.column(1), expected.view());
        // the non-degenerate column is still scaled
        assert_abs_diff_eq!(scaled.column(0).std(0.), 1.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn transform_rejects_mismatched_width() {
        let data = dataset(array![[1., 2.], [3., 4.]]);
        let fitted = Standardizer::new().fit(&data).unwrap();
        fitted.transform(array![[1., 2., 3.]].view());
    }
}
