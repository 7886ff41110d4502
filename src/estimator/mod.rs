//! Utilities for working with experimental data.
//!
//! Calculated bubble points are compared to measurements; the parameters of
//! the equation of state are never adjusted.
use cubic_vle_core::EosError;
use thiserror::Error;

mod binary_vle;
pub use binary_vle::{BinaryVleData, Deviation};

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("Input has not the same amount of data as the target.")]
    IncompatibleInput,
    #[error("The calculated liquid compositions do not match the experimental data.")]
    IncompatibleCompositions,
    #[error(transparent)]
    EosError(#[from] EosError),
}

/// Mean of the absolute values of all finite entries.
pub(crate) fn mean_absolute(values: &ndarray::Array1<f64>) -> f64 {
    values
        .iter()
        .filter(|x| x.is_finite())
        .enumerate()
        .fold(0.0, |mean, (i, x)| mean + (x.abs() - mean) / (i + 1) as f64)
}
