use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for improperly defined states and failing root searches.
#[derive(Error, Debug)]
pub enum EosError {
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),
    #[error("Root is not bracketed in [{lower}, {upper}]: f(lower) = {f_lower}, f(upper) = {f_upper}.")]
    RootNotBracketed {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },
    #[error("Unphysical state in {0}.")]
    Domain(String),
    #[error("Equation of state is initialized for {0} components while the input specifies {1} components.")]
    IncompatibleComponents(usize, usize),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, EosError>`.
pub type EosResult<T> = Result<T, EosError>;
