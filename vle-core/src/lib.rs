#![warn(clippy::all)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= Verbosity::Result {
            println!($($arg)*);
        }
    }
}

pub mod cubic;
mod density_iteration;
mod errors;
pub mod parameter;
mod phase_equilibria;
mod state;
pub use density_iteration::{bisection, density_iteration, Isotherm, Phase, BISECTION_TOL};
pub use errors::{EosError, EosResult};
pub use phase_equilibria::{
    equilibrium_ratio, BubbleCurve, BubblePoint, PhaseEquilibrium, SolverOptions, Termination,
    Verbosity,
};
pub use state::State;
