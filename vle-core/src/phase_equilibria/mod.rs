use crate::cubic::PengRobinson;
use crate::density_iteration::Phase;
use crate::errors::EosResult;
use crate::state::State;
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

mod bubble_dew;
mod phase_diagram_binary;
pub use bubble_dew::{equilibrium_ratio, BubblePoint, Termination};
pub use phase_diagram_binary::BubbleCurve;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success or failure of the iteration.
    Result,
    /// Print a detailed output for every iteration.
    Iter,
}

/// Options for the phase equilibrium solvers.
///
/// If the values are [None], solver specific default
/// values are used.
#[derive(Copy, Clone, Debug, Default)]
pub struct SolverOptions {
    /// Maximum number of iterations.
    pub max_iter: Option<usize>,
    /// Tolerance.
    pub tol: Option<f64>,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl From<(Option<usize>, Option<f64>, Option<Verbosity>)> for SolverOptions {
    fn from(options: (Option<usize>, Option<f64>, Option<Verbosity>)) -> Self {
        Self {
            max_iter: options.0,
            tol: options.1,
            verbosity: options.2.unwrap_or(Verbosity::None),
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}

/// A vapor-liquid equilibrium at given temperature and pressure.
///
/// The vapor phase is stored first, the liquid phase second.
#[derive(Clone, Debug)]
pub struct PhaseEquilibrium([State; 2]);

impl fmt::Display for PhaseEquilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.0.iter().enumerate() {
            writeln!(f, "phase {}: {}", i, s)?;
        }
        Ok(())
    }
}

impl PhaseEquilibrium {
    /// Creates a new PhaseEquilibrium that contains a vapor and a liquid
    /// state at the specified temperature, pressure and compositions.
    ///
    /// In general, the two states are NOT in equilibrium.
    pub fn new_npt(
        eos: &Arc<PengRobinson>,
        temperature: f64,
        pressure: f64,
        vapor_molefracs: &Array1<f64>,
        liquid_molefracs: &Array1<f64>,
    ) -> EosResult<Self> {
        let liquid = State::new_npt(eos, temperature, pressure, liquid_molefracs, Phase::Liquid)?;
        let vapor = State::new_npt(eos, temperature, pressure, vapor_molefracs, Phase::Vapor)?;
        Ok(Self([vapor, liquid]))
    }

    pub fn vapor(&self) -> &State {
        &self.0[0]
    }

    pub fn liquid(&self) -> &State {
        &self.0[1]
    }

    /// Temperature in K.
    pub fn temperature(&self) -> f64 {
        self.0[0].temperature
    }

    /// Pressure in Pa.
    pub fn pressure(&self) -> f64 {
        self.0[0].pressure
    }
}
