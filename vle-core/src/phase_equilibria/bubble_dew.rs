use super::PhaseEquilibrium;
use crate::cubic::PengRobinson;
use crate::errors::{EosError, EosResult};
use crate::{SolverOptions, Verbosity};
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

const MAX_ITER_BUBBLE: usize = 2000;
const TOL_BUBBLE: f64 = 1e-6;

/// Equilibrium ratios `K_i = phi_i^L / phi_i^V` at given temperature and pressure.
///
/// The liquid state is evaluated at `liquid_molefracs`, the vapor state at
/// `vapor_molefracs`.
pub fn equilibrium_ratio(
    eos: &Arc<PengRobinson>,
    temperature: f64,
    pressure: f64,
    liquid_molefracs: &Array1<f64>,
    vapor_molefracs: &Array1<f64>,
) -> EosResult<Array1<f64>> {
    let vle = PhaseEquilibrium::new_npt(
        eos,
        temperature,
        pressure,
        vapor_molefracs,
        liquid_molefracs,
    )?;
    vle.equilibrium_ratio()
}

/// Final state of a bubble point iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The change of the equilibrium ratios dropped below the tolerance.
    Converged,
    /// The maximum number of iterations was reached; the last estimate is kept.
    Exhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Result of a bubble point calculation for a single liquid composition.
#[derive(Clone, Debug)]
pub struct BubblePoint {
    /// Vapor and liquid phase at the bubble point pressure.
    pub vle: PhaseEquilibrium,
    pub termination: Termination,
    /// Number of successive substitution steps.
    pub iterations: usize,
    /// `sum_i |K_i - K_i^prev|` of the last step.
    pub error: f64,
}

impl BubblePoint {
    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Bubble point pressure in Pa.
    pub fn pressure(&self) -> f64 {
        self.vle.pressure()
    }

    pub fn liquid_molefracs(&self) -> &Array1<f64> {
        &self.vle.liquid().molefracs
    }

    pub fn vapor_molefracs(&self) -> &Array1<f64> {
        &self.vle.vapor().molefracs
    }
}

impl PhaseEquilibrium {
    /// Equilibrium ratios of the two phases.
    pub fn equilibrium_ratio(&self) -> EosResult<Array1<f64>> {
        Ok((self.liquid().ln_phi()? - self.vapor().ln_phi()?).mapv(f64::exp))
    }
}

/// # Bubble point calculations
impl PhaseEquilibrium {
    /// Calculate the bubble point pressure and the incipient vapor
    /// composition of a liquid at given temperature.
    ///
    /// The iteration is started from Raoult's law with the pure component
    /// saturation pressures `saturation_pressures` (in Pa) and proceeds by
    /// successive substitution of the equilibrium ratios. Exceeding the
    /// maximum number of iterations is not an error; it is reported through
    /// [Termination::Exhausted].
    pub fn bubble_point(
        eos: &Arc<PengRobinson>,
        temperature: f64,
        liquid_molefracs: &Array1<f64>,
        saturation_pressures: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<BubblePoint> {
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_BUBBLE, TOL_BUBBLE);
        if saturation_pressures.len() != eos.components() {
            return Err(EosError::IncompatibleComponents(
                eos.components(),
                saturation_pressures.len(),
            ));
        }
        crate::state::validate_molefracs(liquid_molefracs)?;
        let x = liquid_molefracs;

        // Raoult's law
        let partial_pressures = saturation_pressures * x;
        let mut pressure = partial_pressures.sum();
        let mut y = partial_pressures / pressure;
        let mut vle = Self::new_npt(eos, temperature, pressure, &y, x)?;
        let mut k = vle.equilibrium_ratio()?;

        log_iter!(
            verbosity,
            " iter |    residual    |    pressure    | vapor molefracs"
        );
        log_iter!(verbosity, "{:-<68}", "");
        log_iter!(
            verbosity,
            " {:4} | {:14} | {:14.6e} | {:.8}",
            0,
            "",
            pressure,
            y
        );

        let mut error = f64::INFINITY;
        let mut iterations = 0;
        let mut termination = Termination::Exhausted;
        while iterations < max_iter {
            iterations += 1;
            let k_x = &k * x;
            pressure *= k_x.sum();
            y = &k_x / k_x.sum();
            vle = Self::new_npt(eos, temperature, pressure, &y, x)?;
            let k_new = vle.equilibrium_ratio()?;
            error = (&k_new - &k).mapv(f64::abs).sum();
            k = k_new;

            log_iter!(
                verbosity,
                " {:4} | {:<14.8e} | {:14.6e} | {:.8}",
                iterations,
                error,
                pressure,
                y
            );
            if error < tol {
                termination = Termination::Converged;
                break;
            }
        }

        match termination {
            Termination::Converged => log_result!(
                verbosity,
                "Bubble point: calculation converged in {} step(s) for x = {:.5}\n",
                iterations,
                x
            ),
            Termination::Exhausted => log_result!(
                verbosity,
                "Bubble point: no convergence within {} step(s) for x = {:.5} (residual {:e})\n",
                iterations,
                x,
                error
            ),
        }

        Ok(BubblePoint {
            vle,
            termination,
            iterations,
            error,
        })
    }
}
