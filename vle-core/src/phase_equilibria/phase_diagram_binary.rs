use super::bubble_dew::BubblePoint;
use super::PhaseEquilibrium;
use crate::cubic::PengRobinson;
use crate::errors::{EosError, EosResult};
use crate::SolverOptions;
use ndarray::{arr1, Array1};
#[cfg(feature = "rayon")]
use rayon::{prelude::*, ThreadPool};
use std::fmt;
use std::sync::Arc;

/// Bubble points of a binary mixture at constant temperature.
///
/// Every liquid composition is solved independently. A point that fails is
/// stored with its error and does not affect the other points.
#[derive(Debug)]
pub struct BubbleCurve {
    /// Temperature in K
    pub temperature: f64,
    /// Liquid mole fractions of the first component
    pub liquid_molefracs: Array1<f64>,
    /// Results in the order of `liquid_molefracs`
    pub points: Vec<EosResult<BubblePoint>>,
}

impl BubbleCurve {
    /// Calculate the bubble points for all liquid mole fractions `x` of the
    /// first component.
    pub fn new(
        eos: &Arc<PengRobinson>,
        temperature: f64,
        liquid_molefracs: &Array1<f64>,
        saturation_pressures: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        Self::check_binary(eos)?;
        let points = liquid_molefracs
            .iter()
            .map(|&x| Self::solve_point(eos, temperature, x, saturation_pressures, options))
            .collect();
        Ok(Self {
            temperature,
            liquid_molefracs: liquid_molefracs.clone(),
            points,
        })
    }

    fn check_binary(eos: &PengRobinson) -> EosResult<()> {
        if eos.components() != 2 {
            return Err(EosError::IncompatibleComponents(eos.components(), 2));
        }
        Ok(())
    }

    fn solve_point(
        eos: &Arc<PengRobinson>,
        temperature: f64,
        x: f64,
        saturation_pressures: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<BubblePoint> {
        PhaseEquilibrium::bubble_point(
            eos,
            temperature,
            &arr1(&[x, 1.0 - x]),
            saturation_pressures,
            options,
        )
    }

    /// Bubble point pressures in Pa; `NaN` for points that failed.
    pub fn pressure(&self) -> Array1<f64> {
        self.points
            .iter()
            .map(|p| p.as_ref().map_or(f64::NAN, |p| p.pressure()))
            .collect()
    }

    /// Vapor mole fractions of the first component; `NaN` for points that failed.
    pub fn vapor_molefracs(&self) -> Array1<f64> {
        self.points
            .iter()
            .map(|p| p.as_ref().map_or(f64::NAN, |p| p.vapor_molefracs()[0]))
            .collect()
    }

    /// Liquid mole fractions and errors of all points that failed.
    pub fn failures(&self) -> Vec<(f64, &EosError)> {
        self.liquid_molefracs
            .iter()
            .zip(&self.points)
            .filter_map(|(&x, p)| p.as_ref().err().map(|e| (x, e)))
            .collect()
    }

    /// Returns `true` if every point was solved and converged.
    pub fn is_converged(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.as_ref().is_ok_and(|p| p.is_converged()))
    }
}

#[cfg(feature = "rayon")]
impl BubbleCurve {
    /// Calculate the bubble points on the given thread pool.
    ///
    /// The results are identical to [BubbleCurve::new].
    pub fn par_new(
        eos: &Arc<PengRobinson>,
        temperature: f64,
        liquid_molefracs: &Array1<f64>,
        saturation_pressures: &Array1<f64>,
        thread_pool: ThreadPool,
        options: SolverOptions,
    ) -> EosResult<Self> {
        Self::check_binary(eos)?;
        let points: Vec<_> = thread_pool.install(|| {
            liquid_molefracs
                .to_vec()
                .into_par_iter()
                .map(|x| Self::solve_point(eos, temperature, x, saturation_pressures, options))
                .collect()
        });
        Ok(Self {
            temperature,
            liquid_molefracs: liquid_molefracs.clone(),
            points,
        })
    }
}

impl fmt::Display for BubbleCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "T = {:.2} K", self.temperature)?;
        writeln!(
            f,
            "{:>10} | {:>16} | {:>10} | {:<}",
            "x", "p / Pa", "y", "status"
        )?;
        writeln!(f, "{:-<60}", "")?;
        for (x, point) in self.liquid_molefracs.iter().zip(&self.points) {
            match point {
                Ok(p) => writeln!(
                    f,
                    "{:>10.5} | {:>16.6e} | {:>10.5} | {} ({} steps)",
                    x,
                    p.pressure(),
                    p.vapor_molefracs()[0],
                    p.termination,
                    p.iterations
                )?,
                Err(e) => writeln!(f, "{:>10.5} | {:>16} | {:>10} | {}", x, "-", "-", e)?,
            }
        }
        Ok(())
    }
}
