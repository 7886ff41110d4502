use super::{mean_absolute, EstimatorError};
use cubic_vle_core::cubic::PengRobinson;
use cubic_vle_core::{BubbleCurve, EosResult, SolverOptions};
use itertools::izip;
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

/// Store experimental bubble points of a binary mixture at constant temperature.
#[derive(Clone, Debug)]
pub struct BinaryVleData {
    /// Temperature in K
    pub temperature: f64,
    /// Liquid mole fractions of the first component
    pub liquid_molefracs: Array1<f64>,
    /// Vapor mole fractions of the first component
    pub vapor_molefracs: Array1<f64>,
    /// Bubble point pressures in Pa
    pub pressure: Array1<f64>,
}

impl BinaryVleData {
    pub fn new(
        temperature: f64,
        liquid_molefracs: Array1<f64>,
        vapor_molefracs: Array1<f64>,
        pressure: Array1<f64>,
    ) -> Result<Self, EstimatorError> {
        let n = liquid_molefracs.len();
        if vapor_molefracs.len() != n || pressure.len() != n {
            return Err(EstimatorError::IncompatibleInput);
        }
        Ok(Self {
            temperature,
            liquid_molefracs,
            vapor_molefracs,
            pressure,
        })
    }

    /// Returns the number of experimental data points.
    pub fn datapoints(&self) -> usize {
        self.liquid_molefracs.len()
    }

    /// Calculate bubble points at the experimental temperature and liquid compositions.
    pub fn bubble_curve(
        &self,
        eos: &Arc<PengRobinson>,
        saturation_pressures: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<BubbleCurve> {
        BubbleCurve::new(
            eos,
            self.temperature,
            &self.liquid_molefracs,
            saturation_pressures,
            options,
        )
    }

    /// Relative deviations of a calculated bubble curve from the experimental data.
    pub fn deviation(&self, curve: &BubbleCurve) -> Result<Deviation, EstimatorError> {
        if curve.liquid_molefracs != self.liquid_molefracs {
            return Err(EstimatorError::IncompatibleCompositions);
        }
        let pressure = curve.pressure();
        let vapor_molefracs = curve.vapor_molefracs();
        Ok(Deviation {
            relative_pressure: (&pressure - &self.pressure) / &self.pressure,
            relative_vapor_molefracs: (&vapor_molefracs - &self.vapor_molefracs)
                / &self.vapor_molefracs,
            pressure,
            vapor_molefracs,
            data: self.clone(),
        })
    }
}

/// Comparison of calculated bubble points with experimental data.
#[derive(Clone, Debug)]
pub struct Deviation {
    pub data: BinaryVleData,
    /// Calculated pressures in Pa
    pub pressure: Array1<f64>,
    /// Calculated vapor mole fractions of the first component
    pub vapor_molefracs: Array1<f64>,
    pub relative_pressure: Array1<f64>,
    pub relative_vapor_molefracs: Array1<f64>,
}

impl Deviation {
    /// Average absolute relative deviation of the pressure.
    ///
    /// Points that failed to converge are ignored.
    pub fn aard_pressure(&self) -> f64 {
        mean_absolute(&self.relative_pressure)
    }

    /// Average absolute relative deviation of the vapor mole fraction.
    pub fn aard_vapor_molefracs(&self) -> f64 {
        mean_absolute(&self.relative_vapor_molefracs)
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} | {:>12} | {:>12} | {:>8} | {:>8} | {:>8} | {:>8}",
            "x", "p exp / Pa", "p calc / Pa", "dp / %", "y exp", "y calc", "dy / %"
        )?;
        writeln!(f, "{:-<84}", "")?;
        for (x, p_exp, p, dp, y_exp, y, dy) in izip!(
            &self.data.liquid_molefracs,
            &self.data.pressure,
            &self.pressure,
            &self.relative_pressure,
            &self.data.vapor_molefracs,
            &self.vapor_molefracs,
            &self.relative_vapor_molefracs
        ) {
            writeln!(
                f,
                "{:>8.4} | {:>12.0} | {:>12.0} | {:>8.3} | {:>8.4} | {:>8.4} | {:>8.3}",
                x,
                p_exp,
                p,
                100.0 * dp,
                y_exp,
                y,
                100.0 * dy
            )?;
        }
        writeln!(f, "AARD pressure: {:.3} %", 100.0 * self.aard_pressure())?;
        write!(
            f,
            "AARD vapor mole fraction: {:.3} %",
            100.0 * self.aard_vapor_molefracs()
        )
    }
}
