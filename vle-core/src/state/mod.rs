//! Description of a single phase at given temperature, pressure and composition.
use crate::cubic::{MixtureParameters, PengRobinson};
use crate::density_iteration::{density_iteration, Phase};
use crate::errors::{EosError, EosResult};
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

mod residual_properties;

/// Allowed deviation of the sum of mole fractions from unity.
const MOLEFRAC_TOL: f64 = 1e-9;

/// Thermodynamic state of a single phase.
///
/// The density is the root of the equation of state that belongs to the
/// requested phase. All properties are given in SI units.
#[derive(Clone, Debug)]
pub struct State {
    /// Equation of state
    pub eos: Arc<PengRobinson>,
    /// Temperature in K
    pub temperature: f64,
    /// Pressure in Pa
    pub pressure: f64,
    /// Molar density in mol/m^3
    pub density: f64,
    /// Molar volume in m^3/mol
    pub molar_volume: f64,
    /// Mole fractions
    pub molefracs: Array1<f64>,
    /// Phase of the density root
    pub phase: Phase,
    mixture: MixtureParameters,
}

impl State {
    /// Create a state from temperature, pressure and composition.
    ///
    /// If the isotherm has three roots at the given pressure, `phase`
    /// selects between the vapor and the liquid root.
    pub fn new_npt(
        eos: &Arc<PengRobinson>,
        temperature: f64,
        pressure: f64,
        molefracs: &Array1<f64>,
        phase: Phase,
    ) -> EosResult<Self> {
        validate_molefracs(molefracs)?;
        let mixture = eos.mixing_rule(temperature, molefracs)?;
        Self::from_mixture(eos, mixture, pressure, molefracs, phase)
    }

    pub(crate) fn from_mixture(
        eos: &Arc<PengRobinson>,
        mixture: MixtureParameters,
        pressure: f64,
        molefracs: &Array1<f64>,
        phase: Phase,
    ) -> EosResult<Self> {
        let density = density_iteration(&mixture, pressure, phase)?;
        Ok(Self {
            eos: eos.clone(),
            temperature: mixture.temperature,
            pressure,
            density,
            molar_volume: 1.0 / density,
            molefracs: molefracs.clone(),
            phase,
            mixture,
        })
    }
}

/// Check that mole fractions lie in [0, 1] and sum up to one.
pub(crate) fn validate_molefracs(molefracs: &Array1<f64>) -> EosResult<()> {
    if let Some(&x) = molefracs
        .iter()
        .find(|&&x| !(0.0..=1.0).contains(&x))
    {
        return Err(EosError::InvalidState(
            String::from("State"),
            String::from("mole fraction"),
            x,
        ));
    }
    let sum = molefracs.sum();
    if (sum - 1.0).abs() > MOLEFRAC_TOL {
        return Err(EosError::InvalidState(
            String::from("State"),
            String::from("sum of mole fractions"),
            sum,
        ));
    }
    Ok(())
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.eos.components() == 1 {
            write!(
                f,
                "T = {:.5} K, p = {:.5} Pa, ρ = {:.5} mol/m³ ({})",
                self.temperature, self.pressure, self.density, self.phase
            )
        } else {
            write!(
                f,
                "T = {:.5} K, p = {:.5} Pa, ρ = {:.5} mol/m³, x = {:.5} ({})",
                self.temperature, self.pressure, self.density, self.molefracs, self.phase
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubic::PengRobinsonParameters;
    use ndarray::arr1;

    fn propane_butane() -> Arc<PengRobinson> {
        let parameters = PengRobinsonParameters::new_simple(
            &[369.8, 425.1],
            &[4248000.0, 3796000.0],
            &[0.152, 0.2],
            &[0.0008],
        )
        .unwrap();
        Arc::new(PengRobinson::with_gas_constant(Arc::new(parameters), 8.314))
    }

    #[test]
    fn liquid_and_vapor_state() -> EosResult<()> {
        let eos = propane_butane();
        let x = arr1(&[0.5, 0.5]);
        let liquid = State::new_npt(&eos, 323.15, 1e6, &x, Phase::Liquid)?;
        let vapor = State::new_npt(&eos, 323.15, 1e6, &x, Phase::Vapor)?;
        assert!(vapor.density < liquid.density);
        assert_eq!(liquid.molar_volume, 1.0 / liquid.density);
        assert_eq!(liquid.molefracs, x);
        assert_eq!(liquid.phase, Phase::Liquid);
        assert!(liquid.to_string().contains("liquid"));
        Ok(())
    }

    #[test]
    fn invalid_composition() {
        let eos = propane_butane();
        for x in [arr1(&[0.5, 0.6]), arr1(&[1.2, -0.2]), arr1(&[f64::NAN, 0.5])] {
            assert!(matches!(
                State::new_npt(&eos, 323.15, 1e6, &x, Phase::Liquid),
                Err(EosError::InvalidState(..))
            ));
        }
        assert!(matches!(
            State::new_npt(&eos, 323.15, 1e6, &arr1(&[1.0]), Phase::Liquid),
            Err(EosError::IncompatibleComponents(2, 1))
        ));
    }
}
