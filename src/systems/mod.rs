//! Parameter sets of the chemical systems shipped with the crate.
//!
//! Peng-Robinson constants, Antoine coefficients, binary interaction
//! parameters and experimental bubble points are stored as JSON files in the
//! `parameters` directory and embedded at compile time.
use crate::estimator::{BinaryVleData, EstimatorError};
use cubic_vle_core::cubic::{PengRobinson, PengRobinsonParameters};
use cubic_vle_core::parameter::{IdentifierOption, Parameter, ParameterError, PureRecord};
use cubic_vle_core::EosError;
use ndarray::Array1;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

mod antoine;
pub use antoine::AntoineRecord;

const PENG_ROBINSON_JSON: &str = include_str!("../../parameters/peng-robinson.json");
const ANTOINE_JSON: &str = include_str!("../../parameters/antoine.json");
const BINARY_JSON: &str = include_str!("../../parameters/binary.json");
const BINARY_VLE_JSON: &str = include_str!("../../parameters/binary-vle.json");

/// Gas constant in J/(mol K) the parameter sets are used with.
pub const GAS_CONSTANT: f64 = 8.314;

/// Temperatures of measured data sets are matched within this tolerance in K.
const TEMPERATURE_TOL: f64 = 1e-8;

/// Error type for unavailable chemical systems and operating conditions.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unknown chemical system '{0}'. Available systems: {systems}", systems = ChemicalSystem::names().join(", "))]
    UnknownSystem(String),
    #[error("The Antoine parameters of {component} are valid between {min} K and {max} K, got T = {temperature} K.")]
    UnsupportedTemperature {
        component: String,
        temperature: f64,
        min: f64,
        max: f64,
    },
    #[error("There are no experimental data for {system} at T = {temperature} K. Available temperatures: {available:?} K")]
    NoExperimentalData {
        system: ChemicalSystem,
        temperature: f64,
        available: Vec<f64>,
    },
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
    #[error(transparent)]
    EosError(#[from] EosError),
    #[error(transparent)]
    EstimatorError(#[from] EstimatorError),
}

/// Binary mixtures for which parameters are available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChemicalSystem {
    PropaneButane,
}

impl ChemicalSystem {
    const ALL: [Self; 1] = [Self::PropaneButane];

    /// Names of all available systems.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.to_string()).collect()
    }

    /// Names of the components in the order used in all arrays.
    pub fn components(&self) -> [&'static str; 2] {
        match self {
            Self::PropaneButane => ["propane", "butane"],
        }
    }

    /// Peng-Robinson equation of state of the mixture.
    pub fn equation_of_state(&self) -> Result<PengRobinson, ConfigurationError> {
        let parameters = PengRobinsonParameters::from_json_str(
            &self.components(),
            PENG_ROBINSON_JSON,
            Some(BINARY_JSON),
            IdentifierOption::Name,
        )?;
        Ok(PengRobinson::with_gas_constant(
            Arc::new(parameters),
            GAS_CONSTANT,
        ))
    }

    /// Antoine coefficients of the components.
    pub fn antoine_records(&self) -> Result<Vec<PureRecord<AntoineRecord>>, ConfigurationError> {
        Ok(PureRecord::from_json_str(
            &self.components(),
            ANTOINE_JSON,
            IdentifierOption::Name,
        )?)
    }

    /// All parameters needed for a bubble point calculation at the given temperature.
    ///
    /// Fails if the temperature is outside of the validity range of any
    /// of the Antoine correlations.
    pub fn parameters(&self, temperature: f64) -> Result<SystemParameters, ConfigurationError> {
        let antoine = self.antoine_records()?;
        for (name, record) in self.components().iter().zip(&antoine) {
            let r = &record.model_record;
            if !r.is_valid(temperature) {
                return Err(ConfigurationError::UnsupportedTemperature {
                    component: name.to_string(),
                    temperature,
                    min: r.min_temperature,
                    max: r.max_temperature,
                });
            }
        }
        let saturation_pressures = antoine
            .iter()
            .map(|r| r.model_record.saturation_pressure(temperature))
            .collect();
        Ok(SystemParameters {
            system: *self,
            temperature,
            gas_constant: GAS_CONSTANT,
            eos: Arc::new(self.equation_of_state()?),
            antoine,
            saturation_pressures,
        })
    }

    /// Measured bubble points at the given temperature.
    pub fn experimental_data(&self, temperature: f64) -> Result<BinaryVleData, ConfigurationError> {
        let records: Vec<BinaryVleRecord> =
            serde_json::from_str(BINARY_VLE_JSON).map_err(ParameterError::from)?;
        let mut available = Vec::new();
        for record in records {
            if record.system.parse::<ChemicalSystem>()? != *self {
                continue;
            }
            if (record.temperature - temperature).abs() < TEMPERATURE_TOL {
                return Ok(BinaryVleData::new(
                    record.temperature,
                    Array1::from_vec(record.liquid_molefracs),
                    Array1::from_vec(record.vapor_molefracs),
                    Array1::from_vec(record.pressure),
                )?);
            }
            available.push(record.temperature);
        }
        Err(ConfigurationError::NoExperimentalData {
            system: *self,
            temperature,
            available,
        })
    }
}

impl fmt::Display for ChemicalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components().join("-"))
    }
}

impl FromStr for ChemicalSystem {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "propane-butane" => Ok(Self::PropaneButane),
            _ => Err(ConfigurationError::UnknownSystem(s.to_owned())),
        }
    }
}

/// Parameters of a chemical system at fixed temperature.
#[derive(Clone, Debug)]
pub struct SystemParameters {
    pub system: ChemicalSystem,
    /// Temperature in K
    pub temperature: f64,
    /// Gas constant in J/(mol K)
    pub gas_constant: f64,
    pub eos: Arc<PengRobinson>,
    pub antoine: Vec<PureRecord<AntoineRecord>>,
    /// Pure component saturation pressures from the Antoine equation in Pa
    pub saturation_pressures: Array1<f64>,
}

impl fmt::Display for SystemParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at T = {} K", self.system, self.temperature)?;
        writeln!(f, "R = {} J/(mol K)", self.gas_constant)?;
        write!(f, "{}", self.eos.parameters())?;
        for (name, psat) in self.system.components().iter().zip(&self.saturation_pressures) {
            writeln!(f, "p_sat({}) = {:.6e} Pa", name, psat)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct BinaryVleRecord {
    system: String,
    temperature: f64,
    liquid_molefracs: Vec<f64>,
    vapor_molefracs: Vec<f64>,
    pressure: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_system() {
        for name in ["propane-butane", "Propane_Butane", "PROPANE-BUTANE"] {
            assert_eq!(
                name.parse::<ChemicalSystem>().unwrap(),
                ChemicalSystem::PropaneButane
            );
        }
        assert!(matches!(
            "methane-ethane".parse::<ChemicalSystem>(),
            Err(ConfigurationError::UnknownSystem(ref s)) if s == "methane-ethane"
        ));
        assert_eq!(ChemicalSystem::PropaneButane.to_string(), "propane-butane");
    }

    #[test]
    fn propane_butane_parameters() -> Result<(), ConfigurationError> {
        let p = ChemicalSystem::PropaneButane.parameters(323.15)?;
        assert_eq!(p.gas_constant, 8.314);
        assert_eq!(p.eos.components(), 2);
        assert_eq!(p.eos.parameters().k_ij()[(0, 1)], 0.0008);
        assert_relative_eq!(p.saturation_pressures[0], 1.7392e6, max_relative = 1e-4);
        assert_relative_eq!(p.saturation_pressures[1], 4.9478e5, max_relative = 1e-4);
        assert_eq!(p.antoine[1].identifier.cas.as_deref(), Some("106-97-8"));
        Ok(())
    }

    #[test]
    fn unsupported_temperature() {
        assert!(matches!(
            ChemicalSystem::PropaneButane.parameters(400.0),
            Err(ConfigurationError::UnsupportedTemperature { ref component, .. }) if component == "propane"
        ));
    }

    #[test]
    fn experimental_data() -> Result<(), ConfigurationError> {
        let data = ChemicalSystem::PropaneButane.experimental_data(323.15)?;
        assert_eq!(data.datapoints(), 12);
        assert_eq!(data.liquid_molefracs[0], 0.054);
        assert_eq!(data.pressure[11], 1643000.0);

        assert!(matches!(
            ChemicalSystem::PropaneButane.experimental_data(300.0),
            Err(ConfigurationError::NoExperimentalData { ref available, .. }) if available == &[323.15]
        ));
        Ok(())
    }
}
