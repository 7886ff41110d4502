//! Implementation of the Peng-Robinson equation of state.
//!
//! Substance constants (`a_c`, `b`, `kappa`) are evaluated once when the
//! equation of state is created. Everything that depends on temperature and
//! composition is collected in [MixtureParameters], which is recomputed for
//! every phase.
//!
//! The pressure is written in terms of the molar density
//!
//! $$p(\rho)=\frac{\rho RT}{1-b\rho}-\frac{a\rho^2}{1+2b\rho-b^2\rho^2}$$
use crate::errors::{EosError, EosResult};
use crate::parameter::{binary_matrix_from_upper_triangle, Identifier, Parameter};
use crate::parameter::{ParameterError, PureRecord};
use ndarray::{Array1, Array2};
use num_dual::{first_derivative, second_derivative, Dual2_64, Dual64, DualNum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Molar gas constant in J/(mol K).
pub const RGAS: f64 = 8.314462618;

const OMEGA_A: f64 = 0.45724;
const OMEGA_B: f64 = 0.07780;

/// Largest accessible packing fraction `b * rho`; the pressure has a pole at 1.
const MAX_PACKING: f64 = 1.0 - 1e-10;

/// Peng-Robinson parameters for a single substance.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PengRobinsonRecord {
    /// critical temperature in Kelvin
    tc: f64,
    /// critical pressure in Pascal
    pc: f64,
    /// acentric factor
    acentric_factor: f64,
}

impl PengRobinsonRecord {
    /// Create a new pure substance record for the Peng-Robinson equation of state.
    pub fn new(tc: f64, pc: f64, acentric_factor: f64) -> Self {
        Self {
            tc,
            pc,
            acentric_factor,
        }
    }
}

impl fmt::Display for PengRobinsonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PengRobinsonRecord(tc={} K", self.tc)?;
        write!(f, ", pc={} Pa", self.pc)?;
        write!(f, ", acentric factor={})", self.acentric_factor)
    }
}

/// Peng-Robinson parameters for one or more substances.
#[derive(Debug)]
pub struct PengRobinsonParameters {
    /// Critical temperature in Kelvin
    tc: Array1<f64>,
    /// Critical pressure in Pascal
    pc: Array1<f64>,
    kappa: Array1<f64>,
    /// Binary interaction parameter
    k_ij: Array2<f64>,
    /// List of pure component records
    pure_records: Vec<PureRecord<PengRobinsonRecord>>,
}

impl fmt::Display for PengRobinsonParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pure_records
            .iter()
            .try_for_each(|pr| writeln!(f, "{}", pr))?;
        writeln!(f, "\nk_ij:\n{}", self.k_ij)
    }
}

impl PengRobinsonParameters {
    /// Build a parameter set from plain arrays.
    ///
    /// `k_ij` is the flattened upper triangle of the binary interaction
    /// parameters, see [binary_matrix_from_upper_triangle].
    pub fn new_simple(
        tc: &[f64],
        pc: &[f64],
        acentric_factor: &[f64],
        k_ij: &[f64],
    ) -> Result<Self, ParameterError> {
        if [pc.len(), acentric_factor.len()]
            .iter()
            .any(|&l| l != tc.len())
        {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "each component has to have parameters.",
            )));
        }
        let records = (0..tc.len())
            .map(|i| {
                let record = PengRobinsonRecord::new(tc[i], pc[i], acentric_factor[i]);
                PureRecord::new(Identifier::default(), record)
            })
            .collect();
        let k_ij = binary_matrix_from_upper_triangle(tc.len(), k_ij)?;
        Self::from_records(records, Some(k_ij))
    }

    /// Number of substances.
    pub fn components(&self) -> usize {
        self.tc.len()
    }

    /// Symmetric matrix of binary interaction parameters.
    pub fn k_ij(&self) -> &Array2<f64> {
        &self.k_ij
    }
}

impl Parameter for PengRobinsonParameters {
    type Pure = PengRobinsonRecord;
    type Binary = f64;

    fn from_records(
        pure_records: Vec<PureRecord<Self::Pure>>,
        binary_records: Option<Array2<Self::Binary>>,
    ) -> Result<Self, ParameterError> {
        let n = pure_records.len();
        if n == 0 {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "at least one component is required.",
            )));
        }

        let mut tc = Array1::zeros(n);
        let mut pc = Array1::zeros(n);
        let mut kappa = Array1::zeros(n);
        for (i, record) in pure_records.iter().enumerate() {
            let r = &record.model_record;
            if !(r.tc > 0.0 && r.pc > 0.0) {
                return Err(ParameterError::IncompatibleParameters(format!(
                    "critical properties of component {} have to be positive.",
                    i
                )));
            }
            tc[i] = r.tc;
            pc[i] = r.pc;
            kappa[i] = 0.37464 + (1.54226 - 0.26992 * r.acentric_factor) * r.acentric_factor;
        }

        let k_ij = binary_records.unwrap_or_else(|| Array2::zeros([n; 2]));
        if k_ij.dim() != (n, n) {
            return Err(ParameterError::IncompatibleParameters(format!(
                "binary interaction parameters have shape {:?} for {} components.",
                k_ij.dim(),
                n
            )));
        }
        if k_ij != k_ij.t() {
            return Err(ParameterError::IncompatibleParameters(String::from(
                "binary interaction parameters have to be symmetric.",
            )));
        }

        Ok(Self {
            tc,
            pc,
            kappa,
            k_ij,
            pure_records,
        })
    }

    fn records(&self) -> (&[PureRecord<PengRobinsonRecord>], Option<&Array2<f64>>) {
        (&self.pure_records, Some(&self.k_ij))
    }
}

/// The Peng-Robinson equation of state.
#[derive(Debug)]
pub struct PengRobinson {
    parameters: Arc<PengRobinsonParameters>,
    gas_constant: f64,
    /// attraction parameter at the critical point
    a_c: Array1<f64>,
    /// covolume
    b: Array1<f64>,
}

impl PengRobinson {
    /// Create a new equation of state using the CODATA gas constant.
    pub fn new(parameters: Arc<PengRobinsonParameters>) -> Self {
        Self::with_gas_constant(parameters, RGAS)
    }

    /// Create a new equation of state with a custom value of the gas constant
    /// in J/(mol K).
    pub fn with_gas_constant(parameters: Arc<PengRobinsonParameters>, gas_constant: f64) -> Self {
        let p = &parameters;
        let a_c = OMEGA_A * gas_constant.powi(2) * p.tc.mapv(|tc| tc.powi(2)) / &p.pc;
        let b = OMEGA_B * gas_constant * &p.tc / &p.pc;
        Self {
            parameters,
            gas_constant,
            a_c,
            b,
        }
    }

    pub fn parameters(&self) -> &Arc<PengRobinsonParameters> {
        &self.parameters
    }

    pub fn components(&self) -> usize {
        self.parameters.components()
    }

    pub fn gas_constant(&self) -> f64 {
        self.gas_constant
    }

    /// Temperature dependent attraction parameters `a_i(T)` of the pure substances.
    pub fn attraction(&self, temperature: f64) -> Array1<f64> {
        let p = &self.parameters;
        let alpha = (&p.tc.mapv(|tc| 1.0 - (temperature / tc).sqrt()) * &p.kappa + 1.0)
            .mapv(|x| x.powi(2));
        alpha * &self.a_c
    }

    /// Covolumes `b_i` of the pure substances.
    pub fn covolume(&self) -> &Array1<f64> {
        &self.b
    }

    /// Van der Waals one-fluid mixing rule for the phase with the given composition.
    pub fn mixing_rule(
        &self,
        temperature: f64,
        molefracs: &Array1<f64>,
    ) -> EosResult<MixtureParameters> {
        if molefracs.len() != self.components() {
            return Err(EosError::IncompatibleComponents(
                self.components(),
                molefracs.len(),
            ));
        }
        if !(temperature > 0.0 && temperature.is_finite()) {
            return Err(EosError::InvalidState(
                String::from("mixing rule"),
                String::from("temperature"),
                temperature,
            ));
        }
        Ok(MixtureParameters::new(
            temperature,
            self.gas_constant,
            &self.attraction(temperature),
            self.b.clone(),
            &self.parameters.k_ij,
            molefracs,
        ))
    }
}

impl fmt::Display for PengRobinson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Peng Robinson")
    }
}

/// Peng-Robinson parameters of a mixture at fixed temperature and composition.
#[derive(Clone, Debug)]
pub struct MixtureParameters {
    /// temperature in Kelvin
    pub temperature: f64,
    /// gas constant in J/(mol K)
    pub gas_constant: f64,
    /// mixture attraction parameter in Pa m^6/mol^2
    pub a: f64,
    /// mixture covolume in m^3/mol
    pub b: f64,
    /// cross attraction parameters `sqrt(a_i a_j) (1 - k_ij)`
    pub a_ij: Array2<f64>,
    /// covolumes of the pure substances
    pub b_i: Array1<f64>,
}

impl MixtureParameters {
    pub fn new(
        temperature: f64,
        gas_constant: f64,
        a_i: &Array1<f64>,
        b_i: Array1<f64>,
        k_ij: &Array2<f64>,
        molefracs: &Array1<f64>,
    ) -> Self {
        let n = a_i.len();
        let a_ij = Array2::from_shape_fn([n, n], |(i, j)| {
            (a_i[i] * a_i[j]).sqrt() * (1.0 - k_ij[(i, j)])
        });
        let a = molefracs.dot(&a_ij.dot(molefracs));
        let b = molefracs.dot(&b_i);
        Self {
            temperature,
            gas_constant,
            a,
            b,
            a_ij,
            b_i,
        }
    }

    /// Product of gas constant and temperature.
    pub fn rt(&self) -> f64 {
        self.gas_constant * self.temperature
    }

    /// Upper bound of the density interval in which roots are searched.
    pub fn max_density(&self) -> f64 {
        MAX_PACKING / self.b
    }

    /// Pressure in Pa at the given molar density in mol/m^3.
    pub fn pressure<D: DualNum<f64> + Copy>(&self, density: D) -> D {
        let b_rho = density * self.b;
        density * self.rt() / (-b_rho + 1.0)
            - density.powi(2) * self.a / (b_rho * (-b_rho + 2.0) + 1.0)
    }

    /// Pressure and its first density derivative.
    pub fn dp_drho(&self, density: f64) -> (f64, f64) {
        first_derivative(|rho: Dual64| self.pressure(rho), density)
    }

    /// Pressure and its first and second density derivatives.
    pub fn d2p_drho2(&self, density: f64) -> (f64, f64, f64) {
        second_derivative(|rho: Dual2_64| self.pressure(rho), density)
    }
}
