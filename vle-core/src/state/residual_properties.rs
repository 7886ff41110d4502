use super::State;
use crate::errors::{EosError, EosResult};
use ndarray::Array1;
use std::f64::consts::SQRT_2;

const SIGMA: f64 = 1.0 + SQRT_2;
const EPSILON: f64 = 1.0 - SQRT_2;

impl State {
    /// Compressibility factor `Z = pV/(RT)`.
    pub fn compressibility(&self) -> f64 {
        self.pressure * self.molar_volume / self.mixture.rt()
    }

    /// Logarithm of the fugacity coefficients of all components.
    ///
    /// $$\ln\varphi_k=\frac{b_k}{b}(Z-1)-\ln(Z-\beta)-\bar q_k I$$
    ///
    /// with $\beta=bp/RT$, $q=a/bRT$ and
    /// $I=\frac{1}{\sigma-\varepsilon}\ln\frac{V+\sigma b}{V+\varepsilon b}$.
    pub fn ln_phi(&self) -> EosResult<Array1<f64>> {
        let m = &self.mixture;
        if !(self.density > 0.0) {
            return Err(EosError::Domain(format!(
                "fugacity coefficient: density = {}",
                self.density
            )));
        }
        let rt = m.rt();
        let v = self.molar_volume;
        let z = self.compressibility();
        let beta = m.b * self.pressure / rt;
        if z - beta <= 0.0 {
            return Err(EosError::Domain(format!(
                "fugacity coefficient: Z - bp/RT = {}",
                z - beta
            )));
        }

        let q = m.a / (m.b * rt);
        let i = ((v + SIGMA * m.b) / (v + EPSILON * m.b)).ln() / (SIGMA - EPSILON);
        let b_ratio = &m.b_i / m.b;
        // q_k = q (1 + dA_k/a - b_k/b) with dA_k = 2 sum_j x_j a_kj - a
        let q_partial = m.a_ij.dot(&self.molefracs) * (2.0 / (m.b * rt)) - &b_ratio * q;
        Ok(&b_ratio * (z - 1.0) - (z - beta).ln() - q_partial * i)
    }

    /// Fugacity coefficients of all components.
    pub fn phi(&self) -> EosResult<Array1<f64>> {
        Ok(self.ln_phi()?.mapv(f64::exp))
    }
}
