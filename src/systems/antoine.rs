use serde::{Deserialize, Serialize};
use std::fmt;

/// Coefficients of the Antoine equation
///
/// $$\log_{10}\left(\frac{p^\mathrm{sat}}{\mathrm{bar}}\right)=A-\frac{B}{T/\mathrm{K}+C}$$
///
/// together with the temperature range in which they were fitted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AntoineRecord {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// lower end of the validity range in K
    pub min_temperature: f64,
    /// upper end of the validity range in K
    pub max_temperature: f64,
}

impl AntoineRecord {
    pub fn new(a: f64, b: f64, c: f64, min_temperature: f64, max_temperature: f64) -> Self {
        Self {
            a,
            b,
            c,
            min_temperature,
            max_temperature,
        }
    }

    /// Returns `true` if the temperature lies within the fitted range.
    pub fn is_valid(&self, temperature: f64) -> bool {
        (self.min_temperature..=self.max_temperature).contains(&temperature)
    }

    /// Saturation pressure in Pa.
    pub fn saturation_pressure(&self, temperature: f64) -> f64 {
        1e5 * 10f64.powf(self.a - self.b / (temperature + self.c))
    }
}

impl fmt::Display for AntoineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AntoineRecord(a={}, b={}, c={}, T=[{} K, {} K])",
            self.a, self.b, self.c, self.min_temperature, self.max_temperature
        )
    }
}
