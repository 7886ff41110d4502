//! Density roots of the Peng-Robinson equation of state.
//!
//! The isotherm `p(rho)` is classified from its derivatives before a root is
//! searched, so that every bisection starts from an interval on which the
//! pressure is monotonic.
use crate::cubic::MixtureParameters;
use crate::errors::{EosError, EosResult};

/// Absolute tolerance of the residual in all bisections.
pub const BISECTION_TOL: f64 = 1e-6;
const MAX_ITER_BISECTION: usize = 2000;

/// Phase of which the density root is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Vapor,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Liquid => write!(f, "liquid"),
            Self::Vapor => write!(f, "vapor"),
        }
    }
}

/// Shape of an isotherm in the pressure-density plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Isotherm {
    /// The curvature at zero density is positive and there is exactly one root for every pressure.
    Monotonic,
    /// The isotherm has an inflection point with positive slope.
    Inflected {
        /// density of the inflection point
        inflection: f64,
        /// pressure at the inflection point
        pressure: f64,
    },
    /// The isotherm has a local maximum and a local minimum (van der Waals loop).
    Loop {
        /// density of the inflection point
        inflection: f64,
        /// density of the local pressure maximum (vapor spinodal)
        rho_max: f64,
        /// pressure at the local maximum
        p_max: f64,
        /// density of the local pressure minimum (liquid spinodal)
        rho_min: f64,
        /// pressure at the local minimum
        p_min: f64,
    },
}

impl Isotherm {
    /// Classify the isotherm of the given mixture.
    pub fn classify(mixture: &MixtureParameters) -> EosResult<Self> {
        let rho_limit = mixture.max_density();
        let (_, _, d2p_drho2) = mixture.d2p_drho2(0.0);
        if d2p_drho2 > 0.0 {
            return Ok(Self::Monotonic);
        }

        let inflection = bisection(|rho| mixture.d2p_drho2(rho).2, 0.0, rho_limit)?;
        let (pressure, dp_drho) = mixture.dp_drho(inflection);
        if dp_drho > 0.0 {
            return Ok(Self::Inflected {
                inflection,
                pressure,
            });
        }

        let rho_max = bisection(|rho| mixture.dp_drho(rho).1, 0.0, inflection)?;
        let rho_min = bisection(|rho| mixture.dp_drho(rho).1, inflection, rho_limit)?;
        Ok(Self::Loop {
            inflection,
            rho_max,
            p_max: mixture.pressure(rho_max),
            rho_min,
            p_min: mixture.pressure(rho_min),
        })
    }

    /// Density interval that contains the physical root for the given
    /// pressure and phase.
    ///
    /// The phase is only relevant if three roots exist.
    pub fn bracket(&self, mixture: &MixtureParameters, pressure: f64, phase: Phase) -> (f64, f64) {
        let rho_limit = mixture.max_density();
        match *self {
            Self::Monotonic => (0.0, rho_limit),
            Self::Inflected {
                inflection,
                pressure: p_cc,
            } => {
                if pressure < p_cc {
                    (0.0, inflection)
                } else {
                    (inflection, rho_limit)
                }
            }
            Self::Loop {
                rho_max,
                p_max,
                rho_min,
                p_min,
                ..
            } => {
                if pressure >= p_max {
                    (rho_min, rho_limit)
                } else if pressure <= p_min {
                    (0.0, rho_max)
                } else {
                    match phase {
                        Phase::Vapor => (0.0, rho_max),
                        Phase::Liquid => (rho_min, rho_limit),
                    }
                }
            }
        }
    }
}

/// Find a root of `f` in `[lower, upper]` by interval halving.
///
/// The iteration stops as soon as `|f| < BISECTION_TOL` or the interval
/// cannot be halved any further.
pub fn bisection<F>(f: F, lower: f64, upper: f64) -> EosResult<f64>
where
    F: Fn(f64) -> f64,
{
    let (mut lower, mut upper) = (lower, upper);
    let mut f_lower = f(lower);
    let f_upper = f(upper);
    if f_lower == 0.0 {
        return Ok(lower);
    }
    if f_upper == 0.0 {
        return Ok(upper);
    }
    if f_lower.is_nan() || f_upper.is_nan() || f_lower.signum() == f_upper.signum() {
        return Err(EosError::RootNotBracketed {
            lower,
            upper,
            f_lower,
            f_upper,
        });
    }

    for _ in 0..MAX_ITER_BISECTION {
        let mid = 0.5 * (lower + upper);
        let f_mid = f(mid);
        if f_mid.is_nan() {
            return Err(EosError::Domain(format!("bisection at x = {}", mid)));
        }
        if f_mid.abs() < BISECTION_TOL || mid <= lower || mid >= upper {
            return Ok(mid);
        }
        if f_mid.signum() == f_lower.signum() {
            lower = mid;
            f_lower = f_mid;
        } else {
            upper = mid;
        }
    }
    Err(EosError::NotConverged(String::from("bisection")))
}

/// Molar density in mol/m^3 of the requested phase at the given pressure in Pa.
///
/// If only one root exists, it is returned regardless of `phase`.
pub fn density_iteration(
    mixture: &MixtureParameters,
    pressure: f64,
    phase: Phase,
) -> EosResult<f64> {
    if !(pressure > 0.0 && pressure.is_finite()) {
        return Err(EosError::InvalidState(
            String::from("density iteration"),
            String::from("pressure"),
            pressure,
        ));
    }
    let isotherm = Isotherm::classify(mixture)?;
    let (lower, upper) = isotherm.bracket(mixture, pressure, phase);
    bisection(|rho| mixture.pressure(rho) - pressure, lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubic::{PengRobinson, PengRobinsonParameters};
    use ndarray::{arr1, Array1};
    use std::sync::Arc;

    fn propane() -> PengRobinson {
        let parameters =
            PengRobinsonParameters::new_simple(&[369.8], &[4248000.0], &[0.152], &[]).unwrap();
        PengRobinson::with_gas_constant(Arc::new(parameters), 8.314)
    }

    fn pure(temperature: f64) -> MixtureParameters {
        propane().mixing_rule(temperature, &arr1(&[1.0])).unwrap()
    }

    fn assert_root(mixture: &MixtureParameters, rho: f64, pressure: f64) {
        assert!(rho > 0.0 && rho < 1.0 / mixture.b);
        assert!((mixture.pressure(rho) - pressure).abs() < 1e-3);
    }

    #[test]
    fn bisection_sqrt() -> EosResult<()> {
        let x = bisection(|x| x * x - 2.0, 0.0, 2.0)?;
        assert!((x * x - 2.0).abs() < BISECTION_TOL);
        Ok(())
    }

    #[test]
    fn bisection_not_bracketed() {
        assert!(matches!(
            bisection(|x| x * x + 1.0, -1.0, 1.0),
            Err(EosError::RootNotBracketed { .. })
        ));
    }

    #[test]
    fn three_roots() -> EosResult<()> {
        let mix = pure(300.0);
        let isotherm = Isotherm::classify(&mix)?;
        let Isotherm::Loop {
            inflection,
            rho_max,
            p_max,
            rho_min,
            p_min,
        } = isotherm
        else {
            panic!("expected a van der Waals loop, got {:?}", isotherm);
        };
        assert!(rho_max < inflection && inflection < rho_min);
        assert!(p_min < p_max);

        let p = 0.5 * p_max;
        assert!(p > p_min);
        let rho_v = density_iteration(&mix, p, Phase::Vapor)?;
        let rho_l = density_iteration(&mix, p, Phase::Liquid)?;
        assert_root(&mix, rho_v, p);
        assert_root(&mix, rho_l, p);
        assert!(rho_v < rho_max);
        assert!(rho_l > rho_min);
        assert!(rho_v < rho_l);
        Ok(())
    }

    #[test]
    fn single_root_above_vapor_spinodal() -> EosResult<()> {
        let mix = pure(300.0);
        let p = 5e7;
        let rho_v = density_iteration(&mix, p, Phase::Vapor)?;
        let rho_l = density_iteration(&mix, p, Phase::Liquid)?;
        assert_root(&mix, rho_l, p);
        assert_eq!(rho_v, rho_l);
        Ok(())
    }

    #[test]
    fn supercritical_roots() -> EosResult<()> {
        let mix = pure(500.0);
        assert!(matches!(
            Isotherm::classify(&mix)?,
            Isotherm::Inflected { .. }
        ));
        for &p in &[1e5, 4e6, 2e7] {
            let rho_v = density_iteration(&mix, p, Phase::Vapor)?;
            let rho_l = density_iteration(&mix, p, Phase::Liquid)?;
            assert_root(&mix, rho_v, p);
            assert_eq!(rho_v, rho_l);
        }
        Ok(())
    }

    #[test]
    fn monotonic_isotherm() -> EosResult<()> {
        let mix = pure(2000.0);
        assert_eq!(Isotherm::classify(&mix)?, Isotherm::Monotonic);
        let rho = density_iteration(&mix, 1e6, Phase::Liquid)?;
        assert_root(&mix, rho, 1e6);
        Ok(())
    }

    #[test]
    fn roots_of_mixtures() -> EosResult<()> {
        let parameters = PengRobinsonParameters::new_simple(
            &[369.8, 425.1],
            &[4248000.0, 3796000.0],
            &[0.152, 0.2],
            &[0.0008],
        )?;
        let pr = PengRobinson::with_gas_constant(Arc::new(parameters), 8.314);
        for &x in Array1::linspace(0.0, 1.0, 11).iter() {
            let mix = pr.mixing_rule(323.15, &arr1(&[x, 1.0 - x]))?;
            for &p in &[2e5, 1e6, 3e6] {
                for phase in [Phase::Liquid, Phase::Vapor] {
                    let rho = density_iteration(&mix, p, phase)?;
                    assert_root(&mix, rho, p);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn invalid_pressure() {
        let mix = pure(300.0);
        for p in [0.0, -1e5, f64::NAN] {
            assert!(matches!(
                density_iteration(&mix, p, Phase::Vapor),
                Err(EosError::InvalidState(..))
            ));
        }
    }
}
