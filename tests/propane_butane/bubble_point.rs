use approx::assert_relative_eq;
use cubic_vle::cubic::{PengRobinson, PengRobinsonParameters};
use cubic_vle::parameter::{IdentifierOption, Parameter};
use cubic_vle::systems::ChemicalSystem;
use cubic_vle::{BubbleCurve, PhaseEquilibrium, SolverOptions, Termination};
use itertools::Itertools;
use ndarray::arr1;
use std::error::Error;
use std::sync::Arc;

const T: f64 = 323.15;

#[test]
fn bubble_curve_at_experimental_compositions() -> Result<(), Box<dyn Error>> {
    let system = ChemicalSystem::PropaneButane;
    let parameters = system.parameters(T)?;
    let data = system.experimental_data(T)?;
    let curve = BubbleCurve::new(
        &parameters.eos,
        T,
        &data.liquid_molefracs,
        &parameters.saturation_pressures,
        SolverOptions::default(),
    )?;

    assert!(curve.failures().is_empty());
    assert!(curve.is_converged());
    for point in curve.points.iter() {
        let point = point.as_ref().map_err(|e| e.to_string())?;
        assert_eq!(point.termination, Termination::Converged);
        assert!(point.error < 1e-6);
        assert!(point.iterations <= 2000);
        assert_relative_eq!(point.vapor_molefracs().sum(), 1.0, epsilon = 1e-9);
    }

    let p = curve.pressure();
    assert!(p.iter().tuple_windows().all(|(p1, p2)| p2 > p1));
    assert!(p[0] > 5.4e5 && p[0] < 5.7e5);
    assert!(p[11] > 1.6e6 && p[11] < 1.7e6);

    let y = curve.vapor_molefracs();
    for (x, y) in data.liquid_molefracs.iter().zip(y.iter()) {
        assert!(y > x);
    }
    Ok(())
}

#[test]
fn equimolar_bubble_point() -> Result<(), Box<dyn Error>> {
    let parameters = ChemicalSystem::PropaneButane.parameters(T)?;
    let psat = &parameters.saturation_pressures;
    let bp = PhaseEquilibrium::bubble_point(
        &parameters.eos,
        T,
        &arr1(&[0.5, 0.5]),
        psat,
        SolverOptions::default(),
    )?;
    assert!(bp.is_converged());
    assert!(bp.pressure() > psat[1] && bp.pressure() < psat[0]);
    assert!(bp.vapor_molefracs()[0] > 0.5);
    assert!(bp.vle.vapor().density < bp.vle.liquid().density);
    Ok(())
}

#[test]
fn parameters_from_files() -> Result<(), Box<dyn Error>> {
    let parameters = PengRobinsonParameters::from_json(
        &["propane", "butane"],
        "parameters/peng-robinson.json",
        Some("parameters/binary.json"),
        IdentifierOption::Name,
    )?;
    let eos = Arc::new(PengRobinson::with_gas_constant(Arc::new(parameters), 8.314));
    let reference = ChemicalSystem::PropaneButane.parameters(T)?;
    let x = arr1(&[0.3, 0.7]);
    let psat = &reference.saturation_pressures;
    let bp = PhaseEquilibrium::bubble_point(&eos, T, &x, psat, SolverOptions::default())?;
    let bp_reference =
        PhaseEquilibrium::bubble_point(&reference.eos, T, &x, psat, SolverOptions::default())?;
    assert_eq!(bp.pressure(), bp_reference.pressure());
    Ok(())
}
