use cubic_vle::estimator::EstimatorError;
use cubic_vle::systems::ChemicalSystem;
use cubic_vle::{BubbleCurve, SolverOptions};
use ndarray::arr1;
use std::error::Error;

#[test]
fn deviation_from_experimental_data() -> Result<(), Box<dyn Error>> {
    let system = ChemicalSystem::PropaneButane;
    let parameters = system.parameters(323.15)?;
    let data = system.experimental_data(323.15)?;
    let curve = data.bubble_curve(
        &parameters.eos,
        &parameters.saturation_pressures,
        SolverOptions::default(),
    )?;
    let deviation = data.deviation(&curve)?;

    assert_eq!(deviation.relative_pressure.len(), data.datapoints());
    assert!(deviation.aard_pressure() < 0.02);
    assert!(deviation.aard_vapor_molefracs() < 0.05);
    assert!(deviation.to_string().contains("AARD pressure"));
    Ok(())
}

#[test]
fn deviation_requires_matching_compositions() -> Result<(), Box<dyn Error>> {
    let system = ChemicalSystem::PropaneButane;
    let parameters = system.parameters(323.15)?;
    let data = system.experimental_data(323.15)?;
    let curve = BubbleCurve::new(
        &parameters.eos,
        323.15,
        &arr1(&[0.5]),
        &parameters.saturation_pressures,
        SolverOptions::default(),
    )?;
    assert!(matches!(
        data.deviation(&curve),
        Err(EstimatorError::IncompatibleCompositions)
    ));
    Ok(())
}
