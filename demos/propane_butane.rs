use cubic_vle::systems::ChemicalSystem;
use cubic_vle::{SolverOptions, Verbosity};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let temperature = 323.15;
    let system: ChemicalSystem = "propane-butane".parse()?;
    let parameters = system.parameters(temperature)?;
    let data = system.experimental_data(temperature)?;
    println!("{}", parameters);

    let options = SolverOptions::default().verbosity(Verbosity::Result);
    let curve = data.bubble_curve(&parameters.eos, &parameters.saturation_pressures, options)?;
    println!("{}", curve);
    println!("{}", data.deviation(&curve)?);
    Ok(())
}
