use criterion::{criterion_group, criterion_main, Criterion};
use cubic_vle::cubic::PengRobinson;
use cubic_vle::systems::ChemicalSystem;
use cubic_vle::{
    density_iteration, equilibrium_ratio, BubbleCurve, Phase, PhaseEquilibrium, SolverOptions,
};
use ndarray::{arr1, Array1};
use std::sync::Arc;

const T: f64 = 323.15;

/// Density root of the liquid and the vapor phase
fn density((eos, p, x, phase): (&Arc<PengRobinson>, f64, &Array1<f64>, Phase)) {
    let mixture = eos.mixing_rule(T, x).unwrap();
    density_iteration(&mixture, p, phase).unwrap();
}

fn k_values((eos, p, x, y): (&Arc<PengRobinson>, f64, &Array1<f64>, &Array1<f64>)) {
    equilibrium_ratio(eos, T, p, x, y).unwrap();
}

fn bubble_point((eos, x, psat): (&Arc<PengRobinson>, &Array1<f64>, &Array1<f64>)) {
    PhaseEquilibrium::bubble_point(eos, T, x, psat, SolverOptions::default()).unwrap();
}

fn bubble_curve((eos, x, psat): (&Arc<PengRobinson>, &Array1<f64>, &Array1<f64>)) {
    BubbleCurve::new(eos, T, x, psat, SolverOptions::default()).unwrap();
}

fn propane_butane(c: &mut Criterion) {
    let system = ChemicalSystem::PropaneButane;
    let parameters = system.parameters(T).unwrap();
    let data = system.experimental_data(T).unwrap();
    let eos = &parameters.eos;
    let psat = &parameters.saturation_pressures;
    let x = arr1(&[0.5, 0.5]);
    let y = arr1(&[0.72, 0.28]);

    let mut group = c.benchmark_group("bubble_point_propane_butane");
    group.bench_function("density_liquid", |b| {
        b.iter(|| density((eos, 1e6, &x, Phase::Liquid)))
    });
    group.bench_function("density_vapor", |b| {
        b.iter(|| density((eos, 1e6, &y, Phase::Vapor)))
    });
    group.bench_function("equilibrium_ratio", |b| {
        b.iter(|| k_values((eos, 1e6, &x, &y)))
    });
    group.bench_function("bubble_point", |b| {
        b.iter(|| bubble_point((eos, &x, psat)))
    });
    group.bench_function("bubble_curve", |b| {
        b.iter(|| bubble_curve((eos, &data.liquid_molefracs, psat)))
    });
}

criterion_group!(bench, propane_butane);
criterion_main!(bench);
