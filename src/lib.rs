//! Bubble point pressures and vapor compositions of binary mixtures from the
//! Peng-Robinson equation of state.
//!
//! The numerical engine lives in [cubic_vle_core] and is re-exported here.
//! This crate adds the parameter sets of the available chemical systems and a
//! comparison of calculated bubble points with experimental data.
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub use cubic_vle_core::*;

pub mod estimator;
pub mod systems;
