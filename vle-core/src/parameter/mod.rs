//! Structures and traits that can be used to build model parameters for equations of state.

use itertools::Itertools;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

mod identifier;
mod model_record;

pub use identifier::{Identifier, IdentifierOption};
pub use model_record::{BinaryRecord, PureRecord};

/// Constructor methods for parameters.
///
/// By implementing `Parameter` for a type, you define how parameters
/// of an equation of state can be constructed from a sequence of
/// single substance records and possibly binary interaction parameters.
pub trait Parameter
where
    Self: Sized,
{
    type Pure: Clone + DeserializeOwned;
    type Binary: Clone + DeserializeOwned + Default;

    /// Creates parameters from records for pure substances and possibly binary parameters.
    fn from_records(
        pure_records: Vec<PureRecord<Self::Pure>>,
        binary_records: Option<Array2<Self::Binary>>,
    ) -> Result<Self, ParameterError>;

    /// Return the original pure and binary records that were used to construct the parameters.
    #[allow(clippy::type_complexity)]
    fn records(&self) -> (&[PureRecord<Self::Pure>], Option<&Array2<Self::Binary>>);

    /// Helper function to build matrix from list of records in correct order.
    ///
    /// Pairs that are missing in `binary_records` use the `Default`
    /// implementation of `Self::Binary`.
    fn binary_matrix_from_records(
        pure_records: &[PureRecord<Self::Pure>],
        binary_records: &[BinaryRecord<Identifier, Self::Binary>],
        identifier_option: IdentifierOption,
    ) -> Result<Option<Array2<Self::Binary>>, ParameterError> {
        if binary_records.is_empty() {
            return Ok(None);
        }

        // Build Hashmap (id, id) -> BinaryRecord
        let binary_map: HashMap<(String, String), Self::Binary> = binary_records
            .iter()
            .filter_map(|br| {
                let id1 = br.id1.as_string(identifier_option)?;
                let id2 = br.id2.as_string(identifier_option)?;
                Some(((id1, id2), br.model_record.clone()))
            })
            .collect();

        let ids = pure_records
            .iter()
            .enumerate()
            .map(|(i, pr)| {
                pr.identifier.as_string(identifier_option).ok_or_else(|| {
                    ParameterError::IncompatibleParameters(format!(
                        "No identifier for given identifier_option for pure record {}.",
                        i
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n = pure_records.len();
        Ok(Some(Array2::from_shape_fn([n, n], |(i, j)| {
            binary_map
                .get(&(ids[i].clone(), ids[j].clone()))
                .or_else(|| binary_map.get(&(ids[j].clone(), ids[i].clone())))
                .cloned()
                .unwrap_or_default()
        })))
    }

    /// Creates parameters from substance information stored in json files.
    fn from_json<P>(
        substances: &[&str],
        file_pure: P,
        file_binary: Option<P>,
        identifier_option: IdentifierOption,
    ) -> Result<Self, ParameterError>
    where
        P: AsRef<Path>,
    {
        let json_binary = file_binary.map(fs::read_to_string).transpose()?;
        Self::from_json_str(
            substances,
            &fs::read_to_string(file_pure)?,
            json_binary.as_deref(),
            identifier_option,
        )
    }

    /// Creates parameters from substance information given as json strings.
    fn from_json_str(
        substances: &[&str],
        json_pure: &str,
        json_binary: Option<&str>,
        identifier_option: IdentifierOption,
    ) -> Result<Self, ParameterError> {
        let records =
            PureRecord::<Self::Pure>::from_json_str(substances, json_pure, identifier_option)?;
        let binary_records = json_binary
            .map(BinaryRecord::from_json_str)
            .transpose()?
            .unwrap_or_default();
        let record_matrix =
            Self::binary_matrix_from_records(&records, &binary_records, identifier_option)?;
        Self::from_records(records, record_matrix)
    }
}

/// Build the symmetric matrix of binary interaction parameters from the
/// flattened upper triangle.
///
/// The entries of `upper_triangle` are ordered row by row over all pairs
/// `i < j`, i.e. `[k_01, k_02, ..., k_0n, k_12, ...]`. The diagonal is zero.
pub fn binary_matrix_from_upper_triangle(
    n: usize,
    upper_triangle: &[f64],
) -> Result<Array2<f64>, ParameterError> {
    let pairs = n * n.saturating_sub(1) / 2;
    if upper_triangle.len() != pairs {
        return Err(ParameterError::IncompatibleParameters(format!(
            "{} components require {} binary interaction parameters, got {}.",
            n,
            pairs,
            upper_triangle.len()
        )));
    }
    let mut k_ij = Array2::zeros([n, n]);
    for ((i, j), &k) in (0..n).tuple_combinations().zip(upper_triangle) {
        k_ij[(i, j)] = k;
        k_ij[(j, i)] = k;
    }
    Ok(k_ij)
}

/// Error type for incomplete parameter information and IO problems.
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("The following component(s) were not found: {0}")]
    ComponentsNotFound(String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
}
