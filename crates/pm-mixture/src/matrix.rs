//! Dense per-property matrices built from per-component coefficient series.

use std::collections::HashMap;

use nalgebra::DMatrix;
use pm_data::NumericRecord;

use crate::config::EngineConfig;
use crate::error::{MixtureError, MixtureResult};
use crate::normalize::{MixtureEntry, MixtureIndex, MixtureProp};

/// Rows follow component declaration order, columns follow the numeric
/// suffix of the coefficient rows.
pub type PropertyMatrix = DMatrix<f64>;

/// Every (mixture, property prefix) matrix of an index.
#[derive(Debug, Clone, Default)]
pub struct MatrixTable {
    matrices: HashMap<(String, String), PropertyMatrix>,
}

impl MatrixTable {
    pub fn get(&self, label: &str, prefix: &str) -> Option<&PropertyMatrix> {
        self.matrices.get(&(label.to_string(), prefix.to_string()))
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// Build the matrices of every advertised property of every mixture.
pub fn build_matrices(index: &MixtureIndex, config: &EngineConfig) -> MixtureResult<MatrixTable> {
    let mut matrices = HashMap::new();
    for entry in index.iter() {
        for prop in entry.props() {
            let matrix = build_property_matrix(entry, prop, config)?;
            matrices.insert((entry.label().to_string(), prop.prefix.clone()), matrix);
        }
    }
    Ok(MatrixTable { matrices })
}

/// Assemble the `component × coefficient` matrix of one property.
pub fn build_property_matrix(
    entry: &MixtureEntry,
    prop: &MixtureProp,
    config: &EngineConfig,
) -> MixtureResult<PropertyMatrix> {
    let components = entry.components();
    if components.len() != 2 {
        return Err(MixtureError::NotBinary {
            label: entry.label().to_string(),
            count: components.len(),
        });
    }

    let stem = format!("{}{}", prop.symbol, config.column_delimiter);
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(components.len());
    for component in components {
        let id = component.id(&config.component_key);
        let row = coefficient_row(entry.records(&id), &stem)?;
        if row.is_empty() {
            return Err(MixtureError::MissingCoefficients {
                property: prop.symbol.clone(),
                component: id,
            });
        }
        rows.push(row);
    }

    let ncols = rows[0].len();
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(MixtureError::RaggedMatrix {
            property: prop.symbol.clone(),
            mixture: entry.label().to_string(),
        });
    }

    Ok(DMatrix::from_fn(rows.len(), ncols, |r, c| rows[r][c]))
}

/// Values of the rows named `<stem><n>`, ordered by `n`.
pub fn coefficient_row(records: &[NumericRecord], stem: &str) -> MixtureResult<Vec<f64>> {
    let mut columns = records
        .iter()
        .filter(|record| record.symbol.starts_with(stem))
        .map(|record| Ok((column_index(&record.symbol, stem)?, record.value)))
        .collect::<MixtureResult<Vec<(usize, f64)>>>()?;
    columns.sort_by_key(|(index, _)| *index);
    Ok(columns.into_iter().map(|(_, value)| value).collect())
}

fn column_index(symbol: &str, stem: &str) -> MixtureResult<usize> {
    symbol[stem.len()..]
        .trim()
        .parse::<usize>()
        .map_err(|_| MixtureError::InvalidColumnSuffix {
            symbol: symbol.to_string(),
        })
}
