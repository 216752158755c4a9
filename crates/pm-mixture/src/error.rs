//! Mixture engine errors.

use pm_core::PmError;
use pm_data::DataError;
use pm_equations::EquationError;
use thiserror::Error;

/// Result type for mixture operations.
pub type MixtureResult<T> = Result<T, MixtureError>;

/// Errors raised while building or querying mixture matrices.
///
/// Everything except `InvalidArg` and `InvalidReference` means the dataset
/// disagrees with the expected shape for a specific mixture, component or
/// property.
#[derive(Error, Debug)]
pub enum MixtureError {
    /// Caller misuse (empty symbol, empty component list, ...).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A property reference that cannot be used for the requested lookup.
    #[error("Invalid property reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    /// A mixture label that does not split into two component tokens.
    #[error("Mixture label '{label}' does not split into two components on '{delimiter}'")]
    MalformedLabel { label: String, delimiter: String },

    /// A row group without one of the Name/Formula/State rows.
    #[error("Mixture '{label}': row group is missing its {field} record")]
    MissingIdentity { label: String, field: &'static str },

    #[error("Expected exactly 2 components for mixture '{label}', found {count}")]
    NotBinary { label: String, count: usize },

    #[error("Mixture '{id}' not found")]
    MixtureNotFound { id: String },

    #[error("Property '{property}' not found in mixture '{mixture}'")]
    PropertyNotFound { property: String, mixture: String },

    #[error("Component '{component}' not found in mixture '{mixture}'")]
    ComponentNotInMixture { component: String, mixture: String },

    #[error("Property '{property}' has no coefficient rows for component '{component}'")]
    MissingCoefficients { property: String, component: String },

    #[error("Coefficient row '{symbol}' has no numeric column suffix")]
    InvalidColumnSuffix { symbol: String },

    #[error("Property '{property}' in mixture '{mixture}' has rows of unequal length")]
    RaggedMatrix { property: String, mixture: String },

    #[error("Index {index} out of range for {what} (1-based, len={len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// No key template × delimiter combination selected exactly two row groups.
    #[error("No row groups found for mixture {pair} (tried: {attempted})")]
    NoMatchingRowGroups { pair: String, attempted: String },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Equation(#[from] EquationError),
}

impl From<MixtureError> for PmError {
    fn from(err: MixtureError) -> Self {
        match err {
            MixtureError::Data(inner) => inner.into(),
            MixtureError::Equation(inner) => inner.into(),
            MixtureError::InvalidArg { .. } | MixtureError::InvalidReference { .. } => {
                PmError::InvalidArg {
                    what: err.to_string(),
                }
            }
            MixtureError::MixtureNotFound { .. }
            | MixtureError::PropertyNotFound { .. }
            | MixtureError::ComponentNotInMixture { .. }
            | MixtureError::IndexOutOfRange { .. }
            | MixtureError::NoMatchingRowGroups { .. } => PmError::NotFound {
                what: err.to_string(),
            },
            _ => PmError::Invariant {
                what: err.to_string(),
            },
        }
    }
}
