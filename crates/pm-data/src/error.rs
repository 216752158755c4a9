//! Data layer errors.

use pm_core::PmError;
use thiserror::Error;

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while identifying components or reading datasets.
#[derive(Error, Debug)]
pub enum DataError {
    /// A key template part does not name a component field.
    #[error("Unknown component key field '{field}' (expected Name, Formula or State)")]
    UnknownKeyField { field: String },

    /// A key template with no parts.
    #[error("Empty component key template")]
    EmptyKeyTemplate,

    /// None of the candidate key templates reproduces the mixture label.
    #[error("Cannot infer key template for mixture '{label}' (tried: {attempted})")]
    MixtureKeyNotInferred { label: String, attempted: String },

    /// Dataset file with an extension we do not read.
    #[error("Unsupported dataset format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DataError> for PmError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::UnknownKeyField { .. } | DataError::EmptyKeyTemplate => {
                PmError::InvalidArg {
                    what: err.to_string(),
                }
            }
            DataError::MixtureKeyNotInferred { .. } => PmError::Invariant {
                what: err.to_string(),
            },
            DataError::UnsupportedFormat { .. }
            | DataError::Io(_)
            | DataError::Yaml(_)
            | DataError::Json(_) => PmError::Io {
                what: err.to_string(),
            },
        }
    }
}
