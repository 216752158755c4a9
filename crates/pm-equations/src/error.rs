//! Equation evaluation errors.

use pm_core::PmError;
use thiserror::Error;

pub type EquationResult<T> = Result<T, EquationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EquationError {
    #[error("Missing argument '{arg}' for equation {symbol}")]
    MissingArgument { symbol: String, arg: String },

    #[error("Equation {symbol} produced a non-finite value")]
    NonFinite { symbol: String },

    #[error("No equation {symbol} registered for component {component}")]
    NotFound { component: String, symbol: String },
}

impl From<EquationError> for PmError {
    fn from(err: EquationError) -> Self {
        match err {
            EquationError::NotFound { .. } => PmError::NotFound {
                what: err.to_string(),
            },
            _ => PmError::InvalidArg {
                what: err.to_string(),
            },
        }
    }
}
