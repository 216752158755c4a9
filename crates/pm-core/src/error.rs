use thiserror::Error;

pub type PmResult<T> = Result<T, PmError>;

/// Workspace-wide error. Crate-level errors convert into this at the
/// application boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PmError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Data integrity violated: {what}")]
    Invariant { what: String },

    #[error("I/O error: {what}")]
    Io { what: String },
}
