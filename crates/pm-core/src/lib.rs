//! pm-core: shared foundation for propmix.
//!
//! Contains:
//! - error (workspace-wide error type)
//! - numeric (tolerances + float parsing helpers)

pub mod error;
pub mod numeric;

pub use error::{PmError, PmResult};
pub use numeric::*;
