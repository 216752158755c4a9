//! pm-equations: scalar equation evaluation for propmix.
//!
//! Equations bind component-specific coefficients (parameters) to an opaque
//! numeric body. Callers supply arguments by symbol and get back a value
//! tagged with the equation's symbol and unit.

pub mod equation;
pub mod error;
pub mod source;

pub use equation::{ArgValue, Equation, EquationInputs, EvaluableEquation, PropertyValue};
pub use error::{EquationError, EquationResult};
pub use source::{EquationRegistry, EquationSource};
