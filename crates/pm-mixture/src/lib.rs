//! pm-mixture: binary mixture property matrices for propmix.
//!
//! Raw row groups (one per component per mixture) are normalized into a
//! [`MixtureIndex`], turned into one dense matrix per (mixture, property)
//! and served through the read-only [`MixtureMatrixEngine`]. Property
//! references name a cell by 1-based indices (`a_1_2`) or by component
//! tokens (`a_methanol_ethanol`, `a | methanol | ethanol`).
//!
//! [`BinaryMixtureAliasBuilder`] builds one engine per component pair and
//! exposes it under every name, formula and name-formula alias.

pub mod alias;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod parser;

pub use alias::{AliasTable, BinaryMixtureAliasBuilder};
pub use config::{AliasBuilderConfig, EngineConfig};
pub use engine::{CustomProperty, MixtureMatrixEngine};
pub use error::{MixtureError, MixtureResult};
pub use matrix::{
    MatrixTable, PropertyMatrix, build_matrices, build_property_matrix, coefficient_row,
};
pub use normalize::{MixtureEntry, MixtureIndex, MixtureProp, mixture_label, normalize};
pub use parser::{Placeholders, PropertyKeyParser, PropertyRef, ReferenceForm};
