//! pm-data: component identity and raw record handling for propmix.
//!
//! Provides:
//! - Component records and key templates (`Name`, `Formula`, `Name-Formula`, ...)
//! - Identity helpers mapping components to id strings and back
//! - Raw record rows as found in source data, and the cleaning pass
//!   that turns them into numeric coefficient rows
//! - Dataset files (YAML/JSON) holding grouped raw records
//!
//! # Example
//!
//! ```
//! use pm_data::{Component, ComponentKey, component_id};
//!
//! let methanol = Component::new("Methanol", "CH3OH", "l");
//! let key: ComponentKey = "Name-Formula".parse().unwrap();
//! assert_eq!(component_id(&methanol, &key), "Methanol-CH3OH");
//! ```

pub mod clean;
pub mod component;
pub mod dataset;
pub mod error;
pub mod identity;
pub mod record;

pub use clean::{DEFAULT_IGNORE_FIELDS, clean, clean_with_defaults};
pub use component::{Component, ComponentField, ComponentKey};
pub use dataset::{Dataset, load_dataset, save_dataset};
pub use error::{DataError, DataResult};
pub use identity::{component_id, find_component_by_token, ids_match, infer_mixture_key};
pub use record::{NumericRecord, RawRecord, RecordValue};
