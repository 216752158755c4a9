//! Raw source rows and their cleaned numeric form.

use std::fmt;

use pm_core::parse_finite;
use serde::{Deserialize, Serialize};

/// Cell value as found in source data: a number or arbitrary text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Number(f64),
    Text(String),
}

impl RecordValue {
    /// Numeric view of the value; numeric strings are accepted.
    ///
    /// Returns `None` for text that is not a finite number and for
    /// non-finite numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RecordValue::Number(v) if v.is_finite() => Some(*v),
            RecordValue::Number(_) => None,
            RecordValue::Text(text) => parse_finite(text),
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Number(v) => write!(f, "{v}"),
            RecordValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<f64> for RecordValue {
    fn from(v: f64) -> Self {
        RecordValue::Number(v)
    }
}

impl From<&str> for RecordValue {
    fn from(text: &str) -> Self {
        RecordValue::Text(text.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(text: String) -> Self {
        RecordValue::Text(text)
    }
}

/// One row of source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub symbol: String,
    pub value: RecordValue,
    #[serde(default)]
    pub unit: String,
}

impl RawRecord {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        value: impl Into<RecordValue>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Whether this row's name equals `name`, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name)
    }
}

/// A cleaned coefficient row with a finite numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRecord {
    pub name: String,
    pub symbol: String,
    pub value: f64,
    pub unit: String,
}
