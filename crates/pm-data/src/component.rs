//! Component records and id key templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Identity record of a chemical component.
///
/// Equality is structural over name, formula and state; the optional mole
/// fraction is carried along but never part of identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub formula: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mole_fraction: Option<f64>,
}

impl Component {
    pub fn new(
        name: impl Into<String>,
        formula: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            formula: formula.into(),
            state: state.into(),
            mole_fraction: None,
        }
    }

    pub fn with_mole_fraction(mut self, mole_fraction: f64) -> Self {
        self.mole_fraction = Some(mole_fraction);
        self
    }

    /// Value of a single identity field.
    pub fn field(&self, field: ComponentField) -> &str {
        match field {
            ComponentField::Name => &self.name,
            ComponentField::Formula => &self.formula,
            ComponentField::State => &self.state,
        }
    }

    /// Id string of this component under `key`.
    pub fn id(&self, key: &ComponentKey) -> String {
        key.fields()
            .iter()
            .map(|field| self.field(*field))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.formula == other.formula && self.state == other.state
    }
}

impl Eq for Component {}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.formula, self.state)
    }
}

/// Identity field a key template can project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentField {
    Name,
    Formula,
    State,
}

impl ComponentField {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentField::Name => "Name",
            ComponentField::Formula => "Formula",
            ComponentField::State => "State",
        }
    }
}

impl std::str::FromStr for ComponentField {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NAME" => Ok(ComponentField::Name),
            "FORMULA" => Ok(ComponentField::Formula),
            "STATE" => Ok(ComponentField::State),
            _ => Err(DataError::UnknownKeyField {
                field: s.trim().to_string(),
            }),
        }
    }
}

/// Key template such as `Name`, `Formula` or `Name-Formula`.
///
/// Parts are dash-separated and matched case-insensitively against the
/// component fields. Serializes as its template string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentKey {
    fields: Vec<ComponentField>,
}

impl ComponentKey {
    pub fn new(fields: Vec<ComponentField>) -> DataResult<Self> {
        if fields.is_empty() {
            return Err(DataError::EmptyKeyTemplate);
        }
        Ok(Self { fields })
    }

    pub fn name() -> Self {
        Self {
            fields: vec![ComponentField::Name],
        }
    }

    pub fn formula() -> Self {
        Self {
            fields: vec![ComponentField::Formula],
        }
    }

    pub fn name_formula() -> Self {
        Self {
            fields: vec![ComponentField::Name, ComponentField::Formula],
        }
    }

    /// The three templates mixture labels are written in, in lookup priority order.
    pub fn default_candidates() -> Vec<ComponentKey> {
        vec![Self::name(), Self::formula(), Self::name_formula()]
    }

    pub fn fields(&self) -> &[ComponentField] {
        &self.fields
    }
}

impl Default for ComponentKey {
    fn default() -> Self {
        Self::name_formula()
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.fields.iter().map(|field| field.label()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

impl std::str::FromStr for ComponentKey {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DataError::EmptyKeyTemplate);
        }
        let fields = trimmed
            .split('-')
            .map(str::parse::<ComponentField>)
            .collect::<DataResult<Vec<_>>>()?;
        Self::new(fields)
    }
}

impl TryFrom<String> for ComponentKey {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentKey> for String {
    fn from(key: ComponentKey) -> Self {
        key.to_string()
    }
}
