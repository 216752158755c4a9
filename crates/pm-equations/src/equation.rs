//! Evaluable equations with bound parameters.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EquationError, EquationResult};

/// A caller-supplied argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgValue {
    pub value: f64,
    pub unit: String,
}

impl ArgValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Result of evaluating an equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub symbol: String,
    pub value: f64,
    pub unit: String,
}

/// Named numbers handed to an equation body.
#[derive(Debug, Clone, Default)]
pub struct EquationInputs {
    params: BTreeMap<String, f64>,
    args: BTreeMap<String, f64>,
}

impl EquationInputs {
    /// Bound coefficient by symbol.
    pub fn param(&self, symbol: &str) -> f64 {
        self.params.get(symbol).copied().unwrap_or(f64::NAN)
    }

    /// Caller argument by symbol.
    pub fn arg(&self, symbol: &str) -> f64 {
        self.args.get(symbol).copied().unwrap_or(f64::NAN)
    }
}

/// Anything that turns arguments into a property value.
pub trait EvaluableEquation: Send + Sync {
    fn symbol(&self) -> &str;

    fn unit(&self) -> &str;

    /// Names of the arguments `calc` requires.
    fn required_args(&self) -> Vec<String>;

    fn calc(&self, args: &BTreeMap<String, ArgValue>) -> EquationResult<PropertyValue>;
}

type Body = Arc<dyn Fn(&EquationInputs) -> f64 + Send + Sync>;

/// Equation with an opaque numeric body.
#[derive(Clone)]
pub struct Equation {
    symbol: String,
    unit: String,
    params: BTreeMap<String, f64>,
    args: Vec<String>,
    body: Body,
}

impl Equation {
    pub fn new(
        symbol: impl Into<String>,
        unit: impl Into<String>,
        body: impl Fn(&EquationInputs) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            unit: unit.into(),
            params: BTreeMap::new(),
            args: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// Bind a coefficient value.
    pub fn with_param(mut self, symbol: impl Into<String>, value: f64) -> Self {
        self.params.insert(symbol.into(), value);
        self
    }

    /// Declare a required argument.
    pub fn with_arg(mut self, symbol: impl Into<String>) -> Self {
        self.args.push(symbol.into());
        self
    }
}

impl fmt::Debug for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equation")
            .field("symbol", &self.symbol)
            .field("unit", &self.unit)
            .field("params", &self.params)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl EvaluableEquation for Equation {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn required_args(&self) -> Vec<String> {
        self.args.clone()
    }

    fn calc(&self, args: &BTreeMap<String, ArgValue>) -> EquationResult<PropertyValue> {
        let mut bound = BTreeMap::new();
        for name in &self.args {
            let arg = args.get(name).ok_or_else(|| EquationError::MissingArgument {
                symbol: self.symbol.clone(),
                arg: name.clone(),
            })?;
            bound.insert(name.clone(), arg.value);
        }

        let inputs = EquationInputs {
            params: self.params.clone(),
            args: bound,
        };
        let value = (self.body)(&inputs);
        if !value.is_finite() {
            return Err(EquationError::NonFinite {
                symbol: self.symbol.clone(),
            });
        }

        Ok(PropertyValue {
            symbol: self.symbol.clone(),
            value,
            unit: self.unit.clone(),
        })
    }
}
