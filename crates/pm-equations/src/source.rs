//! Lookup of equations by component id and property symbol.

use std::collections::HashMap;

use crate::equation::{Equation, EvaluableEquation};

/// Resolves a component id + property symbol to an evaluable equation.
pub trait EquationSource {
    fn resolve(&self, component_id: &str, symbol: &str) -> Option<&dyn EvaluableEquation>;
}

/// In-memory equation table. Component ids and symbols match case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct EquationRegistry {
    equations: HashMap<(String, String), Equation>,
}

impl EquationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `equation` for `component_id`, replacing any previous entry.
    pub fn insert(&mut self, component_id: &str, equation: Equation) {
        let key = Self::key(component_id, equation.symbol());
        self.equations.insert(key, equation);
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    fn key(component_id: &str, symbol: &str) -> (String, String) {
        (
            component_id.trim().to_ascii_lowercase(),
            symbol.trim().to_ascii_lowercase(),
        )
    }
}

impl EquationSource for EquationRegistry {
    fn resolve(&self, component_id: &str, symbol: &str) -> Option<&dyn EvaluableEquation> {
        self.equations
            .get(&Self::key(component_id, symbol))
            .map(|eq| eq as &dyn EvaluableEquation)
    }
}
