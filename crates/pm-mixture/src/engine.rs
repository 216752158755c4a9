//! Query facade over normalized mixtures and their property matrices.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use pm_data::{Component, ComponentKey, RawRecord};
use pm_equations::{ArgValue, EquationError, EquationSource, PropertyValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{MixtureError, MixtureResult};
use crate::matrix::{MatrixTable, PropertyMatrix, build_matrices};
use crate::normalize::{MixtureEntry, MixtureIndex, MixtureProp, normalize};
use crate::parser::{Placeholders, PropertyKeyParser, PropertyRef};

/// One matrix cell with a descriptive symbol, e.g. `a_Methanol_Ethanol`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    pub symbol: String,
    pub value: f64,
    pub unit: String,
}

/// Read-only lookup engine over binary mixture property matrices.
///
/// All normalization and matrix building happens in [`MixtureMatrixEngine::new`];
/// every other method is a query.
#[derive(Debug, Clone)]
pub struct MixtureMatrixEngine {
    config: EngineConfig,
    parser: PropertyKeyParser,
    lookup_keys: Vec<ComponentKey>,
    index: MixtureIndex,
    matrices: MatrixTable,
}

impl MixtureMatrixEngine {
    pub fn new(groups: &[Vec<RawRecord>], config: EngineConfig) -> MixtureResult<Self> {
        let index = normalize(groups, &config)?;
        let matrices = build_matrices(&index, &config)?;
        let parser = PropertyKeyParser::new(config.reference_delimiters.clone());

        let mut lookup_keys = config.key_candidates.clone();
        if !lookup_keys.contains(&config.component_key) {
            lookup_keys.push(config.component_key.clone());
        }

        debug!(
            mixtures = index.len(),
            matrices = matrices.len(),
            "built mixture matrix engine"
        );
        Ok(Self {
            config,
            parser,
            lookup_keys,
            index,
            matrices,
        })
    }

    pub fn with_defaults(groups: &[Vec<RawRecord>]) -> MixtureResult<Self> {
        Self::new(groups, EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn index(&self) -> &MixtureIndex {
        &self.index
    }

    pub fn mixtures(&self) -> impl Iterator<Item = &MixtureEntry> {
        self.index.iter()
    }

    /// Every distinct component, in first-seen order.
    pub fn all_components(&self) -> Vec<Component> {
        let mut all: Vec<Component> = Vec::new();
        for component in self.mixtures().flat_map(MixtureEntry::components) {
            if !all.contains(component) {
                all.push(component.clone());
            }
        }
        all
    }

    /// Label of the stored mixture made of the components named by `tokens`,
    /// in either order.
    pub fn find_mixture_id(&self, tokens: [&str; 2]) -> MixtureResult<&str> {
        let [a, b] = tokens;
        self.mixtures()
            .find(|entry| entry.matches_tokens(a, b, &self.lookup_keys))
            .map(MixtureEntry::label)
            .ok_or_else(|| MixtureError::MixtureNotFound {
                id: format!("{a}|{b}"),
            })
    }

    /// Stored mixture addressed by a mixture id such as `methanol|ethanol`.
    pub fn mixture(&self, mixture_id: &str) -> MixtureResult<&MixtureEntry> {
        if let Some(entry) = self.index.get(mixture_id.trim()) {
            return Ok(entry);
        }
        let [a, b] = self.split_mixture_id(mixture_id)?;
        let label = self.find_mixture_id([a.as_str(), b.as_str()])?;
        self.index
            .get(label)
            .ok_or_else(|| MixtureError::MixtureNotFound {
                id: mixture_id.to_string(),
            })
    }

    pub fn mixture_components(&self, mixture_id: &str) -> MixtureResult<&[Component]> {
        Ok(self.mixture(mixture_id)?.components())
    }

    pub fn props(&self, mixture_id: &str) -> MixtureResult<&[MixtureProp]> {
        Ok(self.mixture(mixture_id)?.props())
    }

    pub fn property_matrix(
        &self,
        prop_symbol: &str,
        mixture_id: &str,
    ) -> MixtureResult<&PropertyMatrix> {
        let reference = self.parser.parse(prop_symbol)?;
        let entry = self.mixture(mixture_id)?;
        let (_, matrix) = self.prop_matrix(entry, &reference.prefix)?;
        Ok(matrix)
    }

    /// Full matrix row of `component` within the mixture.
    pub fn get_property(
        &self,
        prop_symbol: &str,
        component: &Component,
        mixture_id: &str,
    ) -> MixtureResult<Vec<f64>> {
        let reference = self.parser.parse(prop_symbol)?;
        let entry = self.mixture(mixture_id)?;
        let (_, matrix) = self.prop_matrix(entry, &reference.prefix)?;
        let row = self.row_of(entry, component)?;
        Ok(matrix.row(row).iter().copied().collect())
    }

    /// Cell `[row(components[0])][row(components[1])]`, in argument order.
    pub fn get_matrix_property(
        &self,
        prop_symbol: &str,
        components: [&Component; 2],
        mixture_id: &str,
    ) -> MixtureResult<CustomProperty> {
        let reference = self.parser.parse(prop_symbol)?;
        let entry = self.mixture(mixture_id)?;
        let ri = self.row_of(entry, components[0])?;
        let rj = self.row_of(entry, components[1])?;
        self.cell(entry, &reference.prefix, ri, rj)
    }

    /// Cell addressed by the placeholders inside `prop_symbol`: 1-based
    /// indices (`a_1_2`) or component tokens (`a_methanol_ethanol`).
    pub fn ij(&self, prop_symbol: &str, mixture_id: &str) -> MixtureResult<CustomProperty> {
        let reference = self.parser.parse(prop_symbol)?;
        let entry = self.mixture(mixture_id)?;
        let (ri, rj) = self.resolve_slots(entry, &reference, prop_symbol)?;
        self.cell(entry, &reference.prefix, ri, rj)
    }

    /// Every ordered pair of the mixture named inside `prop_symbol`
    /// (`a | methanol | ethanol`), keyed `"idI | idJ"`, in row order.
    pub fn ijs(&self, prop_symbol: &str) -> MixtureResult<Vec<(String, CustomProperty)>> {
        let reference = self.parser.parse(prop_symbol)?;
        let tokens = reference
            .mixture_tokens()
            .ok_or_else(|| MixtureError::InvalidReference {
                reference: prop_symbol.to_string(),
                reason: "no component tokens identify the mixture".to_string(),
            })?;
        let label = self.find_mixture_id(tokens)?;
        let entry = self
            .index
            .get(label)
            .ok_or_else(|| MixtureError::MixtureNotFound {
                id: label.to_string(),
            })?;

        let n = entry.components().len();
        let mut out = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let key = format!("{} | {}", entry.label_id(i), entry.label_id(j));
                out.push((key, self.cell(entry, &reference.prefix, i, j)?));
            }
        }
        Ok(out)
    }

    /// `components.len()²` matrix of the property, in argument order.
    ///
    /// Each pair is matched to its stored mixture afresh, trying every key
    /// template, so components need not follow the labels' id convention.
    pub fn mat(&self, prop_symbol: &str, components: &[Component]) -> MixtureResult<DMatrix<f64>> {
        let cells = self.pair_cells(prop_symbol, components)?;
        let n = components.len();
        Ok(DMatrix::from_fn(n, n, |i, j| cells[i * n + j].value))
    }

    /// Same cells as [`Self::mat`], keyed by their synthesized symbols.
    pub fn mat_dict(
        &self,
        prop_symbol: &str,
        components: &[Component],
    ) -> MixtureResult<BTreeMap<String, f64>> {
        Ok(self
            .pair_cells(prop_symbol, components)?
            .into_iter()
            .map(|cell| (cell.symbol, cell.value))
            .collect())
    }

    /// Evaluate a scalar equation of one component of the mixture.
    ///
    /// The source is asked under the engine's record key first, then under
    /// each key template.
    pub fn component_scalar(
        &self,
        source: &dyn EquationSource,
        mixture_id: &str,
        component_token: &str,
        symbol: &str,
        args: &BTreeMap<String, ArgValue>,
    ) -> MixtureResult<PropertyValue> {
        let entry = self.mixture(mixture_id)?;
        let row = entry
            .row_by_token(component_token, &self.lookup_keys)
            .ok_or_else(|| MixtureError::ComponentNotInMixture {
                component: component_token.to_string(),
                mixture: entry.label().to_string(),
            })?;
        let component = &entry.components()[row];

        let keys = std::iter::once(&self.config.component_key).chain(&self.config.key_candidates);
        for key in keys {
            if let Some(equation) = source.resolve(&component.id(key), symbol) {
                return Ok(equation.calc(args)?);
            }
        }
        Err(EquationError::NotFound {
            component: component.id(&self.config.component_key),
            symbol: symbol.to_string(),
        }
        .into())
    }

    fn split_mixture_id(&self, mixture_id: &str) -> MixtureResult<[String; 2]> {
        let configured = self.config.mixture_delimiter.trim();
        let candidates = std::iter::once("|")
            .chain((!configured.is_empty()).then_some(configured))
            .chain(self.config.reference_delimiters.iter().map(String::as_str));
        for delimiter in candidates {
            let tokens: Vec<&str> = mixture_id.split(delimiter).map(str::trim).collect();
            if let [a, b] = tokens.as_slice() {
                if !a.is_empty() && !b.is_empty() {
                    return Ok([a.to_string(), b.to_string()]);
                }
            }
        }
        Err(MixtureError::MixtureNotFound {
            id: mixture_id.to_string(),
        })
    }

    fn prop_matrix<'a>(
        &'a self,
        entry: &'a MixtureEntry,
        prefix: &str,
    ) -> MixtureResult<(&'a MixtureProp, &'a PropertyMatrix)> {
        let not_found = || MixtureError::PropertyNotFound {
            property: prefix.to_string(),
            mixture: entry.label().to_string(),
        };
        let prop = entry.prop(prefix).ok_or_else(not_found)?;
        let matrix = self
            .matrices
            .get(entry.label(), prefix)
            .ok_or_else(not_found)?;
        Ok((prop, matrix))
    }

    fn row_of(&self, entry: &MixtureEntry, component: &Component) -> MixtureResult<usize> {
        entry
            .row_of(component, &self.lookup_keys)
            .ok_or_else(|| MixtureError::ComponentNotInMixture {
                component: component.to_string(),
                mixture: entry.label().to_string(),
            })
    }

    fn resolve_slots(
        &self,
        entry: &MixtureEntry,
        reference: &PropertyRef,
        text: &str,
    ) -> MixtureResult<(usize, usize)> {
        let n = entry.components().len();
        match reference.cell_slots() {
            Placeholders::Numeric { i, j } => {
                let to_row = |index: usize| {
                    if (1..=n).contains(&index) {
                        Ok(index - 1)
                    } else {
                        Err(MixtureError::IndexOutOfRange {
                            what: "mixture component",
                            index,
                            len: n,
                        })
                    }
                };
                Ok((to_row(*i)?, to_row(*j)?))
            }
            slots => {
                let [ti, tj] =
                    slots
                        .component_tokens()
                        .ok_or_else(|| MixtureError::InvalidReference {
                            reference: text.to_string(),
                            reason: "missing component placeholders".to_string(),
                        })?;
                let to_row = |token: &str| {
                    entry.row_by_token(token, &self.lookup_keys).ok_or_else(|| {
                        MixtureError::ComponentNotInMixture {
                            component: token.to_string(),
                            mixture: entry.label().to_string(),
                        }
                    })
                };
                Ok((to_row(ti)?, to_row(tj)?))
            }
        }
    }

    fn cell(
        &self,
        entry: &MixtureEntry,
        prefix: &str,
        row: usize,
        column: usize,
    ) -> MixtureResult<CustomProperty> {
        let (prop, matrix) = self.prop_matrix(entry, prefix)?;
        if column >= matrix.ncols() {
            return Err(MixtureError::IndexOutOfRange {
                what: "coefficient column",
                index: column + 1,
                len: matrix.ncols(),
            });
        }
        let d = &self.config.column_delimiter;
        Ok(CustomProperty {
            symbol: format!(
                "{}{d}{}{d}{}",
                prop.prefix,
                entry.label_id(row),
                entry.label_id(column)
            ),
            value: matrix[(row, column)],
            unit: prop.unit.clone(),
        })
    }

    /// Stored mixture holding both components, with their rows.
    fn locate_pair(&self, a: &Component, b: &Component) -> Option<(&MixtureEntry, usize, usize)> {
        self.config.key_candidates.iter().find_map(|key| {
            let (id_a, id_b) = (a.id(key), b.id(key));
            let keys = std::slice::from_ref(key);
            self.mixtures().find_map(|entry| {
                let ra = entry.row_by_token(&id_a, keys)?;
                let rb = entry.row_by_token(&id_b, keys)?;
                (ra != rb).then_some((entry, ra, rb))
            })
        })
    }

    /// Mixture and row for a diagonal cell, preferring a mixture shared with
    /// one of `partners`.
    fn locate_single(
        &self,
        a: &Component,
        partners: &[Component],
    ) -> Option<(&MixtureEntry, usize)> {
        partners
            .iter()
            .filter(|p| *p != a)
            .find_map(|p| self.locate_pair(a, p).map(|(entry, ra, _)| (entry, ra)))
            .or_else(|| {
                self.mixtures()
                    .find_map(|entry| entry.row_of(a, &self.lookup_keys).map(|r| (entry, r)))
            })
    }

    fn pair_cells(
        &self,
        prop_symbol: &str,
        components: &[Component],
    ) -> MixtureResult<Vec<CustomProperty>> {
        if components.is_empty() {
            return Err(MixtureError::InvalidArg {
                what: "empty component list",
            });
        }
        let reference = self.parser.parse(prop_symbol)?;
        let not_found = |a: &Component, b: &Component| MixtureError::MixtureNotFound {
            id: format!("{}|{}", a.name, b.name),
        };

        let n = components.len();
        let mut cells = Vec::with_capacity(n * n);
        for ci in components {
            for cj in components {
                let (entry, ri, rj) = if ci == cj {
                    let (entry, r) = self
                        .locate_single(ci, components)
                        .ok_or_else(|| not_found(ci, cj))?;
                    (entry, r, r)
                } else {
                    self.locate_pair(ci, cj)
                        .ok_or_else(|| not_found(ci, cj))?
                };
                cells.push(self.cell(entry, &reference.prefix, ri, rj)?);
            }
        }
        Ok(cells)
    }
}
