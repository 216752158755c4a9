//! Alias tables: every admissible id of a binary mixture pointing at one
//! shared engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use pm_data::{Component, RawRecord, ids_match};
use tracing::{debug, warn};

use crate::config::AliasBuilderConfig;
use crate::engine::MixtureMatrixEngine;
use crate::error::{MixtureError, MixtureResult};
use crate::normalize::mixture_label;

#[derive(Debug, Clone)]
struct AliasEntry {
    alias: String,
    props: BTreeMap<String, Arc<MixtureMatrixEngine>>,
}

/// Alias id (`A|B`, by name, formula or both, either order) → property
/// prefix → engine. Alias lookups ignore case.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: BTreeMap<String, AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `alias` at `props`. An existing alias is replaced.
    pub fn insert(&mut self, alias: &str, props: BTreeMap<String, Arc<MixtureMatrixEngine>>) {
        let key = alias.trim().to_ascii_lowercase();
        let entry = AliasEntry {
            alias: alias.trim().to_string(),
            props,
        };
        if let Some(previous) = self.entries.insert(key, entry) {
            warn!(alias = %previous.alias, "mixture alias overwritten");
        }
    }

    /// Fold `other` into this table; its aliases win on collision.
    pub fn merge(&mut self, other: AliasTable) {
        for (_, entry) in other.entries {
            self.insert(&entry.alias, entry.props);
        }
    }

    pub fn get(&self, alias: &str, prefix: &str) -> Option<&Arc<MixtureMatrixEngine>> {
        self.entry(alias)?.props.get(prefix)
    }

    /// The engine behind `alias`, whichever property it is reached through.
    pub fn engine(&self, alias: &str) -> Option<&Arc<MixtureMatrixEngine>> {
        self.entry(alias)?.props.values().next()
    }

    pub fn props(&self, alias: &str) -> Option<Vec<&str>> {
        self.entry(alias)
            .map(|entry| entry.props.keys().map(String::as_str).collect())
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, alias: &str) -> Option<&AliasEntry> {
        self.entries.get(&alias.trim().to_ascii_lowercase())
    }
}

/// Builds alias tables for binary component pairs from raw grouped data.
#[derive(Debug, Clone, Default)]
pub struct BinaryMixtureAliasBuilder {
    config: AliasBuilderConfig,
}

impl BinaryMixtureAliasBuilder {
    pub fn new(config: AliasBuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AliasBuilderConfig {
        &self.config
    }

    /// One engine per pair, merged last-write-wins.
    pub fn build(
        &self,
        pairs: &[[Component; 2]],
        raw: &[Vec<RawRecord>],
    ) -> MixtureResult<AliasTable> {
        let mut table = AliasTable::new();
        for pair in pairs {
            table.merge(self.build_pair(pair, raw)?);
        }
        Ok(table)
    }

    pub fn build_pair(
        &self,
        pair: &[Component; 2],
        raw: &[Vec<RawRecord>],
    ) -> MixtureResult<AliasTable> {
        let (delimiter, groups) = self.select_groups(pair, raw)?;
        let engine_config = self
            .config
            .engine
            .clone()
            .with_mixture_delimiter(delimiter);
        let engine = Arc::new(MixtureMatrixEngine::new(&groups, engine_config)?);

        let props: BTreeMap<String, Arc<MixtureMatrixEngine>> = engine
            .mixtures()
            .flat_map(|entry| entry.props())
            .map(|prop| (prop.prefix.clone(), Arc::clone(&engine)))
            .collect();

        let mut table = AliasTable::new();
        for key in &self.config.alias_keys {
            let (a, b) = (pair[0].id(key), pair[1].id(key));
            table.insert(&format!("{a}|{b}"), props.clone());
            table.insert(&format!("{b}|{a}"), props.clone());
        }
        debug!(aliases = table.len(), props = props.len(), "built mixture aliases");
        Ok(table)
    }

    /// Row groups of `pair`, found by trying each key template × delimiter
    /// until exactly two groups carry a matching label.
    pub fn select_groups(
        &self,
        pair: &[Component; 2],
        raw: &[Vec<RawRecord>],
    ) -> MixtureResult<(String, Vec<Vec<RawRecord>>)> {
        let mut attempted = Vec::new();
        for key in &self.config.engine.key_candidates {
            let (a, b) = (pair[0].id(key), pair[1].id(key));
            for delimiter in &self.config.label_delimiters {
                let labels = [format!("{a}{delimiter}{b}"), format!("{b}{delimiter}{a}")];
                attempted.push(format!("{key} '{}'", labels[0]));

                let groups: Vec<Vec<RawRecord>> = raw
                    .iter()
                    .filter(|group| {
                        mixture_label(group)
                            .is_some_and(|label| labels.iter().any(|l| ids_match(l, &label)))
                    })
                    .cloned()
                    .collect();
                if groups.len() == 2 {
                    return Ok((delimiter.clone(), groups));
                }
            }
        }
        Err(MixtureError::NoMatchingRowGroups {
            pair: format!("{}|{}", pair[0].name, pair[1].name),
            attempted: attempted.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, name: &str, formula: &str, a: [f64; 2]) -> Vec<RawRecord> {
        vec![
            RawRecord::new("Mixture", "-", label, "-"),
            RawRecord::new("Name", "-", name, "-"),
            RawRecord::new("Formula", "-", formula, "-"),
            RawRecord::new("State", "-", "l", "-"),
            RawRecord::new("Coeff", "a_i_j_1", a[0], "-"),
            RawRecord::new("Coeff", "a_i_j_2", a[1], "-"),
        ]
    }

    fn methanol() -> Component {
        Component::new("Methanol", "CH3OH", "l")
    }

    fn ethanol() -> Component {
        Component::new("Ethanol", "C2H5OH", "l")
    }

    fn water() -> Component {
        Component::new("Water", "H2O", "l")
    }

    fn raw() -> Vec<Vec<RawRecord>> {
        vec![
            group("CH3OH | C2H5OH", "Methanol", "CH3OH", [0.0, 1.0]),
            group("CH3OH | C2H5OH", "Ethanol", "C2H5OH", [2.0, 3.0]),
            group("Water_Methanol", "Water", "H2O", [4.0, 5.0]),
            group("Water_Methanol", "Methanol", "CH3OH", [6.0, 7.0]),
        ]
    }

    #[test]
    fn selects_groups_by_formula_and_spaced_pipe() {
        let builder = BinaryMixtureAliasBuilder::default();
        let (delimiter, groups) = builder
            .select_groups(&[methanol(), ethanol()], &raw())
            .unwrap();
        assert_eq!(delimiter, " | ");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn reverse_pair_order_finds_same_groups() {
        let builder = BinaryMixtureAliasBuilder::default();
        let (delimiter, groups) = builder
            .select_groups(&[methanol(), water()], &raw())
            .unwrap();
        assert_eq!(delimiter, "_");
        assert_eq!(mixture_label(&groups[0]).as_deref(), Some("Water_Methanol"));
    }

    #[test]
    fn unmatched_pair_lists_attempts() {
        let builder = BinaryMixtureAliasBuilder::default();
        let err = builder.select_groups(&[ethanol(), water()], &raw()).unwrap_err();
        match err {
            MixtureError::NoMatchingRowGroups { attempted, .. } => {
                assert!(attempted.contains("Ethanol|Water"));
                assert!(attempted.contains("C2H5OH _ H2O"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn every_alias_shares_one_engine() {
        let builder = BinaryMixtureAliasBuilder::default();
        let table = builder.build_pair(&[methanol(), ethanol()], &raw()).unwrap();
        // 3 key templates x 2 orders
        assert_eq!(table.len(), 6);
        let by_name = table.get("Methanol|Ethanol", "a").unwrap();
        let by_formula = table.get("C2H5OH|CH3OH", "a").unwrap();
        let combined = table.get("methanol-ch3oh|ethanol-c2h5oh", "a").unwrap();
        assert!(Arc::ptr_eq(by_name, by_formula));
        assert!(Arc::ptr_eq(by_name, combined));
        assert_eq!(table.props("ethanol|methanol"), Some(vec!["a"]));
        assert!(table.get("Methanol|Ethanol", "b").is_none());
    }

    #[test]
    fn merge_is_last_write_wins() {
        let builder = BinaryMixtureAliasBuilder::default();
        let mut table = builder.build_pair(&[methanol(), ethanol()], &raw()).unwrap();
        let first = Arc::clone(table.engine("Methanol|Ethanol").unwrap());
        table.merge(builder.build_pair(&[ethanol(), methanol()], &raw()).unwrap());
        assert_eq!(table.len(), 6);
        let second = table.engine("Methanol|Ethanol").unwrap();
        assert!(!Arc::ptr_eq(&first, second));
    }

    #[test]
    fn build_covers_all_pairs() {
        let builder = BinaryMixtureAliasBuilder::default();
        let table = builder
            .build(&[[methanol(), ethanol()], [water(), methanol()]], &raw())
            .unwrap();
        assert_eq!(table.len(), 12);
        let engine = table.engine("H2O|CH3OH").unwrap();
        let cell = engine.ij("a_2_1", "Water|Methanol").unwrap();
        assert_eq!(cell.value, 6.0);
    }
}
