//! Grouping raw row groups into binary mixtures.
//!
//! Each row group describes one component of one mixture: a `Mixture` row
//! carrying the label, the `Name`/`Formula`/`State` identity rows, and the
//! coefficient rows (`a_i_j_1`, `a_i_j_2`, ...).

use std::collections::HashMap;

use pm_data::{
    Component, ComponentKey, NumericRecord, RawRecord, clean, find_component_by_token,
    infer_mixture_key,
};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{MixtureError, MixtureResult};

/// A matrix property advertised by a mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureProp {
    /// Base name, e.g. `a`.
    pub prefix: String,
    /// Prefix plus the property identifier, e.g. `a_i_j`.
    pub symbol: String,
    pub unit: String,
}

/// One binary mixture as found in the data.
#[derive(Debug, Clone)]
pub struct MixtureEntry {
    label: String,
    mixture_key: ComponentKey,
    mixture_ids: [String; 2],
    mixture_component_ids: [String; 2],
    components: Vec<Component>,
    records: HashMap<String, Vec<NumericRecord>>,
    props: Vec<MixtureProp>,
}

impl MixtureEntry {
    /// Label exactly as written in the data.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Key template the label was written in.
    pub fn mixture_key(&self) -> &ComponentKey {
        &self.mixture_key
    }

    /// `A|B` and `B|A`.
    pub fn mixture_ids(&self) -> &[String; 2] {
        &self.mixture_ids
    }

    /// Component tokens in label order.
    pub fn mixture_component_ids(&self) -> &[String; 2] {
        &self.mixture_component_ids
    }

    /// Components in row-declaration order (the matrix row order).
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Cleaned coefficient rows of the component with engine id `component_id`.
    pub fn records(&self, component_id: &str) -> &[NumericRecord] {
        self.records
            .get(component_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn props(&self) -> &[MixtureProp] {
        &self.props
    }

    pub fn prop(&self, prefix: &str) -> Option<&MixtureProp> {
        self.props.iter().find(|p| p.prefix == prefix)
    }

    /// Row of the component identified by `token` under one of `keys`.
    pub fn row_by_token(&self, token: &str, keys: &[ComponentKey]) -> Option<usize> {
        let found = find_component_by_token(token, &self.components, keys)?;
        self.components.iter().position(|c| std::ptr::eq(c, found))
    }

    /// Row of `component`, comparing ids under each of `keys`.
    pub fn row_of(&self, component: &Component, keys: &[ComponentKey]) -> Option<usize> {
        keys.iter().find_map(|key| {
            let id = component.id(key);
            self.row_by_token(&id, std::slice::from_ref(key))
        })
    }

    /// Whether the two tokens name the two distinct components of this mixture.
    pub fn matches_tokens(&self, a: &str, b: &str, keys: &[ComponentKey]) -> bool {
        match (self.row_by_token(a, keys), self.row_by_token(b, keys)) {
            (Some(ra), Some(rb)) => ra != rb,
            _ => false,
        }
    }

    /// Id of the component at `row`, as written in the label.
    pub fn label_id(&self, row: usize) -> String {
        self.components[row].id(&self.mixture_key)
    }
}

/// All mixtures of a dataset, in label order.
#[derive(Debug, Clone, Default)]
pub struct MixtureIndex {
    entries: Vec<MixtureEntry>,
}

impl MixtureIndex {
    pub fn get(&self, label: &str) -> Option<&MixtureEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MixtureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Label carried by a row group's `Mixture` row, if any.
pub fn mixture_label(group: &[RawRecord]) -> Option<String> {
    group
        .iter()
        .find(|record| record.is_named("mixture"))
        .map(|record| record.value.to_string().trim().to_string())
}

struct Seed {
    label: String,
    tokens: [String; 2],
    components: Vec<Component>,
    records: HashMap<String, Vec<NumericRecord>>,
    props: Vec<MixtureProp>,
}

/// Group raw row groups by mixture label.
///
/// Groups without a `Mixture` row are skipped. Fails on a label that does not
/// split into two tokens, a group missing an identity row, a label that does
/// not end up with exactly two components, or a label whose key template
/// cannot be inferred.
pub fn normalize(groups: &[Vec<RawRecord>], config: &EngineConfig) -> MixtureResult<MixtureIndex> {
    let mut seeds: Vec<Seed> = Vec::new();
    for group in groups {
        let Some(label) = mixture_label(group) else {
            continue;
        };
        let component = identity_of(group, &label)?;
        let cleaned = clean(group, &config.ignore_fields);

        let pos = match seeds.iter().position(|seed| seed.label == label) {
            Some(pos) => pos,
            None => {
                let tokens = split_label(&label, &config.mixture_delimiter)?;
                seeds.push(Seed {
                    label,
                    tokens,
                    components: Vec::new(),
                    records: HashMap::new(),
                    props: Vec::new(),
                });
                seeds.len() - 1
            }
        };
        let seed = &mut seeds[pos];
        for record in &cleaned {
            collect_prop(&mut seed.props, record, &config.prop_identifier);
        }
        seed.records
            .insert(component.id(&config.component_key), cleaned);
        seed.components.push(component);
    }

    let mut entries = Vec::with_capacity(seeds.len());
    for seed in seeds {
        if seed.components.len() != 2 {
            return Err(MixtureError::NotBinary {
                label: seed.label,
                count: seed.components.len(),
            });
        }
        let mixture_key = infer_mixture_key(
            &seed.label,
            &seed.tokens,
            &seed.components,
            &config.key_candidates,
        )?;
        let [t0, t1] = &seed.tokens;
        entries.push(MixtureEntry {
            mixture_ids: [format!("{t0}|{t1}"), format!("{t1}|{t0}")],
            label: seed.label,
            mixture_key,
            mixture_component_ids: seed.tokens,
            components: seed.components,
            records: seed.records,
            props: seed.props,
        });
    }

    debug!(mixtures = entries.len(), "normalized mixture data");
    Ok(MixtureIndex { entries })
}

fn split_label(label: &str, delimiter: &str) -> MixtureResult<[String; 2]> {
    let malformed = || MixtureError::MalformedLabel {
        label: label.to_string(),
        delimiter: delimiter.to_string(),
    };
    let delimiter = match delimiter.trim() {
        "" => delimiter,
        trimmed => trimmed,
    };
    if delimiter.is_empty() {
        return Err(malformed());
    }
    let tokens: Vec<&str> = label.split(delimiter).map(str::trim).collect();
    match tokens.as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() => Ok([a.to_string(), b.to_string()]),
        _ => Err(malformed()),
    }
}

fn identity_of(group: &[RawRecord], label: &str) -> MixtureResult<Component> {
    let field = |name: &'static str| {
        group
            .iter()
            .find(|record| record.is_named(name))
            .map(|record| record.value.to_string().trim().to_string())
            .ok_or_else(|| MixtureError::MissingIdentity {
                label: label.to_string(),
                field: name,
            })
    };
    Ok(Component::new(field("Name")?, field("Formula")?, field("State")?))
}

fn collect_prop(props: &mut Vec<MixtureProp>, record: &NumericRecord, identifier: &str) {
    if identifier.is_empty() {
        return;
    }
    let Some(pos) = record.symbol.find(identifier) else {
        return;
    };
    let prefix = &record.symbol[..pos];
    if prefix.is_empty() || props.iter().any(|p| p.prefix == prefix) {
        return;
    }
    props.push(MixtureProp {
        prefix: prefix.to_string(),
        symbol: format!("{prefix}{identifier}"),
        unit: record.unit.clone(),
    });
}
