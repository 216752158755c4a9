//! Engine and alias-builder configuration.

use pm_data::{ComponentKey, DEFAULT_IGNORE_FIELDS};
use serde::{Deserialize, Serialize};

/// Settings for building and querying a [`crate::MixtureMatrixEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delimiter between the two component tokens of a mixture label.
    pub mixture_delimiter: String,
    /// Template the engine keys per-component records under.
    pub component_key: ComponentKey,
    /// Marker identifying matrix coefficient rows (`a_i_j_1` -> prefix `a`).
    pub prop_identifier: String,
    /// Separator between a property symbol and its column index.
    pub column_delimiter: String,
    /// Templates tried, in order, when matching ids and tokens.
    pub key_candidates: Vec<ComponentKey>,
    /// Property-reference delimiters in priority order.
    pub reference_delimiters: Vec<String>,
    /// Row names stripped before coefficient cleaning.
    pub ignore_fields: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut ignore_fields: Vec<String> =
            DEFAULT_IGNORE_FIELDS.iter().map(|s| s.to_string()).collect();
        ignore_fields.push("Mixture".to_string());
        Self {
            mixture_delimiter: "|".to_string(),
            component_key: ComponentKey::name_formula(),
            prop_identifier: "_i_j".to_string(),
            column_delimiter: "_".to_string(),
            key_candidates: ComponentKey::default_candidates(),
            reference_delimiters: vec!["|".to_string(), "_".to_string()],
            ignore_fields,
        }
    }
}

impl EngineConfig {
    pub fn with_mixture_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.mixture_delimiter = delimiter.into();
        self
    }

    pub fn with_component_key(mut self, key: ComponentKey) -> Self {
        self.component_key = key;
        self
    }
}

/// Settings for [`crate::BinaryMixtureAliasBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasBuilderConfig {
    /// Templates every mixture gets an alias under, in both orders.
    pub alias_keys: Vec<ComponentKey>,
    /// Label delimiters tried when picking a pair's row groups.
    pub label_delimiters: Vec<String>,
    /// Base engine settings; the mixture delimiter is replaced by the one
    /// that matched.
    pub engine: EngineConfig,
}

impl Default for AliasBuilderConfig {
    fn default() -> Self {
        Self {
            alias_keys: ComponentKey::default_candidates(),
            label_delimiters: ["|", " | ", "_", " _ "]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            engine: EngineConfig::default(),
        }
    }
}
