//! Mapping components to id strings and free-form tokens back to components.

use crate::component::{Component, ComponentKey};
use crate::error::{DataError, DataResult};

/// Id of `component` under `key`, e.g. `Methanol-CH3OH` for `Name-Formula`.
pub fn component_id(component: &Component, key: &ComponentKey) -> String {
    component.id(key)
}

/// Case-insensitive id comparison, ignoring surrounding whitespace.
pub fn ids_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// First candidate whose id under one of `keys` equals `token`.
///
/// Keys are tried in order; within a key, candidates are tried in order.
pub fn find_component_by_token<'a>(
    token: &str,
    candidates: &'a [Component],
    keys: &[ComponentKey],
) -> Option<&'a Component> {
    keys.iter().find_map(|key| {
        candidates
            .iter()
            .find(|component| ids_match(&component.id(key), token))
    })
}

/// Key template a binary mixture label was written in.
///
/// `tokens` are the label's component tokens in label order. A template
/// matches when the two components' ids reproduce the tokens in either order.
pub fn infer_mixture_key(
    label: &str,
    tokens: &[String],
    components: &[Component],
    candidates: &[ComponentKey],
) -> DataResult<ComponentKey> {
    let not_inferred = || DataError::MixtureKeyNotInferred {
        label: label.to_string(),
        attempted: candidates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    };

    let ([t0, t1], [c0, c1]) = (tokens, components) else {
        return Err(not_inferred());
    };

    candidates
        .iter()
        .find(|key| {
            let (id0, id1) = (c0.id(key), c1.id(key));
            (ids_match(&id0, t0) && ids_match(&id1, t1))
                || (ids_match(&id0, t1) && ids_match(&id1, t0))
        })
        .cloned()
        .ok_or_else(not_inferred)
}
