//! Shared fixtures: three binary mixtures over methanol, ethanol and water,
//! each labelled under a different key template.

#![allow(dead_code)]

use pm_data::{Component, RawRecord};

pub fn methanol() -> Component {
    Component::new("Methanol", "CH3OH", "l")
}

pub fn ethanol() -> Component {
    Component::new("Ethanol", "C2H5OH", "l")
}

pub fn water() -> Component {
    Component::new("Water", "H2O", "l")
}

pub fn group(label: &str, component: &Component, a: [f64; 2]) -> Vec<RawRecord> {
    vec![
        RawRecord::new("Mixture", "-", label, "-"),
        RawRecord::new("Name", "-", component.name.as_str(), "-"),
        RawRecord::new("Formula", "-", component.formula.as_str(), "-"),
        RawRecord::new("State", "-", component.state.as_str(), "-"),
        RawRecord::new("CAS", "-", "n/a", "-"),
        RawRecord::new("Interaction parameter", "a_i_j_1", a[0], "J/mol"),
        RawRecord::new("Interaction parameter", "a_i_j_2", a[1], "J/mol"),
        RawRecord::new("Note", "note", "not-a-number", "-"),
    ]
}

/// `Methanol | Ethanol`: methanol declared first, a = [[0, 1], [2, 3]].
pub fn methanol_ethanol() -> Vec<Vec<RawRecord>> {
    vec![
        group("Methanol | Ethanol", &methanol(), [0.0, 1.0]),
        group("Methanol | Ethanol", &ethanol(), [2.0, 3.0]),
    ]
}

/// All three mixtures. Water is declared before methanol in its pair.
pub fn three_mixtures() -> Vec<Vec<RawRecord>> {
    let mut groups = methanol_ethanol();
    groups.push(group("Methanol | Water", &water(), [4.0, 5.0]));
    groups.push(group("Methanol | Water", &methanol(), [6.0, 7.0]));
    groups.push(group("Ethanol-C2H5OH | Water-H2O", &ethanol(), [8.0, 9.0]));
    groups.push(group("Ethanol-C2H5OH | Water-H2O", &water(), [10.0, 11.0]));
    groups
}
