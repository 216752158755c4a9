//! End-to-end lookups against small binary mixture datasets.

mod common;

use std::collections::BTreeMap;

use common::{ethanol, group, methanol, methanol_ethanol, three_mixtures, water};
use pm_core::{Tolerances, nearly_equal};
use pm_data::{Component, ComponentKey};
use pm_equations::{ArgValue, Equation, EquationError, EquationRegistry};
use pm_mixture::{EngineConfig, MixtureError, MixtureMatrixEngine};

const ID: &str = "Methanol|Ethanol";

fn engine() -> MixtureMatrixEngine {
    MixtureMatrixEngine::with_defaults(&methanol_ethanol()).unwrap()
}

#[test]
fn mat_follows_declaration_order() {
    let engine = engine();
    let m = engine.mat("a_i_j", &[methanol(), ethanol()]).unwrap();
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.row(0).iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0]);
    assert_eq!(m.row(1).iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0]);

    assert_eq!(engine.ij("a_1_2", ID).unwrap().value, 1.0);
    assert_eq!(engine.ij("a_2_1", ID).unwrap().value, 2.0);
}

#[test]
fn component_tokens_resolve_like_indices() {
    let engine = engine();
    let by_token = engine.ij("a_methanol_ethanol", ID).unwrap();
    let by_index = engine.ij("a_1_2", ID).unwrap();
    assert_eq!(by_token, by_index);
    assert_eq!(by_token.symbol, "a_Methanol_Ethanol");
    assert_eq!(by_token.unit, "J/mol");

    // Formula tokens work too
    assert_eq!(engine.ij("a_C2H5OH_CH3OH", ID).unwrap().value, 2.0);
}

#[test]
fn ijs_enumerates_every_ordered_pair() {
    let engine = engine();
    let cells = engine.ijs("a | methanol | ethanol").unwrap();
    assert_eq!(cells.len(), 4);
    let keys: Vec<&str> = cells.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "Methanol | Methanol",
            "Methanol | Ethanol",
            "Ethanol | Methanol",
            "Ethanol | Ethanol",
        ]
    );
    let values: Vec<f64> = cells.iter().map(|(_, cell)| cell.value).collect();
    assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);

    // Reverse token order names the same mixture
    assert_eq!(engine.ijs("a | ethanol | methanol").unwrap(), cells);
}

#[test]
fn reverse_mixture_id_reads_same_data() {
    let engine = engine();
    for id in ["Methanol|Ethanol", "ethanol|methanol", "Ethanol | Methanol", "CH3OH|C2H5OH"] {
        assert_eq!(engine.ij("a_1_2", id).unwrap().value, 1.0, "{id}");
        assert_eq!(
            engine.get_property("a_i_j", &ethanol(), id).unwrap(),
            vec![2.0, 3.0]
        );
    }
}

#[test]
fn missing_state_fails_construction() {
    let mut data = methanol_ethanol();
    data[1].retain(|record| record.name != "State");
    let err = MixtureMatrixEngine::with_defaults(&data).unwrap_err();
    assert!(matches!(
        err,
        MixtureError::MissingIdentity { field: "State", .. }
    ));
}

#[test]
fn three_component_label_fails_construction() {
    let mut data = methanol_ethanol();
    data.push(group("Methanol | Ethanol", &water(), [0.0, 0.0]));
    let err = MixtureMatrixEngine::with_defaults(&data).unwrap_err();
    assert!(
        err.to_string().starts_with("Expected exactly 2 components"),
        "{err}"
    );
}

#[test]
fn single_component_label_fails_construction() {
    let data = vec![methanol_ethanol().remove(0)];
    let err = MixtureMatrixEngine::with_defaults(&data).unwrap_err();
    assert!(matches!(err, MixtureError::NotBinary { count: 1, .. }));
}

#[test]
fn find_mixture_id_accepts_either_order() {
    let engine = engine();
    let forward = engine.find_mixture_id(["Methanol", "Ethanol"]).unwrap();
    let reverse = engine.find_mixture_id(["Ethanol", "Methanol"]).unwrap();
    assert_eq!(forward, reverse);
    assert_eq!(forward, "Methanol | Ethanol");
    assert!(engine.find_mixture_id(["Methanol", "Water"]).is_err());
}

#[test]
fn matrix_cells_follow_argument_order() {
    let engine = engine();
    let ab = engine
        .get_matrix_property("a_i_j", [&methanol(), &ethanol()], ID)
        .unwrap();
    let ba = engine
        .get_matrix_property("a_i_j", [&ethanol(), &methanol()], ID)
        .unwrap();
    assert_eq!(ab.value, 1.0);
    assert_eq!(ba.value, 2.0);
    assert_eq!(ab.symbol, "a_Methanol_Ethanol");
    assert_eq!(ba.symbol, "a_Ethanol_Methanol");
}

#[test]
fn ijs_entries_round_trip_through_ij() {
    let engine = MixtureMatrixEngine::with_defaults(&three_mixtures()).unwrap();
    for scope in ["a | methanol | ethanol", "a | water | methanol", "a | H2O | C2H5OH"] {
        let cells = engine.ijs(scope).unwrap();
        let [t0, t1] = [scope.split('|').nth(1).unwrap(), scope.split('|').nth(2).unwrap()];
        let id = format!("{}|{}", t0.trim(), t1.trim());
        for (key, cell) in &cells {
            assert_eq!(engine.ij(&cell.symbol, &id).unwrap().value, cell.value, "{key}");
            let nested = format!("a_i_j | {key}");
            assert_eq!(engine.ij(&nested, &id).unwrap().value, cell.value, "{key}");
        }
    }
}

#[test]
fn mat_spans_several_mixtures() {
    let engine = MixtureMatrixEngine::with_defaults(&three_mixtures()).unwrap();
    let components = [methanol(), ethanol(), water()];
    let m = engine.mat("a_i_j", &components).unwrap();
    let rows: Vec<Vec<f64>> = (0..3)
        .map(|r| m.row(r).iter().copied().collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec![0.0, 1.0, 6.0],
            vec![2.0, 3.0, 9.0],
            vec![5.0, 10.0, 4.0],
        ]
    );

    let dict = engine.mat_dict("a_i_j", &components).unwrap();
    assert_eq!(dict.len(), 9);
    assert_eq!(dict["a_Methanol_Water"], 6.0);
    assert_eq!(dict["a_Water_Methanol"], 5.0);
    assert_eq!(dict["a_Ethanol-C2H5OH_Water-H2O"], 9.0);
}

#[test]
fn mat_rejects_empty_and_uncovered_lists() {
    let engine = engine();
    assert!(matches!(
        engine.mat("a_i_j", &[]),
        Err(MixtureError::InvalidArg { .. })
    ));
    assert!(matches!(
        engine.mat("a_i_j", &[methanol(), water()]),
        Err(MixtureError::MixtureNotFound { .. })
    ));
}

#[test]
fn lookup_failures_are_errors() {
    let engine = engine();
    assert!(matches!(
        engine.ij("b_1_2", ID),
        Err(MixtureError::PropertyNotFound { .. })
    ));
    assert!(matches!(
        engine.ij("a_1_3", ID),
        Err(MixtureError::IndexOutOfRange { index: 3, .. })
    ));
    assert!(matches!(
        engine.ij("a_methanol_water", ID),
        Err(MixtureError::ComponentNotInMixture { .. })
    ));
    assert!(matches!(
        engine.get_property("a_i_j", &water(), ID),
        Err(MixtureError::ComponentNotInMixture { .. })
    ));
    assert!(matches!(
        engine.ij("a_1_2", "Methanol|Water"),
        Err(MixtureError::MixtureNotFound { .. })
    ));
    assert!(matches!(
        engine.ij("  ", ID),
        Err(MixtureError::InvalidArg { .. })
    ));
}

#[test]
fn dirty_rows_and_identity_rows_are_not_coefficients() {
    let engine = engine();
    let entry = engine.mixture(ID).unwrap();
    let records = entry.records("Methanol-CH3OH");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.symbol.starts_with("a_i_j_")));
    assert_eq!(engine.props(ID).unwrap().len(), 1);
}

#[test]
fn engine_component_key_changes_record_ids() {
    let config = EngineConfig::default().with_component_key(ComponentKey::formula());
    let engine = MixtureMatrixEngine::new(&methanol_ethanol(), config).unwrap();
    let entry = engine.mixture(ID).unwrap();
    assert_eq!(entry.records("CH3OH").len(), 2);
    assert_eq!(entry.mixture_key(), &ComponentKey::name());
    assert_eq!(engine.ij("a_2_2", ID).unwrap().value, 3.0);
}

#[test]
fn component_scalar_uses_equation_source() {
    let engine = engine();
    let mut registry = EquationRegistry::new();
    registry.insert(
        "Methanol-CH3OH",
        Equation::new("psat", "Pa", |inp| {
            10f64.powf(inp.param("A") - inp.param("B") / inp.arg("T"))
        })
        .with_param("A", 5.0)
        .with_param("B", 1000.0)
        .with_arg("T"),
    );

    let mut args = BTreeMap::new();
    args.insert("T".to_string(), ArgValue::new(500.0, "K"));
    let value = engine
        .component_scalar(&registry, ID, "methanol", "psat", &args)
        .unwrap();
    assert_eq!(value.unit, "Pa");
    assert!(nearly_equal(value.value, 1000.0, Tolerances::default()));

    let err = engine
        .component_scalar(&registry, ID, "ethanol", "psat", &args)
        .unwrap_err();
    assert!(matches!(
        err,
        MixtureError::Equation(EquationError::NotFound { .. })
    ));

    let err = engine
        .component_scalar(&registry, ID, "methanol", "psat", &BTreeMap::new())
        .unwrap_err();
    assert!(matches!(
        err,
        MixtureError::Equation(EquationError::MissingArgument { .. })
    ));
}

#[test]
fn mat_keeps_isomers_apart() {
    let n_butane = Component::new("n-Butane", "C4H10", "g");
    let isobutane = Component::new("Isobutane", "C4H10", "g");
    let data = vec![
        group("n-Butane | Isobutane", &n_butane, [0.0, 1.0]),
        group("n-Butane | Isobutane", &isobutane, [2.0, 3.0]),
    ];
    let engine = MixtureMatrixEngine::with_defaults(&data).unwrap();
    let id = "n-Butane|Isobutane";

    assert_eq!(engine.ij("a_1_2", id).unwrap().value, 1.0);
    let m = engine.mat("a_i_j", &[n_butane.clone(), isobutane.clone()]).unwrap();
    assert_eq!(m[(0, 0)], 0.0);
    assert_eq!(m[(0, 1)], 1.0);
    assert_eq!(m[(1, 0)], 2.0);
    assert_eq!(m[(1, 1)], 3.0);

    let dict = engine.mat_dict("a_i_j", &[isobutane, n_butane]).unwrap();
    assert_eq!(dict["a_Isobutane_n-Butane"], 2.0);
    assert_eq!(dict["a_n-Butane_Isobutane"], 1.0);
}
