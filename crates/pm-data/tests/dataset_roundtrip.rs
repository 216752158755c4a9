use pm_data::{Dataset, RawRecord, clean_with_defaults, load_dataset, save_dataset};

fn sample() -> Dataset {
    Dataset {
        engine: None,
        groups: vec![vec![
            RawRecord::new("Mixture", "-", "methanol|ethanol", "-"),
            RawRecord::new("Name", "-", "methanol", "-"),
            RawRecord::new("Formula", "-", "CH3OH", "-"),
            RawRecord::new("State", "-", "l", "-"),
            RawRecord::new("Alpha", "a_i_j_1", 0.0, "-"),
            RawRecord::new("Alpha", "a_i_j_2", "1", "-"),
        ]],
    }
}

#[test]
fn roundtrip_yaml_dataset() {
    let dataset = sample();
    let path = std::env::temp_dir().join("pm_data_roundtrip.yaml");

    save_dataset(&path, &dataset).unwrap();
    let loaded = load_dataset(&path).unwrap();

    assert_eq!(dataset, loaded);
}

#[test]
fn roundtrip_json_dataset() {
    let dataset = sample();
    let path = std::env::temp_dir().join("pm_data_roundtrip.json");

    save_dataset(&path, &dataset).unwrap();
    let loaded = load_dataset(&path).unwrap();

    assert_eq!(dataset, loaded);
    // "1" stays text on disk and is coerced only when cleaned
    let cleaned = clean_with_defaults(&loaded.groups[0][1..]);
    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned[1].value, 1.0);
}
