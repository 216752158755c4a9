//! Cleaning raw rows into numeric coefficient rows.

use tracing::trace;

use crate::record::{NumericRecord, RawRecord};

/// Identity fields stripped by default.
pub const DEFAULT_IGNORE_FIELDS: [&str; 6] = ["Name", "Formula", "State", "CAS", "InChI", "SMILES"];

/// Strip rows named in `ignore` and coerce the rest to numbers.
///
/// Rows whose value is not a finite number are dropped, not reported:
/// a stray annotation column must not abort the whole dataset.
pub fn clean<S: AsRef<str>>(records: &[RawRecord], ignore: &[S]) -> Vec<NumericRecord> {
    records
        .iter()
        .filter(|record| !ignore.iter().any(|name| record.is_named(name.as_ref())))
        .filter_map(|record| match record.value.as_f64() {
            Some(value) => Some(NumericRecord {
                name: record.name.clone(),
                symbol: record.symbol.clone(),
                value,
                unit: record.unit.clone(),
            }),
            None => {
                trace!(symbol = %record.symbol, value = %record.value, "dropping non-numeric row");
                None
            }
        })
        .collect()
}

pub fn clean_with_defaults(records: &[RawRecord]) -> Vec<NumericRecord> {
    clean(records, &DEFAULT_IGNORE_FIELDS)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cleaned_count_excludes_dirty_rows(
            values in prop::collection::vec(prop_oneof![
                (-1e6_f64..1e6_f64).prop_map(|v| (v.to_string(), true)),
                "[a-z]{1,8}".prop_map(|s| (format!("x{s}"), false)),
            ], 0..20)
        ) {
            let records: Vec<RawRecord> = values
                .iter()
                .enumerate()
                .map(|(i, (text, _))| RawRecord::new("Coeff", format!("c_i_j_{}", i + 1), text.as_str(), "-"))
                .collect();
            let numeric = values.iter().filter(|(_, ok)| *ok).count();
            let cleaned = clean_with_defaults(&records);
            prop_assert_eq!(cleaned.len(), numeric);
        }
    }
}
