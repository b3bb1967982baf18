use crate::error::{DedupError, DedupResult};
use crate::record::{FieldValue, RecordTable};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExactConfig {
    pub given_name_field: String,
    pub surname_field: String,
    pub min_count: usize,
    pub sort_descending: bool,
}

impl Default for ExactConfig {
    fn default() -> Self {
        ExactConfig {
            given_name_field: "FirstName".to_string(),
            surname_field: "Surname".to_string(),
            min_count: 2,
            sort_descending: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactDuplicateGroup {
    pub given_name: FieldValue,
    pub surname: FieldValue,
    pub count: usize,
}

///
/// Groups records by the literal `(given name, surname)` pair and reports
/// groups whose size reaches `min_count`. Missing values form their own group
/// rather than being dropped. With `sort_descending` the output is ordered by
/// count descending; ties keep first-appearance order, so output is
/// deterministic for a given input ordering.
///
/// ## Arguments
///
/// * `table` - The records to group. Never mutated.
/// * `config` - Field selectors, minimum group size, and sort direction.
///
pub fn find_exact_duplicates(
    table: &RecordTable,
    config: &ExactConfig,
) -> DedupResult<Vec<ExactDuplicateGroup>> {
    if config.min_count < 1 {
        return Err(DedupError::invalid_config("minCount must be at least 1"));
    }
    let given = table.resolve_field(&config.given_name_field)?;
    let surname = table.resolve_field(&config.surname_field)?;

    let mut counts: FxHashMap<(FieldValue, FieldValue), usize> = FxHashMap::default();
    let mut first_seen: Vec<(FieldValue, FieldValue)> = Vec::new();
    for row in table.rows() {
        let key = (row[given].clone(), row[surname].clone());
        match counts.entry(key) {
            Entry::Occupied(mut entry) => *entry.get_mut() += 1,
            Entry::Vacant(entry) => {
                first_seen.push(entry.key().clone());
                entry.insert(1);
            }
        }
    }

    let mut groups: Vec<ExactDuplicateGroup> = first_seen
        .into_iter()
        .filter_map(|(given_name, surname)| {
            let count = counts[&(given_name.clone(), surname.clone())];
            (count >= config.min_count).then_some(ExactDuplicateGroup {
                given_name,
                surname,
                count,
            })
        })
        .collect();
    if config.sort_descending {
        // stable sort keeps first-appearance order among equal counts
        groups.sort_by(|a, b| b.count.cmp(&a.count));
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name_table(names: &[(&str, &str)]) -> RecordTable {
        let rows = names
            .iter()
            .map(|&(first, last)| vec![FieldValue::from(first), FieldValue::from(last)])
            .collect();
        RecordTable::from_rows(
            vec!["FirstName".to_string(), "Surname".to_string()],
            rows,
        )
        .unwrap()
    }

    fn group(first: &str, last: &str, count: usize) -> ExactDuplicateGroup {
        ExactDuplicateGroup {
            given_name: FieldValue::from(first),
            surname: FieldValue::from(last),
            count,
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        let table = name_table(&[
            ("Norman", "Smith"),
            ("norman", "Smith"),
            ("Alice", "Jones"),
            ("Bob", "Brown"),
        ]);
        let groups = find_exact_duplicates(&table, &ExactConfig::default()).unwrap();
        assert_eq!(groups, vec![]);
    }

    #[test]
    fn literal_pairs_are_grouped_and_counted() {
        let table = name_table(&[
            ("Norman", "Smith"),
            ("Norman", "Smith"),
            ("Alice", "Jones"),
        ]);
        let groups = find_exact_duplicates(&table, &ExactConfig::default()).unwrap();
        assert_eq!(groups, vec![group("Norman", "Smith", 2)]);
    }

    #[test]
    fn sorts_by_count_descending_with_stable_ties() {
        let table = name_table(&[
            ("Alice", "Jones"),
            ("Alice", "Jones"),
            ("Norman", "Smith"),
            ("Norman", "Smith"),
            ("Norman", "Smith"),
            ("Bob", "Brown"),
            ("Bob", "Brown"),
        ]);
        let groups = find_exact_duplicates(&table, &ExactConfig::default()).unwrap();
        assert_eq!(
            groups,
            vec![
                group("Norman", "Smith", 3),
                group("Alice", "Jones", 2),
                group("Bob", "Brown", 2),
            ]
        );
    }

    #[test]
    fn unsorted_output_keeps_first_appearance_order() {
        let table = name_table(&[
            ("Bob", "Brown"),
            ("Alice", "Jones"),
            ("Alice", "Jones"),
            ("Bob", "Brown"),
        ]);
        let config = ExactConfig {
            sort_descending: false,
            ..ExactConfig::default()
        };
        let groups = find_exact_duplicates(&table, &config).unwrap();
        assert_eq!(
            groups,
            vec![group("Bob", "Brown", 2), group("Alice", "Jones", 2)]
        );
    }

    #[test]
    fn missing_values_form_their_own_group() {
        let mut table = RecordTable::new(vec!["FirstName".to_string(), "Surname".to_string()]);
        table
            .push_row(vec![FieldValue::Missing, FieldValue::from("Smith")])
            .unwrap();
        table
            .push_row(vec![FieldValue::Missing, FieldValue::from("Smith")])
            .unwrap();
        let groups = find_exact_duplicates(&table, &ExactConfig::default()).unwrap();
        assert_eq!(
            groups,
            vec![ExactDuplicateGroup {
                given_name: FieldValue::Missing,
                surname: FieldValue::from("Smith"),
                count: 2,
            }]
        );
    }

    #[test]
    fn min_count_one_reports_every_group() {
        let table = name_table(&[("Norman", "Smith"), ("Alice", "Jones")]);
        let config = ExactConfig {
            min_count: 1,
            sort_descending: false,
            ..ExactConfig::default()
        };
        let groups = find_exact_duplicates(&table, &config).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn zero_min_count_is_rejected() {
        let table = name_table(&[("Norman", "Smith")]);
        let config = ExactConfig {
            min_count: 0,
            ..ExactConfig::default()
        };
        let err = find_exact_duplicates(&table, &config).unwrap_err();
        assert!(matches!(err, DedupError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_field_fails_before_grouping() {
        let table = name_table(&[("Norman", "Smith")]);
        let config = ExactConfig {
            given_name_field: "GivenName".to_string(),
            ..ExactConfig::default()
        };
        let err = find_exact_duplicates(&table, &config).unwrap_err();
        assert!(matches!(err, DedupError::UnknownField { .. }));
    }

    #[test]
    fn empty_table_yields_empty_output() {
        let table = name_table(&[]);
        let groups = find_exact_duplicates(&table, &ExactConfig::default()).unwrap();
        assert!(groups.is_empty());
    }
}
