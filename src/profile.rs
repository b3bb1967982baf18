use crate::record::{FieldKind, RecordTable};
use serde::Serialize;

/// Missing-value summary for one field of a table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProfile {
    pub field: String,
    pub missing: usize,
    pub missing_pct: f64,
    pub kind: FieldKind,
    pub rows: usize,
}

///
/// Reports, per field in schema order, how many values are missing and the
/// folded kind of the values that are present (`Mixed` when kinds disagree,
/// `Empty` when every value is missing). Rendering this summary is the
/// caller's concern.
///
pub fn profile_missing(table: &RecordTable) -> Vec<FieldProfile> {
    let rows = table.len();
    table
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let mut missing = 0;
            let mut kind: Option<FieldKind> = None;
            for value in table.column(index) {
                match value.kind() {
                    None => missing += 1,
                    Some(value_kind) => {
                        kind = match kind {
                            None => Some(value_kind),
                            Some(seen) if seen == value_kind => Some(seen),
                            Some(_) => Some(FieldKind::Mixed),
                        };
                    }
                }
            }
            let missing_pct = if rows == 0 {
                0.0
            } else {
                missing as f64 / rows as f64 * 100.0
            };
            FieldProfile {
                field: field.clone(),
                missing,
                missing_pct,
                kind: kind.unwrap_or(FieldKind::Empty),
                rows,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_missing_values_per_field() {
        let table = RecordTable::from_rows(
            vec!["FirstName".to_string(), "Age".to_string()],
            vec![
                vec![FieldValue::from("Norman"), FieldValue::Integer(41)],
                vec![FieldValue::Missing, FieldValue::Integer(39)],
                vec![FieldValue::from("Alice"), FieldValue::Missing],
                vec![FieldValue::Missing, FieldValue::Integer(55)],
            ],
        )
        .unwrap();
        let profiles = profile_missing(&table);
        assert_eq!(
            profiles,
            vec![
                FieldProfile {
                    field: "FirstName".to_string(),
                    missing: 2,
                    missing_pct: 50.0,
                    kind: FieldKind::Text,
                    rows: 4,
                },
                FieldProfile {
                    field: "Age".to_string(),
                    missing: 1,
                    missing_pct: 25.0,
                    kind: FieldKind::Integer,
                    rows: 4,
                },
            ]
        );
    }

    #[test]
    fn disagreeing_kinds_fold_to_mixed() {
        let table = RecordTable::from_rows(
            vec!["Value".to_string()],
            vec![
                vec![FieldValue::Integer(1)],
                vec![FieldValue::Float(2.5)],
            ],
        )
        .unwrap();
        assert_eq!(profile_missing(&table)[0].kind, FieldKind::Mixed);
    }

    #[test]
    fn all_missing_column_is_empty_kind() {
        let table = RecordTable::from_rows(
            vec!["Value".to_string()],
            vec![vec![FieldValue::Missing], vec![FieldValue::Missing]],
        )
        .unwrap();
        let profile = &profile_missing(&table)[0];
        assert_eq!(profile.kind, FieldKind::Empty);
        assert_eq!(profile.missing_pct, 100.0);
    }

    #[test]
    fn empty_table_reports_zero_percent() {
        let table = RecordTable::new(vec!["Value".to_string()]);
        let profile = &profile_missing(&table)[0];
        assert_eq!(profile.missing, 0);
        assert_eq!(profile.missing_pct, 0.0);
        assert_eq!(profile.rows, 0);
    }
}
