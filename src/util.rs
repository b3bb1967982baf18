use crate::record::FieldValue;

/// Coerces a value to text, keeps its ASCII digits, and parses their
/// concatenation as an integer. `None` when no digits remain or the digits
/// overflow `i64`.
pub fn extract_number(value: &FieldValue) -> Option<i64> {
    let digits: String = value
        .to_string()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_digits_anywhere_in_the_text() {
        assert_eq!(extract_number(&FieldValue::from("AB12x3")), Some(123));
        assert_eq!(extract_number(&FieldValue::from("42")), Some(42));
    }

    #[test]
    fn no_digits_yields_none() {
        assert_eq!(extract_number(&FieldValue::from("Smith")), None);
        assert_eq!(extract_number(&FieldValue::Missing), None);
        assert_eq!(extract_number(&FieldValue::from("")), None);
    }

    #[test]
    fn numeric_values_pass_through_their_rendering() {
        assert_eq!(extract_number(&FieldValue::Integer(17)), Some(17));
        assert_eq!(extract_number(&FieldValue::Float(2.5)), Some(25));
        // minus sign is dropped with every other non-digit
        assert_eq!(extract_number(&FieldValue::Integer(-8)), Some(8));
    }

    #[test]
    fn overflowing_digits_yield_none() {
        assert_eq!(
            extract_number(&FieldValue::from("99999999999999999999")),
            None
        );
    }
}
