//! Value comparison used by the inbound assertions.

use route_tester_routing::{eq_ignore_case, format_value};
use serde_json::Value;

/// Compares two route values by their string form, ignoring case.
///
/// Two `null`s are equal. Only scalars are comparable: a `null` paired with a
/// value, or any array or object, never compares equal.
pub(crate) fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (a, e) if is_comparable(a) && is_comparable(e) => {
            eq_ignore_case(&format_value(a), &format_value(e))
        }
        _ => false,
    }
}

fn is_comparable(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_number_matches_extracted_string() {
        assert!(values_equal(&json!("33"), &json!(33)));
        assert!(!values_equal(&json!("33"), &json!(34)));
    }

    #[test]
    fn test_strings_ignore_case() {
        assert!(values_equal(&json!("de-DE"), &json!("DE-de")));
    }

    #[test]
    fn test_bool_ignores_case() {
        assert!(values_equal(&json!("True"), &json!(true)));
    }

    #[test]
    fn test_nulls() {
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Null, &json!("")));
        assert!(!values_equal(&json!(""), &Value::Null));
    }

    #[test]
    fn test_non_scalars_never_equal() {
        assert!(!values_equal(&json!([1]), &json!([1])));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1})));
    }

    proptest! {
        #[test]
        fn prop_case_never_matters(s in "[a-zA-Z0-9-]{1,16}") {
            prop_assert!(values_equal(&json!(s.to_uppercase()), &json!(s.to_lowercase())));
            prop_assert!(eq_ignore_case(&s.to_uppercase(), &s));
        }
    }
}
