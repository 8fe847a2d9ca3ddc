//! Value coercion
//!
//! Operators type every value as text. Before a value is placed in an update
//! payload it is converted into the type the target field expects. The
//! strategy is chosen by field name through a lookup table; the first entry
//! whose pattern matches wins and unmatched fields keep their text.
//!
//! Coercion never fails. Input that does not fit the expected type falls
//! through to a less specific value; for boolean built-ins, anything other
//! than `true` (case-insensitive) becomes `false`.

use super::catalog::CUSTOM_FIELD_PREFIX;
use serde::Serialize;

/// A field value after coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CoercedValue {
    Bool(bool),
    List(Vec<String>),
    Integer(i64),
    Text(String),
}

/// How a raw value is converted for a given field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionStrategy {
    /// `true` iff the value is `true`, ignoring case and surrounding whitespace
    Boolean,
    /// Comma separated list, trimmed, empty pieces dropped
    List,
    /// Custom fields: literal booleans and integers are typed, the rest is text
    Custom,
    /// Value is kept verbatim
    Text,
}

#[derive(Debug, Clone, Copy)]
enum FieldPattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl FieldPattern {
    fn matches(self, field: &str) -> bool {
        match self {
            Self::Exact(name) => field == name,
            Self::Prefix(prefix) => field.starts_with(prefix),
        }
    }
}

const STRATEGIES: &[(FieldPattern, CoercionStrategy)] = &[
    (
        FieldPattern::Exact("shared_tickets"),
        CoercionStrategy::Boolean,
    ),
    (
        FieldPattern::Exact("shared_comments"),
        CoercionStrategy::Boolean,
    ),
    (FieldPattern::Exact("domain_names"), CoercionStrategy::List),
    (FieldPattern::Exact("tags"), CoercionStrategy::List),
    (
        FieldPattern::Prefix(CUSTOM_FIELD_PREFIX),
        CoercionStrategy::Custom,
    ),
];

/// Pick the coercion strategy for a field path
pub fn strategy_for(field: &str) -> CoercionStrategy {
    STRATEGIES
        .iter()
        .find(|(pattern, _)| pattern.matches(field))
        .map(|(_, strategy)| *strategy)
        .unwrap_or(CoercionStrategy::Text)
}

/// Convert a raw value into the type expected by `field`
pub fn coerce(field: &str, raw: &str) -> CoercedValue {
    strategy_for(field).apply(raw)
}

impl CoercionStrategy {
    pub fn apply(self, raw: &str) -> CoercedValue {
        match self {
            Self::Boolean => CoercedValue::Bool(normalized(raw) == "true"),
            Self::List => CoercedValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            Self::Custom => match normalized(raw).as_str() {
                "true" => CoercedValue::Bool(true),
                "false" => CoercedValue::Bool(false),
                _ => match parse_integer(raw) {
                    Some(number) => CoercedValue::Integer(number),
                    None => CoercedValue::Text(raw.to_string()),
                },
            },
            Self::Text => CoercedValue::Text(raw.to_string()),
        }
    }
}

fn normalized(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse a value that is numeric as a whole and has no fractional part.
///
/// Accepts the same notations as a float literal (`42`, `+7`, `4.0`, `1e3`).
fn parse_integer(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(number) = text.parse::<i64>() {
        return Some(number);
    }

    let number = text.parse::<f64>().ok()?;
    // i64::MAX is not representable as f64; the bound is exclusive.
    let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
    if number.is_finite() && number.fract() == 0.0 && in_range {
        Some(number as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOOLEAN_FIELDS: [&str; 2] = ["shared_tickets", "shared_comments"];
    const LIST_FIELDS: [&str; 2] = ["domain_names", "tags"];

    fn list(items: &[&str]) -> CoercedValue {
        CoercedValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_boolean_builtins_accept_true_in_any_case() {
        for field in BOOLEAN_FIELDS {
            assert_eq!(coerce(field, "TRUE"), CoercedValue::Bool(true));
            assert_eq!(coerce(field, "true"), CoercedValue::Bool(true));
            assert_eq!(coerce(field, " true "), CoercedValue::Bool(true));
        }
    }

    #[test]
    fn test_boolean_builtins_treat_anything_else_as_false() {
        for field in BOOLEAN_FIELDS {
            assert_eq!(coerce(field, "false"), CoercedValue::Bool(false));
            assert_eq!(coerce(field, "yes"), CoercedValue::Bool(false));
            assert_eq!(coerce(field, "ture"), CoercedValue::Bool(false));
            assert_eq!(coerce(field, "1"), CoercedValue::Bool(false));
        }
    }

    #[test]
    fn test_list_builtins_split_and_trim() {
        for field in LIST_FIELDS {
            assert_eq!(coerce(field, "a, b ,c"), list(&["a", "b", "c"]));
            assert_eq!(coerce(field, ""), list(&[]));
            assert_eq!(coerce(field, " , ,"), list(&[]));
            assert_eq!(coerce(field, "vip,,enterprise"), list(&["vip", "enterprise"]));
        }
    }

    #[test]
    fn test_list_keeps_duplicates_in_order() {
        assert_eq!(coerce("tags", "b,a,b"), list(&["b", "a", "b"]));
    }

    #[test]
    fn test_custom_field_integers() {
        assert_eq!(
            coerce("organization_fields.priority", "42"),
            CoercedValue::Integer(42)
        );
        assert_eq!(
            coerce("organization_fields.priority", "-3"),
            CoercedValue::Integer(-3)
        );
        assert_eq!(
            coerce("organization_fields.priority", "4.0"),
            CoercedValue::Integer(4)
        );
        assert_eq!(
            coerce("organization_fields.priority", "1e3"),
            CoercedValue::Integer(1000)
        );
    }

    #[test]
    fn test_custom_field_non_integers_stay_textual() {
        assert_eq!(
            coerce("organization_fields.priority", "4.5"),
            CoercedValue::Text("4.5".to_string())
        );
        assert_eq!(
            coerce("organization_fields.priority", "NaN"),
            CoercedValue::Text("NaN".to_string())
        );
        assert_eq!(
            coerce("organization_fields.priority", "inf"),
            CoercedValue::Text("inf".to_string())
        );
        assert_eq!(
            coerce("organization_fields.region", "EU"),
            CoercedValue::Text("EU".to_string())
        );
    }

    #[test]
    fn test_custom_field_booleans() {
        assert_eq!(
            coerce("organization_fields.vip", "True"),
            CoercedValue::Bool(true)
        );
        assert_eq!(
            coerce("organization_fields.vip", " FALSE"),
            CoercedValue::Bool(false)
        );
        assert_eq!(
            coerce("organization_fields.vip", "yes"),
            CoercedValue::Text("yes".to_string())
        );
    }

    #[test]
    fn test_plain_fields_are_verbatim() {
        assert_eq!(
            coerce("name", "  Acme Inc "),
            CoercedValue::Text("  Acme Inc ".to_string())
        );
        assert_eq!(coerce("notes", "42"), CoercedValue::Text("42".to_string()));
        assert_eq!(coerce("details", "true"), CoercedValue::Text("true".to_string()));
    }

    #[test]
    fn test_strategy_lookup() {
        assert_eq!(strategy_for("shared_tickets"), CoercionStrategy::Boolean);
        assert_eq!(strategy_for("tags"), CoercionStrategy::List);
        assert_eq!(
            strategy_for("organization_fields.tags"),
            CoercionStrategy::Custom
        );
        assert_eq!(strategy_for("external_id"), CoercionStrategy::Text);
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_value(vec![
            CoercedValue::Bool(true),
            list(&["a"]),
            CoercedValue::Integer(7),
            CoercedValue::Text("x".to_string()),
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!([true, ["a"], 7, "x"]));
    }

    proptest! {
        #[test]
        fn prop_custom_integers_round_trip(n in any::<i64>()) {
            prop_assert_eq!(
                coerce("organization_fields.count", &n.to_string()),
                CoercedValue::Integer(n)
            );
        }

        #[test]
        fn prop_text_fields_never_change_value(raw in ".*") {
            prop_assert_eq!(coerce("notes", &raw), CoercedValue::Text(raw.clone()));
        }

        #[test]
        fn prop_list_pieces_are_trimmed_and_non_empty(raw in "[a-z ,]{0,40}") {
            if let CoercedValue::List(items) = coerce("tags", &raw) {
                for item in items {
                    prop_assert!(!item.is_empty());
                    prop_assert_eq!(item.trim(), item.as_str());
                }
            } else {
                prop_assert!(false, "tags must coerce to a list");
            }
        }
    }
}
