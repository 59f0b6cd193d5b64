//! Numeric/string ordering comparisons backing `$gt`/`$gte`/`$lt`/`$lte` (§4.3).
//!
//! Grounded on the defensive style of the teacher's
//! `execution/comparisons.rs`: comparisons that cannot be made meaningfully
//! fold to `false` rather than panicking or erroring.

use crate::types::Value;
use std::cmp::Ordering;

/// Order two values if they are both numeric (compared as `f64`) or both
/// strings (compared lexicographically). Returns `None` when the pair isn't
/// comparable, which callers fold to `false`.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if a.is_numeric() && b.is_numeric() {
        return a.as_f64().unwrap().partial_cmp(&b.as_f64().unwrap());
    }
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Some(x.cmp(y));
    }
    None
}

pub fn greater_than(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Greater)
}

pub fn greater_than_or_equal(a: &Value, b: &Value) -> bool {
    matches!(compare(a, b), Some(Ordering::Greater) | Some(Ordering::Equal))
}

pub fn less_than(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

pub fn less_than_or_equal(a: &Value, b: &Value) -> bool {
    matches!(compare(a, b), Some(Ordering::Less) | Some(Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_comparison_widens_to_f64() {
        assert!(greater_than(&Value::Int(5), &Value::Float(4.9)));
        assert!(greater_than_or_equal(&Value::Int(5), &Value::Float(5.0)));
        assert!(less_than(&Value::Float(1.5), &Value::Int(2)));
    }

    #[test]
    fn string_comparison_is_lexicographic() {
        assert!(greater_than(
            &Value::String("b".to_string()),
            &Value::String("a".to_string())
        ));
    }

    #[test]
    fn incomparable_types_fold_to_none() {
        assert_eq!(compare(&Value::Bool(true), &Value::Int(1)), None);
        assert!(!greater_than(&Value::Bool(true), &Value::Int(1)));
    }
}
