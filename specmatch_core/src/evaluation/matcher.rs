//! Recursive structural matcher (§4.2): walks a query expression against a
//! document subtree, dispatching leaf constraints to the operator registry.
//!
//! Shared by the criterion evaluator (top-level, path/missing tracking) and
//! the `$elemMatch` built-in operator (nested, single-element probe) — the
//! same function realizes both, the way the teacher's
//! `FilterEvaluator::evaluate_state` is reused across filter contexts.

use super::paths::{build_field_path, build_index_path, display_path};
use crate::registry::OperatorRegistry;
use crate::types::{values_equal, Value};

/// Evaluate `query` against `value` at `path`, appending any missing-data
/// paths encountered to `missing`. Returns whether the match succeeded.
///
/// Implements the four cases of §4.2 in order: absent/null value always
/// short-circuits first, regardless of the query's shape.
pub fn evaluate_value(
    value: &Value,
    query: &Value,
    registry: &OperatorRegistry,
    path: &str,
    missing: &mut Vec<String>,
) -> bool {
    if value.is_null() {
        missing.push(display_path(path));
        return false;
    }

    match query {
        Value::Mapping(fields) if query.is_operator_mapping() => {
            evaluate_operator_mapping(value, fields, registry, path)
        }
        Value::Mapping(fields) => evaluate_field_mapping(value, fields, registry, path, missing),
        Value::Sequence(items) => evaluate_sequence(value, items, registry, path, missing),
        scalar => values_equal(value, scalar),
    }
}

fn evaluate_operator_mapping(
    value: &Value,
    clauses: &crate::types::Mapping,
    registry: &OperatorRegistry,
    path: &str,
) -> bool {
    for (name, operand) in clauses {
        if !name.starts_with('$') {
            continue;
        }
        match registry.get(name) {
            Some(handler) => {
                if !handler(value, operand) {
                    return false;
                }
            }
            None => {
                log::warn!("unknown operator '{name}' at path '{}'; skipping", display_path(path));
            }
        }
    }
    true
}

fn evaluate_field_mapping(
    value: &Value,
    fields: &crate::types::Mapping,
    registry: &OperatorRegistry,
    path: &str,
    missing: &mut Vec<String>,
) -> bool {
    let Some(document_fields) = value.as_mapping() else {
        return false;
    };

    let mut all_matched = true;
    for (key, sub_query) in fields {
        let child_value = document_fields.get(key).unwrap_or(&Value::Null);
        let child_path = build_field_path(path, key);
        if !evaluate_value(child_value, sub_query, registry, &child_path, missing) {
            all_matched = false;
        }
    }
    all_matched
}

fn evaluate_sequence(
    value: &Value,
    items: &[Value],
    registry: &OperatorRegistry,
    path: &str,
    missing: &mut Vec<String>,
) -> bool {
    let Some(document_items) = value.as_sequence() else {
        return false;
    };
    if document_items.len() != items.len() {
        return false;
    }

    let mut all_matched = true;
    for (index, (doc_item, query_item)) in document_items.iter().zip(items.iter()).enumerate() {
        let child_path = build_index_path(path, index);
        if !evaluate_value(doc_item, query_item, registry, &child_path, missing) {
            all_matched = false;
        }
    }
    all_matched
}

/// Single-element probe used by the `$elemMatch` operator (§4.3): evaluate
/// `query` against `element` with no path/missing-path tracking, since an
/// unmatched element simply isn't the one being sought.
pub fn element_matches(element: &Value, query: &Value, registry: &OperatorRegistry) -> bool {
    let mut discarded = Vec::new();
    evaluate_value(element, query, registry, "", &mut discarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mapping;

    fn mapping(pairs: Vec<(&str, Value)>) -> Value {
        let mut m = Mapping::new();
        for (k, v) in pairs {
            m.insert(k.to_string(), v);
        }
        Value::Mapping(m)
    }

    #[test]
    fn absent_field_is_undetermined_even_under_exists_false() {
        let registry = OperatorRegistry::with_defaults();
        let doc = mapping(vec![("age", Value::Int(25))]);
        let query = mapping(vec![("email", mapping(vec![("$exists", Value::Bool(false))]))]);
        let mut missing = Vec::new();
        let matched = evaluate_value(&doc, &query, &registry, "", &mut missing);
        assert!(!matched);
        assert_eq!(missing, vec!["email".to_string()]);
    }

    #[test]
    fn simple_match_scenario() {
        let registry = OperatorRegistry::with_defaults();
        let doc = mapping(vec![("age", Value::Int(25))]);
        let query = mapping(vec![("age", mapping(vec![("$gte", Value::Int(18))]))]);
        let mut missing = Vec::new();
        assert!(evaluate_value(&doc, &query, &registry, "", &mut missing));
        assert!(missing.is_empty());
    }

    #[test]
    fn value_mismatch_has_no_missing_paths() {
        let registry = OperatorRegistry::with_defaults();
        let doc = mapping(vec![("country", Value::String("UK".to_string()))]);
        let query = mapping(vec![("country", Value::String("US".to_string()))]);
        let mut missing = Vec::new();
        assert!(!evaluate_value(&doc, &query, &registry, "", &mut missing));
        assert!(missing.is_empty());
    }

    #[test]
    fn nested_elem_match_scenario() {
        let registry = OperatorRegistry::with_defaults();
        let doc = mapping(vec![(
            "items",
            Value::Sequence(vec![
                mapping(vec![
                    ("sku", Value::String("a".to_string())),
                    ("qty", Value::Int(3)),
                ]),
                mapping(vec![
                    ("sku", Value::String("b".to_string())),
                    ("qty", Value::Int(1)),
                ]),
            ]),
        )]);
        let query = mapping(vec![(
            "items",
            mapping(vec![(
                "$elemMatch",
                mapping(vec![("qty", mapping(vec![("$gte", Value::Int(2))]))]),
            )]),
        )]);
        let mut missing = Vec::new();
        assert!(evaluate_value(&doc, &query, &registry, "", &mut missing));
    }
}
