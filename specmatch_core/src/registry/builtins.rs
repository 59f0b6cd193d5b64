//! The 14 built-in operators (§4.3).

use super::OperatorRegistry;
use crate::evaluation::comparisons;
use crate::evaluation::matcher::element_matches;
use crate::types::{values_equal, Value};
use std::sync::Arc;

/// Register all built-in operators into `registry`.
pub fn register_all(registry: &OperatorRegistry) {
    registry.register("$eq", |value, operand| values_equal(value, operand)).unwrap();
    registry.register("$ne", |value, operand| !values_equal(value, operand)).unwrap();
    registry.register("$gt", |value, operand| comparisons::greater_than(value, operand)).unwrap();
    registry
        .register("$gte", |value, operand| comparisons::greater_than_or_equal(value, operand))
        .unwrap();
    registry.register("$lt", |value, operand| comparisons::less_than(value, operand)).unwrap();
    registry
        .register("$lte", |value, operand| comparisons::less_than_or_equal(value, operand))
        .unwrap();
    registry.register("$in", op_in).unwrap();
    registry.register("$nin", op_nin).unwrap();
    registry.register("$all", op_all).unwrap();
    registry.register("$size", op_size).unwrap();
    registry.register("$exists", op_exists).unwrap();
    registry.register("$type", op_type).unwrap();
    registry.register("$regex", op_regex).unwrap();

    // $elemMatch recurses through the full matcher, which needs the
    // registry itself; a Weak handle avoids the Arc cycle this would
    // otherwise create (the registry's own map would hold a strong
    // reference back to itself through the closure).
    let weak = Arc::downgrade(&registry.operators_handle());
    registry
        .register("$elemMatch", move |value, operand| {
            let Some(operators) = weak.upgrade() else {
                return false;
            };
            let nested_registry = OperatorRegistry::from_handle(operators);
            match (value.as_sequence(), operand) {
                (Some(items), query @ Value::Mapping(_)) => {
                    items.iter().any(|item| element_matches(item, query, &nested_registry))
                }
                _ => false,
            }
        })
        .unwrap();
}

fn op_in(value: &Value, operand: &Value) -> bool {
    let Some(candidates) = operand.as_sequence() else {
        return false;
    };
    match value {
        Value::Sequence(items) => items.iter().any(|item| {
            candidates.iter().any(|candidate| values_equal(item, candidate))
        }),
        scalar => candidates.iter().any(|candidate| values_equal(scalar, candidate)),
    }
}

/// The complement of `$in`, but only once the operand's shape has been
/// confirmed — a non-sequence operand is a type mismatch for `$nin` just as
/// much as it is for `$in`, and must fold to `false` rather than negate into
/// a spurious match.
fn op_nin(value: &Value, operand: &Value) -> bool {
    if operand.as_sequence().is_none() {
        return false;
    }
    !op_in(value, operand)
}

fn op_all(value: &Value, operand: &Value) -> bool {
    let (Some(items), Some(required)) = (value.as_sequence(), operand.as_sequence()) else {
        return false;
    };
    required
        .iter()
        .all(|req| items.iter().any(|item| values_equal(item, req)))
}

fn op_size(value: &Value, operand: &Value) -> bool {
    let Some(items) = value.as_sequence() else {
        return false;
    };
    match operand.as_f64() {
        Some(n) => (items.len() as f64 - n).abs() < f64::EPSILON,
        None => false,
    }
}

fn op_exists(value: &Value, operand: &Value) -> bool {
    let Some(expected) = operand.as_bool() else {
        return false;
    };
    !value.is_null() == expected
}

fn op_type(value: &Value, operand: &Value) -> bool {
    match operand.as_str() {
        Some(name) => value.type_name() == name,
        None => false,
    }
}

fn op_regex(value: &Value, operand: &Value) -> bool {
    let (Some(text), Some(pattern)) = (value.as_str(), operand.as_str()) else {
        return false;
    };
    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}
