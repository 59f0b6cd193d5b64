//! Document and query value model.
//!
//! A [`Value`] is the tagged representation shared by documents and query
//! operands. Keeping an explicit variant set (rather than matching directly
//! on `serde_json::Value`/`serde_yaml::Value`) avoids hidden downcast bugs
//! throughout the evaluator, the same trade the teacher codebase made by
//! wrapping `serde_json::Value` behind `ResolvedValue`/`RecordData`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered mapping from string keys to [`Value`]s.
///
/// Iteration order follows insertion order, which is required for
/// deterministic `missingPaths` reporting (§3, §5).
pub type Mapping = IndexMap<String, Value>;

/// Recursive sum type used for both documents and query expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Widen to `f64` if this value is numeric (Int or Float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// A lowercased type name, used by the `$type` operator. Mirrors the
    /// type-name vocabulary a MongoDB-style query language exposes.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "array",
            Value::Mapping(_) => "object",
        }
    }

    /// Mapping whose keys are *all* operator clauses (begin with `$`).
    ///
    /// Per §4.2 case 4, any `$`-prefixed key at all makes the whole mapping
    /// an operator clause set; non-`$` keys mixed in are ignored there.
    pub fn is_operator_mapping(&self) -> bool {
        match self {
            Value::Mapping(m) => m.keys().any(|k| k.starts_with('$')),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Mapping(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Cross-type equality per §4.6: numbers compare by `f64`, everything else
/// structurally.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (x, y) if x.is_numeric() && y.is_numeric() => x.as_f64() == y.as_f64(),
        (Value::Sequence(x), Value::Sequence(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| values_equal(a, b))
        }
        (Value::Mapping(x), Value::Mapping(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|ov| values_equal(v, ov)))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_equality_is_cross_type() {
        assert!(values_equal(&Value::Int(5), &Value::Float(5.0)));
        assert!(!values_equal(&Value::Int(5), &Value::Float(5.5)));
    }

    #[test]
    fn null_equals_only_null() {
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Null, &Value::Bool(false)));
    }

    #[test]
    fn sequences_compare_elementwise() {
        let a = Value::Sequence(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::Sequence(vec![Value::Int(1), Value::Int(2)]);
        let c = Value::Sequence(vec![Value::Int(2), Value::Int(1)]);
        assert!(values_equal(&a, &b));
        assert!(!values_equal(&a, &c));
    }

    #[test]
    fn mappings_compare_by_key_set_regardless_of_order() {
        let mut a = Mapping::new();
        a.insert("x".to_string(), Value::Int(1));
        a.insert("y".to_string(), Value::Int(2));

        let mut b = Mapping::new();
        b.insert("y".to_string(), Value::Int(2));
        b.insert("x".to_string(), Value::Int(1));

        assert!(values_equal(&Value::Mapping(a), &Value::Mapping(b)));
    }

    #[test]
    fn operator_mapping_detection_requires_dollar_key() {
        let mut ops = Mapping::new();
        ops.insert("$gte".to_string(), Value::Int(1));
        assert!(Value::Mapping(ops).is_operator_mapping());

        let mut fields = Mapping::new();
        fields.insert("age".to_string(), Value::Int(1));
        assert!(!Value::Mapping(fields).is_operator_mapping());
    }

    #[test]
    fn type_names_match_the_glossary_vocabulary() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Sequence(vec![]).type_name(), "array");
        assert_eq!(Value::Int(1).type_name(), "number");
        assert_eq!(Value::Float(1.0).type_name(), "number");
        assert_eq!(Value::Mapping(Mapping::new()).type_name(), "object");
    }
}
