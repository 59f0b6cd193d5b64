//! Criterion and composite-group declarations (§3).

use super::value::Value;
use serde::{Deserialize, Serialize};

/// An identified leaf constraint: a MongoDB-style query expression tested
/// against a document subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCriterion {
    pub id: String,
    pub query: Value,
}

impl QueryCriterion {
    pub fn new(id: impl Into<String>, query: Value) -> Self {
        Self {
            id: id.into(),
            query,
        }
    }
}

/// The logical connective joining a composite criterion's children (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Junction {
    And,
    Or,
}

impl Default for Junction {
    fn default() -> Self {
        Junction::And
    }
}

/// A child of a composite group: either an inline criterion/group, or a
/// reference by id to a top-level criterion or group declared elsewhere in
/// the specification (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupChild {
    Query(QueryCriterion),
    Composite(CompositeCriterion),
    Reference { r#ref: String },
}

impl GroupChild {
    /// The id this child resolves to, whether inline or a reference.
    pub fn referenced_id(&self) -> Option<&str> {
        match self {
            GroupChild::Query(q) => Some(q.id.as_str()),
            GroupChild::Composite(c) => Some(c.id.as_str()),
            GroupChild::Reference { r#ref } => Some(r#ref.as_str()),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, GroupChild::Reference { .. })
    }
}

/// An identified group of child criteria joined by a junction (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeCriterion {
    pub id: String,
    #[serde(default)]
    pub junction: Junction,
    #[serde(rename = "criteria", alias = "children")]
    pub children: Vec<GroupChild>,
}

impl CompositeCriterion {
    pub fn new(id: impl Into<String>, junction: Junction, children: Vec<GroupChild>) -> Self {
        Self {
            id: id.into(),
            junction,
            children,
        }
    }
}
