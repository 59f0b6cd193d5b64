//! Top-level criterion evaluation: wraps the recursive matcher into a
//! [`QueryResult`], applying the state/reason rules of §4.2.

use super::matcher::evaluate_value;
use crate::registry::OperatorRegistry;
use crate::results::{EvaluationState, QueryResult};
use crate::types::QueryCriterion;

/// Evaluate a single [`QueryCriterion`] against a document, returning a
/// fully-populated [`QueryResult`] (§3, §4.2).
pub fn evaluate_criterion(criterion: &QueryCriterion, document: &crate::types::Value, registry: &OperatorRegistry) -> QueryResult {
    let mut missing_paths = Vec::new();
    let matched = evaluate_value(document, &criterion.query, registry, "", &mut missing_paths);

    let (state, reason) = if matched {
        (EvaluationState::Matched, None)
    } else if !missing_paths.is_empty() {
        (EvaluationState::Undetermined, Some("Missing data".to_string()))
    } else {
        (
            EvaluationState::NotMatched,
            Some(format!("Non-matching values at {}", criterion.query)),
        )
    };

    QueryResult {
        criterion: criterion.clone(),
        state,
        missing_paths,
        reason,
    }
}
