//! Composite aggregator (§4.4): combines a group's already-computed child
//! results under its junction, three-valued-logic style.

use crate::results::{CompositeResult, EvaluationState, Statistics, TopLevelResult};
use crate::types::{CompositeCriterion, Junction};

/// Fold a composite group's children into a [`CompositeResult`].
///
/// `child_results` must already be in declaration order — this function
/// does not reorder or re-evaluate anything, it only aggregates.
pub fn aggregate(criterion: &CompositeCriterion, child_results: Vec<TopLevelResult>) -> CompositeResult {
    let mut statistics = Statistics::default();
    for child in &child_results {
        statistics.record(child.state());
    }

    let state = combine_state(criterion.junction, &statistics);

    let reason = if state.is_matched() {
        None
    } else {
        let reasons: Vec<&str> = child_results
            .iter()
            .filter(|child| !child.matched())
            .filter_map(TopLevelResult::reason)
            .collect();
        Some(reasons.join(", "))
    };

    CompositeResult {
        criterion: criterion.clone(),
        junction: criterion.junction,
        state,
        child_results,
        statistics,
        reason,
    }
}

fn combine_state(junction: Junction, statistics: &Statistics) -> EvaluationState {
    match junction {
        Junction::And => {
            if statistics.not_matched > 0 {
                EvaluationState::NotMatched
            } else if statistics.undetermined > 0 {
                EvaluationState::Undetermined
            } else {
                EvaluationState::Matched
            }
        }
        Junction::Or => {
            if statistics.matched > 0 {
                EvaluationState::Matched
            } else if statistics.undetermined > 0 {
                EvaluationState::Undetermined
            } else {
                EvaluationState::NotMatched
            }
        }
    }
}
