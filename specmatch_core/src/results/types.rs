//! Result value types produced by a specification evaluation (§3, §6).
//!
//! Mirrors the teacher's `results/types.rs` shape (`ScanResult`/`ComplianceResults`
//! built up via `new`/`finalize`/`add_finding`), generalized from a compliance
//! report to a document-match outcome.

use crate::types::{CompositeCriterion, Junction, QueryCriterion};
use serde::{Deserialize, Serialize};

/// The tri-valued outcome of evaluating a criterion (§3).
///
/// Never collapsed into a boolean before the outcome is assembled — see the
/// Design Notes' "three-valued logic vs booleans" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationState {
    Matched,
    NotMatched,
    Undetermined,
}

impl EvaluationState {
    pub fn is_matched(&self) -> bool {
        matches!(self, EvaluationState::Matched)
    }
}

/// Per-child-state tallies of a composite group's immediate children (§3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub matched: usize,
    #[serde(rename = "notMatched")]
    pub not_matched: usize,
    pub undetermined: usize,
}

impl Statistics {
    pub fn record(&mut self, state: EvaluationState) {
        match state {
            EvaluationState::Matched => self.matched += 1,
            EvaluationState::NotMatched => self.not_matched += 1,
            EvaluationState::Undetermined => self.undetermined += 1,
        }
    }
}

/// Result of evaluating a single leaf [`QueryCriterion`] against a document (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub criterion: QueryCriterion,
    pub state: EvaluationState,
    #[serde(rename = "missingPaths")]
    pub missing_paths: Vec<String>,
    pub reason: Option<String>,
}

impl QueryResult {
    pub fn matched(&self) -> bool {
        self.state.is_matched()
    }
}

/// Result of evaluating a single [`CompositeCriterion`] group (§3, §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeResult {
    pub criterion: CompositeCriterion,
    pub junction: Junction,
    pub state: EvaluationState,
    #[serde(rename = "childResults")]
    pub child_results: Vec<TopLevelResult>,
    pub statistics: Statistics,
    pub reason: Option<String>,
}

impl CompositeResult {
    pub fn matched(&self) -> bool {
        self.state.is_matched()
    }
}

/// Wraps the already-computed result of a top-level criterion/group reached
/// by id-reference from a composite group (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceResult {
    #[serde(rename = "ref")]
    pub reference: String,
    pub result: Box<TopLevelResult>,
}

/// Any of the three shapes that can occupy a declaration-order slot in
/// [`EvaluationOutcome::results`] or a composite group's `childResults` (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopLevelResult {
    Query(QueryResult),
    Composite(CompositeResult),
    Reference(ReferenceResult),
}

impl TopLevelResult {
    pub fn state(&self) -> EvaluationState {
        match self {
            TopLevelResult::Query(r) => r.state,
            TopLevelResult::Composite(r) => r.state,
            TopLevelResult::Reference(r) => r.result.state(),
        }
    }

    pub fn matched(&self) -> bool {
        self.state().is_matched()
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            TopLevelResult::Query(r) => r.reason.as_deref(),
            TopLevelResult::Composite(r) => r.reason.as_deref(),
            TopLevelResult::Reference(r) => r.result.reason(),
        }
    }

    /// Count leaf [`QueryResult`]s reachable from this node, accumulating
    /// matched/notMatched/undetermined tallies into `summary`.
    fn accumulate(&self, summary: &mut Summary) {
        match self {
            TopLevelResult::Query(r) => {
                summary.total += 1;
                match r.state {
                    EvaluationState::Matched => summary.matched += 1,
                    EvaluationState::NotMatched => summary.not_matched += 1,
                    EvaluationState::Undetermined => summary.undetermined += 1,
                }
            }
            TopLevelResult::Composite(r) => {
                for child in &r.child_results {
                    child.accumulate(summary);
                }
            }
            TopLevelResult::Reference(r) => r.result.accumulate(summary),
        }
    }
}

/// Aggregate counts over every leaf query result transitively reachable from
/// an outcome's top-level results (§3, §8 invariants 1-3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub matched: usize,
    #[serde(rename = "notMatched")]
    pub not_matched: usize,
    pub undetermined: usize,
    #[serde(rename = "fullyDetermined")]
    pub fully_determined: bool,
}

impl Summary {
    fn from_results(results: &[TopLevelResult]) -> Self {
        let mut summary = Summary::default();
        for result in results {
            result.accumulate(&mut summary);
        }
        summary.fully_determined = summary.undetermined == 0;
        summary
    }
}

/// The top-level immutable value produced by one specification evaluation (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    #[serde(rename = "specificationId")]
    pub specification_id: String,
    pub results: Vec<TopLevelResult>,
    pub summary: Summary,
}

impl EvaluationOutcome {
    /// Build an outcome from an already-ordered result list, computing the
    /// summary from the result tree itself (§3 invariant: summary is a pure
    /// function of the result tree).
    pub fn new(specification_id: impl Into<String>, results: Vec<TopLevelResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            specification_id: specification_id.into(),
            results,
            summary,
        }
    }

    /// `true` iff every top-level result is MATCHED — the CLI's exit-code
    /// condition (§6).
    pub fn all_top_level_matched(&self) -> bool {
        self.results.iter().all(TopLevelResult::matched)
    }
}
