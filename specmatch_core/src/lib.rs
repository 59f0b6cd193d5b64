//! Declarative document-matching engine: MongoDB-style criteria evaluated
//! against a [`types::Value`] tree with tri-valued MATCHED/NOT_MATCHED/
//! UNDETERMINED outcomes.

pub mod aggregate;
pub mod evaluation;
pub mod evaluator;
pub mod parsing;
pub mod registry;
pub mod results;
pub mod types;

pub use evaluator::{evaluate, evaluate_cancellable, evaluate_with_config, EvaluatorConfig};
pub use registry::OperatorRegistry;
pub use results::{
    CompositeResult, EvaluationOutcome, EvaluationState, QueryResult, ReferenceResult, Statistics,
    Summary, TopLevelResult,
};
pub use types::{
    values_equal, CompositeCriterion, Declaration, GroupChild, Junction, Mapping, QueryCriterion,
    Specification, Value,
};
