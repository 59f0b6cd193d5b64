pub mod types;

pub use types::{
    CompositeResult, EvaluationOutcome, EvaluationState, QueryResult, ReferenceResult, Statistics,
    Summary, TopLevelResult,
};
