pub mod comparisons;
pub mod criterion_evaluator;
pub mod matcher;
pub mod paths;

pub use criterion_evaluator::evaluate_criterion;
pub use matcher::{element_matches, evaluate_value};
