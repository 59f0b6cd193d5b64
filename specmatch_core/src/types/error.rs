//! Error types for specification construction and registry mutation.
//!
//! One `thiserror` enum per module boundary, the same granularity the
//! teacher codebase uses (`StrategyError`, `ComparisonError`,
//! `FilterEvaluationError` each own their concern rather than sharing a
//! single catch-all error type).

use thiserror::Error;

/// Errors raised synchronously while building a [`crate::types::Specification`]
/// (§7 `InvalidArgument`).
#[derive(Debug, Error)]
pub enum SpecificationError {
    #[error("criterion id must not be empty")]
    EmptyCriterionId,

    #[error("duplicate criterion/group id: {id}")]
    DuplicateId { id: String },

    #[error("group '{group}' references unknown criterion/group id: {reference}")]
    DanglingReference { group: String, reference: String },

    #[error("cyclic reference detected in composite groups: {cycle}")]
    ReferenceCycle { cycle: String },

    #[error("a query criterion's `query` field must be a mapping, got {found}")]
    QueryMustBeMapping { found: &'static str },
}

/// Errors raised synchronously by [`crate::registry::OperatorRegistry`]
/// mutators (§4.1, §7 `InvalidArgument`).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("operator name must not be empty")]
    EmptyName,
}
