//! Specification evaluator (§4.5): orchestrates leaf criterion evaluation,
//! composite-group resolution, and outcome assembly.
//!
//! The concurrent fan-out over top-level leaf criteria is grounded directly
//! on `esp_compiler/src/batch.rs::process_chunk_parallel` — a bounded pool of
//! `std::thread::spawn` workers, each returning `(original_index, result)`
//! pairs, re-sorted by index after every `handle.join()` so output order
//! never depends on completion order.

use crate::aggregate::aggregate;
use crate::evaluation::evaluate_criterion;
use crate::registry::OperatorRegistry;
use crate::results::{CompositeResult, EvaluationOutcome, EvaluationState, QueryResult, ReferenceResult, TopLevelResult};
use crate::types::{CompositeCriterion, Declaration, GroupChild, Specification, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::thread;

/// Controls the worker pool used to fan out leaf criterion evaluation.
///
/// Mirrors `BatchConfig::max_threads` in the teacher's batch processor:
/// defaults to the machine's available parallelism, and a value of `1`
/// drives the plain sequential path with no thread spawned at all.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorConfig {
    pub max_threads: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        let available = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self { max_threads: available }
    }
}

/// Evaluate `document` against `specification` using the default worker
/// pool sizing.
pub fn evaluate(document: &Value, specification: &Specification, registry: &OperatorRegistry) -> EvaluationOutcome {
    evaluate_with_config(document, specification, registry, EvaluatorConfig::default())
}

pub fn evaluate_with_config(
    document: &Value,
    specification: &Specification,
    registry: &OperatorRegistry,
    config: EvaluatorConfig,
) -> EvaluationOutcome {
    run(document, specification, registry, config, None)
}

/// Evaluate with an optional cooperative cancellation token (§5).
///
/// When `cancel` is tripped mid-evaluation, in-flight and not-yet-started
/// leaf criteria short-circuit to UNDETERMINED with reason `"cancelled"`
/// instead of being evaluated normally. This is an opt-in extension; the
/// plain [`evaluate`] entry point never observes a cancellation token,
/// mirroring the optional `fail_fast` flag on the teacher's `BatchConfig`.
pub fn evaluate_cancellable(
    document: &Value,
    specification: &Specification,
    registry: &OperatorRegistry,
    config: EvaluatorConfig,
    cancel: Arc<AtomicBool>,
) -> EvaluationOutcome {
    run(document, specification, registry, config, Some(cancel))
}

fn run(
    document: &Value,
    specification: &Specification,
    registry: &OperatorRegistry,
    config: EvaluatorConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> EvaluationOutcome {
    let declarations = specification.declarations();

    let leaf_indices: Vec<usize> = declarations
        .iter()
        .enumerate()
        .filter_map(|(i, d)| matches!(d, Declaration::Query(_)).then_some(i))
        .collect();

    let leaf_results = evaluate_leaves_concurrently(declarations, &leaf_indices, document, registry, config, cancel.as_ref());

    let mut leaf_by_id: HashMap<String, QueryResult> = HashMap::with_capacity(leaf_results.len());
    for (index, result) in leaf_results {
        leaf_by_id.insert(declarations[index].id().to_string(), result);
    }

    let mut composite_cache: HashMap<String, CompositeResult> = HashMap::new();
    for decl in declarations {
        if let Declaration::Composite(group) = decl {
            resolve_composite(group, declarations, document, &leaf_by_id, &mut composite_cache, registry);
        }
    }

    let results: Vec<TopLevelResult> = declarations
        .iter()
        .map(|decl| match decl {
            Declaration::Query(q) => TopLevelResult::Query(
                leaf_by_id
                    .get(&q.id)
                    .cloned()
                    .unwrap_or_else(|| evaluate_criterion(q, document, registry)),
            ),
            Declaration::Composite(c) => TopLevelResult::Composite(
                composite_cache
                    .get(&c.id)
                    .cloned()
                    .expect("composite was resolved in the loop above"),
            ),
        })
        .collect();

    EvaluationOutcome::new(specification.id(), results)
}

fn evaluate_leaves_concurrently(
    declarations: &[Declaration],
    leaf_indices: &[usize],
    document: &Value,
    registry: &OperatorRegistry,
    config: EvaluatorConfig,
    cancel: Option<&Arc<AtomicBool>>,
) -> Vec<(usize, QueryResult)> {
    if leaf_indices.len() <= 1 || config.max_threads <= 1 {
        return leaf_indices
            .iter()
            .map(|&index| (index, evaluate_leaf(declarations, index, document, registry, cancel)))
            .collect();
    }

    let thread_count = config.max_threads.min(leaf_indices.len());
    let chunk_size = leaf_indices.len().div_ceil(thread_count);

    let document = Arc::new(document.clone());
    let registry = registry.clone();

    let mut handles = Vec::with_capacity(thread_count);
    for chunk in leaf_indices.chunks(chunk_size) {
        let chunk = chunk.to_vec();
        let document = document.clone();
        let registry = registry.clone();
        let cancel = cancel.cloned();
        let declarations: Vec<Declaration> = chunk.iter().map(|&i| declarations[i].clone()).collect();

        handles.push(thread::spawn(move || {
            chunk
                .into_iter()
                .zip(declarations.into_iter())
                .map(|(index, decl)| {
                    let Declaration::Query(criterion) = decl else {
                        unreachable!("leaf_indices only contains Query declarations")
                    };
                    let result = if cancel.as_deref().is_some_and(|c| c.load(AtomicOrdering::Relaxed)) {
                        cancelled_result(&criterion)
                    } else {
                        evaluate_criterion(&criterion, &document, &registry)
                    };
                    (index, result)
                })
                .collect::<Vec<_>>()
        }));
    }

    let mut results = Vec::with_capacity(leaf_indices.len());
    for handle in handles {
        results.extend(handle.join().expect("leaf evaluation worker panicked"));
    }
    results.sort_by_key(|(index, _)| *index);
    results
}

fn evaluate_leaf(
    declarations: &[Declaration],
    index: usize,
    document: &Value,
    registry: &OperatorRegistry,
    cancel: Option<&Arc<AtomicBool>>,
) -> QueryResult {
    let Declaration::Query(criterion) = &declarations[index] else {
        unreachable!("leaf_indices only contains Query declarations")
    };
    if cancel.is_some_and(|c| c.load(AtomicOrdering::Relaxed)) {
        return cancelled_result(criterion);
    }
    evaluate_criterion(criterion, document, registry)
}

fn cancelled_result(criterion: &crate::types::QueryCriterion) -> QueryResult {
    QueryResult {
        criterion: criterion.clone(),
        state: EvaluationState::Undetermined,
        missing_paths: Vec::new(),
        reason: Some("cancelled".to_string()),
    }
}

/// Resolve a composite group into a [`CompositeResult`], recursing into
/// nested/referenced groups with memoization. The reference graph is
/// acyclic by construction (validated in [`Specification::new`]), so plain
/// recursion terminates.
fn resolve_composite(
    group: &CompositeCriterion,
    declarations: &[Declaration],
    document: &Value,
    leaf_by_id: &HashMap<String, QueryResult>,
    composite_cache: &mut HashMap<String, CompositeResult>,
    registry: &OperatorRegistry,
) -> CompositeResult {
    if let Some(cached) = composite_cache.get(&group.id) {
        return cached.clone();
    }

    let child_results: Vec<TopLevelResult> = group
        .children
        .iter()
        .map(|child| resolve_child(child, declarations, document, leaf_by_id, composite_cache, registry))
        .collect();

    let result = aggregate(group, child_results);
    composite_cache.insert(group.id.clone(), result.clone());
    result
}

/// Resolve one child of a composite group: inline criteria are evaluated
/// fresh (they are not top-level declarations, so nothing pre-computed
/// them), inline nested groups recurse, and id-references reuse whatever
/// was already computed for that top-level id (§4.5).
fn resolve_child(
    child: &GroupChild,
    declarations: &[Declaration],
    document: &Value,
    leaf_by_id: &HashMap<String, QueryResult>,
    composite_cache: &mut HashMap<String, CompositeResult>,
    registry: &OperatorRegistry,
) -> TopLevelResult {
    match child {
        GroupChild::Query(q) => TopLevelResult::Query(evaluate_criterion(q, document, registry)),
        GroupChild::Composite(nested) => TopLevelResult::Composite(resolve_composite(
            nested,
            declarations,
            document,
            leaf_by_id,
            composite_cache,
            registry,
        )),
        GroupChild::Reference { r#ref } => {
            if let Some(leaf) = leaf_by_id.get(r#ref) {
                TopLevelResult::Reference(ReferenceResult {
                    reference: r#ref.clone(),
                    result: Box::new(TopLevelResult::Query(leaf.clone())),
                })
            } else if let Some(Declaration::Composite(target)) = declarations.iter().find(|d| d.id() == r#ref) {
                let resolved = resolve_composite(target, declarations, document, leaf_by_id, composite_cache, registry);
                TopLevelResult::Reference(ReferenceResult {
                    reference: r#ref.clone(),
                    result: Box::new(TopLevelResult::Composite(resolved)),
                })
            } else {
                unreachable!("dangling references are rejected at Specification construction time")
            }
        }
    }
}
