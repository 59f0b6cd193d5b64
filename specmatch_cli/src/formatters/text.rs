//! Indented human-readable rendering of an [`EvaluationOutcome`] tree (§6).

use super::render_summary;
use specmatch_core::{CompositeResult, EvaluationOutcome, EvaluationState, QueryResult, ReferenceResult, TopLevelResult};
use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Render the full result tree, one line per criterion/group, followed by
/// the one-line summary. When `verbose` is set, `missingPaths` are printed
/// under UNDETERMINED leaves as well.
pub fn render_text(outcome: &EvaluationOutcome, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Specification: {}", outcome.specification_id);
    for result in &outcome.results {
        render_node(&mut out, result, 0, verbose);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_summary(outcome));
    out
}

fn render_node(out: &mut String, result: &TopLevelResult, depth: usize, verbose: bool) {
    match result {
        TopLevelResult::Query(r) => render_query(out, r, depth, verbose),
        TopLevelResult::Composite(r) => render_composite(out, r, depth, verbose),
        TopLevelResult::Reference(r) => render_reference(out, r, depth, verbose),
    }
}

fn render_query(out: &mut String, result: &QueryResult, depth: usize, verbose: bool) {
    let indent = INDENT.repeat(depth);
    let marker = state_marker(result.state);
    let _ = writeln!(out, "{indent}{marker} {} [{}]", result.criterion.id, state_label(result.state));
    if let Some(reason) = &result.reason {
        let _ = writeln!(out, "{indent}{INDENT}reason: {reason}");
    }
    if verbose && !result.missing_paths.is_empty() {
        let _ = writeln!(out, "{indent}{INDENT}missing: {}", result.missing_paths.join(", "));
    }
}

fn render_composite(out: &mut String, result: &CompositeResult, depth: usize, verbose: bool) {
    let indent = INDENT.repeat(depth);
    let marker = state_marker(result.state);
    let stats = &result.statistics;
    let _ = writeln!(
        out,
        "{indent}{marker} {} ({:?}) [{}] matched={} notMatched={} undetermined={}",
        result.criterion.id,
        result.junction,
        state_label(result.state),
        stats.matched,
        stats.not_matched,
        stats.undetermined,
    );
    for child in &result.child_results {
        render_node(out, child, depth + 1, verbose);
    }
}

fn render_reference(out: &mut String, result: &ReferenceResult, depth: usize, verbose: bool) {
    let indent = INDENT.repeat(depth);
    let _ = writeln!(out, "{indent}-> ref: {}", result.reference);
    render_node(out, &result.result, depth + 1, verbose);
}

fn state_marker(state: EvaluationState) -> &'static str {
    match state {
        EvaluationState::Matched => "[x]",
        EvaluationState::NotMatched => "[ ]",
        EvaluationState::Undetermined => "[?]",
    }
}

fn state_label(state: EvaluationState) -> &'static str {
    match state {
        EvaluationState::Matched => "MATCHED",
        EvaluationState::NotMatched => "NOT_MATCHED",
        EvaluationState::Undetermined => "UNDETERMINED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specmatch_core::{QueryCriterion, Value};

    #[test]
    fn renders_a_matched_leaf_and_the_trailing_summary() {
        let outcome = EvaluationOutcome::new(
            "demo",
            vec![TopLevelResult::Query(QueryResult {
                criterion: QueryCriterion::new("age-check", Value::Mapping(Default::default())),
                state: EvaluationState::Matched,
                missing_paths: vec![],
                reason: None,
            })],
        );
        let text = render_text(&outcome, false);
        assert!(text.contains("age-check"));
        assert!(text.contains("MATCHED"));
        assert!(text.contains("1/1 matched"));
    }

    #[test]
    fn verbose_mode_prints_missing_paths() {
        let outcome = EvaluationOutcome::new(
            "demo",
            vec![TopLevelResult::Query(QueryResult {
                criterion: QueryCriterion::new("email-check", Value::Mapping(Default::default())),
                state: EvaluationState::Undetermined,
                missing_paths: vec!["email".to_string()],
                reason: Some("Missing data".to_string()),
            })],
        );
        let quiet = render_text(&outcome, false);
        let verbose = render_text(&outcome, true);
        assert!(!quiet.contains("missing:"));
        assert!(verbose.contains("missing: email"));
    }
}
