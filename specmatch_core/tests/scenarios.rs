//! Crate-level integration tests: the concrete scenarios from §8, driven
//! through on-disk JSON/YAML fixtures rather than in-process `Value`
//! construction, exercising the parsing boundary end to end.

use specmatch_core::{evaluate, parsing, EvaluationState, OperatorRegistry, TopLevelResult};
use std::io::Write;
use tempfile::NamedTempFile;

fn fixture(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("create temp fixture");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

#[test]
fn simple_match_scenario() {
    let spec_file = fixture(
        r#"{"id": "demo", "criteria": [{"id": "age-check", "query": {"age": {"$gte": 18}}}]}"#,
        "json",
    );
    let doc_file = fixture(r#"{"age": 25}"#, "json");

    let specification = parsing::load_specification_from_path(spec_file.path()).unwrap();
    let document = parsing::load_document_from_path(doc_file.path()).unwrap();
    let registry = OperatorRegistry::with_defaults();

    let outcome = evaluate(&document, &specification, &registry);
    assert_eq!(outcome.summary.total, 1);
    assert_eq!(outcome.summary.matched, 1);
    assert_eq!(outcome.summary.not_matched, 0);
    assert_eq!(outcome.summary.undetermined, 0);
    assert!(outcome.summary.fully_determined);
}

#[test]
fn missing_field_scenario() {
    let spec_file = fixture(
        r#"{"id": "demo", "criteria": [{"id": "email-check", "query": {"email": {"$exists": true}}}]}"#,
        "json",
    );
    let doc_file = fixture(r#"{"age": 25}"#, "json");

    let specification = parsing::load_specification_from_path(spec_file.path()).unwrap();
    let document = parsing::load_document_from_path(doc_file.path()).unwrap();
    let registry = OperatorRegistry::with_defaults();

    let outcome = evaluate(&document, &specification, &registry);
    let TopLevelResult::Query(result) = &outcome.results[0] else {
        panic!("expected a leaf query result");
    };
    assert_eq!(result.state, EvaluationState::Undetermined);
    assert_eq!(result.missing_paths, vec!["email".to_string()]);
    assert_eq!(result.reason.as_deref(), Some("Missing data"));
}

#[test]
fn value_mismatch_scenario() {
    let spec_file = fixture(
        r#"{"id": "demo", "criteria": [{"id": "country-check", "query": {"country": {"$eq": "US"}}}]}"#,
        "json",
    );
    let doc_file = fixture(r#"{"country": "UK"}"#, "json");

    let specification = parsing::load_specification_from_path(spec_file.path()).unwrap();
    let document = parsing::load_document_from_path(doc_file.path()).unwrap();
    let registry = OperatorRegistry::with_defaults();

    let outcome = evaluate(&document, &specification, &registry);
    let TopLevelResult::Query(result) = &outcome.results[0] else {
        panic!("expected a leaf query result");
    };
    assert_eq!(result.state, EvaluationState::NotMatched);
    assert!(result.missing_paths.is_empty());
    assert!(result.reason.as_ref().unwrap().starts_with("Non-matching values"));
}

#[test]
fn composite_and_mixed_scenario_via_yaml_fixtures() {
    let spec_file = fixture(
        "id: demo\n\
         criteria:\n\
         \x20 - id: age-check\n\
         \x20   query:\n\
         \x20     age:\n\
         \x20       $gte: 18\n\
         \x20 - id: email-check\n\
         \x20   query:\n\
         \x20     email:\n\
         \x20       $exists: true\n\
         groups:\n\
         \x20 - id: g1\n\
         \x20   junction: AND\n\
         \x20   criteria:\n\
         \x20     - ref: age-check\n\
         \x20     - ref: email-check\n",
        "yaml",
    );
    let doc_file = fixture("age: 25\n", "yaml");

    let specification = parsing::load_specification_from_path(spec_file.path()).unwrap();
    let document = parsing::load_document_from_path(doc_file.path()).unwrap();
    let registry = OperatorRegistry::with_defaults();

    let outcome = evaluate(&document, &specification, &registry);
    let TopLevelResult::Composite(composite) = &outcome.results[2] else {
        panic!("expected the composite group to be the third top-level result");
    };
    assert_eq!(composite.state, EvaluationState::Undetermined);
    assert_eq!(composite.statistics.matched, 1);
    assert_eq!(composite.statistics.undetermined, 1);
}

#[test]
fn nested_elem_match_scenario() {
    let spec_file = fixture(
        r#"{
            "id": "demo",
            "criteria": [
                {"id": "items-check", "query": {"items": {"$elemMatch": {"qty": {"$gte": 2}}}}}
            ]
        }"#,
        "json",
    );
    let doc_file = fixture(
        r#"{"items": [{"sku": "a", "qty": 3}, {"sku": "b", "qty": 1}]}"#,
        "json",
    );

    let specification = parsing::load_specification_from_path(spec_file.path()).unwrap();
    let document = parsing::load_document_from_path(doc_file.path()).unwrap();
    let registry = OperatorRegistry::with_defaults();

    let outcome = evaluate(&document, &specification, &registry);
    assert!(outcome.all_top_level_matched());
}

#[test]
fn evaluating_the_same_inputs_twice_yields_structurally_equal_outcomes() {
    let spec_file = fixture(
        r#"{"id": "demo", "criteria": [{"id": "age-check", "query": {"age": {"$gte": 18}}}]}"#,
        "json",
    );
    let doc_file = fixture(r#"{"age": 25}"#, "json");

    let specification = parsing::load_specification_from_path(spec_file.path()).unwrap();
    let document = parsing::load_document_from_path(doc_file.path()).unwrap();
    let registry = OperatorRegistry::with_defaults();

    let first = evaluate(&document, &specification, &registry);
    let second = evaluate(&document, &specification, &registry);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.results.len(), second.results.len());
}
