//! Output renderers for an already-computed [`EvaluationOutcome`] (§6).
//!
//! Thin presentation layer over the core's result types, the same separation
//! the teacher keeps between `ScanResult` and its own `to_json`/cargo-style
//! console rendering — the core never knows these formats exist.

mod text;

use specmatch_core::EvaluationOutcome;
use std::fmt;
use std::str::FromStr;

pub use text::render_text;

/// Selects which of the four renderers `--json`/`--yaml`/`--text`/`--summary`
/// picks; defaults to `Text` when the CLI is invoked with none of them (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Text,
    Summary,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "text" => Ok(OutputFormat::Text),
            "summary" => Ok(OutputFormat::Summary),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "text",
            OutputFormat::Summary => "summary",
        };
        write!(f, "{name}")
    }
}

/// Render `outcome` as a complete string in the requested format (§6).
pub fn render(outcome: &EvaluationOutcome, format: OutputFormat, verbose: bool) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(outcome).map_err(RenderError::Json),
        OutputFormat::Yaml => serde_yaml::to_string(outcome).map_err(RenderError::Yaml),
        OutputFormat::Text => Ok(text::render_text(outcome, verbose)),
        OutputFormat::Summary => Ok(render_summary(outcome)),
    }
}

/// One-line rendering of `summary`, used by `--summary` and as the final
/// line `--text` appends after the detailed tree.
pub fn render_summary(outcome: &EvaluationOutcome) -> String {
    let summary = &outcome.summary;
    format!(
        "{}: {}/{} matched, {} not matched, {} undetermined (fully determined: {})",
        outcome.specification_id,
        summary.matched,
        summary.total,
        summary.not_matched,
        summary.undetermined,
        summary.fully_determined,
    )
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to render JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("failed to render YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use specmatch_core::{
        CompositeResult, EvaluationState, QueryResult, Statistics, Summary, TopLevelResult,
    };
    use specmatch_core::{CompositeCriterion, Junction, QueryCriterion, Value};

    fn sample_outcome() -> EvaluationOutcome {
        EvaluationOutcome::new(
            "demo",
            vec![TopLevelResult::Query(QueryResult {
                criterion: QueryCriterion::new("age-check", Value::Mapping(Default::default())),
                state: EvaluationState::Matched,
                missing_paths: vec![],
                reason: None,
            })],
        )
    }

    #[test]
    fn output_format_parses_all_four_names() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("summary".parse::<OutputFormat>().unwrap(), OutputFormat::Summary);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_rendering_round_trips_through_serde_json() {
        let outcome = sample_outcome();
        let rendered = render(&outcome, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["specificationId"], "demo");
    }

    #[test]
    fn summary_rendering_mentions_counts() {
        let outcome = sample_outcome();
        let rendered = render_summary(&outcome);
        assert!(rendered.contains("1/1 matched"));
    }

    #[test]
    fn composite_result_round_trips_through_yaml() {
        let outcome = EvaluationOutcome::new(
            "demo",
            vec![TopLevelResult::Composite(CompositeResult {
                criterion: CompositeCriterion::new("g1", Junction::And, vec![]),
                junction: Junction::And,
                state: EvaluationState::Matched,
                child_results: vec![],
                statistics: Statistics::default(),
                reason: None,
            })],
        );
        let rendered = render(&outcome, OutputFormat::Yaml, false).unwrap();
        assert!(rendered.contains("demo"));
        let _: Summary = outcome.summary;
    }
}
