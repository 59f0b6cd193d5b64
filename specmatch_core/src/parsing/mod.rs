//! Parsing boundary (§6): deserializes documents and specifications from
//! JSON or YAML text, with extension-based format auto-detection falling
//! back to try-JSON-then-YAML — mirroring the teacher's extension-based
//! file-processor dispatch in `esp_compiler`.
//!
//! [`Value`] and the criterion types derive `serde::Deserialize` directly
//! (an untagged enum over `serde_json`/`serde_yaml`'s own value trees), so
//! the only boundary work this module owns is format detection, raw-shape
//! decoding of the specification document (§6), and converting that into a
//! validated [`Specification`].

use crate::types::{CompositeCriterion, Declaration, QueryCriterion, Specification, SpecificationError, Value};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a specification or document from text/disk
/// (§7 `MalformedSpecification`, peripheral boundary).
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Specification(#[from] SpecificationError),

    #[error("could not parse as either JSON or YAML")]
    UnrecognizedFormat,
}

/// Input text encoding, auto-detected from a file extension (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_extension(path: &Path) -> Option<Format> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Format::Json),
            Some("yml") | Some("yaml") => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// The on-disk specification shape (§6): loose criteria plus named groups,
/// decoded before being handed to [`Specification::new`] for validation.
#[derive(Debug, Deserialize)]
struct RawSpecification {
    id: String,
    #[serde(default)]
    criteria: Vec<QueryCriterion>,
    #[serde(default)]
    groups: Vec<CompositeCriterion>,
}

/// Parse `text` as a [`Value`] document, using `format_hint` when known and
/// otherwise trying JSON then falling back to YAML.
pub fn parse_document(text: &str, format_hint: Option<Format>) -> Result<Value, ParsingError> {
    match format_hint {
        Some(Format::Json) => Ok(serde_json::from_str(text)?),
        Some(Format::Yaml) => Ok(serde_yaml::from_str(text)?),
        None => serde_json::from_str(text)
            .map_err(ParsingError::from)
            .or_else(|_| serde_yaml::from_str(text).map_err(ParsingError::from)),
    }
}

/// Parse `text` as a [`Specification`], decoding the raw on-disk shape and
/// then validating it (§3).
pub fn parse_specification(text: &str, format_hint: Option<Format>) -> Result<Specification, ParsingError> {
    let raw: RawSpecification = match format_hint {
        Some(Format::Json) => serde_json::from_str(text)?,
        Some(Format::Yaml) => serde_yaml::from_str(text)?,
        None => serde_json::from_str(text)
            .or_else(|_| serde_yaml::from_str(text).map_err(ParsingError::from))?,
    };

    let mut declarations: Vec<Declaration> = Vec::with_capacity(raw.criteria.len() + raw.groups.len());
    declarations.extend(raw.criteria.into_iter().map(Declaration::Query));
    declarations.extend(raw.groups.into_iter().map(Declaration::Composite));

    Ok(Specification::new(raw.id, declarations)?)
}

/// Load and parse a document from `path`, auto-detecting format from the
/// extension and falling back to try-JSON-then-YAML when unrecognized.
pub fn load_document_from_path(path: &Path) -> Result<Value, ParsingError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParsingError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&text, Format::from_extension(path))
}

/// Load and parse a specification from `path`, same format-detection rule
/// as [`load_document_from_path`].
pub fn load_specification_from_path(path: &Path) -> Result<Specification, ParsingError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParsingError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_specification(&text, Format::from_extension(path))
}
