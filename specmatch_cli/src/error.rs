//! CLI-level error taxonomy (§7): wraps the core's parsing errors with the
//! peripheral failures only the binary can produce (bad output format, I/O on
//! the write side of `--json`/`--yaml` rendering).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load {what}: {source}")]
    Load {
        what: &'static str,
        #[source]
        source: specmatch_core::parsing::ParsingError,
    },

    #[error("failed to render output: {0}")]
    Render(#[from] crate::formatters::RenderError),
}

