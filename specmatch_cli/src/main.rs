//! Command-line front end for the specmatch document-matching engine (§6).
//!
//! `specmatch <spec-file> <doc-file> [--json|--yaml|--text|--summary] [--verbose]`
//! loads a specification and a document, evaluates the document against the
//! specification, renders the outcome in the requested format, and exits
//! `0` iff every top-level result is MATCHED (§6, §7).

mod error;
mod formatters;

use clap::Parser;
use error::CliError;
use formatters::OutputFormat;
use specmatch_core::parsing;
use std::path::PathBuf;
use std::process::ExitCode;

/// Evaluate a document against a declarative matching specification.
#[derive(Debug, Parser)]
#[command(name = "specmatch", version, about)]
struct Cli {
    /// Path to the specification file (JSON or YAML).
    spec_file: PathBuf,

    /// Path to the document file to evaluate (JSON or YAML).
    doc_file: PathBuf,

    /// Render the outcome as JSON.
    #[arg(long, conflicts_with_all = ["yaml", "text", "summary"])]
    json: bool,

    /// Render the outcome as YAML.
    #[arg(long, conflicts_with_all = ["json", "text", "summary"])]
    yaml: bool,

    /// Render the outcome as an indented result tree (default).
    #[arg(long, conflicts_with_all = ["json", "yaml", "summary"])]
    text: bool,

    /// Render a single summary line.
    #[arg(long, conflicts_with_all = ["json", "yaml", "text"])]
    summary: bool,

    /// Emit debug-level logging and missing-data paths in `--text` output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.yaml {
            OutputFormat::Yaml
        } else if self.summary {
            OutputFormat::Summary
        } else {
            OutputFormat::Text
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(matched) => {
            if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

/// Load, evaluate, and render. Returns whether every top-level result
/// MATCHED, which drives the process exit code (§6).
fn run(cli: &Cli) -> Result<bool, CliError> {
    log::debug!("loading specification from {}", cli.spec_file.display());
    let specification = parsing::load_specification_from_path(&cli.spec_file).map_err(|source| CliError::Load {
        what: "specification",
        source,
    })?;

    log::debug!("loading document from {}", cli.doc_file.display());
    let document = parsing::load_document_from_path(&cli.doc_file).map_err(|source| CliError::Load {
        what: "document",
        source,
    })?;

    let registry = specmatch_core::OperatorRegistry::with_defaults();
    log::debug!("evaluating specification '{}' ({} declarations)", specification.id(), specification.len());
    let outcome = specmatch_core::evaluate(&document, &specification, &registry);

    let rendered = formatters::render(&outcome, cli.output_format(), cli.verbose)?;
    println!("{rendered}");

    Ok(outcome.all_top_level_matched())
}
