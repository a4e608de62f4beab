//! cogspec CLI - plan assessment content and verify generated batches.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cogspec_core::{AssessmentTargets, GeneratedProblem};
use cogspec_estimation::{ContentSpecification, Planner, SpecificationRequest};
use cogspec_quality::{BatchConfig, BatchValidator};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cogspec")]
#[command(about = "Cognitive-level content planning and batch verification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Turn a specification request into a content specification
    Plan {
        /// Request JSON file
        request: PathBuf,
        /// Tolerance of the post-estimation sum check
        #[arg(long)]
        sum_tolerance: Option<f64>,
    },
    /// Verify a generated batch against its targets
    Verify {
        /// Batch JSON file: `{ "problems": [...], "targets": {...} }`,
        /// or a bare problem array when `--spec` is given
        batch: PathBuf,
        /// Content specification produced by `plan`; supplies the targets
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Batch validation config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Accepted batch file shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
    WithTargets {
        problems: Vec<GeneratedProblem>,
        targets: AssessmentTargets,
    },
    Bare(Vec<GeneratedProblem>),
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { request, sum_tolerance } => {
            let request: SpecificationRequest = read_json(&request)?;
            let mut planner = Planner::default();
            if let Some(tolerance) = sum_tolerance {
                planner = planner.with_sum_tolerance(tolerance);
            }

            let spec = planner.plan(&request)?;
            println!("{}", serde_json::to_string_pretty(&spec)?);

            if !spec.sum_check.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Verify { batch, spec, config } => {
            let (problems, targets) = load_batch(&batch, spec.as_deref())?;
            let config = match config {
                Some(path) => read_json(&path)?,
                None => BatchConfig::default(),
            };
            debug!("Batch config: {:?}", config);

            let result = BatchValidator::new()
                .with_config(config)
                .validate(&problems, &targets);
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.valid {
                info!("Batch rejected with {} error(s)", result.error_count());
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_batch(
    batch: &Path,
    spec: Option<&Path>,
) -> Result<(Vec<GeneratedProblem>, AssessmentTargets)> {
    let file: BatchFile = read_json(batch)?;
    let spec_targets = match spec {
        Some(path) => Some(read_json::<ContentSpecification>(path)?.targets()),
        None => None,
    };
    resolve_batch(file, spec_targets)
}

/// Targets from `--spec` take precedence over targets embedded in the batch.
fn resolve_batch(
    file: BatchFile,
    spec_targets: Option<AssessmentTargets>,
) -> Result<(Vec<GeneratedProblem>, AssessmentTargets)> {
    match (file, spec_targets) {
        (BatchFile::WithTargets { problems, .. }, Some(targets)) => Ok((problems, targets)),
        (BatchFile::WithTargets { problems, targets }, None) => Ok((problems, targets)),
        (BatchFile::Bare(problems), Some(targets)) => Ok((problems, targets)),
        (BatchFile::Bare(_), None) => {
            anyhow::bail!("batch file has no targets; pass --spec with a content specification")
        }
    }
}
