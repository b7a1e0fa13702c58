//! Decomposes a job description and, given a roster, plans assignments.
//!
//! Usage:
//!
//! ```text
//! gigboard_plan <job.json> [workers.json] [round-robin|best-match]
//! ```
//!
//! `job.json` holds a job brief:
//!
//! ```json
//! {
//!   "title": "Storefront rebuild",
//!   "requirements": ["Core payment module", "UI styling"],
//!   "budget": 1200.0,
//!   "skills": ["react"],
//!   "complexity": "medium"
//! }
//! ```
//!
//! `workers.json` holds an array of worker candidates
//! (`name`, `skills`, and optionally `role`, `available`, `rating`,
//! `completed_tasks`). Without a strategy argument the configured default
//! strategy is used. The result is printed to stdout as JSON.

use gigboard::config::{ConfigError, MarketplaceConfig};
use gigboard::job::domain::JobBrief;
use gigboard::planning::{AssignmentError, AssignmentStrategy, DecompositionError, JobDecomposer};
use gigboard::telemetry;
use gigboard::worker::domain::WorkerCandidate;
use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while planning.
#[derive(Debug, Error)]
enum PlanError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Decomposition(#[from] DecompositionError),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

/// Parsed command-line arguments.
#[derive(Debug, PartialEq, Eq)]
struct PlanArgs {
    job_path: PathBuf,
    roster_path: Option<PathBuf>,
    strategy: Option<String>,
}

fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing()?;
    let config = MarketplaceConfig::from_env()?;
    let args = parse_args(std::env::args().skip(1))?;

    let job_json = read(&args.job_path)?;
    let roster_json = args.roster_path.as_deref().map(read).transpose()?;
    let strategy = args
        .strategy
        .as_deref()
        .map(|name| config.strategy_named(name))
        .transpose()?
        .unwrap_or_else(|| config.default_strategy());

    let output = plan(&job_json, roster_json.as_deref(), &strategy)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<PlanArgs, PlanError> {
    let job_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| PlanError::InvalidArgs("missing job file".to_owned()))?;
    let roster_path = args.next().map(PathBuf::from);
    let strategy = args.next();
    if let Some(extra) = args.next() {
        return Err(PlanError::InvalidArgs(format!("unexpected argument '{extra}'")));
    }
    Ok(PlanArgs {
        job_path,
        roster_path,
        strategy,
    })
}

fn read(path: &Path) -> Result<String, PlanError> {
    std::fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Decomposes `job_json` and, when a roster is given, runs `strategy` over
/// the resulting tasks.
fn plan(
    job_json: &str,
    roster_json: Option<&str>,
    strategy: &AssignmentStrategy,
) -> Result<Value, PlanError> {
    let brief: JobBrief = serde_json::from_str(job_json).map_err(|source| PlanError::Parse {
        what: "job brief",
        source,
    })?;
    let budget_per_task = JobDecomposer::budget_per_task(&brief)?;
    let tasks = JobDecomposer::new().decompose(&brief)?;
    tracing::info!(title = %brief.title, tasks = tasks.len(), "job decomposed");

    let assignment = match roster_json {
        None => Value::Null,
        Some(raw) => {
            let roster: Vec<WorkerCandidate> =
                serde_json::from_str(raw).map_err(|source| PlanError::Parse {
                    what: "worker roster",
                    source,
                })?;
            let outcome = strategy.assign(&brief.skills, &tasks, &roster)?;
            tracing::info!(
                strategy = %strategy,
                assigned = outcome.assignments().len(),
                unassigned = outcome.unassigned().len(),
                "assignment planned"
            );
            json!({ "strategy": strategy.name(), "plan": outcome })
        }
    };

    Ok(json!({
        "budget_per_task": budget_per_task,
        "tasks": tasks,
        "assignment": assignment,
    }))
}
