use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Config, ValidatedConfig};
use crate::errors::AppError;
use crate::job_profile::{CachedJobProfiles, HttpJobProfileClient, InMemoryJobProfiles, JobProfileSource};
use crate::models::{CandidateProfile, ChatTranscript, JobId};
use crate::scoring::{compute_score, score_batch, ScoreRequest};
use crate::signals::compute_signals;
use crate::state::ScoringContext;

#[derive(Parser, Debug)]
#[command(
    name = "fitscore",
    about = "Score interview candidates against job requirements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a batch of candidates concurrently
    Score(ScoreArgs),
    /// Score a single candidate against one job
    ScoreCandidate(ScoreCandidateArgs),
    /// Print the extracted signals for a single candidate
    Signals(SignalsArgs),
    /// Validate the scoring configuration and exit
    CheckConfig,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON array of score requests
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// JSON object of job requirements keyed by job id; defaults to the job profile service
    #[arg(long)]
    pub(crate) jobs: Option<PathBuf>,
    /// Write the report here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Override the configured worker limit
    #[arg(long)]
    pub(crate) workers: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreCandidateArgs {
    /// JSON object with `profile` and `transcript`
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[arg(long)]
    pub(crate) job_id: JobId,
    /// JSON object of job requirements keyed by job id; defaults to the job profile service
    #[arg(long)]
    pub(crate) jobs: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SignalsArgs {
    /// JSON object with `profile` and `transcript`
    #[arg(long)]
    pub(crate) input: PathBuf,
}

/// One candidate's profile and transcript.
#[derive(Debug, Deserialize)]
struct CandidateInput {
    #[serde(default)]
    profile: CandidateProfile,
    #[serde(default)]
    transcript: ChatTranscript,
}

pub(crate) async fn run(config: Config) -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Score(args) => run_score(args, &config).await,
        Command::ScoreCandidate(args) => run_score_candidate(args, &config).await,
        Command::Signals(args) => run_signals(args, &config),
        Command::CheckConfig => run_check_config(&config),
    }
}

async fn run_score(args: ScoreArgs, config: &Config) -> Result<(), AppError> {
    let scoring = load_scoring(config)?;
    let source = build_job_source(config, args.jobs.as_deref())?;
    let cached = Arc::new(CachedJobProfiles::new(source));
    let workers = args.workers.unwrap_or(config.workers);
    let ctx = ScoringContext::new(scoring, cached.clone(), workers);

    let requests: Vec<ScoreRequest> = read_json(&args.input)?;
    let report = score_batch(requests, &ctx).await?;
    debug!(jobs = cached.cached_jobs().await, "Job requirements fetched");

    write_json(&report, args.output.as_deref())
}

async fn run_score_candidate(args: ScoreCandidateArgs, config: &Config) -> Result<(), AppError> {
    let scoring = load_scoring(config)?;
    let source = build_job_source(config, args.jobs.as_deref())?;
    let ctx = ScoringContext::new(scoring, source, 1);

    let input = read_candidate(&args.input)?;
    let score = compute_score(&input.profile, &input.transcript, args.job_id, &ctx).await?;
    write_json(&score, None)
}

fn run_signals(args: SignalsArgs, config: &Config) -> Result<(), AppError> {
    let scoring = load_scoring(config)?;
    let input = read_candidate(&args.input)?;
    let signals = compute_signals(&input.profile, &input.transcript, &scoring);
    write_json(&signals, None)
}

fn run_check_config(config: &Config) -> Result<(), AppError> {
    let scoring = load_scoring(config)?;
    info!("Scoring configuration is valid");
    write_json(&*scoring, None)
}

fn load_scoring(config: &Config) -> Result<ValidatedConfig, AppError> {
    let scoring = config.load_scoring_config()?;
    let w = &scoring.weights;
    info!(
        role_fit = w.role_fit,
        depth = w.depth,
        motivation = w.motivation,
        reliability = w.reliability,
        confidence = w.confidence,
        top = scoring.thresholds.top,
        borderline = scoring.thresholds.borderline,
        fraud_penalty = scoring.fraud_penalty_multiplier,
        "Loaded scoring configuration"
    );
    Ok(scoring)
}

/// Jobs file when given, else the HTTP service, else nothing (every lookup
/// misses and role fit uses the skill-count fallback).
fn build_job_source(config: &Config, jobs: Option<&Path>) -> Result<Arc<dyn JobProfileSource>, AppError> {
    if let Some(path) = jobs {
        let source = InMemoryJobProfiles::from_file(path)?;
        info!("Loaded {} job profiles from {}", source.len(), path.display());
        return Ok(Arc::new(source));
    }

    if let Some(url) = &config.job_profile_url {
        let timeout = Duration::from_secs(config.job_profile_timeout_secs);
        info!("Using job profile service at {url}");
        return Ok(Arc::new(HttpJobProfileClient::new(url.as_str(), timeout)?));
    }

    warn!("No jobs file or JOB_PROFILE_URL; role fit will use the skill-count fallback");
    Ok(Arc::new(InMemoryJobProfiles::default()))
}

fn read_candidate(path: &Path) -> Result<CandidateInput, AppError> {
    let input: CandidateInput = read_json(path)?;
    if input.transcript.is_empty() {
        warn!("Transcript is empty; signals fall back to their defaults");
    }
    Ok(input)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn config_without_service() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn test_cli_parses_score_command() {
        let cli = Cli::try_parse_from([
            "fitscore", "score", "--input", "batch.json", "--jobs", "jobs.json", "--workers", "4",
        ])
        .unwrap();
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.input, PathBuf::from("batch.json"));
                assert_eq!(args.jobs, Some(PathBuf::from("jobs.json")));
                assert_eq!(args.workers, Some(4));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_score_candidate() {
        let cli = Cli::try_parse_from([
            "fitscore", "score-candidate", "--input", "cand.json", "--job-id", "42",
        ])
        .unwrap();
        match cli.command {
            Command::ScoreCandidate(args) => {
                assert_eq!(args.input, PathBuf::from("cand.json"));
                assert_eq!(args.job_id, 42);
                assert!(args.jobs.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_check_config() {
        let cli = Cli::try_parse_from(["fitscore", "check-config"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig));
    }

    #[tokio::test]
    async fn test_score_command_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.json");
        let jobs = dir.path().join("jobs.json");
        let output = dir.path().join("report.json");

        std::fs::File::create(&input)
            .unwrap()
            .write_all(
                br#"[{"candidate_id": "c1", "job_id": 5,
                      "profile": {"skills": ["rust"]},
                      "transcript": [{"role": "candidate", "content": "I build services in Rust.", "sequence_index": 0}]}]"#,
            )
            .unwrap();
        std::fs::write(&jobs, r#"{"5": {"mandatory_skills": ["rust"]}}"#).unwrap();

        let args = ScoreArgs {
            input,
            jobs: Some(jobs),
            output: Some(output.clone()),
            workers: Some(1),
        };
        run_score(args, &config_without_service()).await.unwrap();

        let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(report["summary"]["total"], 1);
        assert_eq!(report["outcomes"][0]["candidate_id"], "c1");
        assert_eq!(
            report["outcomes"][0]["score"]["breakdown"]["role_fit_detail"]["matched_mandatory"][0],
            "rust"
        );
    }

    #[tokio::test]
    async fn test_score_candidate_command_scores_against_jobs_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cand.json");
        let jobs = dir.path().join("jobs.json");
        std::fs::write(&input, r#"{"profile": {"skills": ["rust"]}, "transcript": []}"#).unwrap();
        std::fs::write(&jobs, r#"{"7": {"mandatory_skills": ["rust"]}}"#).unwrap();

        let args = ScoreCandidateArgs {
            input,
            job_id: 7,
            jobs: Some(jobs),
        };
        run_score_candidate(args, &config_without_service()).await.unwrap();
    }

    #[test]
    fn test_candidate_input_accepts_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cand.json");
        std::fs::write(&path, r#"{"profile": {"skills": ["go"]}}"#).unwrap();

        let input = read_candidate(&path).unwrap();
        assert!(input.transcript.is_empty());
        assert!(input.profile.skills.contains("go"));
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let err = read_json::<Vec<ScoreRequest>>(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
