use thiserror::Error;

use crate::models::JobId;

/// Scoring configuration that must be rejected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("weight '{name}' must be a finite value in [0, 1], got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("{group} weights must sum to 1.0, got {sum:.6}")]
    WeightSum { group: &'static str, sum: f64 },

    #[error("thresholds must satisfy 0 < borderline < top < 1, got top={top}, borderline={borderline}")]
    InvalidThresholds { top: f64, borderline: f64 },

    #[error("fraud penalty multiplier must be in (0, 1), got {0}")]
    InvalidFraudPenalty(f64),

    #[error("analyzer setting '{name}' is out of range: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    #[error("environment variable '{key}' is invalid: {reason}")]
    InvalidEnv { key: &'static str, reason: String },

    #[error("failed to read scoring config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures talking to the job profile service.
/// Callers recover from these locally; they never reach a candidate's score.
#[derive(Debug, Error)]
pub enum JobProfileError {
    #[error("job {0} not found")]
    NotFound(JobId),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job profile service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("job profile service unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

/// Application-level error type for the CLI edge.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Job profile error: {0}")]
    JobProfile(#[from] JobProfileError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scoring worker failed: {0}")]
    Worker(String),
}
