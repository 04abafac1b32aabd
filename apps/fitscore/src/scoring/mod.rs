//! Composite scoring: signals plus role fit into a single auditable score.

pub mod batch;
pub mod composite;
pub mod role_fit;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ValidatedConfig;
use crate::errors::AppError;
use crate::job_profile::fetch_requirements;
use crate::models::{
    CandidateProfile, CandidateScore, CandidateSignals, ChatTranscript, JobId, JobRequirements,
    ScoreBreakdown,
};
use crate::signals::compute_signals;
use crate::state::ScoringContext;

pub use batch::{score_batch, ScoreRequest};
use composite::compose;

/// Signals and the score derived from them, for one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub signals: CandidateSignals,
    pub score: CandidateScore,
}

/// Scores a candidate against already-fetched requirements. Pure apart from
/// the `computed_at` timestamp.
pub fn assess(
    profile: &CandidateProfile,
    transcript: &ChatTranscript,
    requirements: &JobRequirements,
    config: &ValidatedConfig,
) -> Assessment {
    let signals = compute_signals(profile, transcript, config);
    let score = score_from_signals(&signals, profile, requirements, config);
    debug!(
        fit_score = score.fit_score,
        bucket = score.fit_bucket.as_str(),
        fraud = signals.credibility_flag,
        fallback_role_fit = score.breakdown.role_fit_detail.is_degenerate(),
        "Scored candidate"
    );
    Assessment { signals, score }
}

pub fn score_from_signals(
    signals: &CandidateSignals,
    profile: &CandidateProfile,
    requirements: &JobRequirements,
    config: &ValidatedConfig,
) -> CandidateScore {
    let role_fit_detail = role_fit::calculate_role_fit(
        profile,
        requirements,
        signals.depth_score,
        &config.analyzer,
    );
    let composite = compose(signals, role_fit_detail.role_fit, config);

    CandidateScore {
        fit_score: composite.fit_score,
        fit_bucket: composite.fit_bucket,
        computed_at: Utc::now(),
        breakdown: ScoreBreakdown {
            role_fit: role_fit_detail.role_fit,
            depth: signals.depth_score,
            motivation: signals.motivation_alignment,
            reliability: composite.reliability,
            confidence: signals.data_confidence,
            raw_score: composite.raw_score,
            confidence_multiplier: composite.confidence_multiplier,
            fraud_penalty_applied: composite.fraud_penalty_applied,
            role_fit_detail,
        },
    }
}

/// Fetches the job's requirements once, then runs the CPU-bound scoring
/// pass on the blocking pool. A failed lookup is logged and scored on the
/// skill-count fallback.
pub async fn compute_assessment(
    profile: CandidateProfile,
    transcript: ChatTranscript,
    job_id: JobId,
    ctx: &ScoringContext,
) -> Result<Assessment, AppError> {
    let requirements = fetch_requirements(ctx.job_profiles.as_ref(), job_id).await;
    let config = ctx.config.clone();

    // CPU-bound pass, kept off the async executor.
    tokio::task::spawn_blocking(move || assess(&profile, &transcript, &requirements, &config))
        .await
        .map_err(|e| AppError::Worker(format!("spawn_blocking failed while scoring: {e}")))
}

pub async fn compute_score(
    profile: &CandidateProfile,
    transcript: &ChatTranscript,
    job_id: JobId,
    ctx: &ScoringContext,
) -> Result<CandidateScore, AppError> {
    let assessment = compute_assessment(profile.clone(), transcript.clone(), job_id, ctx).await?;
    Ok(assessment.score)
}
