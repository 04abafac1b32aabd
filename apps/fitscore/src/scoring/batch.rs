//! Concurrent batch scoring.
//!
//! Each request becomes one tokio task holding a semaphore permit, so at most
//! `workers` candidates are in flight. Each task goes through
//! `compute_assessment`, the same path as single-candidate scoring.
//! Candidates share nothing but the read-only context, and results come back
//! in input order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CandidateProfile, CandidateScore, CandidateSignals, ChatTranscript, FitBucket, JobId};
use crate::scoring::compute_assessment;
use crate::state::ScoringContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub candidate_id: String,
    pub job_id: JobId,
    #[serde(default)]
    pub profile: CandidateProfile,
    #[serde(default)]
    pub transcript: ChatTranscript,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub candidate_id: String,
    pub job_id: JobId,
    pub signals: CandidateSignals,
    pub score: CandidateScore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub top: usize,
    pub borderline: usize,
    pub low: usize,
    /// Candidates whose score carries the fraud penalty.
    pub flagged: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &ScoreOutcome) {
        self.total += 1;
        match outcome.score.fit_bucket {
            FitBucket::Top => self.top += 1,
            FitBucket::Borderline => self.borderline += 1,
            FitBucket::Low => self.low += 1,
        }
        if outcome.signals.credibility_flag {
            self.flagged += 1;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub outcomes: Vec<ScoreOutcome>,
    pub summary: BatchSummary,
}

pub async fn score_batch(requests: Vec<ScoreRequest>, ctx: &ScoringContext) -> Result<BatchReport, AppError> {
    let batch_id = Uuid::new_v4();
    let total = requests.len();
    info!(%batch_id, total, workers = ctx.workers, "Scoring batch");

    let permits = Arc::new(Semaphore::new(ctx.workers));
    let mut tasks = JoinSet::new();

    for (index, request) in requests.into_iter().enumerate() {
        let permits = permits.clone();
        let ctx = ctx.clone();
        tasks.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AppError::Worker(e.to_string()))?;
            let outcome = score_one(request, &ctx).await?;
            Ok::<_, AppError>((index, outcome))
        });
    }

    let mut slots: Vec<Option<ScoreOutcome>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined.map_err(|e| AppError::Worker(format!("scoring task failed: {e}")))??;
        slots[index] = Some(outcome);
    }

    let outcomes: Vec<ScoreOutcome> = slots.into_iter().flatten().collect();
    let mut summary = BatchSummary::default();
    for outcome in &outcomes {
        summary.record(outcome);
    }

    info!(
        %batch_id,
        total = summary.total,
        top = summary.top,
        borderline = summary.borderline,
        low = summary.low,
        flagged = summary.flagged,
        "Batch scored"
    );

    Ok(BatchReport {
        batch_id,
        outcomes,
        summary,
    })
}

async fn score_one(request: ScoreRequest, ctx: &ScoringContext) -> Result<ScoreOutcome, AppError> {
    let ScoreRequest {
        candidate_id,
        job_id,
        profile,
        transcript,
    } = request;
    let assessment = compute_assessment(profile, transcript, job_id, ctx).await?;
    Ok(ScoreOutcome {
        candidate_id,
        job_id,
        signals: assessment.signals,
        score: assessment.score,
    })
}
