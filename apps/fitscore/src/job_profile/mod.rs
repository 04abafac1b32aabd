//! Job profile collaborators: where `JobRequirements` come from.
//!
//! `ScoringContext` holds an `Arc<dyn JobProfileSource>`, chosen at startup:
//! an in-memory map loaded from a JSON file, or the HTTP job profile service,
//! either one wrapped in `CachedJobProfiles`.

pub mod analysis;
pub mod cache;
pub mod client;

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::{AppError, JobProfileError};
use crate::models::{JobId, JobRequirements};

pub use cache::CachedJobProfiles;
pub use client::HttpJobProfileClient;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Source of per-job requirements. Lookups are side-effect free and may be cached.
#[async_trait]
pub trait JobProfileSource: Send + Sync {
    async fn get_requirements(&self, job_id: JobId) -> Result<JobRequirements, JobProfileError>;
}

/// Looks up a job's requirements, degrading to empty requirements on any
/// failure so role fit falls back to its skill-count heuristic.
pub async fn fetch_requirements(source: &dyn JobProfileSource, job_id: JobId) -> JobRequirements {
    match source.get_requirements(job_id).await {
        Ok(requirements) => requirements,
        Err(JobProfileError::NotFound(_)) => {
            warn!(job_id, "Job not found; scoring role fit from skill count only");
            JobRequirements::default()
        }
        Err(e) => {
            warn!(job_id, error = %e, "Job requirements lookup failed; scoring role fit from skill count only");
            JobRequirements::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryJobProfiles
// ────────────────────────────────────────────────────────────────────────────

/// Fixed set of job requirements, keyed by job id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobProfiles {
    jobs: BTreeMap<JobId, JobRequirements>,
}

impl InMemoryJobProfiles {
    pub fn new(jobs: BTreeMap<JobId, JobRequirements>) -> Self {
        Self { jobs }
    }

    /// Reads a JSON object of `{"<job id>": JobRequirements}`.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let jobs: BTreeMap<JobId, JobRequirements> = serde_json::from_str(&raw)?;
        Ok(Self::new(jobs))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

#[async_trait]
impl JobProfileSource for InMemoryJobProfiles {
    async fn get_requirements(&self, job_id: JobId) -> Result<JobRequirements, JobProfileError> {
        self.jobs
            .get(&job_id)
            .cloned()
            .ok_or(JobProfileError::NotFound(job_id))
    }
}
