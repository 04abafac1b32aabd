use std::sync::Arc;

use crate::config::ValidatedConfig;
use crate::job_profile::JobProfileSource;

/// Everything a scoring call needs, shared read-only across batch workers.
#[derive(Clone)]
pub struct ScoringContext {
    pub config: Arc<ValidatedConfig>,
    /// Job requirements collaborator. In-memory or HTTP, usually cached.
    pub job_profiles: Arc<dyn JobProfileSource>,
    /// Upper bound on candidates scored concurrently in a batch.
    pub workers: usize,
}

impl ScoringContext {
    pub fn new(config: ValidatedConfig, job_profiles: Arc<dyn JobProfileSource>, workers: usize) -> Self {
        Self {
            config: Arc::new(config),
            job_profiles,
            workers: workers.max(1),
        }
    }
}
