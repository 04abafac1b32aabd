use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::JobProfileError;
use crate::job_profile::JobProfileSource;
use crate::models::{JobId, JobRequirements};

/// Memoizes successful lookups per job id. Failures are not cached, so a
/// later call retries the inner source.
pub struct CachedJobProfiles {
    inner: Arc<dyn JobProfileSource>,
    cache: RwLock<HashMap<JobId, JobRequirements>>,
}

impl CachedJobProfiles {
    pub fn new(inner: Arc<dyn JobProfileSource>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached_jobs(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl JobProfileSource for CachedJobProfiles {
    async fn get_requirements(&self, job_id: JobId) -> Result<JobRequirements, JobProfileError> {
        let hit = self.cache.read().await.get(&job_id).cloned();
        if let Some(hit) = hit {
            return Ok(hit);
        }

        let requirements = self.inner.get_requirements(job_id).await?;
        debug!(job_id, "Caching job requirements");
        self.cache
            .write()
            .await
            .entry(job_id)
            .or_insert_with(|| requirements.clone());
        Ok(requirements)
    }
}
