//! HTTP client for the job profile service.
//!
//! Fetches a job posting and its skill list, then derives `JobRequirements`
//! locally. Retries transport errors, 429 and 5xx with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::JobProfileError;
use crate::job_profile::analysis::{derive_requirements, JobPosting, JobSkill};
use crate::job_profile::JobProfileSource;
use crate::models::{JobId, JobRequirements};

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 1000;

#[derive(Clone)]
pub struct HttpJobProfileClient {
    client: Client,
    base_url: String,
    backoff: Duration,
}

impl HttpJobProfileClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, JobProfileError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            backoff: Duration::from_millis(BASE_BACKOFF_MS),
        })
    }

    /// Overrides the first backoff step; later steps double it.
    #[cfg(test)]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn posting_url(&self, job_id: JobId) -> String {
        format!("{}/jobs/{}", self.base_url, job_id)
    }

    fn skills_url(&self, job_id: JobId) -> String {
        format!("{}/jobs/{}/skills", self.base_url, job_id)
    }

    /// GETs `url` and decodes the JSON body. 404 maps to `NotFound(job_id)`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, job_id: JobId) -> Result<T, JobProfileError> {
        let mut last_error: Option<JobProfileError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff between attempts: 1s, then 2s
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "Job profile request attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(url).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(JobProfileError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Err(JobProfileError::NotFound(job_id));
            }

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Job profile service returned {}: {}", status, body);
                last_error = Some(JobProfileError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(JobProfileError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            return Ok(response.json::<T>().await?);
        }

        Err(last_error.unwrap_or(JobProfileError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl JobProfileSource for HttpJobProfileClient {
    async fn get_requirements(&self, job_id: JobId) -> Result<JobRequirements, JobProfileError> {
        let posting: JobPosting = self.get_json(&self.posting_url(job_id), job_id).await?;

        // A posting without a skills listing is still scoreable.
        let skills: Vec<JobSkill> = match self.get_json(&self.skills_url(job_id), job_id).await {
            Ok(skills) => skills,
            Err(JobProfileError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        let requirements = derive_requirements(&posting, &skills);
        debug!(
            job_id,
            mandatory = requirements.mandatory_skills.len(),
            preferred = requirements.preferred_skills.len(),
            level = requirements.role_level.as_str(),
            "Fetched job requirements"
        );
        Ok(requirements)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::models::RoleLevel;

    /// Serves canned responses, one per connection, in order. Returns the base URL
    /// and a counter of requests served.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let served = Arc::new(AtomicUsize::new(0));
        let counter = served.clone();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                counter.fetch_add(1, Ordering::SeqCst);
                let reply = format!(
                    "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{addr}"), served)
    }

    fn client(base: &str) -> HttpJobProfileClient {
        HttpJobProfileClient::new(base, Duration::from_secs(5))
            .unwrap()
            .with_backoff(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_requirements_derived_from_posting_and_skills() {
        let (base, _) = serve(vec![
            (200, r#"{"title": "Senior Data Engineer", "description": "Big data analytics on cloud infrastructure"}"#),
            (200, r#"[{"name": "Python", "mandatory": true}, {"name": "Spark", "mandatory": false}]"#),
        ])
        .await;

        let requirements = client(&base).get_requirements(9).await.unwrap();
        assert!(requirements.mandatory_skills.contains("python"));
        assert!(requirements.preferred_skills.contains("spark"));
        assert_eq!(requirements.role_level, RoleLevel::Senior);
        assert_eq!(requirements.technical_focus, vec!["Data Science", "Devops"]);
    }

    #[tokio::test]
    async fn test_missing_posting_is_not_found() {
        let (base, _) = serve(vec![(404, "{}")]).await;
        let err = client(&base).get_requirements(404).await.unwrap_err();
        assert!(matches!(err, JobProfileError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let (base, served) = serve(vec![
            (503, "busy"),
            (200, r#"{"title": "Engineer", "description": null}"#),
            (200, "[]"),
        ])
        .await;

        let requirements = client(&base).get_requirements(1).await.unwrap();
        assert!(requirements.is_empty());
        assert_eq!(served.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (base, _) = serve(vec![(500, "down"), (500, "down"), (500, "down")]).await;
        let err = client(&base).get_requirements(1).await.unwrap_err();
        assert!(matches!(err, JobProfileError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (base, _) = serve(vec![(400, "bad request")]).await;
        let err = client(&base).get_requirements(1).await.unwrap_err();
        assert!(matches!(err, JobProfileError::Api { status: 400, .. }));
    }
}
