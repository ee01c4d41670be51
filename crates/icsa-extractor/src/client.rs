use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::Instant;

use crate::error::ExtractError;
use crate::types::{ApiEnvelope, ExportJob, ExportRequest, PollSettings};

const USER_AGENT: &str = "icsa/0.1 (comment-sentiment)";

/// HTTP client for the comment-export service.
pub struct ExporterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    poll_timeout: Duration,
    poll_interval: Duration,
}

impl ExporterClient {
    /// Build a client for the service at `base_url`. A trailing slash on
    /// the base URL is tolerated. Requests carry bearer auth when an API
    /// key is provided.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Http` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        settings: PollSettings,
    ) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(ExporterClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            poll_timeout: Duration::from_secs(settings.poll_timeout_secs),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ExtractError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let envelope: ApiEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    /// Start an export run for `post_url`. Returns immediately with the run
    /// metadata; completion is observed via [`wait_for_export`].
    ///
    /// [`wait_for_export`]: ExporterClient::wait_for_export
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` on transport failures or non-success API
    /// responses.
    pub async fn start_export(&self, post_url: &str) -> Result<ExportJob, ExtractError> {
        let url = format!("{}/exports", self.base_url);
        let request = ExportRequest {
            post_url: post_url.to_string(),
            format: "csv".to_string(),
        };
        let response = self.authorize(self.http.post(&url)).json(&request).send().await?;
        let job: ExportJob = Self::read_json(response).await?;
        tracing::info!(job_id = %job.id, "export run started");
        Ok(job)
    }

    /// Poll the run until it reaches a terminal status, bounded by the poll
    /// deadline. Only `"completed"` succeeds; in-flight statuses (including
    /// `"partial"`) keep polling.
    ///
    /// # Errors
    ///
    /// Returns `JobFailed` for failed or cancelled runs and `Timeout` when
    /// the deadline passes first.
    pub async fn wait_for_export(&self, job_id: &str) -> Result<ExportJob, ExtractError> {
        let deadline = Instant::now() + self.poll_timeout;
        loop {
            let url = format!("{}/exports/{}", self.base_url, job_id);
            let response = self.authorize(self.http.get(&url)).send().await?;
            let job: ExportJob = Self::read_json(response).await?;

            match job.status.as_str() {
                "completed" => return Ok(job),
                "failed" | "cancelled" => {
                    return Err(ExtractError::JobFailed { status: job.status })
                }
                _ => {
                    tracing::debug!(job_id, status = %job.status, "export still in progress");
                }
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(ExtractError::Timeout {
                    secs: self.poll_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Download the completed run's file bytes from its first populated
    /// download link. Relative links resolve against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `MissingDownload` when the job carries no link, otherwise
    /// transport or API errors.
    pub async fn fetch_export(&self, job: &ExportJob) -> Result<Vec<u8>, ExtractError> {
        let link = job.download_link().ok_or(ExtractError::MissingDownload)?;
        let url = if link.starts_with("http") {
            link.to_string()
        } else {
            format!("{}{}", self.base_url, link)
        };

        let response = self.authorize(self.http.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        tracing::info!(job_id = %job.id, bytes = bytes.len(), "export file downloaded");
        Ok(bytes.to_vec())
    }
}
