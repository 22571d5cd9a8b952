//! Judge API client
//!
//! [`JudgeApi`] is the only seam through which the console reaches the judge.
//! Sessions hold it as `Arc<dyn JudgeApi>` so tests can swap in a mock.

pub mod envelope;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, de::DeserializeOwned};

use crate::config::JudgeApiConfig;
use crate::console::ResourceTarget;
use crate::error::{AppError, AppResult};
use crate::models::{
    NewSubmission, Problem, ProblemSummary, ResourceData, Submission, SubmissionSummary,
    SubmissionsFilter,
};

use envelope::ApiEnvelope;

/// Operations the console needs from the judge
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeApi: Send + Sync {
    async fn get_problem(&self, id: u64) -> AppResult<Problem>;

    /// Create a problem; the judge answers with the stored problem
    async fn create_problem(&self, problem: Problem) -> AppResult<Problem>;

    async fn modify_problem(&self, id: u64, problem: Problem) -> AppResult<()>;

    async fn list_problems(&self, count: u32, page: u32) -> AppResult<Vec<ProblemSummary>>;

    async fn get_submission(&self, id: u64) -> AppResult<Submission>;

    async fn list_submissions(
        &self,
        filter: SubmissionsFilter,
        default_count: u32,
    ) -> AppResult<Vec<SubmissionSummary>>;

    /// Send a solution for judging, returning the new submission id
    async fn submit(&self, submission: NewSubmission) -> AppResult<u64>;

    async fn fetch_resource(&self, target: ResourceTarget) -> AppResult<ResourceData>;

    /// Invoker and queue snapshot, passed through untouched
    async fn master_status(&self) -> AppResult<serde_json::Value>;

    async fn reset_invoker_cache(&self) -> AppResult<()>;
}

pub type SharedJudgeApi = Arc<dyn JudgeApi>;

/// New submission id, either bare or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubmissionId {
    Bare(u64),
    Wrapped {
        #[serde(alias = "ID", alias = "submission_id")]
        id: u64,
    },
}

impl From<SubmissionId> for u64 {
    fn from(value: SubmissionId) -> Self {
        match value {
            SubmissionId::Bare(id) | SubmissionId::Wrapped { id } => id,
        }
    }
}

/// reqwest-backed [`JudgeApi`]
#[derive(Debug, Clone)]
pub struct HttpJudgeClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJudgeClient {
    pub fn new(config: &JudgeApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the envelope whatever the status code
    ///
    /// The judge reports failures inside the envelope, so the body is parsed
    /// for non-2xx responses too.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> AppResult<ApiEnvelope<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%status, error = %e, "Unreadable judge API response");
            AppError::FetchFailed(format!("judge API returned {status}"))
        })
    }
}

#[async_trait]
impl JudgeApi for HttpJudgeClient {
    async fn get_problem(&self, id: u64) -> AppResult<Problem> {
        let request = self.client.get(self.url(&format!("/problem/{id}")));
        self.send(request).await?.into_result()
    }

    async fn create_problem(&self, problem: Problem) -> AppResult<Problem> {
        let request = self.client.put(self.url("/problem")).json(&problem);
        self.send(request).await?.into_result()
    }

    async fn modify_problem(&self, id: u64, problem: Problem) -> AppResult<()> {
        let request = self
            .client
            .post(self.url(&format!("/problem/{id}")))
            .json(&problem);
        self.send::<serde_json::Value>(request).await?.into_ack()
    }

    async fn list_problems(&self, count: u32, page: u32) -> AppResult<Vec<ProblemSummary>> {
        let request = self
            .client
            .get(self.url("/problems"))
            .query(&[("count", count), ("page", page)]);
        let problems = self.send(request).await?.into_optional()?;
        Ok(problems.unwrap_or_default())
    }

    async fn get_submission(&self, id: u64) -> AppResult<Submission> {
        let request = self.client.get(self.url(&format!("/submission/{id}")));
        self.send(request).await?.into_result()
    }

    async fn list_submissions(
        &self,
        filter: SubmissionsFilter,
        default_count: u32,
    ) -> AppResult<Vec<SubmissionSummary>> {
        let request = self
            .client
            .get(self.url("/submissions"))
            .query(&filter.query_pairs(default_count));
        let submissions = self.send(request).await?.into_optional()?;
        Ok(submissions.unwrap_or_default())
    }

    async fn submit(&self, submission: NewSubmission) -> AppResult<u64> {
        let NewSubmission {
            problem_id,
            language,
            filename,
            content,
        } = submission;

        let form = Form::new()
            .text("problem_id", problem_id.to_string())
            .text("language", language)
            .part("solution", Part::bytes(content).file_name(filename));

        let request = self.client.put(self.url("/submission")).multipart(form);
        let id: SubmissionId = self.send(request).await?.into_result()?;
        Ok(id.into())
    }

    async fn fetch_resource(&self, target: ResourceTarget) -> AppResult<ResourceData> {
        let path = target.path();
        tracing::debug!(%path, "Fetching resource");

        let request = self.client.get(self.url(&path));
        self.send(request).await?.into_result()
    }

    async fn master_status(&self) -> AppResult<serde_json::Value> {
        let request = self.client.get(self.url("/master_status"));
        self.send(request).await?.into_result()
    }

    async fn reset_invoker_cache(&self) -> AppResult<()> {
        let request = self.client.post(self.url("/reset/invoker_cache"));
        self.send::<serde_json::Value>(request).await?.into_ack()
    }
}
