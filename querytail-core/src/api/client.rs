use crate::api::error::{JobOp, TransportError};
use crate::api::types::{CreatedJob, JobHandle, Query, QueryResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header};
use url::Url;

/// Query-job control as the orchestrator consumes it.
///
/// Implementations report every failure as a [`TransportError`] and do not
/// retry; pacing is left to the caller.
#[async_trait]
pub trait QueryJobs: Send + Sync {
    async fn create(&self, repository: &str, query: &Query) -> Result<JobHandle, TransportError>;

    async fn poll(&self, job: &JobHandle) -> Result<QueryResult, TransportError>;

    async fn delete(&self, job: JobHandle) -> Result<(), TransportError>;
}

/// [`QueryJobs`] over the server's REST API.
#[derive(Debug, Clone)]
pub struct HttpQueryJobs {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl HttpQueryJobs {
    pub fn new(address: &str, token: Option<String>) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::Address {
            address: address.to_string(),
            reason,
        };

        let base = Url::parse(address).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("address cannot be a base URL".to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!("querytail/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            http,
            base,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// `{base}/api/v1/repositories/{repository}/queryjobs[/{id}]`
    pub(crate) fn jobs_url(&self, repository: &str, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base() was rejected in new(), so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "repositories", repository, "queryjobs"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, op: JobOp, req: RequestBuilder) -> Result<Response, TransportError> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| TransportError::request(op, e))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(TransportError::status(op, status.as_u16(), body.trim()))
    }
}

#[async_trait]
impl QueryJobs for HttpQueryJobs {
    async fn create(&self, repository: &str, query: &Query) -> Result<JobHandle, TransportError> {
        let url = self.jobs_url(repository, None);
        let resp = self
            .send(JobOp::Create, self.http.post(url).json(query))
            .await?;

        let created: CreatedJob = resp
            .json()
            .await
            .map_err(|e| TransportError::request(JobOp::Create, e))?;

        tracing::info!(repository, job_id = %created.id, "query job created");

        Ok(JobHandle {
            repository: repository.to_string(),
            id: created.id,
        })
    }

    async fn poll(&self, job: &JobHandle) -> Result<QueryResult, TransportError> {
        let url = self.jobs_url(&job.repository, Some(&job.id));
        let resp = self.send(JobOp::Poll, self.http.get(url)).await?;

        resp.json()
            .await
            .map_err(|e| TransportError::request(JobOp::Poll, e))
    }

    async fn delete(&self, job: JobHandle) -> Result<(), TransportError> {
        let url = self.jobs_url(&job.repository, Some(&job.id));
        self.send(JobOp::Delete, self.http.delete(url)).await?;

        tracing::debug!(repository = %job.repository, job_id = %job.id, "query job deleted");
        Ok(())
    }
}
