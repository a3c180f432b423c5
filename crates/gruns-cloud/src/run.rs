use std::time::Duration;

use async_trait::async_trait;
use gruns_core::{
    api::{ApiResult, ExecutionJobApi, LIST_PAGE_SIZE, Page},
    resource::ExecutionJob,
};
use serde::Deserialize;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::{CloudError, LongRunningOperation, RestClient, TokenHandle};

pub const RUN_ENDPOINT: &str = "https://run.googleapis.com/v2";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListJobsResponse {
    #[serde(default)]
    jobs: Vec<ExecutionJob>,
    #[serde(default)]
    next_page_token: String,
}

/// Cloud Run Admin API v2 jobs client.
///
/// Create and delete wait for their long-running operation; update returns as soon as the
/// request is accepted.
#[derive(Clone)]
pub struct CloudRunJobs {
    rest: RestClient,
    poll_interval: Duration,
    operation_timeout: Duration,
}

impl CloudRunJobs {
    pub fn new(token: TokenHandle) -> Result<Self, CloudError> {
        Self::with_endpoint(RUN_ENDPOINT, token)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, token: TokenHandle) -> Result<Self, CloudError> {
        Ok(Self {
            rest: RestClient::new(endpoint, token)?,
            poll_interval: DEFAULT_POLL_INTERVAL,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Poll `op` until it is done.
    async fn wait(&self, mut op: LongRunningOperation) -> Result<LongRunningOperation, CloudError> {
        let deadline = Instant::now() + self.operation_timeout;
        while !op.done {
            if Instant::now() >= deadline {
                return Err(CloudError::OperationTimeout(op.name));
            }
            sleep(self.poll_interval).await;
            debug!(operation = %op.name, "polling operation");
            op = self.rest.get(&op.name, &[]).await?;
        }
        Ok(op)
    }
}

#[async_trait]
impl ExecutionJobApi for CloudRunJobs {
    async fn get_job(&self, name: &str) -> ApiResult<ExecutionJob> {
        Ok(self.rest.get(name, &[]).await?)
    }

    async fn create_job(
        &self,
        parent: &str,
        job_id: &str,
        job: &ExecutionJob,
    ) -> ApiResult<ExecutionJob> {
        let op: LongRunningOperation = self
            .rest
            .post(
                &format!("{parent}/jobs"),
                &[("jobId", job_id.to_string())],
                job,
            )
            .await?;
        let done = self.wait(op).await?;
        match done.into_result::<ExecutionJob>()? {
            Some(created) => Ok(created),
            None => self.get_job(&format!("{parent}/jobs/{job_id}")).await,
        }
    }

    async fn update_job(&self, job: &ExecutionJob) -> ApiResult<()> {
        let _: LongRunningOperation = self.rest.patch(&job.name, job).await?;
        Ok(())
    }

    async fn delete_job(&self, name: &str) -> ApiResult<()> {
        let op: LongRunningOperation = self.rest.delete(name).await?;
        self.wait(op).await?.into_result::<serde_json::Value>()?;
        Ok(())
    }

    async fn list_jobs(
        &self,
        parent: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Page<ExecutionJob>> {
        let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        let page: ListJobsResponse = self.rest.get(&format!("{parent}/jobs"), &query).await?;
        Ok(Page {
            items: page.jobs,
            next_page_token: Some(page.next_page_token).filter(|t| !t.is_empty()),
        })
    }
}
