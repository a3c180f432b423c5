//! Seams to the two remote APIs the reconcilers drive.
//!
//! Concrete clients (REST, in-memory) implement these traits and are injected into
//! [`crate::Reconciler`]. Every call is awaited before the next one is issued.
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::resource::{ExecutionJob, TriggerJob};

/// Page size requested when listing remote resources.
pub const LIST_PAGE_SIZE: u32 = 500;

/// Classified failure of a remote call.
///
/// Only [`ApiError::NotFound`] is treated as absence by the get-or-create paths; the other two
/// variants always propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("transient remote failure: {0}")]
    Transient(String),

    #[error("remote call failed: {0}")]
    Other(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transient(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// One page of a list call.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token for the next page; `None` on the last page.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }
}

/// Batch-execution job API (Cloud Run jobs).
///
/// Resource names are fully qualified: `projects/<p>/locations/<r>/jobs/<id>`.
#[async_trait]
pub trait ExecutionJobApi: Send + Sync {
    async fn get_job(&self, name: &str) -> ApiResult<ExecutionJob>;

    /// Create `job` under `parent` with id `job_id` and wait for the operation to finish.
    async fn create_job(
        &self,
        parent: &str,
        job_id: &str,
        job: &ExecutionJob,
    ) -> ApiResult<ExecutionJob>;

    /// Replace the remote job with `job`. `job.name` addresses the resource.
    async fn update_job(&self, job: &ExecutionJob) -> ApiResult<()>;

    /// Delete the job and wait for the operation to finish.
    async fn delete_job(&self, name: &str) -> ApiResult<()>;

    async fn list_jobs(&self, parent: &str, page_token: Option<&str>)
    -> ApiResult<Page<ExecutionJob>>;
}

/// Scheduled trigger API (Cloud Scheduler jobs).
#[async_trait]
pub trait TriggerApi: Send + Sync {
    async fn get_trigger(&self, name: &str) -> ApiResult<TriggerJob>;

    /// Create `trigger` under `parent`; `trigger.name` carries the full resource name.
    async fn create_trigger(&self, parent: &str, trigger: &TriggerJob) -> ApiResult<TriggerJob>;

    async fn update_trigger(&self, trigger: &TriggerJob) -> ApiResult<TriggerJob>;

    async fn delete_trigger(&self, name: &str) -> ApiResult<()>;

    async fn list_triggers(
        &self,
        parent: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Page<TriggerJob>>;

    async fn pause_trigger(&self, name: &str) -> ApiResult<TriggerJob>;

    async fn resume_trigger(&self, name: &str) -> ApiResult<TriggerJob>;
}

/// Shared handle to an execution-job client.
pub type ExecutionJobHandle = Arc<dyn ExecutionJobApi>;

/// Shared handle to a trigger client.
pub type TriggerHandle = Arc<dyn TriggerApi>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        assert!(ApiError::NotFound("x".into()).is_not_found());
        assert!(!ApiError::Transient("x".into()).is_not_found());
        assert!(ApiError::Transient("x".into()).is_transient());
        assert!(!ApiError::Other("x".into()).is_transient());
    }
}
