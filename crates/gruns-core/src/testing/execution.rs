use async_trait::async_trait;

use crate::{
    api::{ApiError, ApiResult, ExecutionJobApi, Page},
    error::Operation,
    resource::ExecutionJob,
    testing::{Call, store::Store},
};

/// In-memory [`ExecutionJobApi`] that records every call.
pub struct InMemoryExecutionJobs {
    store: Store<ExecutionJob>,
}

impl Default for InMemoryExecutionJobs {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryExecutionJobs {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
        }
    }

    /// Limit list pages to `size` items.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.store.set_page_size(size);
        self
    }

    /// Seed a job without recording a call. `job.name` must be the full name.
    pub fn insert(&self, job: ExecutionJob) {
        self.store.insert(job.name.clone(), job);
    }

    /// Make the next call of kind `op` fail with `err`.
    pub fn fail_next(&self, op: Operation, err: ApiError) {
        self.store.fail_next(op, err);
    }

    pub fn get(&self, name: &str) -> Option<ExecutionJob> {
        self.store.get(name).ok()
    }

    pub fn names(&self) -> Vec<String> {
        self.store.names()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.calls()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    pub fn clear_calls(&self) {
        self.store.clear_calls();
    }
}

#[async_trait]
impl ExecutionJobApi for InMemoryExecutionJobs {
    async fn get_job(&self, name: &str) -> ApiResult<ExecutionJob> {
        self.store.enter(Operation::Get, name)?;
        self.store.get(name)
    }

    async fn create_job(
        &self,
        parent: &str,
        job_id: &str,
        job: &ExecutionJob,
    ) -> ApiResult<ExecutionJob> {
        let name = format!("{parent}/jobs/{job_id}");
        self.store.enter(Operation::Create, &name)?;
        let mut job = job.clone();
        job.name = name.clone();
        self.store.create(&name, job)
    }

    async fn update_job(&self, job: &ExecutionJob) -> ApiResult<()> {
        self.store.enter(Operation::Update, &job.name)?;
        self.store.replace(&job.name, job.clone()).map(|_| ())
    }

    async fn delete_job(&self, name: &str) -> ApiResult<()> {
        self.store.enter(Operation::Delete, name)?;
        self.store.remove(name)
    }

    async fn list_jobs(
        &self,
        parent: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Page<ExecutionJob>> {
        self.store.enter(Operation::List, parent)?;
        self.store.list(parent, page_token)
    }
}
