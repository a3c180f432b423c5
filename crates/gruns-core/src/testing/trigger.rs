use async_trait::async_trait;

use crate::{
    api::{ApiError, ApiResult, Page, TriggerApi},
    error::Operation,
    resource::{TriggerJob, TriggerState},
    testing::{Call, store::Store},
};

/// In-memory [`TriggerApi`] that records every call.
pub struct InMemoryTriggers {
    store: Store<TriggerJob>,
}

impl Default for InMemoryTriggers {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTriggers {
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

    /// Seed a trigger without recording a call.
    pub fn insert(&self, trigger: TriggerJob) {
        self.store.insert(trigger.name.clone(), trigger);
    }

    /// Make the next call of kind `op` fail with `err`.
    pub fn fail_next(&self, op: Operation, err: ApiError) {
        self.store.fail_next(op, err);
    }

    pub fn get(&self, name: &str) -> Option<TriggerJob> {
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
impl TriggerApi for InMemoryTriggers {
    async fn get_trigger(&self, name: &str) -> ApiResult<TriggerJob> {
        self.store.enter(Operation::Get, name)?;
        self.store.get(name)
    }

    async fn create_trigger(&self, _parent: &str, trigger: &TriggerJob) -> ApiResult<TriggerJob> {
        self.store.enter(Operation::Create, &trigger.name)?;
        self.store.create(&trigger.name, trigger.clone())
    }

    async fn update_trigger(&self, trigger: &TriggerJob) -> ApiResult<TriggerJob> {
        self.store.enter(Operation::Update, &trigger.name)?;
        self.store.replace(&trigger.name, trigger.clone())
    }

    async fn delete_trigger(&self, name: &str) -> ApiResult<()> {
        self.store.enter(Operation::Delete, name)?;
        self.store.remove(name)
    }

    async fn list_triggers(
        &self,
        parent: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Page<TriggerJob>> {
        self.store.enter(Operation::List, parent)?;
        self.store.list(parent, page_token)
    }

    async fn pause_trigger(&self, name: &str) -> ApiResult<TriggerJob> {
        self.store.enter(Operation::Pause, name)?;
        self.store.modify(name, |t| t.state = TriggerState::Paused)
    }

    async fn resume_trigger(&self, name: &str) -> ApiResult<TriggerJob> {
        self.store.enter(Operation::Resume, name)?;
        self.store.modify(name, |t| t.state = TriggerState::Enabled)
    }
}
