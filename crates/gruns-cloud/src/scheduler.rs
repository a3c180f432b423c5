use async_trait::async_trait;
use gruns_core::{
    api::{ApiResult, LIST_PAGE_SIZE, Page, TriggerApi},
    resource::TriggerJob,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{CloudError, RestClient, TokenHandle};

pub const SCHEDULER_ENDPOINT: &str = "https://cloudscheduler.googleapis.com/v1";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTriggersResponse {
    #[serde(default)]
    jobs: Vec<TriggerJob>,
    #[serde(default)]
    next_page_token: String,
}

/// Cloud Scheduler API v1 client. Every call completes synchronously on the server.
#[derive(Clone)]
pub struct CloudScheduler {
    rest: RestClient,
}

impl CloudScheduler {
    pub fn new(token: TokenHandle) -> Result<Self, CloudError> {
        Self::with_endpoint(SCHEDULER_ENDPOINT, token)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, token: TokenHandle) -> Result<Self, CloudError> {
        Ok(Self {
            rest: RestClient::new(endpoint, token)?,
        })
    }
}

#[async_trait]
impl TriggerApi for CloudScheduler {
    async fn get_trigger(&self, name: &str) -> ApiResult<TriggerJob> {
        Ok(self.rest.get(name, &[]).await?)
    }

    async fn create_trigger(&self, parent: &str, trigger: &TriggerJob) -> ApiResult<TriggerJob> {
        Ok(self
            .rest
            .post(&format!("{parent}/jobs"), &[], trigger)
            .await?)
    }

    async fn update_trigger(&self, trigger: &TriggerJob) -> ApiResult<TriggerJob> {
        Ok(self.rest.patch(&trigger.name, trigger).await?)
    }

    async fn delete_trigger(&self, name: &str) -> ApiResult<()> {
        let _: Value = self.rest.delete(name).await?;
        Ok(())
    }

    async fn list_triggers(
        &self,
        parent: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Page<TriggerJob>> {
        let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        let page: ListTriggersResponse = self.rest.get(&format!("{parent}/jobs"), &query).await?;
        Ok(Page {
            items: page.jobs,
            next_page_token: Some(page.next_page_token).filter(|t| !t.is_empty()),
        })
    }

    async fn pause_trigger(&self, name: &str) -> ApiResult<TriggerJob> {
        Ok(self
            .rest
            .post(&format!("{name}:pause"), &[], &json!({}))
            .await?)
    }

    async fn resume_trigger(&self, name: &str) -> ApiResult<TriggerJob> {
        Ok(self
            .rest
            .post(&format!("{name}:resume"), &[], &json!({}))
            .await?)
    }
}
