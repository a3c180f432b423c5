use std::{collections::HashSet, future::Future};

use gruns_model::RuntimeContext;
use tracing::{debug, instrument};

use crate::{
    api::{ApiResult, ExecutionJobApi, Page, TriggerApi},
    error::{CoreError, Operation},
    observer::ReconcileObserver,
    resource::{ResourceKind, naming},
};

/// Short names of the resources deleted by [`cleanup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted_triggers: Vec<String>,
    pub deleted_jobs: Vec<String>,
}

/// Delete remote resources that are no longer declared: triggers first, then execution jobs.
///
/// `desired_triggers` and `desired_jobs` hold short ids (`nightly-trigger`, `nightly`).
pub async fn cleanup(
    ctx: &RuntimeContext,
    jobs: &dyn ExecutionJobApi,
    triggers: &dyn TriggerApi,
    observer: &dyn ReconcileObserver,
    desired_triggers: &[String],
    desired_jobs: &[String],
) -> Result<CleanupReport, CoreError> {
    let deleted_triggers = cleanup_triggers(ctx, triggers, observer, desired_triggers).await?;
    let deleted_jobs = cleanup_execution_jobs(ctx, jobs, observer, desired_jobs).await?;
    Ok(CleanupReport {
        deleted_triggers,
        deleted_jobs,
    })
}

/// Delete every trigger under the project and region whose id is not in `desired`.
///
/// Triggers carry no ownership label, so membership in `desired` is the only filter.
#[instrument(level = "debug", skip_all)]
pub async fn cleanup_triggers(
    ctx: &RuntimeContext,
    api: &dyn TriggerApi,
    observer: &dyn ReconcileObserver,
    desired: &[String],
) -> Result<Vec<String>, CoreError> {
    const KIND: ResourceKind = ResourceKind::Trigger;

    let parent = naming::parent(ctx);
    let desired: HashSet<&str> = desired.iter().map(String::as_str).collect();

    let scope = parent.as_str();
    let orphans: Vec<String> = list_all(KIND, move |token| async move {
        api.list_triggers(scope, token.as_deref()).await
    })
    .await?
    .into_iter()
    .filter(|t| !desired.contains(naming::trim_parent(scope, &t.name)))
    .map(|t| t.name)
    .collect();

    let mut deleted = Vec::with_capacity(orphans.len());
    for name in orphans {
        let short = naming::trim_parent(&parent, &name).to_string();
        debug!(%name, "deleting orphaned trigger");
        api.delete_trigger(&name)
            .await
            .map_err(|e| CoreError::remote(KIND, Operation::Delete)(e).for_job(short.as_str()))?;
        observer.resource_deleted(KIND, &name);
        deleted.push(short);
    }
    Ok(deleted)
}

/// Delete every managed execution job under the project and region whose name is not in
/// `desired`. Jobs without the ownership label are never touched.
#[instrument(level = "debug", skip_all)]
pub async fn cleanup_execution_jobs(
    ctx: &RuntimeContext,
    api: &dyn ExecutionJobApi,
    observer: &dyn ReconcileObserver,
    desired: &[String],
) -> Result<Vec<String>, CoreError> {
    const KIND: ResourceKind = ResourceKind::ExecutionJob;

    let parent = naming::parent(ctx);
    let desired: HashSet<&str> = desired.iter().map(String::as_str).collect();

    let scope = parent.as_str();
    let orphans: Vec<String> = list_all(KIND, move |token| async move {
        api.list_jobs(scope, token.as_deref()).await
    })
    .await?
    .into_iter()
    .filter(|j| j.labels.is_managed() && !desired.contains(naming::trim_parent(scope, &j.name)))
    .map(|j| j.name)
    .collect();

    let mut deleted = Vec::with_capacity(orphans.len());
    for name in orphans {
        let short = naming::trim_parent(&parent, &name).to_string();
        debug!(%name, "deleting orphaned execution job");
        api.delete_job(&name)
            .await
            .map_err(|e| CoreError::remote(KIND, Operation::Delete)(e).for_job(short.as_str()))?;
        observer.resource_deleted(KIND, &name);
        deleted.push(short);
    }
    Ok(deleted)
}

/// Collect every item of a paginated list call.
///
/// `fetch` receives the page token (`None` for the first page). An empty token ends the
/// listing like a missing one.
async fn list_all<T, F, Fut>(kind: ResourceKind, mut fetch: F) -> Result<Vec<T>, CoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = ApiResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = fetch(token.take())
            .await
            .map_err(CoreError::remote(kind, Operation::List))?;
        items.extend(page.items);
        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}
