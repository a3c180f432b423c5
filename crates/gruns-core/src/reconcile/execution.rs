use gruns_model::{JobSpec, RuntimeContext};
use tracing::{debug, instrument};

use crate::{
    api::{ApiError, ExecutionJobApi},
    diff::{EXECUTION_JOB_FIELDS, UpdateMask, diff_and_apply},
    error::{CoreError, Operation},
    map::DesiredExecution,
    observer::ReconcileObserver,
    resource::{ResourceKind, naming},
};

const KIND: ResourceKind = ResourceKind::ExecutionJob;

/// What [`reconcile_execution_job`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Created,
    Updated(UpdateMask),
    Unchanged,
}

/// Bring the execution job of `job` in line with its definition.
///
/// The job is created when the API reports it missing; any other get failure propagates. An
/// existing job gets at most one update call, carrying the full object, and none when nothing
/// differs. Env vars are validated before the first remote call.
#[instrument(level = "debug", skip_all, fields(job = %job.name))]
pub async fn reconcile_execution_job(
    ctx: &RuntimeContext,
    api: &dyn ExecutionJobApi,
    observer: &dyn ReconcileObserver,
    job: &JobSpec,
) -> Result<ExecutionOutcome, CoreError> {
    let desired = DesiredExecution::from_spec(job)?;
    let name = naming::execution_job_name(ctx, &job.name);

    let mut remote = match api.get_job(&name).await {
        Ok(remote) => remote,
        Err(ApiError::NotFound(_)) => {
            debug!(%name, "execution job not found, creating");
            api.create_job(&naming::parent(ctx), &job.name, &desired.to_resource())
                .await
                .map_err(CoreError::remote(KIND, Operation::Create))?;
            observer.resource_created(KIND, &name);
            return Ok(ExecutionOutcome::Created);
        }
        Err(e) => return Err(CoreError::remote(KIND, Operation::Get)(e)),
    };

    let mask = diff_and_apply(&mut remote, &desired, EXECUTION_JOB_FIELDS);
    if mask.is_empty() {
        observer.resource_unchanged(KIND, &name);
        return Ok(ExecutionOutcome::Unchanged);
    }

    api.update_job(&remote)
        .await
        .map_err(CoreError::remote(KIND, Operation::Update))?;
    observer.resource_updated(KIND, &name, &mask);
    Ok(ExecutionOutcome::Updated(mask))
}
