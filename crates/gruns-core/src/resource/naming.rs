//! Resource paths derived from the runtime context.
use gruns_model::{RuntimeContext, TRIGGER_SUFFIX};

/// Collection parent shared by both APIs: `projects/<project>/locations/<region>`.
pub fn parent(ctx: &RuntimeContext) -> String {
    format!(
        "projects/{}/locations/{}",
        ctx.project_id(),
        ctx.region()
    )
}

/// Full name of the execution job for `job_name`.
pub fn execution_job_name(ctx: &RuntimeContext, job_name: &str) -> String {
    format!("{}/jobs/{job_name}", parent(ctx))
}

/// Trigger id for `job_name`, `<job_name>-trigger`.
pub fn trigger_id(job_name: &str) -> String {
    format!("{job_name}{TRIGGER_SUFFIX}")
}

/// Full name of the trigger for `job_name`.
pub fn trigger_name(ctx: &RuntimeContext, job_name: &str) -> String {
    format!("{}/jobs/{}", parent(ctx), trigger_id(job_name))
}

/// Run endpoint of the execution job, the URI a trigger POSTs to.
pub fn trigger_uri(ctx: &RuntimeContext, job_name: &str) -> String {
    format!(
        "https://{region}-run.googleapis.com/apis/run.googleapis.com/v1/namespaces/{project}/jobs/{job_name}:run",
        region = ctx.region(),
        project = ctx.project_id(),
    )
}

/// Strip `<parent>/jobs/` from a full resource name.
///
/// Names outside `parent` are returned unchanged.
pub fn trim_parent<'a>(parent: &str, name: &'a str) -> &'a str {
    name.strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix("/jobs/"))
        .unwrap_or(name)
}
