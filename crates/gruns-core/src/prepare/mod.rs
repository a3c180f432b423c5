//! Turning loaded job definitions into reconciler input.
//!
//! Preparation runs before any remote call: placeholders are interpolated, unset fields
//! defaulted, and the resulting set validated.
use gruns_model::{JobSpec, RuntimeContext, validate_jobs};

use crate::{error::CoreError, map::DesiredExecution};

mod defaults;
pub use defaults::with_defaults;

mod interpolate;
pub use interpolate::{interpolate, interpolate_job};

/// Interpolate, default and validate `jobs`, preserving their order.
pub fn prepare_jobs(ctx: &RuntimeContext, jobs: Vec<JobSpec>) -> Result<Vec<JobSpec>, CoreError> {
    let jobs: Vec<JobSpec> = jobs
        .into_iter()
        .map(|mut job| {
            interpolate_job(ctx, &mut job);
            with_defaults(job, ctx.service_account())
        })
        .collect();

    validate_jobs(&jobs)?;
    Ok(jobs)
}

/// [`prepare_jobs`] plus a dry conversion of every job, so env conflicts surface without
/// contacting the remote APIs.
pub fn check_jobs(ctx: &RuntimeContext, jobs: Vec<JobSpec>) -> Result<Vec<JobSpec>, CoreError> {
    let jobs = prepare_jobs(ctx, jobs)?;
    for job in &jobs {
        DesiredExecution::from_spec(job).map_err(|e| e.for_job(job.name.as_str()))?;
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use gruns_model::{EnvVar, ModelError};

    use super::*;

    fn ctx() -> RuntimeContext {
        RuntimeContext::new("acme", "42", "europe-west1").with_service_account("runner@acme")
    }

    #[test]
    fn prepares_in_order() {
        let jobs = vec![
            JobSpec::new("b", "gcr.io/${PROJECT_ID}/b"),
            JobSpec::new("a", "gcr.io/${PROJECT_ID}/a"),
        ];
        let jobs = prepare_jobs(&ctx(), jobs).unwrap();

        assert_eq!(jobs[0].name, "b");
        assert_eq!(jobs[0].image, "gcr.io/acme/b");
        assert_eq!(jobs[1].service_account, "runner@acme");
    }

    #[test]
    fn interpolated_service_account_is_not_overwritten() {
        let mut job = JobSpec::new("a", "img");
        job.service_account = "${TRIGGER_SERVICE_ACCOUNT}".into();
        let jobs = prepare_jobs(&ctx(), vec![job]).unwrap();
        assert_eq!(jobs[0].service_account, "42-compute@developer.gserviceaccount.com");
    }

    #[test]
    fn preparing_twice_changes_nothing() {
        let once = prepare_jobs(&ctx(), vec![JobSpec::new("a", "${REGION}/img")]).unwrap();
        let twice = prepare_jobs(&ctx(), once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_duplicate_names() {
        let jobs = vec![JobSpec::new("a", "img"), JobSpec::new("a", "img")];
        assert!(matches!(
            prepare_jobs(&ctx(), jobs),
            Err(CoreError::Model(ModelError::DuplicateName(name))) if name == "a"
        ));
    }

    #[test]
    fn check_reports_env_conflict_with_job_name() {
        let mut job = JobSpec::new("nightly", "img");
        let mut var = EnvVar::literal("KEY", "v");
        var.secret = "s".into();
        job.env.push(var);

        let err = check_jobs(&ctx(), vec![job]).unwrap_err();
        assert_eq!(err.job(), Some("nightly"));
        assert!(err.to_string().contains("KEY"));
    }
}
