use std::fmt;

use gruns_model::{JobSpec, RuntimeContext};
use tracing::instrument;

use crate::{
    api::{ExecutionJobHandle, TriggerHandle},
    error::CoreError,
    observer::{ObserverHandle, noop_observer},
    prepare::prepare_jobs,
    reconcile::{ExecutionOutcome, TriggerOutcome, cleanup, reconcile_execution_job, reconcile_trigger},
    resource::naming,
};

/// Counts of what one [`Reconciler::apply`] run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub jobs_created: usize,
    pub jobs_updated: usize,
    pub jobs_unchanged: usize,
    pub jobs_deleted: usize,
    pub triggers_created: usize,
    pub triggers_updated: usize,
    pub triggers_unchanged: usize,
    pub triggers_transitioned: usize,
    pub triggers_deleted: usize,
}

impl ApplySummary {
    fn record_execution(&mut self, outcome: &ExecutionOutcome) {
        match outcome {
            ExecutionOutcome::Created => self.jobs_created += 1,
            ExecutionOutcome::Updated(_) => self.jobs_updated += 1,
            ExecutionOutcome::Unchanged => self.jobs_unchanged += 1,
        }
    }

    fn record_trigger(&mut self, outcome: &TriggerOutcome) {
        if outcome.created {
            self.triggers_created += 1;
        }
        if outcome.transition.is_some() {
            self.triggers_transitioned += 1;
        }
        if !outcome.mask.is_empty() {
            self.triggers_updated += 1;
        }
        if outcome.is_unchanged() {
            self.triggers_unchanged += 1;
        }
    }
}

impl fmt::Display for ApplySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "execution jobs: {} created, {} updated, {} unchanged, {} deleted; \
             triggers: {} created, {} updated, {} unchanged, {} paused/resumed, {} deleted",
            self.jobs_created,
            self.jobs_updated,
            self.jobs_unchanged,
            self.jobs_deleted,
            self.triggers_created,
            self.triggers_updated,
            self.triggers_unchanged,
            self.triggers_transitioned,
            self.triggers_deleted,
        )
    }
}

/// Drives a full run: prepare the job list, reconcile every job, then clean up orphans.
///
/// Holds the run's context, both API clients and the observer every step reports to.
pub struct Reconciler {
    ctx: RuntimeContext,
    jobs: ExecutionJobHandle,
    triggers: TriggerHandle,
    observer: ObserverHandle,
}

impl Reconciler {
    /// Create a reconciler that reports to a no-op observer.
    pub fn new(ctx: RuntimeContext, jobs: ExecutionJobHandle, triggers: TriggerHandle) -> Self {
        Self {
            ctx,
            jobs,
            triggers,
            observer: noop_observer(),
        }
    }

    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.observer = observer;
        self
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.ctx
    }

    /// Interpolate, default and validate `jobs` against this reconciler's context.
    pub fn prepare(&self, jobs: Vec<JobSpec>) -> Result<Vec<JobSpec>, CoreError> {
        prepare_jobs(&self.ctx, jobs)
    }

    /// Reconcile `jobs` in order and delete what they no longer declare.
    ///
    /// For every job the trigger (if scheduled) is handled before the execution job. The first
    /// error stops the run, is attributed to its job, and skips cleanup.
    #[instrument(level = "debug", skip_all, fields(jobs = jobs.len()))]
    pub async fn apply(&self, jobs: Vec<JobSpec>) -> Result<ApplySummary, CoreError> {
        let jobs = self.prepare(jobs)?;
        let observer = self.observer.as_ref();

        let mut summary = ApplySummary::default();
        let mut desired_jobs = Vec::with_capacity(jobs.len());
        let mut desired_triggers = Vec::new();

        for job in &jobs {
            desired_jobs.push(job.name.clone());

            if job.is_scheduled() {
                desired_triggers.push(naming::trigger_id(&job.name));
                let outcome = reconcile_trigger(&self.ctx, self.triggers.as_ref(), observer, job)
                    .await
                    .map_err(|e| e.for_job(job.name.as_str()))?;
                summary.record_trigger(&outcome);
            }

            let outcome = reconcile_execution_job(&self.ctx, self.jobs.as_ref(), observer, job)
                .await
                .map_err(|e| e.for_job(job.name.as_str()))?;
            summary.record_execution(&outcome);
        }

        let report = cleanup(
            &self.ctx,
            self.jobs.as_ref(),
            self.triggers.as_ref(),
            observer,
            &desired_triggers,
            &desired_jobs,
        )
        .await?;
        summary.triggers_deleted = report.deleted_triggers.len();
        summary.jobs_deleted = report.deleted_jobs.len();

        Ok(summary)
    }
}
