//! Per-resource reconcilers and orphan cleanup.
//!
//! Every function here takes the context, the API client and the observer explicitly and
//! issues its remote calls one at a time.
mod cleanup;
pub use cleanup::{CleanupReport, cleanup, cleanup_execution_jobs, cleanup_triggers};

mod execution;
pub use execution::{ExecutionOutcome, reconcile_execution_job};

mod trigger;
pub use trigger::{TriggerOutcome, reconcile_trigger};
