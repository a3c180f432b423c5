//! Local mirrors of the remote resources.
//!
//! These types follow the JSON shape of the Cloud Run v2 `Job` and Cloud Scheduler v1 `Job`
//! resources. Fields the reconcilers do not manage are kept in `extra` maps so an update
//! sends back the complete object.
use std::fmt;

mod execution;
pub use execution::{
    Container, EnvVarSource, ExecutionJob, ExecutionTemplate, LIMIT_CPU, LIMIT_MEMORY,
    ResourceRequirements, SecretKeySelector, TaskTemplate, WireEnvVar, format_duration,
    parse_duration_secs,
};

mod trigger;
pub use trigger::{HttpTarget, OAuthToken, TriggerJob, TriggerState};

pub mod naming;

/// The two kinds of remote resources managed by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ExecutionJob,
    Trigger,
}

impl ResourceKind {
    /// Low-cardinality label value for logs and metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ResourceKind::ExecutionJob => "execution_job",
            ResourceKind::Trigger => "trigger",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::ExecutionJob => f.write_str("execution job"),
            ResourceKind::Trigger => f.write_str("trigger"),
        }
    }
}
