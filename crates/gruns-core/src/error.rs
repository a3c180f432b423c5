use std::fmt;

use gruns_model::ModelError;
use thiserror::Error;

use crate::{api::ApiError, resource::ResourceKind};

/// Remote operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Create,
    Update,
    Delete,
    List,
    Pause,
    Resume,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
            Operation::Pause => "pause",
            Operation::Resume => "resume",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid job definition: {0}")]
    Model(#[from] ModelError),

    #[error("trigger {0} does not target an http endpoint")]
    MissingHttpTarget(String),

    #[error("{kind} {op} failed: {source}")]
    Remote {
        kind: ResourceKind,
        op: Operation,
        #[source]
        source: ApiError,
    },

    #[error("job {job}: {source}")]
    Job {
        job: String,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    pub(crate) fn remote(kind: ResourceKind, op: Operation) -> impl FnOnce(ApiError) -> Self {
        move |source| CoreError::Remote { kind, op, source }
    }

    /// Attach the name of the job being processed when the error surfaced.
    pub fn for_job(self, job: impl Into<String>) -> Self {
        CoreError::Job {
            job: job.into(),
            source: Box::new(self),
        }
    }

    /// Name of the job this error is attributed to, if any.
    pub fn job(&self) -> Option<&str> {
        match self {
            CoreError::Job { job, .. } => Some(job),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_errors_name_job_kind_and_operation() {
        let err = CoreError::remote(ResourceKind::Trigger, Operation::Pause)(ApiError::Transient(
            "503 unavailable".into(),
        ))
        .for_job("nightly");

        assert_eq!(err.job(), Some("nightly"));
        assert_eq!(
            err.to_string(),
            "job nightly: trigger pause failed: transient remote failure: 503 unavailable"
        );
    }

    #[test]
    fn model_errors_convert() {
        let err: CoreError = ModelError::ConflictingEnv("KEY".into()).into();
        assert!(err.to_string().contains("KEY"));
        assert_eq!(err.job(), None);
    }
}
