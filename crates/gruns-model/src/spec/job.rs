use serde::{Deserialize, Serialize};

use crate::Env;

/// Declarative description of one job read from the job file.
///
/// `JobSpec` describes *what* should exist remotely: an execution job named `name` and, when
/// `schedule` is non-empty, a trigger named `<name>-trigger` invoking it.
///
/// Numeric and string fields use their zero value for "unset"; defaults are filled in before
/// reconciliation. Keys follow the job file format (`tasks`, `retries`, `timeout`, `env`,
/// `service_account`) and also accept the longer spellings as aliases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSpec {
    /// Unique job name, also used as the remote resource id.
    pub name: String,
    /// Container image, may contain `${...}` placeholders.
    pub image: String,
    /// Service account the job runs as, may contain `${...}` placeholders.
    #[serde(alias = "serviceAccount")]
    pub service_account: String,
    /// Number of tasks allowed to run in parallel.
    pub parallelism: u32,
    /// Number of tasks per execution.
    #[serde(rename = "tasks", alias = "task_count", alias = "taskCount")]
    pub task_count: u32,
    /// Retries per failed task.
    #[serde(rename = "retries", alias = "max_retries", alias = "maxRetries")]
    pub max_retries: u32,
    /// Per-task timeout in seconds.
    #[serde(rename = "timeout", alias = "timeout_seconds", alias = "timeoutSeconds")]
    pub timeout_seconds: u64,
    /// Container arguments as one space-delimited string.
    pub args: String,
    /// CPU limit, e.g. `1000m`.
    pub cpu: String,
    /// Memory limit, e.g. `512Mi`.
    pub memory: String,
    /// Environment variables in declaration order.
    #[serde(rename = "env", alias = "env_vars", alias = "envVars")]
    pub env: Env,
    /// Unix-cron expression; empty means the job has no trigger.
    pub schedule: String,
}

impl JobSpec {
    /// Create a job with only a name and an image set.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    /// Attach a schedule, builder style.
    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// Returns `true` if the job needs a trigger.
    pub fn is_scheduled(&self) -> bool {
        !self.schedule.trim().is_empty()
    }

    /// Split `args` into container arguments.
    ///
    /// Runs of whitespace separate arguments; an empty string yields no arguments.
    pub fn arg_list(&self) -> Vec<String> {
        self.args.split_whitespace().map(str::to_string).collect()
    }
}
