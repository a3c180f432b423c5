//! Common model-level constants.
//!
//! Well-known label keys and the defaults applied to unset [`crate::JobSpec`] fields.

/// Label key marking a remote resource as owned by this tool.
pub const MANAGED_BY_LABEL: &str = "managed_by";

/// Value stored under [`MANAGED_BY_LABEL`] on every execution job we create.
///
/// Orphan cleanup only deletes execution jobs carrying exactly this tag.
pub const MANAGED_BY_TAG: &str = "gruns-cli";

/// Suffix appended to a job name to form its trigger id.
pub const TRIGGER_SUFFIX: &str = "-trigger";

/// Timezone every trigger is forced to.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Job file read when none is given on the command line.
pub const DEFAULT_JOBS_FILE: &str = "jobs.yml";

pub const DEFAULT_MEMORY: &str = "512Mi";
pub const DEFAULT_CPU: &str = "1000m";
pub const DEFAULT_TASK_COUNT: u32 = 1;
pub const DEFAULT_PARALLELISM: u32 = 1;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 900;
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Secret version used when an env var references a secret without pinning one.
pub const DEFAULT_SECRET_VERSION: &str = "latest";
