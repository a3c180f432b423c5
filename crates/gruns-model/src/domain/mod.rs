mod env;
pub use env::{Env, EnvSource, EnvVar};

mod labels;
pub use labels::Labels;

mod constants;
pub use constants::{
    DEFAULT_CPU, DEFAULT_JOBS_FILE, DEFAULT_MAX_RETRIES, DEFAULT_MEMORY, DEFAULT_PARALLELISM,
    DEFAULT_SECRET_VERSION, DEFAULT_TASK_COUNT, DEFAULT_TIMEOUT_SECONDS, DEFAULT_TIMEZONE,
    MANAGED_BY_LABEL, MANAGED_BY_TAG, TRIGGER_SUFFIX,
};
