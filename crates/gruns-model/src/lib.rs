mod domain;
pub use domain::{
    DEFAULT_CPU, DEFAULT_JOBS_FILE, DEFAULT_MAX_RETRIES, DEFAULT_MEMORY, DEFAULT_PARALLELISM,
    DEFAULT_SECRET_VERSION, DEFAULT_TASK_COUNT, DEFAULT_TIMEOUT_SECONDS, DEFAULT_TIMEZONE,
    MANAGED_BY_LABEL, MANAGED_BY_TAG, TRIGGER_SUFFIX,
};
pub use domain::{Env, EnvSource, EnvVar, Labels};

mod error;
pub use error::{ModelError, ModelResult};

mod context;
pub use context::{RuntimeContext, compute_default_service_account};

mod spec;
pub use spec::{JobSpec, is_valid_schedule, load_jobs, parse_jobs, validate_jobs};
