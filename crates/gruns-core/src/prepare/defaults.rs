use gruns_model::{
    DEFAULT_CPU, DEFAULT_MAX_RETRIES, DEFAULT_MEMORY, DEFAULT_PARALLELISM, DEFAULT_TASK_COUNT,
    DEFAULT_TIMEOUT_SECONDS, JobSpec,
};

/// Fill unset optional fields of `job`.
///
/// Zero numbers and empty strings count as unset; explicit values are kept.
pub fn with_defaults(mut job: JobSpec, default_service_account: &str) -> JobSpec {
    if job.memory.is_empty() {
        job.memory = DEFAULT_MEMORY.to_string();
    }
    if job.cpu.is_empty() {
        job.cpu = DEFAULT_CPU.to_string();
    }
    if job.service_account.is_empty() {
        job.service_account = default_service_account.to_string();
    }
    if job.task_count == 0 {
        job.task_count = DEFAULT_TASK_COUNT;
    }
    if job.parallelism == 0 {
        job.parallelism = DEFAULT_PARALLELISM;
    }
    if job.timeout_seconds == 0 {
        job.timeout_seconds = DEFAULT_TIMEOUT_SECONDS;
    }
    if job.max_retries == 0 {
        job.max_retries = DEFAULT_MAX_RETRIES;
    }
    job
}
