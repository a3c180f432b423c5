use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;

use crate::{
    JobSpec,
    error::{ModelError, ModelResult},
    spec::schedule::check_schedule,
};

/// Top-level shape of the job file.
#[derive(Debug, Default, Deserialize)]
struct JobFile {
    #[serde(default)]
    jobs: Vec<JobSpec>,
}

/// Read and parse the job file at `path`.
pub fn load_jobs(path: impl AsRef<Path>) -> ModelResult<Vec<JobSpec>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ModelError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jobs(&text)
}

/// Parse job file contents. An empty document yields no jobs.
pub fn parse_jobs(text: &str) -> ModelResult<Vec<JobSpec>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: JobFile = serde_yaml::from_str(text)?;
    Ok(file.jobs)
}

/// Check the invariants of a desired job set.
///
/// Rules:
/// - every name is non-empty and unique;
/// - every image is non-empty;
/// - every schedule is empty or a five-field unix-cron expression.
pub fn validate_jobs(jobs: &[JobSpec]) -> ModelResult<()> {
    let mut seen = HashSet::with_capacity(jobs.len());

    for job in jobs {
        if job.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if !seen.insert(job.name.as_str()) {
            return Err(ModelError::DuplicateName(job.name.clone()));
        }
        if job.image.trim().is_empty() {
            return Err(ModelError::MissingImage(job.name.clone()));
        }
        if job.is_scheduled() {
            check_schedule(&job.schedule).map_err(|reason| ModelError::InvalidSchedule {
                job: job.name.clone(),
                schedule: job.schedule.clone(),
                reason,
            })?;
        }
    }
    Ok(())
}
