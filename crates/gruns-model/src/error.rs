use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not load job file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse job file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("job name must not be empty")]
    EmptyName,

    #[error("duplicate job name: {0}")]
    DuplicateName(String),

    #[error("job '{0}' has no image")]
    MissingImage(String),

    #[error("job '{job}' has invalid schedule '{schedule}': {reason}")]
    InvalidSchedule {
        job: String,
        schedule: String,
        reason: String,
    },

    #[error("env var {0} has both value and secret set")]
    ConflictingEnv(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
