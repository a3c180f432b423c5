mod job;
pub use job::JobSpec;

mod schedule;
pub use schedule::is_valid_schedule;

mod load;
pub use load::{load_jobs, parse_jobs, validate_jobs};
