//! In-memory API fakes and a recording observer for reconciler tests.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for downstream
//! crates.
mod execution;
pub use execution::InMemoryExecutionJobs;

mod trigger;
pub use trigger::InMemoryTriggers;

mod observer;
pub use observer::{Event, RecordingObserver};

mod store;
pub use store::Call;
