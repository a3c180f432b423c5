//! Reconciliation event reporting.
//!
//! The reconcilers emit only `debug` traces of their own. Every create, update, transition and
//! deletion is reported to a [`ReconcileObserver`] handed down by the caller. Logging
//! (`gruns-observe`) and metrics (`gruns-prometheus`) plug in here.
mod backend;
pub use backend::{ObserverHandle, ReconcileObserver};

mod fanout;
pub use fanout::FanoutObserver;

mod noop;
pub use noop::NoOpObserver;

use std::sync::Arc;

/// Create a no-op observer handle.
#[inline]
pub fn noop_observer() -> ObserverHandle {
    Arc::new(NoOpObserver)
}
